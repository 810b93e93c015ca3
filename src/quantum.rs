// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The [`Quantum`] value type: a closed span `[start, stop]` on a linear
//! millisecond axis.
//!
//! Bounds are raw millisecond offsets stored as `f64`. Nothing enforces
//! `start <= stop`; a reversed quantum simply reports a negative duration.

use crate::error::ParseQuantumError;
use qtty::{Hours, Milliseconds, Minutes, Seconds};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Milliseconds per second.
pub const MS_PER_SECOND: f64 = 1_000.0;
/// Milliseconds per minute.
pub const MS_PER_MINUTE: f64 = 60_000.0;
/// Milliseconds per hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Replaces a missing or non-numeric bound with zero.
#[inline]
fn bound_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// A closed time interval `[start, stop]` expressed in milliseconds.
///
/// Equality is structural: two quanta are equal iff both bounds match exactly.
///
/// # Examples
///
/// ```
/// use quanta_cover::Quantum;
///
/// let q = Quantum::new(0.0, 198.0);
/// assert_eq!(q.duration_ms(), 198.0);
/// assert_eq!(q.duration_seconds(), 0.198);
/// assert_eq!(q.to_string(), "[ 0, 198 ]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantum {
    start: f64,
    stop: f64,
}

impl Quantum {
    /// Creates a quantum from two millisecond bounds.
    ///
    /// A `NaN` bound is replaced by `0`.
    #[inline]
    pub fn new(start: f64, stop: f64) -> Self {
        Self::from_bounds(Some(start), Some(stop))
    }

    /// Creates a quantum from optional bounds; absent or `NaN` bounds become `0`.
    ///
    /// ```
    /// use quanta_cover::Quantum;
    ///
    /// assert_eq!(Quantum::from_bounds(None, Some(5.0)), Quantum::new(0.0, 5.0));
    /// assert_eq!(Quantum::from_bounds(Some(f64::NAN), None), Quantum::default());
    /// ```
    pub fn from_bounds(start: Option<f64>, stop: Option<f64>) -> Self {
        Quantum {
            start: bound_or_zero(start),
            stop: bound_or_zero(stop),
        }
    }

    /// Creates a quantum from typed millisecond quantities.
    #[inline]
    pub fn from_millis(start: Milliseconds, stop: Milliseconds) -> Self {
        Self::new(start.value(), stop.value())
    }

    /// Start bound in milliseconds.
    #[inline]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Stop bound in milliseconds.
    #[inline]
    pub const fn stop(&self) -> f64 {
        self.stop
    }

    /// Start bound as a typed quantity.
    #[inline]
    pub fn start_ms(&self) -> Milliseconds {
        Milliseconds::new(self.start)
    }

    /// Stop bound as a typed quantity.
    #[inline]
    pub fn stop_ms(&self) -> Milliseconds {
        Milliseconds::new(self.stop)
    }

    /// `stop - start` as a typed quantity. Negative for a reversed quantum.
    #[inline]
    pub fn duration(&self) -> Milliseconds {
        Milliseconds::new(self.duration_ms())
    }

    /// `stop - start` in milliseconds.
    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.stop - self.start
    }

    /// `stop - start` in seconds.
    #[inline]
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ms() / MS_PER_SECOND
    }

    /// `stop - start` in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> f64 {
        self.duration_ms() / MS_PER_MINUTE
    }

    /// `stop - start` in hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.duration_ms() / MS_PER_HOUR
    }

    /// Duration as a typed [`Seconds`] quantity.
    #[inline]
    pub fn duration_as_seconds(&self) -> Seconds {
        Seconds::new(self.duration_seconds())
    }

    /// Duration as a typed [`Minutes`] quantity.
    #[inline]
    pub fn duration_as_minutes(&self) -> Minutes {
        Minutes::new(self.duration_minutes())
    }

    /// Duration as a typed [`Hours`] quantity.
    #[inline]
    pub fn duration_as_hours(&self) -> Hours {
        Hours::new(self.duration_hours())
    }

    /// Duration as a `chrono` delta, rounded to whole milliseconds.
    ///
    /// Returns `None` if the value does not fit chrono's representable range.
    pub fn to_time_delta(&self) -> Option<chrono::Duration> {
        let ms = self.duration_ms().round();
        if !ms.is_finite() || ms < i64::MIN as f64 || ms >= i64::MAX as f64 {
            return None;
        }
        chrono::Duration::try_milliseconds(ms as i64)
    }

    /// Whether `instant` (in milliseconds) lies in `[start, stop]`.
    #[inline]
    pub fn contains(&self, instant: f64) -> bool {
        self.start <= instant && instant <= self.stop
    }

    /// Closed-interval overlap test. Touching endpoints count as intersecting.
    ///
    /// ```
    /// use quanta_cover::Quantum;
    ///
    /// let a = Quantum::new(0.0, 10.0);
    /// assert!(a.intersects(&Quantum::new(10.0, 20.0)));
    /// assert!(!a.intersects(&Quantum::new(11.0, 20.0)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        (self.start <= other.start && self.stop >= other.start)
            || (other.start <= self.start && other.stop >= self.start)
    }

    /// Smallest quantum spanning both `self` and `other`.
    #[inline]
    pub fn hull(&self, other: &Self) -> Self {
        Quantum {
            start: self.start.min(other.start),
            stop: self.stop.max(other.stop),
        }
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {} ]", self.start, self.stop)
    }
}

impl FromStr for Quantum {
    type Err = ParseQuantumError;

    /// Parses the `"[ start, stop ]"` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(ParseQuantumError::MissingBrackets)?;

        let mut parts = inner.split(',');
        let (start, stop) = match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(stop), None) => (start.trim(), stop.trim()),
            _ => return Err(ParseQuantumError::BoundCount),
        };

        let parse = |text: &str| {
            text.parse::<f64>()
                .map_err(|_| ParseQuantumError::InvalidBound(text.to_string()))
        };
        Ok(Quantum::new(parse(start)?, parse(stop)?))
    }
}

impl From<(f64, f64)> for Quantum {
    #[inline]
    fn from((start, stop): (f64, f64)) -> Self {
        Quantum::new(start, stop)
    }
}

impl From<Range<f64>> for Quantum {
    #[inline]
    fn from(range: Range<f64>) -> Self {
        Quantum::new(range.start, range.end)
    }
}
