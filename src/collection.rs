// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ordered collections of [`Quantum`] values and the disjoint-cover sweep.
//!
//! A [`QuantumCollection`] is either *raw* (arbitrary order, overlaps allowed)
//! or *disjoint* (monotone by start, no two neighbours intersecting). The
//! collection does not track which; it depends on the operations the caller
//! has applied. Aggregate durations sum the elements as they currently stand,
//! so on a raw collection overlapping time is counted more than once. Call
//! [`QuantumCollection::make_disjoint`] first (or use the `covered_*`
//! queries) to get the true covered duration.

use crate::quantum::{Quantum, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use qtty::Milliseconds;
use std::cmp::Ordering;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of merging two quanta.
///
/// Behaves as a one- or two-element sequence: [`Merge::Joined`] holds the
/// spanning quantum of an intersecting pair, [`Merge::Apart`] holds the
/// original pair in the order it was given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Merge {
    Joined(Quantum),
    Apart(Quantum, Quantum),
}

impl Merge {
    /// Number of quanta in the result (1 or 2).
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Merge::Joined(_) => 1,
            Merge::Apart(..) => 2,
        }
    }

    /// Always `false`; a merge yields at least one quantum.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the pair intersected and collapsed into one quantum.
    #[inline]
    pub fn is_joined(&self) -> bool {
        matches!(self, Merge::Joined(_))
    }

    /// The merge result as a one- or two-element vector.
    pub fn into_vec(self) -> Vec<Quantum> {
        match self {
            Merge::Joined(q) => vec![q],
            Merge::Apart(a, b) => vec![a, b],
        }
    }
}

impl IntoIterator for Merge {
    type Item = Quantum;
    type IntoIter = std::vec::IntoIter<Quantum>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

/// An owned, ordered sequence of [`Quantum`] values.
///
/// # Examples
///
/// ```
/// use quanta_cover::{Quantum, QuantumCollection};
///
/// let mut quanta = QuantumCollection::new();
/// quanta.insert_all([
///     Quantum::new(30.0, 40.0),
///     Quantum::new(0.0, 10.0),
///     Quantum::new(5.0, 20.0),
/// ]);
///
/// let cover = quanta.disjoint(false);
/// assert_eq!(cover, vec![Quantum::new(0.0, 20.0), Quantum::new(30.0, 40.0)]);
///
/// // The raw sum double-counts [5, 10]; the cover does not.
/// assert_eq!(quanta.total_ms(), 35.0);
/// assert_eq!(quanta.covered_ms(), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct QuantumCollection {
    elements: Vec<Quantum>,
}

impl QuantumCollection {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection that takes ownership of `elements` as-is.
    #[inline]
    pub fn with_elements(elements: Vec<Quantum>) -> Self {
        QuantumCollection { elements }
    }

    /// Appends every item, preserving their relative order. Duplicates are kept.
    pub fn insert_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Quantum>,
    {
        self.elements.extend(items);
    }

    /// The backing sequence.
    #[inline]
    pub fn elements(&self) -> &[Quantum] {
        &self.elements
    }

    /// Replaces the backing sequence outright.
    #[inline]
    pub fn set_elements(&mut self, elements: Vec<Quantum>) {
        self.elements = elements;
    }

    /// Consumes the collection and returns the backing sequence.
    #[inline]
    pub fn into_elements(self) -> Vec<Quantum> {
        self.elements
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the collection holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements in their current order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Quantum> {
        self.elements.iter()
    }

    // ── ordering ──────────────────────────────────────────────────────

    /// Default ordering predicate: `a` sorts at or after `b`.
    ///
    /// Non-strict, so two quanta with equal starts compare `true` both ways.
    #[inline]
    pub fn compare(a: &Quantum, b: &Quantum) -> bool {
        a.start() >= b.start()
    }

    /// A copy of the elements ordered by [`compare`](Self::compare).
    ///
    /// The sort is stable: quanta with equal starts keep their insertion order.
    /// The collection itself is left untouched.
    pub fn sorted(&self) -> Vec<Quantum> {
        self.sorted_by(Self::compare)
    }

    /// A copy of the elements ordered by `at_or_after`, which must answer
    /// "does `a` sort at or after `b`?" consistently for every pair.
    ///
    /// ```
    /// use quanta_cover::{Quantum, QuantumCollection};
    ///
    /// let quanta: QuantumCollection =
    ///     [Quantum::new(1.0, 2.0), Quantum::new(5.0, 6.0)].into_iter().collect();
    ///
    /// let latest_first = quanta.sorted_by(|a, b| a.start() <= b.start());
    /// assert_eq!(latest_first[0], Quantum::new(5.0, 6.0));
    /// ```
    pub fn sorted_by<F>(&self, at_or_after: F) -> Vec<Quantum>
    where
        F: Fn(&Quantum, &Quantum) -> bool,
    {
        let mut ordered = self.elements.clone();
        ordered.sort_by(|a, b| match (at_or_after(a, b), at_or_after(b, a)) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        });
        ordered
    }

    // ── pairwise operations ───────────────────────────────────────────

    /// Closed-interval overlap test; symmetric, touching endpoints intersect.
    #[inline]
    pub fn intersects(a: &Quantum, b: &Quantum) -> bool {
        a.intersects(b)
    }

    /// Merges an intersecting pair into `[min(starts), max(stops)]`; otherwise
    /// returns the pair unchanged and in the given order.
    ///
    /// ```
    /// use quanta_cover::{Merge, Quantum, QuantumCollection};
    ///
    /// let a = Quantum::new(5.0, 10.0);
    /// let b = Quantum::new(0.0, 6.0);
    /// assert_eq!(QuantumCollection::merge(&a, &b), Merge::Joined(Quantum::new(0.0, 10.0)));
    ///
    /// let c = Quantum::new(20.0, 30.0);
    /// assert_eq!(QuantumCollection::merge(&c, &a), Merge::Apart(c, a));
    /// ```
    pub fn merge(a: &Quantum, b: &Quantum) -> Merge {
        if a.intersects(b) {
            Merge::Joined(a.hull(b))
        } else {
            Merge::Apart(*a, *b)
        }
    }

    // ── disjoint cover ────────────────────────────────────────────────

    /// Returns the minimal monotone sequence of pairwise-disjoint quanta whose
    /// union equals the union of the elements.
    ///
    /// With `already_sorted` set the backing sequence is swept as-is and the
    /// caller vouches that it is monotone by start; an unsorted sequence then
    /// yields an incomplete coalescing. An empty collection yields an empty
    /// cover.
    ///
    /// Runs in O(n log n) when sorting, O(n) otherwise.
    pub fn disjoint(&self, already_sorted: bool) -> Vec<Quantum> {
        if already_sorted {
            sweep(&self.elements)
        } else {
            sweep(&self.sorted())
        }
    }

    /// Replaces the backing sequence with its disjoint cover.
    pub fn make_disjoint(&mut self, already_sorted: bool) {
        let cover = self.disjoint(already_sorted);
        debug!(
            before = self.elements.len(),
            after = cover.len(),
            "collapsed quanta into disjoint cover"
        );
        self.elements = cover;
    }

    /// Bounding quantum from the smallest start to the largest stop.
    pub fn span(&self) -> Option<Quantum> {
        let (first, rest) = self.elements.split_first()?;
        Some(rest.iter().fold(*first, |acc, q| acc.hull(q)))
    }

    // ── aggregates over the current elements ──────────────────────────

    /// Sum of element durations in milliseconds, overlaps included.
    pub fn total_ms(&self) -> f64 {
        self.elements.iter().map(Quantum::duration_ms).sum()
    }

    #[inline]
    pub fn total_seconds(&self) -> f64 {
        self.total_ms() / MS_PER_SECOND
    }

    #[inline]
    pub fn total_minutes(&self) -> f64 {
        self.total_ms() / MS_PER_MINUTE
    }

    #[inline]
    pub fn total_hours(&self) -> f64 {
        self.total_ms() / MS_PER_HOUR
    }

    /// [`total_ms`](Self::total_ms) as a typed quantity.
    #[inline]
    pub fn total(&self) -> Milliseconds {
        Milliseconds::new(self.total_ms())
    }

    // ── aggregates over the cover ─────────────────────────────────────

    /// Milliseconds covered by the union of the elements, each instant counted once.
    pub fn covered_ms(&self) -> f64 {
        self.disjoint(false).iter().map(Quantum::duration_ms).sum()
    }

    #[inline]
    pub fn covered_seconds(&self) -> f64 {
        self.covered_ms() / MS_PER_SECOND
    }

    #[inline]
    pub fn covered_minutes(&self) -> f64 {
        self.covered_ms() / MS_PER_MINUTE
    }

    #[inline]
    pub fn covered_hours(&self) -> f64 {
        self.covered_ms() / MS_PER_HOUR
    }
}

/// Left-to-right fold of `ordered` into a disjoint cover.
fn sweep(ordered: &[Quantum]) -> Vec<Quantum> {
    let Some((first, rest)) = ordered.split_first() else {
        return Vec::new();
    };

    let mut cover = Vec::new();
    let mut current = *first;
    for next in rest {
        match QuantumCollection::merge(&current, next) {
            Merge::Joined(merged) => {
                trace!(%current, %next, %merged, "absorbed overlap");
                current = merged;
            }
            Merge::Apart(done, pending) => {
                cover.push(done);
                current = pending;
            }
        }
    }
    cover.push(current);
    cover
}

impl From<Vec<Quantum>> for QuantumCollection {
    #[inline]
    fn from(elements: Vec<Quantum>) -> Self {
        Self::with_elements(elements)
    }
}

impl FromIterator<Quantum> for QuantumCollection {
    fn from_iter<I: IntoIterator<Item = Quantum>>(iter: I) -> Self {
        Self::with_elements(iter.into_iter().collect())
    }
}

impl Extend<Quantum> for QuantumCollection {
    fn extend<I: IntoIterator<Item = Quantum>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl IntoIterator for QuantumCollection {
    type Item = Quantum;
    type IntoIter = std::vec::IntoIter<Quantum>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuantumCollection {
    type Item = &'a Quantum;
    type IntoIter = std::slice::Iter<'a, Quantum>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuantumCollection {
        let mut quanta = QuantumCollection::new();
        quanta.insert_all([
            Quantum::new(123.0, 321.0),
            Quantum::new(2_342_933.0, 82_888_329.0),
            Quantum::new(2_322.0, 23_421.0),
            Quantum::new(3_232_123_423.0, 238_232_482_738.0),
            Quantum::new(2.0, 12_342.0),
        ]);
        quanta
    }

    fn starts(quanta: &[Quantum]) -> Vec<f64> {
        quanta.iter().map(Quantum::start).collect()
    }

    #[test]
    fn test_insert_all_preserves_order_and_duplicates() {
        let mut quanta = QuantumCollection::new();
        quanta.insert_all([Quantum::new(5.0, 6.0), Quantum::new(1.0, 2.0)]);
        quanta.insert_all(vec![Quantum::new(5.0, 6.0)]);
        assert_eq!(
            quanta.elements(),
            &[
                Quantum::new(5.0, 6.0),
                Quantum::new(1.0, 2.0),
                Quantum::new(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn test_compare_is_non_strict() {
        let a = Quantum::new(10.0, 20.0);
        let b = Quantum::new(10.0, 30.0);
        let c = Quantum::new(5.0, 6.0);
        assert!(QuantumCollection::compare(&a, &b));
        assert!(QuantumCollection::compare(&b, &a));
        assert!(QuantumCollection::compare(&a, &c));
        assert!(!QuantumCollection::compare(&c, &a));
    }

    #[test]
    fn test_sorted_is_monotone_and_read_only() {
        let quanta = sample();
        let before = quanta.elements().to_vec();
        let ordered = quanta.sorted();

        assert_eq!(
            starts(&ordered),
            vec![2.0, 123.0, 2_322.0, 2_342_933.0, 3_232_123_423.0]
        );
        assert!(ordered.windows(2).all(|w| w[0].start() <= w[1].start()));
        assert_eq!(quanta.elements(), before.as_slice());
    }

    #[test]
    fn test_sorted_is_stable_for_equal_starts() {
        let quanta: QuantumCollection = [
            Quantum::new(4.0, 9.0),
            Quantum::new(1.0, 3.0),
            Quantum::new(4.0, 5.0),
            Quantum::new(4.0, 7.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            quanta.sorted(),
            vec![
                Quantum::new(1.0, 3.0),
                Quantum::new(4.0, 9.0),
                Quantum::new(4.0, 5.0),
                Quantum::new(4.0, 7.0),
            ]
        );
    }

    #[test]
    fn test_sorted_by_custom_comparator() {
        let quanta = sample();
        let by_length = quanta.sorted_by(|a, b| a.duration_ms() >= b.duration_ms());
        assert_eq!(by_length[0], Quantum::new(123.0, 321.0));
        assert_eq!(
            by_length[4],
            Quantum::new(3_232_123_423.0, 238_232_482_738.0)
        );
    }

    #[test]
    fn test_set_elements_replaces() {
        let mut quanta = sample();
        quanta.set_elements(vec![Quantum::new(0.0, 1.0)]);
        assert_eq!(quanta.elements(), &[Quantum::new(0.0, 1.0)]);
        assert_eq!(quanta.len(), 1);
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let cases = [
            (Quantum::new(0.0, 10.0), Quantum::new(5.0, 15.0)),
            (Quantum::new(0.0, 10.0), Quantum::new(10.0, 15.0)),
            (Quantum::new(0.0, 10.0), Quantum::new(11.0, 15.0)),
            (Quantum::new(0.0, 10.0), Quantum::new(2.0, 3.0)),
            (Quantum::new(7.0, 7.0), Quantum::new(0.0, 7.0)),
            (Quantum::new(7.0, 7.0), Quantum::new(7.0, 7.0)),
        ];
        for (a, b) in cases {
            assert_eq!(
                QuantumCollection::intersects(&a, &b),
                QuantumCollection::intersects(&b, &a),
                "asymmetric for {} and {}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_merge_intersecting_takes_min_start_and_max_stop() {
        let later = Quantum::new(50.0, 60.0);
        let earlier = Quantum::new(10.0, 55.0);
        let merged = QuantumCollection::merge(&later, &earlier);

        assert!(merged.is_joined());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.into_vec(), vec![Quantum::new(10.0, 60.0)]);
    }

    #[test]
    fn test_merge_nested_keeps_outer() {
        let outer = Quantum::new(0.0, 100.0);
        let inner = Quantum::new(20.0, 30.0);
        assert_eq!(
            QuantumCollection::merge(&outer, &inner),
            Merge::Joined(outer)
        );
    }

    #[test]
    fn test_merge_disjoint_preserves_given_order() {
        let a = Quantum::new(50.0, 60.0);
        let b = Quantum::new(0.0, 10.0);
        let merged = QuantumCollection::merge(&a, &b);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_disjoint_reference_scenario() {
        let quanta = sample();
        let cover = quanta.disjoint(false);

        assert_eq!(
            cover,
            vec![
                Quantum::new(2.0, 23_421.0),
                Quantum::new(2_342_933.0, 82_888_329.0),
                Quantum::new(3_232_123_423.0, 238_232_482_738.0),
            ]
        );
        assert!(cover
            .windows(2)
            .all(|w| !QuantumCollection::intersects(&w[0], &w[1])));
    }

    #[test]
    fn test_disjoint_empty_and_single() {
        assert!(QuantumCollection::new().disjoint(false).is_empty());
        assert!(QuantumCollection::new().disjoint(true).is_empty());

        let single: QuantumCollection = [Quantum::new(3.0, 4.0)].into_iter().collect();
        assert_eq!(single.disjoint(false), vec![Quantum::new(3.0, 4.0)]);
    }

    #[test]
    fn test_disjoint_joins_touching_and_duplicates() {
        let quanta: QuantumCollection = [
            Quantum::new(10.0, 20.0),
            Quantum::new(0.0, 10.0),
            Quantum::new(0.0, 10.0),
            Quantum::new(20.0, 20.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(quanta.disjoint(false), vec![Quantum::new(0.0, 20.0)]);
    }

    #[test]
    fn test_disjoint_is_idempotent() {
        let cover = sample().disjoint(false);
        let again = QuantumCollection::with_elements(cover.clone());
        assert_eq!(again.disjoint(true), cover);
        assert_eq!(again.disjoint(false), cover);
    }

    #[test]
    fn test_disjoint_trusts_already_sorted_flag() {
        let unsorted: QuantumCollection = [
            Quantum::new(10.0, 20.0),
            Quantum::new(30.0, 40.0),
            Quantum::new(15.0, 35.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(unsorted.disjoint(false), vec![Quantum::new(10.0, 40.0)]);
        assert_eq!(
            unsorted.disjoint(true),
            vec![Quantum::new(10.0, 20.0), Quantum::new(15.0, 40.0)]
        );
    }

    #[test]
    fn test_make_disjoint_replaces_elements() {
        let mut quanta = sample();
        quanta.make_disjoint(false);
        assert_eq!(quanta.len(), 3);
        assert_eq!(quanta.elements(), sample().disjoint(false).as_slice());
    }

    #[test]
    fn test_totals_raw_versus_cover() {
        let mut quanta = sample();
        let raw_ms = (321.0 - 123.0)
            + (82_888_329.0 - 2_342_933.0)
            + (23_421.0 - 2_322.0)
            + (238_232_482_738.0 - 3_232_123_423.0)
            + (12_342.0 - 2.0);
        assert_eq!(quanta.total_ms(), raw_ms);

        let covered_ms = (23_421.0 - 2.0)
            + (82_888_329.0 - 2_342_933.0)
            + (238_232_482_738.0 - 3_232_123_423.0);
        assert_eq!(quanta.covered_ms(), covered_ms);

        let cover = quanta.disjoint(false);
        quanta.set_elements(cover);
        assert_eq!(quanta.total_ms(), covered_ms);
        assert_eq!(quanta.total(), Milliseconds::new(covered_ms));
        assert_eq!(quanta.total_seconds(), covered_ms / 1_000.0);
        assert_eq!(quanta.total_minutes(), covered_ms / 60_000.0);
        assert_eq!(quanta.total_hours(), covered_ms / 3_600_000.0);
    }

    #[test]
    fn test_covered_units() {
        let quanta: QuantumCollection =
            [Quantum::new(0.0, 3_600_000.0), Quantum::new(0.0, 60_000.0)]
                .into_iter()
                .collect();
        assert_eq!(quanta.covered_hours(), 1.0);
        assert_eq!(quanta.covered_minutes(), 60.0);
        assert_eq!(quanta.covered_seconds(), 3_600.0);
        assert_eq!(quanta.total_minutes(), 61.0);
    }

    #[test]
    fn test_span() {
        assert_eq!(QuantumCollection::new().span(), None);
        assert_eq!(
            sample().span(),
            Some(Quantum::new(2.0, 238_232_482_738.0))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_impls_cover_collection() {
        fn assert_serde<T: Serialize + for<'de> Deserialize<'de>>() {}
        assert_serde::<Quantum>();
        assert_serde::<QuantumCollection>();
    }

    #[test]
    fn test_iteration_and_extend() {
        let mut quanta = QuantumCollection::from(vec![Quantum::new(0.0, 1.0)]);
        quanta.extend([Quantum::new(2.0, 3.0)]);

        let borrowed: Vec<f64> = (&quanta).into_iter().map(Quantum::stop).collect();
        assert_eq!(borrowed, vec![1.0, 3.0]);
        assert_eq!(quanta.iter().count(), 2);
        assert_eq!(quanta.into_iter().last(), Some(Quantum::new(2.0, 3.0)));
    }
}
