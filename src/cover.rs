// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Set operations over disjoint covers.
//!
//! Both functions expect slices shaped like the output of
//! [`QuantumCollection::disjoint`](crate::QuantumCollection::disjoint):
//! monotone by start, pairwise disjoint, every element with `start <= stop`.

use crate::quantum::Quantum;

/// Returns the stretches of `outer` not covered by `cover`.
///
/// Quanta are closed, so each gap is reported by the instants that bound it
/// (the neighbouring cover endpoints, or the edges of `outer`). Zero-length
/// gaps are skipped. Runs in a single O(n) pass.
///
/// ```
/// use quanta_cover::{gaps_within, Quantum};
///
/// let outer = Quantum::new(0.0, 100.0);
/// let cover = [Quantum::new(10.0, 20.0), Quantum::new(50.0, 100.0)];
/// assert_eq!(
///     gaps_within(outer, &cover),
///     vec![Quantum::new(0.0, 10.0), Quantum::new(20.0, 50.0)]
/// );
/// ```
pub fn gaps_within(outer: Quantum, cover: &[Quantum]) -> Vec<Quantum> {
    let mut gaps = Vec::new();
    let mut cursor = outer.start();
    for q in cover {
        if cursor >= outer.stop() {
            break;
        }
        if q.start() > cursor {
            gaps.push(Quantum::new(cursor, q.start().min(outer.stop())));
        }
        if q.stop() > cursor {
            cursor = q.stop();
        }
    }
    if cursor < outer.stop() {
        gaps.push(Quantum::new(cursor, outer.stop()));
    }
    gaps
}

/// Returns the instants covered by both `a` and `b`, in chronological order.
///
/// Uses an O(n + m) merge. Covers that merely touch produce a zero-length
/// quantum at the shared instant.
pub fn intersect_covers(a: &[Quantum], b: &[Quantum]) -> Vec<Quantum> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let start = a[i].start().max(b[j].start());
        let stop = a[i].stop().min(b[j].stop());
        if start <= stop {
            result.push(Quantum::new(start, stop));
        }
        if a[i].stop() <= b[j].stop() {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}
