// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Millisecond time quanta and disjoint covers.
//!
//! # Core types
//!
//! - [`Quantum`] — a closed interval `[start, stop]` in milliseconds.
//! - [`QuantumCollection`] — an owned sequence of quanta with sorting,
//!   overlap testing, pairwise merging and reduction to a disjoint cover.
//! - [`Merge`] — the one-or-two quantum outcome of [`QuantumCollection::merge`].
//!
//! # Typical flow
//!
//! ```
//! use quanta_cover::{Quantum, QuantumCollection};
//!
//! let mut quanta = QuantumCollection::new();
//! quanta.insert_all([
//!     Quantum::new(123.0, 321.0),
//!     Quantum::new(2.0, 12_342.0),
//!     Quantum::new(2_322.0, 23_421.0),
//! ]);
//!
//! quanta.make_disjoint(false);
//! assert_eq!(quanta.elements(), &[Quantum::new(2.0, 23_421.0)]);
//! assert_eq!(quanta.total_ms(), 23_419.0);
//! ```
//!
//! Intervals are closed: quanta that touch at an endpoint intersect and are
//! merged. The aggregate `total_*` queries sum the elements as they are, so
//! call [`QuantumCollection::make_disjoint`] (or use `covered_*`) before
//! reading them if overlaps must not be double counted.
//!
//! # Set operations
//!
//! [`gaps_within`] and [`intersect_covers`] work on disjoint covers.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Quantum`] and [`QuantumCollection`].

mod collection;
mod cover;
mod error;
mod quantum;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use collection::{Merge, QuantumCollection};
pub use cover::{gaps_within, intersect_covers};
pub use error::ParseQuantumError;
pub use quantum::{Quantum, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
