// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.

use std::fmt;

/// Failure to parse a [`Quantum`](crate::Quantum) from its `"[ start, stop ]"` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseQuantumError {
    /// The text is not enclosed in `[` and `]`.
    MissingBrackets,
    /// The brackets do not hold exactly two comma-separated bounds.
    BoundCount,
    /// A bound is not a number.
    InvalidBound(String),
}

impl fmt::Display for ParseQuantumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseQuantumError::MissingBrackets => {
                write!(f, "quantum must be written as \"[ start, stop ]\"")
            }
            ParseQuantumError::BoundCount => write!(f, "quantum needs exactly two bounds"),
            ParseQuantumError::InvalidBound(text) => write!(f, "invalid bound '{}'", text),
        }
    }
}

impl std::error::Error for ParseQuantumError {}
