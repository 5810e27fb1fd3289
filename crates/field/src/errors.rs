// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for prime field and matrix operations
//!
//! Detailed error enums (`MathError`, `MatrixError`) convert into the crate-wide
//! [`FieldError`] so callers only have to match on one type.

use thiserror::Error;

/// Main error type for field and matrix operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Mathematical computation errors
    #[error("Mathematical error: {message}")]
    Math { message: String },

    /// Matrix operation errors
    #[error("Matrix operation error: {message}")]
    Matrix { message: String },
}

/// Result type alias for field operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Mathematical error type for computation failures
#[derive(Error, Debug)]
pub enum MathError {
    /// Modular inverse doesn't exist
    #[error("Modular inverse does not exist for {a} mod {modulus} (gcd != 1)")]
    NoModularInverse { a: String, modulus: String },

    /// Invalid modulus for field construction
    #[error("Invalid modulus: {modulus} - {reason}")]
    InvalidModulus { modulus: String, reason: String },
}

/// Matrix operation error type
#[derive(Error, Debug)]
pub enum MatrixError {
    /// Operation requires a square matrix
    #[error("{operation} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Operands defined over different fields
    #[error("Field mismatch: GF({left}) vs GF({right})")]
    FieldMismatch { left: String, right: String },
}

impl From<MathError> for FieldError {
    fn from(err: MathError) -> Self {
        FieldError::Math {
            message: err.to_string(),
        }
    }
}

impl From<MatrixError> for FieldError {
    fn from(err: MatrixError) -> Self {
        FieldError::Matrix {
            message: err.to_string(),
        }
    }
}

impl FieldError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize, context: impl Into<String>) -> Self {
        FieldError::Matrix {
            message: format!(
                "Dimension mismatch in {}: expected {}, got {}",
                context.into(),
                expected,
                actual
            ),
        }
    }
}
