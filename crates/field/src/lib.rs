// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Prime field arithmetic and dense matrices over `GF(p)`.
//!
//! The modulus is an arbitrary-precision `BigUint`. [`PrimeField`] validates it
//! with a Miller-Rabin test and provides the scalar operations; [`FieldMatrix`]
//! builds on it with products, exponentiation, determinant and rank, all
//! computed exactly over the field.
//!
//! Every fallible operation returns [`FieldResult`]. With a prime modulus and
//! well-shaped operands none of them fail; errors report non-square input,
//! mismatched dimensions, or a zero divisor met under a composite modulus
//! created with [`PrimeField::new_unchecked`].

pub mod errors;
pub mod field;
pub mod math;
pub mod matrix_type;
pub mod utils;

// Re-export commonly used types for convenience
pub use errors::{FieldError, FieldResult};
pub use field::PrimeField;
pub use matrix_type::FieldMatrix;
