// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! The prime field `GF(p)`.
//!
//! Elements are plain `BigUint` values kept in canonical form `[0, p)`. The field
//! itself only carries the modulus; every operation takes its operands already
//! reduced and returns a reduced result.

use crate::errors::{FieldResult, MathError};
use crate::math::{is_probable_prime, mod_inverse, mod_pow, reduce_signed};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use std::fmt;

/// A prime field `GF(p)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Creates the field after checking that `modulus` is prime.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidModulus`] if `modulus <= 1` or is composite.
    pub fn new(modulus: BigUint) -> FieldResult<Self> {
        if !is_probable_prime(&modulus) {
            return Err(MathError::InvalidModulus {
                modulus: modulus.to_string(),
                reason: "modulus must be a prime".to_string(),
            }
            .into());
        }
        Ok(Self { modulus })
    }

    /// Creates the field without a primality check.
    ///
    /// Only `modulus >= 2` is enforced. With a composite modulus, inversion of a
    /// zero divisor fails and surfaces as an error from the matrix routines.
    pub fn new_unchecked(modulus: BigUint) -> FieldResult<Self> {
        if modulus < BigUint::from(2u32) {
            return Err(MathError::InvalidModulus {
                modulus: modulus.to_string(),
                reason: "modulus must be at least 2".to_string(),
            }
            .into());
        }
        Ok(Self { modulus })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// `p // 2`
    pub fn half_order(&self) -> BigUint {
        &self.modulus >> 1u32
    }

    pub fn zero(&self) -> BigUint {
        BigUint::zero()
    }

    pub fn one(&self) -> BigUint {
        BigUint::one()
    }

    /// Maps an arbitrary unsigned integer into the field.
    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Maps an arbitrary signed integer into the field. `-1` becomes `p - 1`.
    pub fn reduce_signed(&self, value: &BigInt) -> BigUint {
        reduce_signed(value, &self.modulus)
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (&self.modulus + a - b) % &self.modulus
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.modulus - a
        }
    }

    pub fn inv(&self, a: &BigUint) -> FieldResult<BigUint> {
        mod_inverse(a, &self.modulus)
    }

    pub fn pow(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        mod_pow(base, exp, &self.modulus)
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.modulus)
    }
}
