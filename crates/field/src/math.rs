// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{FieldResult, MathError};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Witnesses for Miller-Rabin. Deterministic for every n < 3.3 * 10^24.
const MILLER_RABIN_WITNESSES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Compute modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }
    base.modpow(exp, modulus)
}

/// Compute the modular inverse of `a` using the extended Euclidean algorithm.
///
/// Returns an error if the inverse doesn't exist (gcd(a, modulus) != 1).
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> FieldResult<BigUint> {
    let no_inverse = || MathError::NoModularInverse {
        a: a.to_string(),
        modulus: modulus.to_string(),
    };

    let a_reduced = a % modulus;
    if a_reduced.is_zero() {
        return Err(no_inverse().into());
    }

    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let egcd = BigInt::from_biguint(Sign::Plus, a_reduced).extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return Err(no_inverse().into());
    }

    // x may be negative; mod_floor brings it back into [0, m)
    egcd.x
        .mod_floor(&m)
        .to_biguint()
        .ok_or_else(|| no_inverse().into())
}

/// Reduce a signed integer into `[0, modulus)`.
pub fn reduce_signed(value: &BigInt, modulus: &BigUint) -> BigUint {
    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
    // mod_floor with a positive modulus is never negative
    value
        .mod_floor(&m)
        .to_biguint()
        .unwrap_or_else(BigUint::zero)
}

/// Miller-Rabin primality test over the fixed witness set.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    if *n < two {
        return false;
    }
    for w in MILLER_RABIN_WITNESSES {
        let w = BigUint::from(w);
        if *n == w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    // n - 1 = 2^r * d with d odd
    let n_minus_1 = n - &one;
    let r = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> r;

    'witness: for w in MILLER_RABIN_WITNESSES {
        let mut x = mod_pow(&BigUint::from(w), &d, n);
        if x == one || x == n_minus_1 {
            continue;
        }
        for _ in 1..r {
            x = mod_pow(&x, &two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
