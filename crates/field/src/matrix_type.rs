// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Dense matrices over a prime field with dimension validation.

use crate::errors::{FieldError, FieldResult, MatrixError};
use crate::field::PrimeField;
use crate::utils::format_matrix;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use std::fmt;

/// A row-major matrix whose entries live in `GF(p)`.
///
/// Entries are reduced at construction, so every stored value is canonical.
///
/// # Example
///
/// ```
/// use matprobe_field::{FieldMatrix, PrimeField};
/// use num_bigint::BigUint;
///
/// let field = PrimeField::new(BigUint::from(7u32)).unwrap();
/// let m = FieldMatrix::from_u64_rows(&field, &[&[1, 2], &[3, 11]]).unwrap();
/// assert_eq!(m.rows(), 2);
/// assert_eq!(m.get(1, 1), &BigUint::from(4u32));
/// assert_eq!(m.rank().unwrap(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatrix {
    field: PrimeField,
    data: Vec<Vec<BigUint>>,
    rows: usize,
    cols: usize,
}

impl FieldMatrix {
    /// Creates a matrix from unsigned rows, reducing each entry into the field.
    ///
    /// # Errors
    ///
    /// Returns an error if rows have inconsistent lengths.
    pub fn new(field: &PrimeField, data: Vec<Vec<BigUint>>) -> FieldResult<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);

        for (i, row) in data.iter().enumerate() {
            if row.len() != cols {
                return Err(FieldError::dimension_mismatch(
                    cols,
                    row.len(),
                    format!("columns in row {}", i),
                ));
            }
        }

        let data = data
            .into_iter()
            .map(|row| row.iter().map(|v| field.reduce(v)).collect())
            .collect();

        Ok(Self {
            field: field.clone(),
            data,
            rows,
            cols,
        })
    }

    /// Creates a matrix from signed rows. Negative entries wrap around `p`.
    pub fn from_signed_rows(field: &PrimeField, data: Vec<Vec<BigInt>>) -> FieldResult<Self> {
        let reduced = data
            .iter()
            .map(|row| row.iter().map(|v| field.reduce_signed(v)).collect())
            .collect();
        Self::new(field, reduced)
    }

    /// Convenience constructor for small literal matrices.
    pub fn from_u64_rows(field: &PrimeField, data: &[&[u64]]) -> FieldResult<Self> {
        let rows = data
            .iter()
            .map(|row| row.iter().map(|v| BigUint::from(*v)).collect())
            .collect();
        Self::new(field, rows)
    }

    /// Creates a zero matrix of the specified dimensions.
    pub fn zeros(field: &PrimeField, rows: usize, cols: usize) -> Self {
        Self {
            field: field.clone(),
            data: vec![vec![BigUint::zero(); cols]; rows],
            rows,
            cols,
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(field: &PrimeField, n: usize) -> Self {
        let mut m = Self::zeros(field, n, n);
        for i in 0..n {
            m.data[i][i] = field.one();
        }
        m
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns a reference to the underlying data.
    pub fn data(&self) -> &[Vec<BigUint>] {
        &self.data
    }

    /// Gets a reference to a specific element.
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> &BigUint {
        &self.data[row][col]
    }

    fn require_square(&self, operation: &'static str) -> FieldResult<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NotSquare {
                operation,
                rows: self.rows,
                cols: self.cols,
            }
            .into())
        }
    }

    /// Matrix product `self · other` over the field.
    pub fn mul(&self, other: &FieldMatrix) -> FieldResult<FieldMatrix> {
        if self.field != other.field {
            return Err(MatrixError::FieldMismatch {
                left: self.field.modulus().to_string(),
                right: other.field.modulus().to_string(),
            }
            .into());
        }
        if self.cols != other.rows {
            return Err(FieldError::dimension_mismatch(
                self.cols,
                other.rows,
                "matrix product",
            ));
        }

        let p = self.field.modulus();
        let mut out = Self::zeros(&self.field, self.rows, other.cols);
        for (i, out_row) in out.data.iter_mut().enumerate() {
            for (j, cell) in out_row.iter_mut().enumerate() {
                let mut sum = BigUint::zero();
                for k in 0..self.cols {
                    sum += &self.data[i][k] * &other.data[k][j];
                }
                *cell = sum % p;
            }
        }
        Ok(out)
    }

    /// Raises a square matrix to `exp` by square-and-multiply.
    ///
    /// `exp = 0` yields the identity.
    pub fn pow(&self, exp: &BigUint) -> FieldResult<FieldMatrix> {
        self.require_square("exponentiation")?;

        let mut result = Self::identity(&self.field, self.rows);
        let mut base = self.clone();
        let bits = exp.bits();
        for i in 0..bits {
            if exp.bit(i) {
                result = result.mul(&base)?;
            }
            if i + 1 < bits {
                base = base.mul(&base)?;
            }
        }
        Ok(result)
    }

    /// Determinant by Gaussian elimination: product of the pivots, negated once
    /// per row swap.
    pub fn determinant(&self) -> FieldResult<BigUint> {
        self.require_square("determinant")?;

        let f = &self.field;
        let n = self.rows;
        let mut a = self.data.clone();
        let mut det = f.one();

        for col in 0..n {
            let Some(pivot) = (col..n).find(|&r| !a[r][col].is_zero()) else {
                return Ok(f.zero());
            };
            if pivot != col {
                a.swap(pivot, col);
                det = f.neg(&det);
            }

            det = f.mul(&det, &a[col][col]);
            let inv = f.inv(&a[col][col])?;

            for row in (col + 1)..n {
                if a[row][col].is_zero() {
                    continue;
                }
                let factor = f.mul(&a[row][col], &inv);
                for j in col..n {
                    let subtract = f.mul(&factor, &a[col][j]);
                    a[row][j] = f.sub(&a[row][j], &subtract);
                }
            }
        }

        Ok(det)
    }

    /// Rank by reduction to row echelon form over the field.
    pub fn rank(&self) -> FieldResult<usize> {
        let f = &self.field;
        let mut a = self.data.clone();
        let mut pivot_row = 0;

        for col in 0..self.cols {
            if pivot_row >= self.rows {
                break;
            }
            let Some(found) = (pivot_row..self.rows).find(|&r| !a[r][col].is_zero()) else {
                continue;
            };
            a.swap(pivot_row, found);

            let inv = f.inv(&a[pivot_row][col])?;
            for row in (pivot_row + 1)..self.rows {
                if a[row][col].is_zero() {
                    continue;
                }
                let factor = f.mul(&a[row][col], &inv);
                for j in col..self.cols {
                    let subtract = f.mul(&factor, &a[pivot_row][j]);
                    a[row][j] = f.sub(&a[row][j], &subtract);
                }
            }

            pivot_row += 1;
        }

        Ok(pivot_row)
    }
}

impl From<FieldMatrix> for Vec<Vec<BigUint>> {
    fn from(matrix: FieldMatrix) -> Self {
        matrix.data
    }
}

impl fmt::Display for FieldMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_matrix(&self.data, self.field.modulus()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(BigUint::from(p)).unwrap()
    }

    fn m(field: &PrimeField, rows: &[&[u64]]) -> FieldMatrix {
        FieldMatrix::from_u64_rows(field, rows).unwrap()
    }

    #[test]
    fn test_new_reduces_entries() {
        let f = gf(7);
        let a = m(&f, &[&[10, 7], &[14, 3]]);
        assert_eq!(a, m(&f, &[&[3, 0], &[0, 3]]));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let f = gf(7);
        let data = vec![
            vec![BigUint::from(1u32), BigUint::from(2u32)],
            vec![BigUint::from(3u32)],
        ];
        let err = FieldMatrix::new(&f, data).unwrap_err();
        assert!(matches!(err, FieldError::Matrix { .. }));
    }

    #[test]
    fn test_signed_rows_wrap() {
        let f = gf(7);
        let a = FieldMatrix::from_signed_rows(&f, vec![vec![BigInt::from(-1), BigInt::from(-8)]])
            .unwrap();
        assert_eq!(a, m(&f, &[&[6, 6]]));
    }

    #[test]
    fn test_mul() {
        let f = gf(11);
        let a = m(&f, &[&[1, 2], &[3, 4]]);
        let b = m(&f, &[&[5, 6], &[7, 8]]);
        // [[19, 22], [43, 50]] mod 11
        assert_eq!(a.mul(&b).unwrap(), m(&f, &[&[8, 0], &[10, 6]]));

        let c = m(&f, &[&[1, 2, 3]]);
        assert!(a.mul(&c).is_err());
        assert_eq!(c.mul(&m(&f, &[&[1], &[1], &[1]])).unwrap(), m(&f, &[&[6]]));
    }

    #[test]
    fn test_mul_field_mismatch() {
        let a = m(&gf(7), &[&[1]]);
        let b = m(&gf(11), &[&[1]]);
        assert!(matches!(a.mul(&b).unwrap_err(), FieldError::Matrix { .. }));
    }

    #[test]
    fn test_pow() {
        let f = gf(7);
        let a = m(&f, &[&[3, 0], &[0, 3]]);
        assert_eq!(a.pow(&BigUint::zero()).unwrap(), FieldMatrix::identity(&f, 2));
        assert_eq!(a.pow(&BigUint::from(3u32)).unwrap(), m(&f, &[&[6, 0], &[0, 6]]));
        assert_eq!(a.pow(&BigUint::from(6u32)).unwrap(), FieldMatrix::identity(&f, 2));

        let fib = m(&f, &[&[1, 1], &[1, 0]]);
        // F(11) = 89, F(10) = 55, F(9) = 34
        assert_eq!(
            fib.pow(&BigUint::from(10u32)).unwrap(),
            m(&f, &[&[89 % 7, 55 % 7], &[55 % 7, 34 % 7]])
        );
    }

    #[test]
    fn test_pow_requires_square() {
        let f = gf(7);
        let a = m(&f, &[&[1, 2, 3], &[4, 5, 6]]);
        let err = a.pow(&BigUint::from(2u32)).unwrap_err();
        assert!(err.to_string().contains("2x3"));
        assert!(a.determinant().is_err());
    }

    #[test]
    fn test_determinant() {
        let f = gf(7);
        assert_eq!(m(&f, &[&[1, 2], &[3, 4]]).determinant().unwrap(), BigUint::from(5u32));
        assert_eq!(m(&f, &[&[0, 1], &[1, 0]]).determinant().unwrap(), BigUint::from(6u32));
        assert_eq!(m(&f, &[&[2, 4], &[1, 2]]).determinant().unwrap(), BigUint::zero());
        assert_eq!(
            m(&f, &[&[2, 0, 1], &[1, 3, 2], &[1, 1, 2]]).determinant().unwrap(),
            BigUint::from(6u32)
        );
        assert_eq!(
            m(&f, &[&[2, 0, 1], &[1, 3, 2], &[1, 1, 1]]).determinant().unwrap(),
            BigUint::zero()
        );
        assert_eq!(FieldMatrix::identity(&f, 4).determinant().unwrap(), BigUint::from(1u32));
    }

    #[test]
    fn test_rank() {
        let f = gf(7);
        assert_eq!(m(&f, &[&[1, 2], &[3, 4]]).rank().unwrap(), 2);
        assert_eq!(m(&f, &[&[2, 4], &[1, 2]]).rank().unwrap(), 1);
        assert_eq!(FieldMatrix::zeros(&f, 3, 3).rank().unwrap(), 0);
        assert_eq!(m(&f, &[&[1, 2, 3], &[2, 4, 6]]).rank().unwrap(), 1);
        assert_eq!(m(&f, &[&[0, 1], &[0, 0], &[1, 0]]).rank().unwrap(), 2);
        // rank over GF(7) differs from rank over the rationals
        assert_eq!(m(&f, &[&[1, 1], &[1, 8]]).rank().unwrap(), 1);
    }

    #[test]
    fn test_composite_modulus_inversion_fails() {
        let f = PrimeField::new_unchecked(BigUint::from(15u32)).unwrap();
        let a = m(&f, &[&[3, 1], &[5, 2]]);
        assert!(a.determinant().is_err());
        assert!(a.rank().is_err());
    }

    proptest! {
        #[test]
        fn prop_determinant_is_multiplicative(
            a in proptest::collection::vec(0u64..97, 4),
            b in proptest::collection::vec(0u64..97, 4),
        ) {
            let f = gf(97);
            let ma = m(&f, &[&a[0..2], &a[2..4]]);
            let mb = m(&f, &[&b[0..2], &b[2..4]]);
            let lhs = ma.mul(&mb).unwrap().determinant().unwrap();
            let rhs = f.mul(&ma.determinant().unwrap(), &mb.determinant().unwrap());
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn prop_full_rank_iff_nonzero_determinant(a in proptest::collection::vec(0u64..13, 4)) {
            let f = gf(13);
            let ma = m(&f, &[&a[0..2], &a[2..4]]);
            let full = ma.rank().unwrap() == 2;
            prop_assert_eq!(full, !ma.determinant().unwrap().is_zero());
        }

        #[test]
        fn prop_pow_adds_exponents(a in proptest::collection::vec(0u64..31, 4), e1 in 0u32..40, e2 in 0u32..40) {
            let f = gf(31);
            let ma = m(&f, &[&a[0..2], &a[2..4]]);
            let lhs = ma.pow(&BigUint::from(e1 + e2)).unwrap();
            let rhs = ma.pow(&BigUint::from(e1)).unwrap().mul(&ma.pow(&BigUint::from(e2)).unwrap()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }
    }
}
