// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Per-matrix order probe.
//!
//! For a matrix `M` over `GF(p)` the probe computes `P = M^(p // 2)` and walks
//! the configured powers (by default `4, 6, ..., 498`). The first power whose
//! candidate `P^(power // 2)` has a nonzero determinant and the expected rank
//! decides the bit: `'0'` when `power % 4 == 0`, `'1'` otherwise.
//!
//! The rule is a heuristic tuned to one family of challenge matrices. Nothing
//! proves that the accepted power encodes a plaintext bit, so treat the output
//! as a guess.

use crate::config::ProbeConfig;
use crate::parser::ParsedOutput;
use matprobe_field::{FieldError, FieldMatrix, FieldResult};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use tracing::{debug, info, warn};

/// Why a matrix produced no bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No power in the window was accepted
    NoCandidate,
    /// Exponentiation, determinant or rank failed for this matrix
    Arithmetic(FieldError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCandidate => write!(f, "no accepted power in window"),
            SkipReason::Arithmetic(e) => write!(f, "{}", e),
        }
    }
}

/// Outcome of probing one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Bit { bit: char, power: u64 },
    Skipped(SkipReason),
}

impl Classification {
    pub fn bit(&self) -> Option<char> {
        match self {
            Classification::Bit { bit, .. } => Some(*bit),
            Classification::Skipped(_) => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Bit { bit, power } => write!(f, "bit {} (power {})", bit, power),
            Classification::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

/// Bit emitted for the first accepted power.
pub fn bit_for_power(power: u64) -> char {
    if power % 4 == 0 {
        '0'
    } else {
        '1'
    }
}

/// Classifies one matrix. Never fails: arithmetic errors become
/// [`SkipReason::Arithmetic`] and stop the search for this matrix.
pub fn classify_matrix(matrix: &FieldMatrix, config: &ProbeConfig) -> Classification {
    match first_accepted_power(matrix, config) {
        Ok(Some(power)) => Classification::Bit {
            bit: bit_for_power(power),
            power,
        },
        Ok(None) => Classification::Skipped(SkipReason::NoCandidate),
        Err(e) => Classification::Skipped(SkipReason::Arithmetic(e)),
    }
}

fn first_accepted_power(matrix: &FieldMatrix, config: &ProbeConfig) -> FieldResult<Option<u64>> {
    let probe = matrix.pow(&matrix.field().half_order())?;

    for power in config.powers() {
        let candidate = probe.pow(&BigUint::from(power / 2))?;
        if !candidate.determinant()?.is_zero() && candidate.rank()? == config.expected_rank {
            return Ok(Some(power));
        }
    }
    Ok(None)
}

/// The recovered bit string together with the outcome for every matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagBits {
    bits: String,
    outcomes: Vec<Classification>,
}

impl FlagBits {
    pub fn as_str(&self) -> &str {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// One entry per input matrix, in input order.
    pub fn outcomes(&self) -> &[Classification] {
        &self.outcomes
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.bit().is_none()).count()
    }

    fn push(&mut self, outcome: Classification) {
        if let Some(bit) = outcome.bit() {
            self.bits.push(bit);
        }
        self.outcomes.push(outcome);
    }
}

impl fmt::Display for FlagBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl From<FlagBits> for String {
    fn from(flag: FlagBits) -> Self {
        flag.bits
    }
}

/// Probes every parsed matrix in order and collects the emitted bits.
pub fn extract_bits(parsed: &ParsedOutput, config: &ProbeConfig) -> FlagBits {
    let mut flag = FlagBits::default();

    for (index, matrix) in parsed.matrices.iter().enumerate() {
        let outcome = classify_matrix(matrix, config);
        match &outcome {
            Classification::Bit { bit, power } => {
                debug!(index, power, %bit, "matrix classified")
            }
            Classification::Skipped(SkipReason::NoCandidate) => {
                debug!(index, "no accepted power, matrix skipped")
            }
            Classification::Skipped(SkipReason::Arithmetic(e)) => {
                warn!(index, error = %e, "error during analysis, matrix skipped")
            }
        }
        flag.push(outcome);
    }

    info!(
        matrices = parsed.matrices.len(),
        bits = flag.len(),
        skipped = flag.skipped(),
        "probe finished"
    );
    flag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_output_str;
    use matprobe_field::PrimeField;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(BigUint::from(p)).unwrap()
    }

    fn m(field: &PrimeField, rows: &[&[u64]]) -> FieldMatrix {
        FieldMatrix::from_u64_rows(field, rows).unwrap()
    }

    #[test]
    fn test_bit_for_power() {
        assert_eq!(bit_for_power(4), '0');
        assert_eq!(bit_for_power(6), '1');
        assert_eq!(bit_for_power(498), '1');
        assert_eq!(bit_for_power(496), '0');
    }

    #[test]
    fn test_scalar_matrix_mod_7() {
        // 3I -> (3I)^3 = 6I -> (6I)^2 = I at power 4
        let f = gf(7);
        let outcome = classify_matrix(&m(&f, &[&[3, 0], &[0, 3]]), &ProbeConfig::default());
        assert_eq!(outcome, Classification::Bit { bit: '0', power: 4 });
    }

    #[test]
    fn test_odd_half_power_emits_one() {
        let f = gf(7);
        let config = ProbeConfig {
            power_start: 6,
            ..Default::default()
        };
        let outcome = classify_matrix(&m(&f, &[&[2, 1], &[1, 1]]), &config);
        assert_eq!(outcome, Classification::Bit { bit: '1', power: 6 });
    }

    #[test]
    fn test_singular_matrices_are_skipped() {
        let f = gf(11);
        let config = ProbeConfig::default();
        let cases: [&[&[u64]]; 3] = [
            &[&[0, 0], &[0, 0]],
            &[&[0, 1], &[0, 0]],
            &[&[1, 2], &[2, 4]],
        ];
        for rows in cases {
            assert_eq!(
                classify_matrix(&m(&f, rows), &config),
                Classification::Skipped(SkipReason::NoCandidate)
            );
        }
    }

    #[test]
    fn test_rank_three_never_matches() {
        let f = gf(5);
        let id3 = FieldMatrix::identity(&f, 3);
        assert_eq!(
            classify_matrix(&id3, &ProbeConfig::default()),
            Classification::Skipped(SkipReason::NoCandidate)
        );

        let config = ProbeConfig {
            expected_rank: 3,
            ..Default::default()
        };
        assert_eq!(
            classify_matrix(&id3, &config),
            Classification::Bit { bit: '0', power: 4 }
        );
    }

    #[test]
    fn test_non_square_is_arithmetic_skip() {
        let f = gf(7);
        let outcome = classify_matrix(&m(&f, &[&[1, 2, 3], &[4, 5, 6]]), &ProbeConfig::default());
        assert!(matches!(
            outcome,
            Classification::Skipped(SkipReason::Arithmetic(_))
        ));
    }

    #[test]
    #[traced_test]
    fn test_extract_bits_continues_after_skips() {
        let parsed = parse_output_str(
            "7\nignored\n[\n3,0),0,3\n1,2,3),4,5,6\n0,0),0,0\n1,1),0,1\n]\n",
        )
        .unwrap();
        let flag = extract_bits(&parsed, &ProbeConfig::default());

        assert_eq!(flag.as_str(), "00");
        assert_eq!(flag.outcomes().len(), 4);
        assert_eq!(flag.skipped(), 2);
        assert_eq!(flag.to_string(), "00");
        assert!(logs_contain("error during analysis"));
        assert!(logs_contain("probe finished"));
    }

    #[test]
    fn test_extract_bits_empty() {
        let parsed = parse_output_str("7\nignored\n[\n]\n").unwrap();
        let flag = extract_bits(&parsed, &ProbeConfig::default());
        assert!(flag.is_empty());
        assert_eq!(String::from(flag), "");
    }

    proptest! {
        #[test]
        fn prop_classification_is_deterministic(a in proptest::collection::vec(0u64..23, 4)) {
            let f = gf(23);
            let matrix = m(&f, &[&a[0..2], &a[2..4]]);
            let config = ProbeConfig::default();
            prop_assert_eq!(classify_matrix(&matrix, &config), classify_matrix(&matrix, &config));
        }

        #[test]
        fn prop_invertible_2x2_gives_zero_bit(a in proptest::collection::vec(0u64..23, 4)) {
            let f = gf(23);
            let matrix = m(&f, &[&a[0..2], &a[2..4]]);
            let outcome = classify_matrix(&matrix, &ProbeConfig::default());
            if matrix.determinant().unwrap().is_zero() {
                prop_assert_eq!(outcome, Classification::Skipped(SkipReason::NoCandidate));
            } else {
                prop_assert_eq!(outcome, Classification::Bit { bit: '0', power: 4 });
            }
        }
    }
}
