// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use num_bigint::BigUint;
use std::fmt::Write;

/// Renders a matrix as aligned rows, one `[a, b, ...]` per line.
pub fn format_matrix(matrix: &[Vec<BigUint>], q: &BigUint) -> String {
    let cols = matrix.first().map_or(0, Vec::len);
    let mut out = format!("{}x{} over GF({}):\n", matrix.len(), cols, q);

    // Determine max width for formatting
    let max_width = matrix
        .iter()
        .flat_map(|row| row.iter())
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1)
        .max(q.to_string().len().min(6)); // Cap at 6 for very large q

    for row in matrix {
        out.push_str("  [");
        for (i, val) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let s = val.to_string();
            // Truncate very large numbers for display
            if s.len() > 12 {
                let _ = write!(out, "{}...", &s[..9]);
            } else {
                let _ = write!(out, "{:>width$}", s, width = max_width);
            }
        }
        out.push_str("]\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matrix() {
        let m = vec![
            vec![BigUint::from(1u32), BigUint::from(10u32)],
            vec![BigUint::from(100u32), BigUint::from(0u32)],
        ];
        let s = format_matrix(&m, &BigUint::from(101u32));
        assert_eq!(s, "2x2 over GF(101):\n  [  1,  10]\n  [100,   0]\n");
    }

    #[test]
    fn test_format_matrix_truncates_large_entries() {
        let big: BigUint = "123456789012345678901234567890".parse().unwrap();
        let s = format_matrix(&[vec![big.clone()]], &(big + 1u32));
        assert!(s.contains("[123456789...]"));
    }
}
