// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Reader for the `out` file format.
//!
//! ```text
//! <p>
//! <ignored line>
//! [
//! <one matrix per line>
//! ...
//! ]
//! ```
//!
//! A matrix line is decoded by stripping every `[` and `]`, rewriting each
//! `),` as `);`, splitting rows on `;` and entries on `,`. The rewrite has to
//! stay exactly as is: existing files rely on `),` marking a row boundary.
//!
//! Failure is file-scoped. One bad line aborts the whole parse and no partial
//! matrix list is returned.

use crate::config::ProbeConfig;
use crate::errors::{ProbeError, ProbeResult};
use matprobe_field::{FieldMatrix, PrimeField};
use num_bigint::{BigInt, BigUint};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// The modulus and matrices read from an `out` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutput {
    pub field: PrimeField,
    pub matrices: Vec<FieldMatrix>,
}

impl ParsedOutput {
    pub fn modulus(&self) -> &BigUint {
        self.field.modulus()
    }
}

/// Parses `out` files. Only the modulus policy is configurable.
#[derive(Debug, Clone)]
pub struct OutputParser {
    require_prime_modulus: bool,
}

impl Default for OutputParser {
    fn default() -> Self {
        Self {
            require_prime_modulus: true,
        }
    }
}

impl OutputParser {
    pub fn new(require_prime_modulus: bool) -> Self {
        Self {
            require_prime_modulus,
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.require_prime_modulus)
    }

    /// Opens `path` and parses it. The handle is dropped before returning.
    pub fn parse_file(&self, path: &Path) -> ProbeResult<ParsedOutput> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProbeError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ProbeError::Io(e),
        })?;
        self.parse_reader(BufReader::new(file))
    }

    pub fn parse_str(&self, text: &str) -> ProbeResult<ParsedOutput> {
        self.parse_reader(text.as_bytes())
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> ProbeResult<ParsedOutput> {
        let mut lines = reader.lines();

        let first = lines
            .next()
            .transpose()?
            .ok_or_else(|| ProbeError::parse(1, "input is empty"))?;
        let field = self.parse_modulus(&first)?;

        // Line 2 holds the input matrices, which the probe never needs.
        if lines.next().transpose()?.is_none() {
            debug!("input ends after the modulus line");
        }

        let mut matrices = Vec::new();
        for (idx, line) in lines.enumerate() {
            let line_no = idx + 3;
            let line = line?;
            match line.trim() {
                "[" => continue,
                "]" => break,
                text => {
                    let matrix = parse_matrix_line(line_no, text, &field)?;
                    debug!(
                        line = line_no,
                        rows = matrix.rows(),
                        cols = matrix.cols(),
                        "parsed matrix"
                    );
                    matrices.push(matrix);
                }
            }
        }

        info!(modulus = %field.modulus(), count = matrices.len(), "parsed matrix list");
        Ok(ParsedOutput { field, matrices })
    }

    fn parse_modulus(&self, line: &str) -> ProbeResult<PrimeField> {
        let value = BigInt::from_str(line.trim())
            .map_err(|e| ProbeError::parse(1, format!("invalid modulus {:?}: {}", line.trim(), e)))?;
        let modulus = value
            .to_biguint()
            .ok_or_else(|| ProbeError::parse(1, format!("modulus {} is negative", value)))?;

        let field = if self.require_prime_modulus {
            PrimeField::new(modulus)
        } else {
            PrimeField::new_unchecked(modulus)
        };
        field.map_err(ProbeError::InvalidModulus)
    }
}

/// Decodes one matrix line (already trimmed) into a matrix over `field`.
///
/// `line_no` is only used for error reporting.
pub fn parse_matrix_line(line_no: usize, line: &str, field: &PrimeField) -> ProbeResult<FieldMatrix> {
    let cleaned = line.replace(['[', ']'], "").replace("),", ");");

    let rows = cleaned
        .split(';')
        .map(|row| {
            // every row but the last still carries its closing `)`
            row.replace(['(', ')'], "")
                .split(',')
                .map(|token| parse_entry(line_no, token))
                .collect::<ProbeResult<Vec<BigInt>>>()
        })
        .collect::<ProbeResult<Vec<Vec<BigInt>>>>()?;

    FieldMatrix::from_signed_rows(field, rows).map_err(|e| ProbeError::parse(line_no, e.to_string()))
}

fn parse_entry(line_no: usize, token: &str) -> ProbeResult<BigInt> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ProbeError::parse(line_no, "empty matrix entry"));
    }
    BigInt::from_str(token)
        .map_err(|e| ProbeError::parse(line_no, format!("invalid matrix entry {:?}: {}", token, e)))
}

/// Parses `path` with the default parser.
pub fn parse_output_file(path: impl AsRef<Path>) -> ProbeResult<ParsedOutput> {
    OutputParser::default().parse_file(path.as_ref())
}

/// Parses an in-memory `out` file with the default parser.
pub fn parse_output_str(text: &str) -> ProbeResult<ParsedOutput> {
    OutputParser::default().parse_str(text)
}
