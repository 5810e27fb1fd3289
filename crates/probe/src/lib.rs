// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Flag bit recovery from matrices over `GF(p)`.
//!
//! The input is an `out` file holding a prime `p`, an ignored line, and a list
//! of matrices, one per line. Each matrix is raised to `p // 2` and the result
//! is probed over a window of even powers; the first power that yields an
//! invertible candidate of the expected rank decides one bit. Matrices with no
//! such power, or whose arithmetic fails, are skipped.
//!
//! [`decrypt_flag`] is the best-effort entry point and never fails. The typed
//! pipeline underneath ([`OutputParser`], [`classify_matrix`],
//! [`extract_bits`], [`recover_flag`]) reports what went wrong.

pub mod config;
pub mod decrypt;
pub mod errors;
pub mod extractor;
pub mod parser;
pub mod telemetry;

pub use config::{ProbeConfig, ProbeOverrides};
pub use decrypt::{decrypt_flag, decrypt_flag_with, recover_flag};
pub use errors::{ProbeError, ProbeResult};
pub use extractor::{classify_matrix, extract_bits, Classification, FlagBits, SkipReason};
pub use parser::{parse_output_file, parse_output_str, OutputParser, ParsedOutput};
