// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for the probing pipeline.
//!
//! Every variant here is a file-level failure: it aborts the whole run and
//! `decrypt_flag` maps it to an empty result. Per-matrix arithmetic failures
//! are not errors of this type; they become `Classification::Skipped`.

use matprobe_field::FieldError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// The input file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Any other I/O failure while reading the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed content on a given (1-based) line
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The modulus on line 1 cannot define a field
    #[error("Invalid modulus on line 1: {0}")]
    InvalidModulus(FieldError),

    /// Probe configuration could not be loaded or is inconsistent
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for probing operations
pub type ProbeResult<T> = Result<T, ProbeError>;

impl ProbeError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        ProbeError::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ProbeError::Config {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ProbeError {
    fn from(err: figment::Error) -> Self {
        ProbeError::config(err.to_string())
    }
}
