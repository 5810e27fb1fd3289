// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::config::ProbeConfig;
use crate::errors::{ProbeError, ProbeResult};
use crate::extractor::{extract_bits, FlagBits};
use crate::parser::OutputParser;
use std::path::Path;
use tracing::{error, instrument};

/// Parses `path` and probes every matrix. File-level failures are returned.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn recover_flag(path: impl AsRef<Path>, config: &ProbeConfig) -> ProbeResult<FlagBits> {
    let parsed = OutputParser::from_config(config).parse_file(path.as_ref())?;
    Ok(extract_bits(&parsed, config))
}

/// Best-effort bit recovery with the default probe window.
///
/// Prints `Partially decrypted flag (bits): ...` and returns the bits. Any
/// file-level failure is logged and yields an empty string; no bits are
/// returned from a file that failed to parse part way through.
pub fn decrypt_flag(path: impl AsRef<Path>) -> String {
    decrypt_flag_with(path, &ProbeConfig::default())
}

pub fn decrypt_flag_with(path: impl AsRef<Path>, config: &ProbeConfig) -> String {
    let path = path.as_ref();
    match recover_flag(path, config) {
        Ok(flag) => {
            println!("Partially decrypted flag (bits): {}", flag);
            flag.into()
        }
        Err(e @ ProbeError::FileNotFound { .. }) => {
            error!("Error: {}", e);
            String::new()
        }
        Err(e) => {
            error!(path = %path.display(), "Error reading or processing file: {}", e);
            String::new()
        }
    }
}
