// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{ProbeError, ProbeResult};
use figment::{
    providers::{Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Search window and acceptance rule for the order probe.
///
/// The defaults reproduce the reference tool: even powers `4, 6, ..., 498`,
/// accepting the first candidate of rank 2 with a nonzero determinant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// First power tried (inclusive)
    pub power_start: u64,
    /// Upper bound of the window (exclusive)
    pub power_end: u64,
    pub power_step: u64,
    /// Rank a candidate must have to be accepted
    pub expected_rank: usize,
    /// Reject a composite modulus while parsing
    pub require_prime_modulus: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            power_start: 4,
            power_end: 500,
            power_step: 2,
            expected_rank: 2,
            require_prime_modulus: true,
        }
    }
}

/// Values supplied on the command line. Unset fields leave the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_step: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_rank: Option<usize>,
}

impl ProbeConfig {
    /// Layers defaults, an optional YAML file and command line overrides, in
    /// that order, then validates the result.
    pub fn load(config_file: Option<&Path>, overrides: &ProbeOverrides) -> ProbeResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(ProbeConfig::default()));

        if let Some(path) = config_file {
            let yaml = std::fs::read_to_string(path).map_err(|e| {
                ProbeError::config(format!("could not read {}: {}", path.display(), e))
            })?;
            figment = figment.merge(Yaml::string(&yaml));
        }

        let config: ProbeConfig = figment
            .merge(Serialized::defaults(overrides))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ProbeResult<()> {
        if self.power_step == 0 {
            return Err(ProbeError::config("power_step must be greater than zero"));
        }
        if self.power_start >= self.power_end {
            return Err(ProbeError::config(format!(
                "empty power window: start {} is not below end {}",
                self.power_start, self.power_end
            )));
        }
        Ok(())
    }

    /// The powers searched, in order.
    pub fn powers(&self) -> impl Iterator<Item = u64> {
        let step = usize::try_from(self.power_step).unwrap_or(usize::MAX).max(1);
        (self.power_start..self.power_end).step_by(step)
    }
}
