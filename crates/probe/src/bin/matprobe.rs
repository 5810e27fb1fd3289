// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Flag bit recovery CLI
//!
//! Reads an `out` file and prints the bits recovered from its matrix list.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use matprobe::telemetry::{log_level, setup_simple_tracing};
use matprobe::{extract_bits, Classification, OutputParser, ProbeConfig, ProbeOverrides};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "matprobe",
    version,
    about = "Recover flag bits from a list of matrices over GF(p) by probing their multiplicative order."
)]
struct Args {
    /// Path to the `out` file
    #[arg(default_value = "out")]
    path: PathBuf,

    /// YAML file with probe settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First power tried
    #[arg(long)]
    start: Option<u64>,

    /// End of the power window (exclusive)
    #[arg(long)]
    end: Option<u64>,

    /// Step between powers
    #[arg(long)]
    step: Option<u64>,

    /// Rank an accepted candidate must have
    #[arg(long)]
    rank: Option<usize>,

    /// Print the outcome for every matrix
    #[arg(long, default_value_t = false)]
    explain: bool,

    /// Add `-v` for info, `-vv` for debug, `-vvv` for trace output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors. Cannot be used alongside `-v`
    #[arg(short, long, action = ArgAction::SetTrue, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> ProbeOverrides {
        ProbeOverrides {
            power_start: self.start,
            power_end: self.end,
            power_step: self.step,
            expected_rank: self.rank,
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ProbeConfig::load(args.config.as_deref(), &args.overrides())
        .context("Invalid probe configuration")?;

    let parsed = match OutputParser::from_config(&config).parse_file(&args.path) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(path = %args.path.display(), "Error reading or processing file: {}", e);
            println!("Partially decrypted flag (bits): ");
            return Ok(());
        }
    };
    let flag = extract_bits(&parsed, &config);

    if args.explain {
        for (index, (matrix, outcome)) in parsed.matrices.iter().zip(flag.outcomes()).enumerate() {
            println!("matrix {:>4}: {}", index, outcome);
            if let Classification::Skipped(_) = outcome {
                print!("{}", matrix);
            }
        }
    }

    println!("Partially decrypted flag (bits): {}", flag);
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_simple_tracing(log_level(args.verbose, args.quiet));

    if let Err(err) = run(args) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
