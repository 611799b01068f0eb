//! # rusty-uvvis
//!
//! Convert Agilent ChemStation UV-Vis files (.KD / .SD) to CSV.
//!
//! ```bash
//! # One CSV per spectrum next to the input
//! rusty-uvvis run1.KD samples.SD
//!
//! # Narrower detector range, Parquet output into ./out
//! rusty-uvvis --min-wavelength 200 --max-wavelength 800 --format parquet -o out *.SD
//!
//! # No arguments: pick files interactively
//! rusty-uvvis
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use rusty_uvvis::batch::{convert_all, ConvertOptions};
use rusty_uvvis::config::Config;
use rusty_uvvis::prompt::ask_for_inputs;
use rusty_uvvis::{DecodeOptions, ExportFormat, TextDecodePolicy, WavelengthRange};

/// Convert ChemStation UV-Vis binary files to CSV
#[derive(Parser)]
#[command(name = "rusty-uvvis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input .KD or .SD files (prompted for when omitted)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Lowest wavelength recorded by the detector, in nm [default: 190]
    #[arg(long)]
    min_wavelength: Option<u32>,

    /// Highest wavelength recorded by the detector, in nm [default: 1100]
    #[arg(long)]
    max_wavelength: Option<u32>,

    /// Fail on sample names that are not valid UTF-8 instead of replacing bytes
    #[arg(long)]
    strict_names: bool,

    /// Output format [default: csv]
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Write outputs here instead of beside each input
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Files converted at once (0 = all cores) [default: 0]
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Merge flags over the config file over the defaults.
fn resolve_options(cli: &Cli, config: &Config) -> Result<(ConvertOptions, usize)> {
    let wavelength_range = WavelengthRange::new(
        cli.min_wavelength
            .or(config.decode.min_wavelength)
            .unwrap_or(WavelengthRange::DEFAULT_MIN),
        cli.max_wavelength
            .or(config.decode.max_wavelength)
            .unwrap_or(WavelengthRange::DEFAULT_MAX),
    );
    let text_policy = if cli.strict_names || config.decode.strict_names.unwrap_or(false) {
        TextDecodePolicy::Strict
    } else {
        TextDecodePolicy::Replace
    };

    let options = ConvertOptions {
        decode: DecodeOptions {
            wavelength_range,
            text_policy,
            catalog: config.catalog().context("invalid marker configuration")?,
        },
        format: cli.format.or(config.export.format).unwrap_or_default(),
        output_dir: cli
            .output_dir
            .clone()
            .or_else(|| config.export.output_dir.clone()),
    };
    let jobs = cli.jobs.or(config.export.jobs).unwrap_or(0);
    Ok((options, jobs))
}

fn run(cli: Cli) -> Result<usize> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let (options, jobs) = resolve_options(&cli, &config)?;

    let files = if cli.files.is_empty() {
        ask_for_inputs().context("reading input path")?
    } else {
        cli.files.clone()
    };
    if files.is_empty() {
        bail!("No input files given");
    }

    log::info!(
        "Converting {} file(s), {} as {}",
        files.len(),
        options.decode.wavelength_range,
        options.format
    );

    let mut failures = 0;
    for outcome in convert_all(&files, &options, jobs) {
        match outcome.result {
            Ok(written) => {
                println!("{} -> {} file(s)", outcome.input.display(), written.len());
            }
            Err(e) => {
                log::error!("{e:#}");
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("{failures} file(s) could not be converted");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
