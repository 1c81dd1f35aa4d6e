use clap::Parser;
use negfix_cli::{calibrate_file, init_logging};
use negfix_core::calibration::{format_profile, CurveMode};
use negfix_core::presets::profile_to_yaml;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "negfix-gamma")]
#[command(version, about = "Measure a gamma profile from a scanned calibration chart", long_about = None)]
struct Cli {
    /// Square chart scan (TIFF or PNG)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Chart has a single curve (black and white film)
    #[arg(long)]
    bw: bool,

    /// Print a named YAML profile entry instead
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logging(cli.verbose) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let mode = if cli.bw {
        CurveMode::BlackAndWhite
    } else {
        CurveMode::Color
    };

    let profile = match calibrate_file(&cli.input, mode) {
        Ok(profile) => profile,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.name {
        Some(name) => match profile_to_yaml(&name, &profile) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => print!("{}", format_profile(&profile)),
    }

    ExitCode::SUCCESS
}
