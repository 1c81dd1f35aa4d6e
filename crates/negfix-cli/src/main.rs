use clap::Parser;
use negfix_cli::{convert_file, init_logging, load_registry, ConvertParams};
use negfix_core::config::load_pipeline_config;
use negfix_core::ProfileRegistry;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "negfix")]
#[command(version, about = "Film negative to positive converter", long_about = None)]
struct Cli {
    /// Input negative (TIFF or PNG)
    #[arg(value_name = "INPUT", required_unless_present = "list_profiles")]
    input: Option<PathBuf>,

    /// Output file; the extension picks TIFF or PNG
    #[arg(value_name = "OUTPUT", required_unless_present = "list_profiles")]
    output: Option<PathBuf>,

    /// Gamma profile name
    #[arg(short, long, value_name = "NAME")]
    gamma: Option<String>,

    /// Invert the image
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    invert: Option<bool>,

    /// Stretch each channel to full range
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    normalize: Option<bool>,

    /// Percent of each edge left out when measuring levels
    #[arg(long, value_name = "PERCENT")]
    border: Option<u32>,

    /// Pixel count a high value needs to set the white point
    #[arg(long, value_name = "N")]
    tupper: Option<u32>,

    /// Pixel count a low value needs to set the black point
    #[arg(long, value_name = "N")]
    tlower: Option<u32>,

    /// Scan of unexposed film used to remove the mask
    #[arg(long, value_name = "FILE")]
    base: Option<PathBuf>,

    /// Extra gamma profiles (YAML)
    #[arg(long, value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// Pipeline config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List available gamma profiles and exit
    #[arg(long)]
    list_profiles: bool,

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

    let config = load_pipeline_config(cli.config.as_deref());
    config.log_usage();
    let defaults = config.config.defaults;

    let profiles_file = cli.profiles.or_else(|| defaults.profiles_file.clone());
    let registry = match load_registry(profiles_file.as_deref()) {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.list_profiles {
        for (name, profile) in registry.iter() {
            println!("{}: r={}, g={}, b={}", name, profile.r, profile.g, profile.b);
        }
        return ExitCode::SUCCESS;
    }

    let gamma = match cli.gamma {
        Some(name) if registry.get(&name).is_some() => name,
        Some(name) => {
            log::error!("Unknown gamma profile '{}'", name);
            return usage_error(&registry);
        }
        None => return usage_error(&registry),
    };

    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        log::error!("INPUT and OUTPUT are required");
        return ExitCode::from(2);
    };

    let params = ConvertParams {
        gamma,
        invert: cli.invert,
        normalize: cli.normalize,
        border: cli.border,
        threshold_upper: cli.tupper,
        threshold_lower: cli.tlower,
        base: cli.base,
    };

    match convert_file(&input, &output, &params, &defaults, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn usage_error(registry: &ProfileRegistry) -> ExitCode {
    log::error!("must specify gamma profile. Options are:");
    for name in registry.names() {
        log::error!("  {}", name);
    }
    ExitCode::from(2)
}
