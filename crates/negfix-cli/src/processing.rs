//! File-level conversion and calibration.

use std::path::Path;
use std::path::PathBuf;

use negfix_core::calibration::{profile_chart, CurveMode};
use negfix_core::config::PipelineDefaults;
use negfix_core::decoders::decode_image;
use negfix_core::exporters::export_image;
use negfix_core::pipeline::{average_color, process_image};
use negfix_core::{ConvertOptions, GammaProfile, NormalizeOptions, ProfileRegistry, Result};

/// Conversion flags as given on the command line. `None` falls back to the
/// pipeline config.
#[derive(Debug, Clone, Default)]
pub struct ConvertParams {
    pub gamma: String,
    pub invert: Option<bool>,
    pub normalize: Option<bool>,
    pub border: Option<u32>,
    pub threshold_upper: Option<u32>,
    pub threshold_lower: Option<u32>,
    /// Scan of unexposed film used for mask removal.
    pub base: Option<PathBuf>,
}

/// Built-in profiles, plus those in `profiles_file` when given.
pub fn load_registry(profiles_file: Option<&Path>) -> Result<ProfileRegistry> {
    match profiles_file {
        Some(path) => {
            let registry = ProfileRegistry::with_file(path)?;
            log::debug!(
                "Loaded gamma profiles from {} ({} total)",
                path.display(),
                registry.len()
            );
            Ok(registry)
        }
        None => Ok(ProfileRegistry::builtin()),
    }
}

/// Resolve flags against config defaults into validated options.
///
/// The base color is left unset; it comes from decoding the base sample.
pub fn build_convert_options(
    params: &ConvertParams,
    defaults: &PipelineDefaults,
    registry: &ProfileRegistry,
) -> Result<ConvertOptions> {
    let gamma = registry.resolve(&params.gamma)?;

    let normalize = params
        .normalize
        .unwrap_or(defaults.normalize)
        .then(|| NormalizeOptions {
            border_percent: params.border.unwrap_or(defaults.border_percent),
            threshold_upper: params.threshold_upper.unwrap_or(defaults.threshold_upper),
            threshold_lower: params.threshold_lower.unwrap_or(defaults.threshold_lower),
        });

    let options = ConvertOptions {
        gamma,
        base_color: None,
        normalize,
        invert: params.invert.unwrap_or(defaults.invert),
    };
    options.validate()?;
    Ok(options)
}

/// Convert the negative at `input` and write the positive to `output`.
///
/// Options are resolved and validated before any image is read, and the
/// output file only appears once the whole pipeline has succeeded.
pub fn convert_file(
    input: &Path,
    output: &Path,
    params: &ConvertParams,
    defaults: &PipelineDefaults,
    registry: &ProfileRegistry,
) -> Result<()> {
    let mut options = build_convert_options(params, defaults, registry)?;
    log::debug!("Using gamma profile '{}'", params.gamma);

    if let Some(base_path) = &params.base {
        let sample = decode_image(base_path)?;
        options.base_color = Some(average_color(&sample)?);
    }

    let negative = decode_image(input)?;
    let positive = process_image(&negative, &options)?;
    export_image(&positive, output)?;

    log::info!("{} -> {}", input.display(), output.display());
    Ok(())
}

/// Measure the gamma profile of a calibration chart file.
pub fn calibrate_file(input: &Path, mode: CurveMode) -> Result<GammaProfile> {
    let chart = decode_image(input)?;
    profile_chart(&chart, mode)
}
