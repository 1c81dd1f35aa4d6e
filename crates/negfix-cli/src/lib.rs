//! Shared utilities for the negfix command-line tools
//!
//! File-level conversion and calibration, plus logger setup, used by the
//! `negfix` and `negfix-gamma` binaries.

pub mod logging;
pub mod processing;

pub use logging::init_logging;
pub use processing::{
    build_convert_options, calibrate_file, convert_file, load_registry, ConvertParams,
};
