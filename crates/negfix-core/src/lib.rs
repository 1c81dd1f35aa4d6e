//! Negfix Core Library
//!
//! Film negative to positive conversion on 16-bit RGB grids: mask removal,
//! per-channel gamma, level normalization and inversion, plus the gamma
//! calibration scanner used to build profiles.

pub mod calibration;
pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod image;
pub mod models;
pub mod pipeline;
pub mod presets;

// Re-export commonly used types
pub use error::{NegfixError, Result};
pub use image::{Rgb16Image, MAX_SAMPLE};
pub use models::{ChannelBounds, ConvertOptions, GammaProfile, NormalizeOptions};
pub use presets::ProfileRegistry;
