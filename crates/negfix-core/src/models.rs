//! Data models for negfix
//!
//! Gamma profiles, normalization parameters and conversion options.

use serde::{Deserialize, Serialize};

use crate::error::{NegfixError, Result};

/// Per-channel gamma exponents for a film stock.
///
/// Profiles store the measured curve exponents; the pipeline applies their
/// reciprocals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaProfile {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl GammaProfile {
    /// The identity profile.
    pub const NONE: GammaProfile = GammaProfile::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Same exponent for every channel (black and white stocks).
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Exponents used to undo this profile: `1 / value` per channel.
    pub fn reciprocal(&self) -> Self {
        Self::new(1.0 / self.r, 1.0 / self.g, 1.0 / self.b)
    }

    /// Reject exponents that are zero, negative or not finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in ["r", "g", "b"].iter().zip(self.as_array()) {
            if !value.is_finite() || value <= 0.0 {
                return Err(NegfixError::Config(format!(
                    "Gamma exponent {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for GammaProfile {
    fn default() -> Self {
        Self::NONE
    }
}

/// Parameters for per-channel level normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Percentage of width/height ignored on every side when measuring (0-100).
    pub border_percent: u32,

    /// A value counts as the channel maximum once its pixel count exceeds this.
    pub threshold_upper: u32,

    /// A value counts as the channel minimum once its pixel count exceeds this.
    pub threshold_lower: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            border_percent: 10,
            threshold_upper: 10,
            threshold_lower: 10,
        }
    }
}

impl NormalizeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.border_percent > 100 {
            return Err(NegfixError::Config(format!(
                "Border percentage must be between 0 and 100, got {}",
                self.border_percent
            )));
        }
        Ok(())
    }
}

/// Measured range of one channel, used to stretch it to full scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBounds {
    pub min: u16,
    pub max: u16,
}

/// Options for a full negative conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Profile whose reciprocal exponents are applied.
    pub gamma: GammaProfile,

    /// Film base color used for mask removal, if any.
    pub base_color: Option<[u16; 3]>,

    /// Level normalization; `None` skips the stage.
    pub normalize: Option<NormalizeOptions>,

    /// Complement the image as the final stage.
    pub invert: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            gamma: GammaProfile::NONE,
            base_color: None,
            normalize: Some(NormalizeOptions::default()),
            invert: true,
        }
    }
}

impl ConvertOptions {
    pub fn validate(&self) -> Result<()> {
        self.gamma.validate()?;
        if let Some(normalize) = &self.normalize {
            normalize.validate()?;
        }
        Ok(())
    }
}
