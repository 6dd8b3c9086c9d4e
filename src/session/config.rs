use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::effects::displacement::DisplacementParams;
use crate::foundation::core::Canvas;
use crate::foundation::error::{RippleError, RippleResult};
use crate::ripple::config::RippleConfig;

/// JSON-facing configuration of one decorated element.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    /// Viewport-sized ripple raster with a larger blob radius, for visual inspection.
    pub debug: bool,
    /// Viewport size used in debug mode. Defaults to the element size.
    pub viewport: Option<Canvas>,
    /// Rendered element size. Defaults to the source image size.
    pub element: Option<Canvas>,
    /// Largest UV offset of the displacement pass.
    pub max_amplitude: f32,
    /// Ripple buffer tuning.
    pub ripple: RippleTuning,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            debug: false,
            viewport: None,
            element: None,
            max_amplitude: DisplacementParams::DEFAULT_MAX_AMPLITUDE,
            ripple: RippleTuning::default(),
        }
    }
}

/// Ripple buffer knobs as they appear in configuration files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RippleTuning {
    /// Side of the square raster outside debug mode.
    pub size: u32,
    /// Blob radius as a fraction of `size`.
    pub radius_frac: f32,
    /// Blob radius as a fraction of the viewport width in debug mode.
    pub debug_radius_frac: f32,
    /// Impulse lifetime in frames.
    pub max_age: u32,
    /// Force scale `K`.
    pub force_scale: f64,
    /// Cap on live impulses.
    pub max_impulses: usize,
    /// Soft edge width as a fraction of the radius.
    pub softness: f32,
}

impl Default for RippleTuning {
    fn default() -> Self {
        Self {
            size: RippleConfig::DEFAULT_SIZE,
            radius_frac: RippleConfig::DEFAULT_RADIUS_FRAC,
            debug_radius_frac: RippleConfig::DEBUG_RADIUS_FRAC,
            max_age: RippleConfig::DEFAULT_MAX_AGE,
            force_scale: RippleConfig::DEFAULT_FORCE_SCALE,
            max_impulses: RippleConfig::DEFAULT_MAX_IMPULSES,
            softness: 1.0,
        }
    }
}

impl EffectConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RippleResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RippleError::serde(format!("parse effect config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RippleResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RippleError::validation(format!("open effect config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check everything that does not depend on the source image.
    pub fn validate(&self) -> RippleResult<()> {
        if let Some(v) = self.viewport {
            v.validate()?;
        }
        if let Some(e) = self.element {
            e.validate()?;
        }
        if !self.max_amplitude.is_finite() || self.max_amplitude < 0.0 {
            return Err(RippleError::validation(
                "max_amplitude must be finite and >= 0",
            ));
        }
        for (name, frac) in [
            ("radius_frac", self.ripple.radius_frac),
            ("debug_radius_frac", self.ripple.debug_radius_frac),
        ] {
            if !frac.is_finite() || frac <= 0.0 {
                return Err(RippleError::validation(format!(
                    "ripple.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the ripple buffer settings; `viewport` is only consulted in debug mode.
    pub fn ripple_config(&self, viewport: Canvas) -> RippleConfig {
        let t = &self.ripple;
        let (width, height, radius) = if self.debug {
            let v = self.viewport.unwrap_or(viewport);
            (v.width, v.height, v.width as f32 * t.debug_radius_frac)
        } else {
            (t.size, t.size, t.size as f32 * t.radius_frac)
        };
        RippleConfig {
            width,
            height,
            radius,
            softness: t.softness,
            max_age: t.max_age,
            force_scale: t.force_scale,
            max_impulses: t.max_impulses,
        }
    }

    /// Displacement pass parameters.
    pub fn displacement(&self) -> DisplacementParams {
        DisplacementParams {
            max_amplitude: self.max_amplitude,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
