use crate::foundation::core::Canvas;
use crate::foundation::error::{RippleError, RippleResult};

/// Resolved settings for a single [`crate::RippleBuffer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RippleConfig {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Blob radius in raster pixels.
    pub radius: f32,
    /// Width of the soft blob edge as a fraction of `radius`.
    pub softness: f32,
    /// Frames an impulse stays alive.
    pub max_age: u32,
    /// Scale applied to the squared pointer step before clamping force to 1.
    pub force_scale: f64,
    /// Upper bound on live impulses; the oldest are evicted first.
    pub max_impulses: usize,
}

impl RippleConfig {
    /// Side of the square raster used outside debug mode.
    pub const DEFAULT_SIZE: u32 = 64;
    /// Blob radius as a fraction of the raster side.
    pub const DEFAULT_RADIUS_FRAC: f32 = 0.1;
    /// Blob radius as a fraction of the viewport width in debug mode.
    pub const DEBUG_RADIUS_FRAC: f32 = 0.05;
    /// Default impulse lifetime in frames.
    pub const DEFAULT_MAX_AGE: u32 = 64;
    /// Default force scale `K`.
    pub const DEFAULT_FORCE_SCALE: f64 = 10_000.0;
    /// Default impulse cap.
    pub const DEFAULT_MAX_IMPULSES: usize = 4096;

    /// Viewport-sized raster for visual inspection.
    pub fn debug(viewport: Canvas) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            radius: viewport.width as f32 * Self::DEBUG_RADIUS_FRAC,
            ..Self::default()
        }
    }

    /// Reject configurations the buffer cannot run with.
    pub fn validate(&self) -> RippleResult<()> {
        Canvas {
            width: self.width,
            height: self.height,
        }
        .validate()?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(RippleError::validation(
                "ripple radius must be finite and > 0",
            ));
        }
        if !self.softness.is_finite() || self.softness < 0.0 {
            return Err(RippleError::validation(
                "ripple softness must be finite and >= 0",
            ));
        }
        if self.max_age == 0 {
            return Err(RippleError::validation("ripple max_age must be >= 1"));
        }
        if !self.force_scale.is_finite() || self.force_scale <= 0.0 {
            return Err(RippleError::validation(
                "ripple force_scale must be finite and > 0",
            ));
        }
        if self.max_impulses == 0 {
            return Err(RippleError::validation("ripple max_impulses must be >= 1"));
        }
        Ok(())
    }
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            radius: Self::DEFAULT_SIZE as f32 * Self::DEFAULT_RADIUS_FRAC,
            softness: 1.0,
            max_age: Self::DEFAULT_MAX_AGE,
            force_scale: Self::DEFAULT_FORCE_SCALE,
            max_impulses: Self::DEFAULT_MAX_IMPULSES,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ripple/config.rs"]
mod tests;
