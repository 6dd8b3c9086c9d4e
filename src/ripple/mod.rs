//! Ripple accumulation: decaying pointer impulses rasterized into a displacement texture.
//!
//! Raster channel contract (RGBA8):
//!
//! - R: x-direction, `[-1, 1]` mapped onto `[0, 255]`
//! - G: y-direction, same mapping
//! - B: intensity in `[0, 1]`
//! - A: always 255

pub(crate) mod buffer;
pub(crate) mod config;
pub(crate) mod impulse;
pub(crate) mod raster;
