//! ripplefx renders a pointer-reactive water-ripple distortion over an image.
//!
//! # Pipeline overview
//!
//! 1. **Input**: client-space pointer events are normalized against the element rectangle
//!    ([`ElementRect`]); samples outside the element are dropped.
//! 2. **Ingest**: the [`RippleBuffer`] turns each sample into a decaying [`Impulse`] whose force
//!    grows with pointer speed.
//! 3. **Advance**: once per frame the buffer decays, culls and redraws its [`RippleRaster`]
//!    (R/G: direction, B: intensity).
//! 4. **Displace**: [`apply_displacement`] offsets every UV lookup into the source image by the
//!    raster texel under it.
//! 5. **Sink** (optional): frames stream into a [`FrameSink`], e.g. a PNG sequence.
//!
//! [`RippleEffect`] bundles steps 1-4 for one element and [`render_range`] runs the bounded
//! frame loop.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod input;
mod ripple;
mod session;

/// Frame sinks (in-memory, PNG sequence).
pub mod encode;

pub use assets::decode::{SourceImage, decode_image, load_image};
pub use effects::displacement::{
    DisplacementParams, apply_displacement, displace_uv, render_displaced,
};
pub use encode::png::{PngSequenceSink, write_png};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, FrameIndex, FrameRGBA, FrameRange, Point, Vec2};
pub use foundation::error::{RippleError, RippleResult};
pub use input::pointer::{ElementRect, MAX_SWEEP_FRAMES, PointerSample, PointerTrack};
pub use ripple::buffer::RippleBuffer;
pub use ripple::config::RippleConfig;
pub use ripple::impulse::Impulse;
pub use ripple::raster::{BACKGROUND_TEXEL, RippleRaster};
pub use session::config::{EffectConfig, RippleTuning};
pub use session::effect::RippleEffect;
pub use session::render_loop::{RenderStats, render_range, render_range_with};
