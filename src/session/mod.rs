//! Per-element effect wiring: configuration, the owned effect state and the frame loop.

pub(crate) mod config;
pub(crate) mod effect;
pub(crate) mod render_loop;
