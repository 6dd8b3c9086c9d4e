//! Frame sinks.
//!
//! Sinks consume rendered frames in timeline order and are used by `render_range`.

/// PNG image sequence output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
