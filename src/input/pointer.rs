use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Canvas, FrameIndex, Point};
use crate::foundation::error::{RippleError, RippleResult};

/// On-screen rectangle of a decorated element, in client pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ElementRect {
    /// Rectangle anchored at the client origin.
    pub fn from_canvas(canvas: Canvas) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: f64::from(canvas.width),
            height: f64::from(canvas.height),
        }
    }

    /// Map a client-space position into `[0,1]²` element space.
    ///
    /// Returns `None` for positions outside the element and for degenerate rectangles.
    pub fn normalize(&self, client_x: f64, client_y: f64) -> Option<Point> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return None;
        }
        let x = (client_x - self.left) / self.width;
        let y = (client_y - self.top) / self.height;
        let inside = (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y);
        inside.then(|| Point::new(x, y))
    }
}

/// Longest synthetic swipe [`PointerTrack::sweep`] will generate.
pub const MAX_SWEEP_FRAMES: u64 = 1 << 20;

/// A pointer event scheduled on a specific frame.
///
/// In JSON, move events must carry both `x` and `y`; leave events may omit them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PointerSampleDef")]
pub struct PointerSample {
    /// Frame on which the event is delivered.
    pub frame: u64,
    /// Client-space x position.
    pub x: f64,
    /// Client-space y position.
    pub y: f64,
    /// Pointer left the element; `x`/`y` are ignored.
    pub leave: bool,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PointerSampleDef {
    frame: u64,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    leave: bool,
}

impl TryFrom<PointerSampleDef> for PointerSample {
    type Error = RippleError;

    fn try_from(def: PointerSampleDef) -> Result<Self, Self::Error> {
        let (x, y) = match (def.x, def.y, def.leave) {
            (Some(x), Some(y), _) => (x, y),
            (x, y, true) => (x.unwrap_or(0.0), y.unwrap_or(0.0)),
            _ => {
                return Err(RippleError::validation(format!(
                    "pointer move on frame {} needs both x and y",
                    def.frame
                )));
            }
        };
        Ok(Self {
            frame: def.frame,
            x,
            y,
            leave: def.leave,
        })
    }
}

/// A scripted sequence of pointer events, sorted by frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointerTrack {
    /// Events in delivery order.
    pub samples: Vec<PointerSample>,
}

impl PointerTrack {
    /// Build a track, stably sorting samples by frame.
    pub fn new(mut samples: Vec<PointerSample>) -> Self {
        samples.sort_by_key(|s| s.frame);
        Self { samples }
    }

    /// Parse a track from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RippleResult<Self> {
        let track: PointerTrack = serde_json::from_reader(r)
            .map_err(|e| RippleError::serde(format!("parse pointer track JSON: {e}")))?;
        track.validate()?;
        Ok(Self::new(track.samples))
    }

    /// Parse a track from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RippleResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RippleError::validation(format!("open pointer track '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject non-finite coordinates.
    pub fn validate(&self) -> RippleResult<()> {
        for s in &self.samples {
            if !s.leave && !(s.x.is_finite() && s.y.is_finite()) {
                return Err(RippleError::validation(format!(
                    "pointer sample on frame {} has non-finite coordinates",
                    s.frame
                )));
            }
        }
        Ok(())
    }

    /// Events delivered on `frame`, in order.
    pub fn samples_for(&self, frame: FrameIndex) -> &[PointerSample] {
        let start = self.samples.partition_point(|s| s.frame < frame.0);
        let end = self.samples.partition_point(|s| s.frame <= frame.0);
        &self.samples[start..end]
    }

    /// Synthetic left-to-right swipe across `element`, two samples per frame, along a gentle
    /// sine path. The pointer leaves the element after the last frame of the swipe.
    ///
    /// Swipes longer than [`MAX_SWEEP_FRAMES`] are rejected.
    pub fn sweep(element: Canvas, frames: u64) -> RippleResult<Self> {
        if frames > MAX_SWEEP_FRAMES {
            return Err(RippleError::validation(format!(
                "synthetic swipe of {frames} frames exceeds the limit of {MAX_SWEEP_FRAMES}"
            )));
        }
        let w = f64::from(element.width);
        let h = f64::from(element.height);
        let steps = (frames * 2).max(1);
        let capacity = usize::try_from(steps)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| RippleError::validation("synthetic swipe too long for this platform"))?;

        let mut samples = Vec::with_capacity(capacity);
        for i in 0..steps {
            let t = (i as f64 + 0.5) / steps as f64;
            let x = w * (0.1 + 0.8 * t);
            let y = h * (0.5 + 0.25 * (t * std::f64::consts::TAU).sin());
            samples.push(PointerSample {
                frame: i / 2,
                x,
                y,
                leave: false,
            });
        }
        samples.push(PointerSample {
            frame: frames,
            x: 0.0,
            y: 0.0,
            leave: true,
        });
        Ok(Self::new(samples))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/pointer.rs"]
mod tests;
