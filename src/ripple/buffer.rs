use std::collections::VecDeque;

use crate::foundation::core::Point;
use crate::foundation::error::RippleResult;
use crate::ripple::config::RippleConfig;
use crate::ripple::impulse::Impulse;
use crate::ripple::raster::{Blob, RippleRaster};

/// Converts a stream of pointer samples into a decaying, velocity-aware displacement field.
///
/// Call [`RippleBuffer::ingest`] for every pointer sample and [`RippleBuffer::advance`] once per
/// displayed frame. Both take `&mut self`; the buffer is meant to live on the frame-loop thread.
#[derive(Clone, Debug)]
pub struct RippleBuffer {
    cfg: RippleConfig,
    impulses: VecDeque<Impulse>,
    last: Option<Point>,
    raster: RippleRaster,
    needs_upload: bool,
}

impl RippleBuffer {
    /// Create a buffer with a cleared raster.
    pub fn new(cfg: RippleConfig) -> RippleResult<Self> {
        cfg.validate()?;
        let raster = RippleRaster::new(cfg.width, cfg.height)?;
        Ok(Self {
            cfg,
            impulses: VecDeque::new(),
            last: None,
            raster,
            needs_upload: true,
        })
    }

    /// Record a pointer sample in normalized `[0,1]²` plane space.
    ///
    /// Range checks are the caller's job (see [`crate::ElementRect::normalize`]).
    pub fn ingest(&mut self, point: Point) {
        let impulse = Impulse::from_motion(self.last, point, self.cfg.force_scale);
        tracing::trace!(
            x = point.x,
            y = point.y,
            force = impulse.force,
            "ingest ripple point"
        );
        self.last = Some(point);
        self.impulses.push_back(impulse);

        let cap = self.cfg.max_impulses;
        if self.impulses.len() > cap {
            let excess = self.impulses.len() - cap;
            self.impulses.drain(..excess);
            tracing::warn!(excess, cap, "ripple impulse cap reached, evicting oldest");
        }
    }

    /// End the current pointer trail; the next sample starts with zero velocity.
    pub fn lift(&mut self) {
        self.last = None;
    }

    /// Decay every impulse, drop the expired ones and redraw the raster.
    pub fn advance(&mut self) -> &RippleRaster {
        self.raster.clear();

        let max_age = self.cfg.max_age;
        for impulse in self.impulses.iter_mut() {
            impulse.decay(max_age);
        }

        // An impulse at max_age has zero intensity, so it is culled together with older ones.
        let before = self.impulses.len();
        self.impulses.retain(|imp| imp.age < max_age);
        let culled = before - self.impulses.len();
        if culled > 0 {
            tracing::debug!(
                culled,
                live = self.impulses.len(),
                "culled expired ripple impulses"
            );
        }

        let w = self.cfg.width as f64;
        let h = self.cfg.height as f64;
        let soft = self.cfg.radius * self.cfg.softness;
        for imp in &self.impulses {
            self.raster.splat(Blob {
                cx: (imp.pos.x * w) as f32,
                cy: (imp.pos.y * h) as f32,
                radius: self.cfg.radius,
                soft,
                dir: [imp.dir.x as f32, imp.dir.y as f32],
                intensity: imp.intensity(max_age),
            });
        }
        self.raster.encode();
        self.needs_upload = true;

        &self.raster
    }

    /// Live impulses in arrival order.
    pub fn impulses(&self) -> impl ExactSizeIterator<Item = &Impulse> + '_ {
        self.impulses.iter()
    }

    /// Number of live impulses.
    pub fn len(&self) -> usize {
        self.impulses.len()
    }

    /// `true` when no impulse is alive.
    pub fn is_empty(&self) -> bool {
        self.impulses.is_empty()
    }

    /// Most recently ingested point, if the trail has not been lifted.
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    /// The current raster, regardless of upload state.
    pub fn raster(&self) -> &RippleRaster {
        &self.raster
    }

    /// `true` when the raster changed since the last [`RippleBuffer::take_upload`].
    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    /// Hand the raster to a consumer once per redraw.
    pub fn take_upload(&mut self) -> Option<&RippleRaster> {
        if !self.needs_upload {
            return None;
        }
        self.needs_upload = false;
        Some(&self.raster)
    }

    /// Resolved configuration.
    pub fn config(&self) -> &RippleConfig {
        &self.cfg
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ripple/buffer.rs"]
mod tests;
