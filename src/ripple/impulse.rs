use crate::foundation::core::{Point, Vec2};

/// One decaying ripple point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impulse {
    /// Position in normalized plane space.
    pub pos: Point,
    /// Frames this impulse has been alive.
    pub age: u32,
    /// Initial magnitude in `[0, 1]`, derived from pointer speed.
    pub force: f64,
    /// Unit direction of travel, or zero when there was no usable motion.
    pub dir: Vec2,
}

impl Impulse {
    /// Impulse with no motion history: zero force and zero direction.
    pub fn at_rest(pos: Point) -> Self {
        Self {
            pos,
            age: 0,
            force: 0.0,
            dir: Vec2::ZERO,
        }
    }

    /// Derive an impulse from the step `prev -> pos`.
    ///
    /// `force = min(|step|² * force_scale, 1)`. A zero-length step yields zero direction rather
    /// than dividing by zero.
    pub fn from_motion(prev: Option<Point>, pos: Point, force_scale: f64) -> Self {
        let Some(prev) = prev else {
            return Self::at_rest(pos);
        };

        let rel = pos - prev;
        let distance_sq = rel.hypot2();
        let distance = distance_sq.sqrt();

        let dir = if distance > 0.0 {
            rel / distance
        } else {
            Vec2::ZERO
        };
        let dir = if dir.is_finite() { dir } else { Vec2::ZERO };

        let force = distance_sq * force_scale;
        let force = if force.is_finite() {
            force.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            pos,
            age: 0,
            force,
            dir,
        }
    }

    /// Drift along `dir`, slowing down with age, then grow one frame older.
    pub(crate) fn decay(&mut self, max_age: u32) {
        let max_age_f = f64::from(max_age);
        let age_part = 1.0 / max_age_f;
        let slow_as_older = 1.0 - f64::from(self.age) / max_age_f;
        self.pos += self.dir * (self.force * age_part * slow_as_older);
        self.age = self.age.saturating_add(1);
    }

    /// Raster intensity, `1 - age/max_age`, never negative.
    pub fn intensity(&self, max_age: u32) -> f32 {
        if max_age == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / max_age as f32).max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ripple/impulse.rs"]
mod tests;
