use crate::foundation::core::{Canvas, FrameRGBA};
use crate::foundation::error::RippleResult;
use crate::foundation::math::{encode_signed_unit, smoothstep, unit_to_u8};

/// Texel of the cleared field: zero direction, zero intensity.
pub const BACKGROUND_TEXEL: [u8; 4] = [128, 128, 0, 255];

/// The ripple field as an RGBA8 displacement texture.
///
/// Blobs are accumulated in floating point (`dir * w`, `|dir| * w`) and encoded once per frame,
/// so overlapping blobs add up instead of overwriting each other. A blob without direction adds
/// nothing: it could not displace anything, and an 8-bit "zero" direction is not exactly zero.
#[derive(Clone, Debug)]
pub struct RippleRaster {
    width: u32,
    height: u32,
    accum: Vec<[f32; 3]>,
    rgba: Vec<u8>,
    generation: u64,
}

/// A soft circular splat in raster pixel space.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Blob {
    pub(crate) cx: f32,
    pub(crate) cy: f32,
    pub(crate) radius: f32,
    pub(crate) soft: f32,
    pub(crate) dir: [f32; 2],
    pub(crate) intensity: f32,
}

impl RippleRaster {
    pub(crate) fn new(width: u32, height: u32) -> RippleResult<Self> {
        let len = Canvas::new(width, height)?.rgba8_len()?;
        let mut raster = Self {
            width,
            height,
            accum: vec![[0.0; 3]; len / 4],
            rgba: BACKGROUND_TEXEL.repeat(len / 4),
            generation: 0,
        };
        raster.clear();
        Ok(raster)
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded RGBA8 bytes, tightly packed, row-major.
    pub fn data(&self) -> &[u8] {
        &self.rgba
    }

    /// Number of times the raster has been redrawn.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Encoded texel at `(x, y)`. Out-of-range coordinates are clamped to the edge.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * 4;
        [
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        ]
    }

    /// `true` when every texel equals [`BACKGROUND_TEXEL`].
    pub fn is_flat(&self) -> bool {
        self.rgba
            .chunks_exact(4)
            .all(|px| px == BACKGROUND_TEXEL.as_slice())
    }

    /// Largest encoded intensity (blue channel) in the raster.
    pub fn peak_intensity(&self) -> u8 {
        self.rgba
            .chunks_exact(4)
            .map(|px| px[2])
            .max()
            .unwrap_or(0)
    }

    /// Copy the raster into a standalone frame, e.g. for debug dumps.
    pub fn to_frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.rgba.clone(),
            premultiplied: true,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.accum.fill([0.0; 3]);
        for px in self.rgba.chunks_exact_mut(4) {
            px.copy_from_slice(&BACKGROUND_TEXEL);
        }
    }

    pub(crate) fn splat(&mut self, blob: Blob) {
        let magnitude = (blob.dir[0] * blob.dir[0] + blob.dir[1] * blob.dir[1]).sqrt();
        if blob.intensity <= 0.0
            || magnitude.is_nan()
            || magnitude <= 0.0
            || !blob.cx.is_finite()
            || !blob.cy.is_finite()
        {
            return;
        }

        let outer = blob.radius + blob.soft * 0.5;
        let inner = (blob.radius - blob.soft * 0.5).max(0.0);
        if outer <= 0.0 {
            return;
        }

        let x0 = (blob.cx - outer).floor().max(0.0);
        let y0 = (blob.cy - outer).floor().max(0.0);
        let x1 = (blob.cx + outer).ceil().min(self.width as f32 - 1.0);
        let y1 = (blob.cy + outer).ceil().min(self.height as f32 - 1.0);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let w = self.width as usize;
        for y in (y0 as usize)..=(y1 as usize) {
            let py = y as f32 + 0.5 - blob.cy;
            for x in (x0 as usize)..=(x1 as usize) {
                let px = x as f32 + 0.5 - blob.cx;
                let d = (px * px + py * py).sqrt();
                if d >= outer {
                    continue;
                }
                let falloff = if outer > inner {
                    1.0 - smoothstep(inner, outer, d)
                } else {
                    1.0
                };
                let weight = falloff * blob.intensity;
                if weight <= 0.0 {
                    continue;
                }
                let acc = &mut self.accum[y * w + x];
                acc[0] += blob.dir[0] * weight;
                acc[1] += blob.dir[1] * weight;
                acc[2] += weight * magnitude;
            }
        }
    }

    pub(crate) fn encode(&mut self) {
        for (acc, px) in self.accum.iter().zip(self.rgba.chunks_exact_mut(4)) {
            let weight = acc[2];
            if weight <= 0.0 {
                px.copy_from_slice(&BACKGROUND_TEXEL);
                continue;
            }
            px[0] = encode_signed_unit(acc[0] / weight);
            px[1] = encode_signed_unit(acc[1] / weight);
            px[2] = unit_to_u8(weight);
            px[3] = 255;
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ripple/raster.rs"]
mod tests;
