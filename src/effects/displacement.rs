use rayon::prelude::*;

use crate::assets::decode::SourceImage;
use crate::foundation::core::{Canvas, FrameRGBA};
use crate::foundation::error::{RippleError, RippleResult};
use crate::foundation::math::decode_signed_unit;
use crate::ripple::raster::RippleRaster;

/// Tunables of the displacement pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementParams {
    /// Largest UV offset produced by a full-intensity texel.
    pub max_amplitude: f32,
}

impl DisplacementParams {
    /// Default UV offset at full intensity.
    pub const DEFAULT_MAX_AMPLITUDE: f32 = 0.2;
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            max_amplitude: Self::DEFAULT_MAX_AMPLITUDE,
        }
    }
}

/// Offset a UV lookup by one ripple texel.
///
/// `texel` holds the R, G and B channels normalized to `[0, 1]`. Direction is decoded from R/G
/// and sign-inverted; B is the intensity.
pub fn displace_uv(texel: [f32; 3], uv: [f32; 2], max_amplitude: f32) -> [f32; 2] {
    let vx = -decode_signed_unit(texel[0]);
    let vy = -decode_signed_unit(texel[1]);
    let intensity = texel[2];
    [
        uv[0] + vx * intensity * max_amplitude,
        uv[1] + vy * intensity * max_amplitude,
    ]
}

/// Composite `source` into `out`, with every lookup displaced by the ripple raster.
///
/// `out` determines the element size; the source and the raster are both stretched over it
/// with bilinear filtering and clamp-to-edge addressing.
pub fn apply_displacement(
    source: &SourceImage,
    ripple: &RippleRaster,
    params: DisplacementParams,
    out: &mut FrameRGBA,
) -> RippleResult<()> {
    let expected_len = Canvas::new(out.width, out.height)?.rgba8_len()?;
    if out.data.len() != expected_len {
        return Err(RippleError::evaluation(
            "apply_displacement expects out matching width*height*4",
        ));
    }

    let (ow, oh) = (out.width as usize, out.height as usize);
    let src = source.rgba8_premul.as_slice();
    let (sw, sh) = (source.width, source.height);
    let map = ripple.data();
    let (rw, rh) = (ripple.width(), ripple.height());
    let amp = params.max_amplitude;

    out.data
        .par_chunks_exact_mut(ow * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let v = (y as f32 + 0.5) / oh as f32;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let u = (x as f32 + 0.5) / ow as f32;
                let t = sample_bilinear(map, rw, rh, [u, v]);
                let texel = [t[0] / 255.0, t[1] / 255.0, t[2] / 255.0];
                let uv = displace_uv(texel, [u, v], amp);
                let c = sample_bilinear(src, sw, sh, uv);
                for (dst, val) in px.iter_mut().zip(c) {
                    *dst = val.round().clamp(0.0, 255.0) as u8;
                }
            }
        });
    out.premultiplied = true;

    Ok(())
}

/// Allocate a frame of `size` and run [`apply_displacement`] into it.
pub fn render_displaced(
    source: &SourceImage,
    ripple: &RippleRaster,
    params: DisplacementParams,
    size: Canvas,
) -> RippleResult<FrameRGBA> {
    let mut out = FrameRGBA {
        width: size.width,
        height: size.height,
        data: vec![0u8; size.rgba8_len()?],
        premultiplied: true,
    };
    apply_displacement(source, ripple, params, &mut out)?;
    Ok(out)
}

fn sample_bilinear(data: &[u8], width: u32, height: u32, uv: [f32; 2]) -> [f32; 4] {
    let max_x = width as f32 - 1.0;
    let max_y = height as f32 - 1.0;
    let fx = texel_coord(uv[0], width).clamp(0.0, max_x);
    let fy = texel_coord(uv[1], height).clamp(0.0, max_y);

    let x0 = fx.floor() as usize;
    let y0 = fy.floor() as usize;
    let x1 = (x0 + 1).min(width as usize - 1);
    let y1 = (y0 + 1).min(height as usize - 1);
    let tx = fx - x0 as f32;
    let ty = fy - y0 as f32;

    let w = width as usize;
    let at = |x: usize, y: usize, c: usize| f32::from(data[(y * w + x) * 4 + c]);

    let mut out = [0.0f32; 4];
    for (c, o) in out.iter_mut().enumerate() {
        let top = at(x0, y0, c) * (1.0 - tx) + at(x1, y0, c) * tx;
        let bottom = at(x0, y1, c) * (1.0 - tx) + at(x1, y1, c) * tx;
        *o = top * (1.0 - ty) + bottom * ty;
    }
    out
}

fn texel_coord(u: f32, extent: u32) -> f32 {
    if u.is_finite() {
        u * extent as f32 - 0.5
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/displacement.rs"]
mod tests;
