pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    let t = (x - a) / (b - a);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

/// Quantize `v` in `[0, 1]` to a byte.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Map a signed component in `[-1, 1]` onto `[0, 255]`.
pub(crate) fn encode_signed_unit(v: f32) -> u8 {
    unit_to_u8(v.clamp(-1.0, 1.0) * 0.5 + 0.5)
}

/// Inverse of [`encode_signed_unit`] for a normalized channel value in `[0, 1]`.
pub(crate) fn decode_signed_unit(c: f32) -> f32 {
    c * 2.0 - 1.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
