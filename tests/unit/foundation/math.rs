use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(100, 128), 50);
}

#[test]
fn smoothstep_clamps_outside_edges() {
    assert_eq!(smoothstep(1.0, 2.0, 0.5), 0.0);
    assert_eq!(smoothstep(1.0, 2.0, 2.5), 1.0);
    assert!((smoothstep(1.0, 2.0, 1.5) - 0.5).abs() < 1e-6);
}

#[test]
fn signed_unit_encoding_hits_extremes() {
    assert_eq!(encode_signed_unit(-1.0), 0);
    assert_eq!(encode_signed_unit(1.0), 255);
    assert_eq!(encode_signed_unit(0.0), 128);
    assert_eq!(encode_signed_unit(7.0), 255);
    assert!((decode_signed_unit(1.0) - 1.0).abs() < 1e-6);
    assert!((decode_signed_unit(0.0) + 1.0).abs() < 1e-6);
}
