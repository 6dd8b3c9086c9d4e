use super::*;

#[test]
fn default_is_small_square_raster() {
    let cfg = RippleConfig::default();
    assert_eq!((cfg.width, cfg.height), (64, 64));
    assert!((cfg.radius - 6.4).abs() < 1e-5);
    assert_eq!(cfg.max_age, 64);
    assert_eq!(cfg.force_scale, 10_000.0);
    cfg.validate().unwrap();
}

#[test]
fn debug_follows_viewport() {
    let cfg = RippleConfig::debug(Canvas {
        width: 800,
        height: 600,
    });
    assert_eq!((cfg.width, cfg.height), (800, 600));
    assert!((cfg.radius - 40.0).abs() < 1e-5);
    cfg.validate().unwrap();
}

#[test]
fn validate_rejects_degenerate_settings() {
    let bad = [
        RippleConfig {
            max_age: 0,
            ..RippleConfig::default()
        },
        RippleConfig {
            radius: 0.0,
            ..RippleConfig::default()
        },
        RippleConfig {
            radius: f32::NAN,
            ..RippleConfig::default()
        },
        RippleConfig {
            width: 0,
            ..RippleConfig::default()
        },
        RippleConfig {
            force_scale: -1.0,
            ..RippleConfig::default()
        },
        RippleConfig {
            max_impulses: 0,
            ..RippleConfig::default()
        },
        RippleConfig {
            softness: -0.5,
            ..RippleConfig::default()
        },
    ];
    for cfg in bad {
        assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
    }
}
