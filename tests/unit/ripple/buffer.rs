use super::*;
use crate::foundation::core::Vec2;
use crate::ripple::raster::BACKGROUND_TEXEL;

fn buffer() -> RippleBuffer {
    RippleBuffer::new(RippleConfig::default()).unwrap()
}

fn lcg(state: &mut u64) -> f64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((*state >> 11) as f64) / ((1u64 << 53) as f64)
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = RippleConfig {
        max_age: 0,
        ..RippleConfig::default()
    };
    assert!(RippleBuffer::new(cfg).is_err());
}

#[test]
fn ages_stay_within_bounds_for_arbitrary_input() {
    let mut b = buffer();
    let max_age = b.config().max_age;
    let mut seed = 7u64;
    for frame in 0..300 {
        let samples = (frame % 4) as usize;
        for _ in 0..samples {
            b.ingest(Point::new(lcg(&mut seed), lcg(&mut seed)));
        }
        b.advance();
        for imp in b.impulses() {
            assert!(imp.age <= max_age, "age {} > {max_age}", imp.age);
            assert!((0.0..=1.0).contains(&imp.force));
        }
    }
}

#[test]
fn identical_points_yield_zero_velocity_and_force() {
    let mut b = buffer();
    b.ingest(Point::new(0.4, 0.6));
    b.ingest(Point::new(0.4, 0.6));
    let second = b.impulses().nth(1).copied().unwrap();
    assert_eq!(second.dir, Vec2::ZERO);
    assert_eq!(second.force, 0.0);
    b.advance();
    assert!(b.impulses().all(|imp| imp.pos.x.is_finite() && imp.pos.y.is_finite()));
}

#[test]
fn diagonal_step_of_a_tenth_clamps_force() {
    let mut b = buffer();
    b.ingest(Point::new(0.2, 0.2));
    b.ingest(Point::new(0.3, 0.3));
    let imps: Vec<Impulse> = b.impulses().copied().collect();
    assert_eq!(imps[0].force, 0.0);
    assert_eq!(imps[1].force, 1.0);
    assert_eq!(b.last(), Some(Point::new(0.3, 0.3)));
}

#[test]
fn contribution_strictly_decreases_with_age() {
    let mut b = buffer();
    // A slow step: directional, but the blob barely drifts.
    b.ingest(Point::new(0.5, 0.5));
    b.ingest(Point::new(0.502, 0.5));
    let max_age = b.config().max_age;

    let mut prev = u8::MAX;
    for _ in 1..max_age {
        let peak = b.advance().peak_intensity();
        assert!(peak < prev, "peak {peak} did not drop below {prev}");
        prev = peak;
    }
    assert!(prev > 0);

    let last = b.advance();
    assert_eq!(last.peak_intensity(), 0);
}

#[test]
fn buffer_drains_after_max_age_advances() {
    let mut b = buffer();
    b.ingest(Point::new(0.1, 0.1));
    b.ingest(Point::new(0.15, 0.1));
    b.ingest(Point::new(0.2, 0.12));
    for _ in 0..b.config().max_age {
        b.advance();
    }
    assert!(b.is_empty());
    assert!(b.raster().is_flat());
}

#[test]
fn stationary_pointer_draws_nothing() {
    let mut b = buffer();
    b.ingest(Point::new(0.5, 0.5));
    b.ingest(Point::new(0.5, 0.5));
    assert_eq!(b.len(), 2);
    assert!(b.advance().is_flat());
}

#[test]
fn advance_without_input_is_always_flat() {
    let mut b = buffer();
    for _ in 0..10 {
        let r = b.advance();
        assert!(r.is_flat());
        assert_eq!(r.texel(31, 31), BACKGROUND_TEXEL);
    }
    assert_eq!(b.raster().generation(), 10);
}

#[test]
fn culling_keeps_arrival_order() {
    let mut b = buffer();
    b.ingest(Point::new(0.1, 0.5));
    for _ in 0..10 {
        b.advance();
    }
    b.ingest(Point::new(0.2, 0.5));
    b.ingest(Point::new(0.3, 0.5));

    let max_age = b.config().max_age;
    for _ in 0..(max_age - 10) {
        b.advance();
    }
    let ages: Vec<u32> = b.impulses().map(|imp| imp.age).collect();
    assert_eq!(ages, vec![max_age - 10, max_age - 10]);
    let xs: Vec<f64> = b.impulses().map(|imp| imp.pos.x).collect();
    assert!(xs[0] < xs[1]);
}

#[test]
fn cap_evicts_oldest_impulses() {
    let cfg = RippleConfig {
        max_impulses: 3,
        ..RippleConfig::default()
    };
    let mut b = RippleBuffer::new(cfg).unwrap();
    for i in 0..5 {
        b.ingest(Point::new(0.1 * f64::from(i), 0.5));
    }
    assert_eq!(b.len(), 3);
    let xs: Vec<f64> = b.impulses().map(|imp| imp.pos.x).collect();
    assert!((xs[0] - 0.2).abs() < 1e-12);
    assert!((xs[2] - 0.4).abs() < 1e-12);
}

#[test]
fn lift_starts_a_new_trail() {
    let mut b = buffer();
    b.ingest(Point::new(0.1, 0.1));
    b.lift();
    assert_eq!(b.last(), None);
    b.ingest(Point::new(0.9, 0.9));
    let second = b.impulses().nth(1).copied().unwrap();
    assert_eq!(second.force, 0.0);
    assert_eq!(second.dir, Vec2::ZERO);
}

#[test]
fn upload_is_handed_out_once_per_advance() {
    let mut b = buffer();
    assert!(b.take_upload().is_some());
    assert!(b.take_upload().is_none());
    assert!(!b.needs_upload());

    b.advance();
    assert!(b.needs_upload());
    let generation = b.take_upload().map(|r| r.generation());
    assert_eq!(generation, Some(1));
    assert!(b.take_upload().is_none());
}

#[test]
fn fast_motion_draws_directional_blob() {
    let mut b = buffer();
    b.ingest(Point::new(0.3, 0.5));
    b.ingest(Point::new(0.5, 0.5));
    let r = b.advance();
    let px = r.texel(32, 32);
    assert!(px[0] > 128, "x-direction should encode positive, got {px:?}");
    assert!(px[2] > 200);
}
