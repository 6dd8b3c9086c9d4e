use super::*;

fn gradient(width: u32, height: u32) -> SourceImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 100, 255]);
        }
    }
    SourceImage::from_premul(width, height, data).unwrap()
}

#[test]
fn untouched_effect_renders_source() {
    let src = gradient(16, 16);
    let mut fx = RippleEffect::new(src.clone(), &EffectConfig::default()).unwrap();
    let frame = fx.render_frame().unwrap();
    assert_eq!(frame.data.as_slice(), src.rgba8_premul.as_slice());
}

#[test]
fn pointer_outside_element_is_ignored() {
    let mut fx = RippleEffect::new(gradient(16, 16), &EffectConfig::default()).unwrap();
    assert!(!fx.pointer_move(-3.0, 4.0));
    assert!(!fx.pointer_move(4.0, 17.0));
    assert!(fx.ripple().is_empty());

    assert!(fx.pointer_move(8.0, 8.0));
    assert_eq!(fx.ripple().len(), 1);
}

#[test]
fn rect_offsets_client_coordinates() {
    let mut fx = RippleEffect::new(gradient(16, 16), &EffectConfig::default()).unwrap();
    fx.set_rect(ElementRect {
        left: 100.0,
        top: 100.0,
        width: 16.0,
        height: 16.0,
    });
    assert!(!fx.pointer_move(8.0, 8.0));
    assert!(fx.pointer_move(108.0, 104.0));
    let last = fx.ripple().last().unwrap();
    assert!((last.x - 0.5).abs() < 1e-12);
    assert!((last.y - 0.25).abs() < 1e-12);
}

#[test]
fn fast_swipe_distorts_the_frame() {
    let src = gradient(32, 32);
    let mut fx = RippleEffect::new(src.clone(), &EffectConfig::default()).unwrap();
    fx.pointer_move(4.0, 16.0);
    fx.pointer_move(16.0, 16.0);
    let frame = fx.render_frame().unwrap();
    assert_ne!(frame.data.as_slice(), src.rgba8_premul.as_slice());
    assert!(!fx.ripple_frame().data.is_empty());
}

#[test]
fn leave_sample_lifts_trail() {
    let mut fx = RippleEffect::new(gradient(16, 16), &EffectConfig::default()).unwrap();
    fx.apply_sample(&PointerSample {
        frame: 0,
        x: 2.0,
        y: 2.0,
        leave: false,
    });
    assert!(fx.ripple().last().is_some());
    fx.apply_sample(&PointerSample {
        frame: 0,
        x: 0.0,
        y: 0.0,
        leave: true,
    });
    assert!(fx.ripple().last().is_none());
}

#[test]
fn element_override_sets_output_size() {
    let cfg = EffectConfig {
        element: Some(Canvas {
            width: 24,
            height: 12,
        }),
        debug: true,
        ..EffectConfig::default()
    };
    let mut fx = RippleEffect::new(gradient(16, 16), &cfg).unwrap();
    assert_eq!(fx.ripple().config().width, 24);
    let frame = fx.render_frame().unwrap();
    assert_eq!((frame.width, frame.height), (24, 12));
}

#[test]
fn composite_consumes_each_redraw_once() {
    let src = gradient(16, 16);
    let mut fx = RippleEffect::new(src.clone(), &EffectConfig::default()).unwrap();
    assert!(fx.ripple().needs_upload());
    let first = fx.composite().unwrap().clone();
    assert_eq!(first.data.as_slice(), src.rgba8_premul.as_slice());
    assert!(!fx.ripple().needs_upload());

    fx.pointer_move(2.0, 8.0);
    fx.pointer_move(10.0, 8.0);
    let swiped = fx.render_frame().unwrap().clone();
    assert!(!fx.ripple().needs_upload());
    assert_ne!(swiped.data, first.data);

    // No redraw in between: the cached frame is handed back untouched.
    let again = fx.composite().unwrap();
    assert_eq!(again.data, swiped.data);
    assert_eq!(fx.ripple().raster().generation(), 1);
}
