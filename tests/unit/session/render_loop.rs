use super::*;
use crate::assets::decode::SourceImage;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::input::pointer::PointerSample;
use crate::session::config::EffectConfig;

fn effect() -> RippleEffect {
    let data = [40u8, 80, 120, 255].repeat(16 * 16);
    let src = SourceImage::from_premul(16, 16, data).unwrap();
    RippleEffect::new(src, &EffectConfig::default()).unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn frames_arrive_in_order_with_stats() {
    let mut fx = effect();
    let track = PointerTrack::new(vec![
        PointerSample {
            frame: 0,
            x: 2.0,
            y: 2.0,
            leave: false,
        },
        PointerSample {
            frame: 1,
            x: 99.0,
            y: 2.0,
            leave: false,
        },
        PointerSample {
            frame: 1,
            x: 10.0,
            y: 8.0,
            leave: false,
        },
        PointerSample {
            frame: 2,
            x: 0.0,
            y: 0.0,
            leave: true,
        },
    ]);
    let mut sink = InMemorySink::new();
    let stats = render_range(&mut fx, &track, range(0, 4), &mut sink).unwrap();

    assert_eq!(
        stats,
        RenderStats {
            frames_rendered: 4,
            samples_ingested: 2,
            samples_ignored: 1,
            leaves: 1,
        }
    );
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.frames), (16, 16, 4));
}

#[test]
fn ripple_settles_back_to_source() {
    let mut fx = effect();
    let track = PointerTrack::sweep(
        Canvas {
            width: 16,
            height: 16,
        },
        4,
    )
    .unwrap();
    let max_age = u64::from(fx.ripple().config().max_age);
    let mut sink = InMemorySink::new();
    render_range(&mut fx, &track, range(0, 4 + max_age + 1), &mut sink).unwrap();

    assert!(fx.ripple().is_empty());
    let (_, last) = sink.frames().last().unwrap();
    let uniform = [40u8, 80, 120, 255].repeat(16 * 16);
    assert_eq!(last.data, uniform);
}

#[test]
fn empty_range_pushes_nothing() {
    let mut fx = effect();
    let mut sink = InMemorySink::new();
    let stats = render_range(&mut fx, &PointerTrack::default(), range(3, 3), &mut sink).unwrap();
    assert_eq!(stats.frames_rendered, 0);
    assert!(sink.frames().is_empty());
    assert!(sink.is_finished());
}

#[test]
fn hook_runs_after_every_frame() {
    let mut fx = effect();
    let track = PointerTrack::sweep(
        Canvas {
            width: 16,
            height: 16,
        },
        3,
    )
    .unwrap();
    let mut sink = InMemorySink::new();
    let mut seen = Vec::new();
    render_range_with(&mut fx, &track, range(0, 3), &mut sink, |idx, fx| {
        seen.push((idx.0, fx.ripple().raster().generation()));
        Ok(())
    })
    .unwrap();
    assert_eq!(seen, vec![(0, 1), (1, 2), (2, 3)]);
}
