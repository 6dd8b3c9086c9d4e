use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::RippleResult;
use crate::input::pointer::PointerTrack;
use crate::session::effect::RippleEffect;

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Pointer samples that landed inside the element.
    pub samples_ingested: u64,
    /// Pointer samples dropped for falling outside the element.
    pub samples_ignored: u64,
    /// Leave events delivered.
    pub leaves: u64,
}

/// Drive `effect` over `range`, replaying the pointer track and streaming frames into `sink`.
///
/// Each frame delivers that frame's pointer samples first, then advances the ripple buffer and
/// composites. The loop ends with the range; stopping early is a matter of passing a shorter one.
pub fn render_range(
    effect: &mut RippleEffect,
    track: &PointerTrack,
    range: FrameRange,
    sink: &mut dyn FrameSink,
) -> RippleResult<RenderStats> {
    render_range_with(effect, track, range, sink, |_, _| Ok(()))
}

/// [`render_range`] with a hook called after each frame has been pushed to the sink.
///
/// The hook sees the effect in its post-frame state, e.g. to dump the ripple raster.
#[tracing::instrument(
    skip(effect, track, sink, after_frame),
    fields(start = range.start.0, end = range.end.0)
)]
pub fn render_range_with<F>(
    effect: &mut RippleEffect,
    track: &PointerTrack,
    range: FrameRange,
    sink: &mut dyn FrameSink,
    mut after_frame: F,
) -> RippleResult<RenderStats>
where
    F: FnMut(FrameIndex, &RippleEffect) -> RippleResult<()>,
{
    let element = effect.element();
    sink.begin(SinkConfig {
        width: element.width,
        height: element.height,
        frames: range.len_frames(),
    })?;

    let mut stats = RenderStats::default();
    for idx in range.iter() {
        for sample in track.samples_for(idx) {
            if sample.leave {
                stats.leaves += 1;
            }
            if effect.apply_sample(sample) {
                stats.samples_ingested += 1;
            } else if !sample.leave {
                stats.samples_ignored += 1;
            }
        }

        let frame = effect.render_frame()?;
        sink.push_frame(idx, frame)?;
        stats.frames_rendered += 1;
        after_frame(idx, effect)?;
    }

    sink.end()?;
    tracing::info!(
        frames = stats.frames_rendered,
        ingested = stats.samples_ingested,
        ignored = stats.samples_ignored,
        live_impulses = effect.ripple().len(),
        "render range complete"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_loop.rs"]
mod tests;
