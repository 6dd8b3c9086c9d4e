use crate::assets::decode::SourceImage;
use crate::effects::displacement::{DisplacementParams, apply_displacement};
use crate::foundation::core::{Canvas, FrameRGBA};
use crate::foundation::error::RippleResult;
use crate::input::pointer::{ElementRect, PointerSample};
use crate::ripple::buffer::RippleBuffer;
use crate::session::config::EffectConfig;

/// Ripple effect state for one decorated element.
///
/// Owns the source image, the ripple buffer and the displacement settings. Nothing is shared
/// between elements; dropping the effect releases everything it holds.
#[derive(Debug)]
pub struct RippleEffect {
    source: SourceImage,
    element: Canvas,
    rect: ElementRect,
    ripple: RippleBuffer,
    params: DisplacementParams,
    frame: FrameRGBA,
}

impl RippleEffect {
    /// Build the effect for `source`, rendered at the configured element size.
    #[tracing::instrument(skip(source, cfg), fields(src_w = source.width, src_h = source.height))]
    pub fn new(source: SourceImage, cfg: &EffectConfig) -> RippleResult<Self> {
        cfg.validate()?;
        let element = cfg.element.unwrap_or_else(|| source.canvas());
        let ripple = RippleBuffer::new(cfg.ripple_config(element))?;
        tracing::debug!(
            element_w = element.width,
            element_h = element.height,
            raster_w = ripple.config().width,
            raster_h = ripple.config().height,
            debug = cfg.debug,
            "ripple effect ready"
        );

        let frame = FrameRGBA {
            width: element.width,
            height: element.height,
            data: vec![0u8; element.rgba8_len()?],
            premultiplied: true,
        };
        Ok(Self {
            source,
            element,
            rect: ElementRect::from_canvas(element),
            ripple,
            params: cfg.displacement(),
            frame,
        })
    }

    /// Move the element on screen; subsequent pointer events are normalized against `rect`.
    pub fn set_rect(&mut self, rect: ElementRect) {
        self.rect = rect;
    }

    /// Current on-screen rectangle.
    pub fn rect(&self) -> ElementRect {
        self.rect
    }

    /// Rendered element size.
    pub fn element(&self) -> Canvas {
        self.element
    }

    /// Feed a client-space pointer position. Returns `false` when it fell outside the element.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> bool {
        match self.rect.normalize(client_x, client_y) {
            Some(p) => {
                self.ripple.ingest(p);
                true
            }
            None => false,
        }
    }

    /// The pointer left the element: the next move starts a fresh trail.
    pub fn pointer_leave(&mut self) {
        self.ripple.lift();
    }

    /// Deliver one scripted pointer event.
    pub fn apply_sample(&mut self, sample: &PointerSample) -> bool {
        if sample.leave {
            self.pointer_leave();
            return false;
        }
        self.pointer_move(sample.x, sample.y)
    }

    /// Advance the ripple simulation by one frame and composite the element.
    pub fn render_frame(&mut self) -> RippleResult<&FrameRGBA> {
        self.ripple.advance();
        self.composite()
    }

    /// Composite the element from the ripple raster without advancing the simulation.
    ///
    /// The displacement pass only runs when the raster was redrawn since the last composite;
    /// otherwise the previous frame is returned as is.
    pub fn composite(&mut self) -> RippleResult<&FrameRGBA> {
        match self.ripple.take_upload() {
            Some(raster) => {
                apply_displacement(&self.source, raster, self.params, &mut self.frame)?;
            }
            None => tracing::trace!("ripple raster unchanged, reusing last frame"),
        }
        Ok(&self.frame)
    }

    /// The ripple buffer driving this element.
    pub fn ripple(&self) -> &RippleBuffer {
        &self.ripple
    }

    /// The current ripple raster as a frame, for debug inspection.
    pub fn ripple_frame(&self) -> FrameRGBA {
        self.ripple.raster().to_frame()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/effect.rs"]
mod tests;
