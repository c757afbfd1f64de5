use egui::{Pos2, pos2};
use log::trace;
use tiny_skia::Pixmap;

use crate::config::ViewConfig;
use crate::error::CanvasError;
use crate::input::{TouchAction, TouchEvent};
use crate::style::DrawingStyle;
use crate::surface::RasterSurface;
use crate::tracker::{Motion, StrokeTracker};

/// Outbound signal asking the host to repaint at its convenience.
///
/// Hosts may coalesce several requests into one repaint.
pub trait RedrawRequester {
    fn request_redraw(&self);
}

impl RedrawRequester for egui::Context {
    fn request_redraw(&self) {
        self.request_repaint();
    }
}

/// Finger-painting view: the host's entry point for size, touch and paint callbacks
#[derive(Debug)]
pub struct CanvasView {
    style: DrawingStyle,
    surface: RasterSurface,
    tracker: StrokeTracker,
}

impl CanvasView {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            style: DrawingStyle::from_config(config),
            surface: RasterSurface::new(config.background, config.frame_inset),
            tracker: StrokeTracker::new(config.touch_tolerance),
        }
    }

    pub fn style(&self) -> &DrawingStyle {
        &self.style
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn tracker(&self) -> &StrokeTracker {
        &self.tracker
    }

    /// The host learned (new) view dimensions
    pub fn on_size_changed(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        self.surface.resize(width, height)
    }

    /// Handle a touch event. Always consumes the event.
    pub fn on_touch_event(
        &mut self,
        event: TouchEvent,
        host: &dyn RedrawRequester,
    ) -> Result<bool, CanvasError> {
        match event.action {
            TouchAction::Down => self.tracker.start(event.position),
            TouchAction::Move => self.touch_move(event.position, host)?,
            TouchAction::Up => self.tracker.end(),
        }
        Ok(true)
    }

    /// Handle a touch event carrying a raw platform action code.
    ///
    /// Unknown codes are ignored without any state change. Like every
    /// other touch event they are still consumed.
    pub fn on_raw_touch_event(
        &mut self,
        code: i32,
        x: f32,
        y: f32,
        host: &dyn RedrawRequester,
    ) -> Result<bool, CanvasError> {
        match TouchAction::from_code(code) {
            Some(action) => self.on_touch_event(TouchEvent::new(action, pos2(x, y)), host),
            None => {
                trace!("Ignoring unknown touch action {code}");
                Ok(true)
            }
        }
    }

    /// Paint the committed drawing and the frame onto `target`
    pub fn on_paint(&self, target: &mut Pixmap) -> Result<(), CanvasError> {
        self.surface.present(target, &self.style)
    }

    fn touch_move(&mut self, pos: Pos2, host: &dyn RedrawRequester) -> Result<(), CanvasError> {
        if self.tracker.move_to(pos) != Motion::Extended {
            return Ok(());
        }
        // The whole open path is redrawn; only its new tail changes pixels.
        self.surface.commit(self.tracker.path(), &self.style)?;
        host.request_redraw();
        Ok(())
    }
}
