use egui::{Rect, Sense};
use log::{error, info};

use crate::config::ViewConfig;
use crate::error::CanvasError;
use crate::input::{PointerSample, TouchTranslator};
use crate::renderer::Renderer;
use crate::view::CanvasView;

/// eframe host around a single [`CanvasView`]
#[derive(Debug)]
pub struct MiniPaintApp {
    view: CanvasView,
    renderer: Renderer,
    translator: TouchTranslator,
    /// Last size reported to the view, in pixels
    view_size: Option<(u32, u32)>,
    /// Set once the view hit an unrecoverable error
    failure: Option<String>,
}

impl MiniPaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ViewConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: ViewConfig) -> Self {
        info!("Starting with touch tolerance {}", config.touch_tolerance);
        Self {
            view: CanvasView::new(&config),
            renderer: Renderer::new(),
            translator: TouchTranslator::new(Rect::NOTHING, 1.0),
            view_size: None,
            failure: None,
        }
    }

    pub fn view(&self) -> &CanvasView {
        &self.view
    }

    /// Size, route input and paint for one frame
    fn drive(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
    ) -> Result<(), CanvasError> {
        let pixels_per_point = ctx.pixels_per_point();
        let size = (
            (rect.width() * pixels_per_point).round().max(0.0) as u32,
            (rect.height() * pixels_per_point).round().max(0.0) as u32,
        );
        if self.view_size != Some(size) {
            self.view.on_size_changed(size.0, size.1)?;
            self.view_size = Some(size);
        }

        self.translator.set_canvas(rect, pixels_per_point);
        for event in self.translator.translate(PointerSample::capture(ctx)) {
            self.view.on_touch_event(event, ctx)?;
        }

        self.renderer.render(&self.view, painter, rect)
    }

    /// Whether a fatal error stopped the view
    pub fn is_stopped(&self) -> bool {
        self.failure.is_some()
    }

    /// Lay out one frame. Once stopped, the view gets no more events.
    fn show(&mut self, ctx: &egui::Context) {
        if let Some(failure) = &self.failure {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label(format!("Drawing stopped: {failure}"));
            });
            return;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
                if let Err(err) = self.drive(ctx, &painter, response.rect) {
                    self.handle_error(ctx, err);
                }
            });
    }

    /// Log a view error; fatal ones stop the view and close the viewport
    fn handle_error(&mut self, ctx: &egui::Context, err: CanvasError) {
        error!("Canvas view failed: {err}");
        if err.is_fatal() {
            self.failure = Some(err.to_string());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for MiniPaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
