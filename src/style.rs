use egui::Color32;
use tiny_skia::{LineCap, LineJoin, Paint};

use crate::config::ViewConfig;

/// Which part of a path gets painted. Finger paint only ever strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Stroke,
}

/// Paint attributes shared by every committed segment and the frame.
/// Built once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawingStyle {
    color: Color32,
    anti_alias: bool,
    dither: bool,
    fill_mode: FillMode,
    join: LineJoin,
    cap: LineCap,
    width: f32,
}

impl DrawingStyle {
    /// Finger-paint style: anti-aliased, dithered, stroke only, round joins and caps
    pub fn new(color: Color32, width: f32) -> Self {
        Self {
            color,
            anti_alias: true,
            dither: true,
            fill_mode: FillMode::Stroke,
            join: LineJoin::Round,
            cap: LineCap::Round,
            width,
        }
    }

    pub fn from_config(config: &ViewConfig) -> Self {
        Self::new(config.paint_color, config.stroke_width)
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    pub fn dither(&self) -> bool {
        self.dither
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn join(&self) -> LineJoin {
        self.join
    }

    pub fn cap(&self) -> LineCap {
        self.cap
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Rasterizer paint for this style.
    ///
    /// tiny-skia has no dithering stage, so dithering selects the
    /// high-precision pipeline instead.
    pub fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(skia_color(self.color));
        paint.anti_alias = self.anti_alias;
        paint.force_hq_pipeline = self.dither;
        paint
    }

    pub fn stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.width,
            line_join: self.join,
            line_cap: self.cap,
            ..Default::default()
        }
    }
}

/// Convert an egui color into the rasterizer's color type
pub fn skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}
