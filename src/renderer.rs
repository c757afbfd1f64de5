use egui::{Color32, ColorImage, Painter, Pos2, Rect, TextureHandle, TextureOptions};
use log::debug;
use tiny_skia::Pixmap;

use crate::error::CanvasError;
use crate::view::CanvasView;

/// Presents a [`CanvasView`] through egui.
///
/// The view paints into a screen pixmap which is then uploaded into a
/// single texture, reused from frame to frame.
#[derive(Default)]
pub struct Renderer {
    screen: Option<Pixmap>,
    texture: Option<TextureHandle>,
}

// Custom Debug implementation since TextureHandle doesn't implement Debug
impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("screen_size", &self.screen_size())
            .field("has_texture", &self.texture.is_some())
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimensions of the screen pixmap, if one exists
    pub fn screen_size(&self) -> Option<(u32, u32)> {
        self.screen.as_ref().map(|screen| (screen.width(), screen.height()))
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    /// Paint the view and draw it over `rect`
    ///
    /// Args:
    ///     view (CanvasView): The view to present
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): The canvas rectangle, in points
    pub fn render(
        &mut self,
        view: &CanvasView,
        painter: &Painter,
        rect: Rect,
    ) -> Result<(), CanvasError> {
        let Some(cache) = view.surface().cache() else {
            return Ok(());
        };
        let (width, height) = (cache.width(), cache.height());
        if width == 0 || height == 0 {
            return Ok(());
        }

        let image = {
            let screen = self.screen_for(width, height)?;
            screen.fill(tiny_skia::Color::TRANSPARENT);
            view.on_paint(screen)?;
            ColorImage::from_rgba_premultiplied([width as usize, height as usize], screen.data())
        };

        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(painter.ctx().load_texture(
                    "paint_cache",
                    image,
                    TextureOptions::NEAREST,
                ));
            }
        }

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        Ok(())
    }

    /// Screen pixmap matching the view size, replaced when the size changes
    fn screen_for(&mut self, width: u32, height: u32) -> Result<&mut Pixmap, CanvasError> {
        if self.screen_size() != Some((width, height)) {
            self.screen = None;
            let screen =
                Pixmap::new(width, height).ok_or(CanvasError::Allocation { width, height })?;
            debug!("Screen pixmap resized to {width}x{height}");
            self.screen = Some(screen);
        }
        self.screen.as_mut().ok_or(CanvasError::NotSized)
    }
}
