use std::cell::Cell;

use egui::Color32;
use log::{debug, error};
use tiny_skia::{PathBuilder, Pixmap, PixmapPaint, Transform};

use crate::error::CanvasError;
use crate::stroke::PendingPath;
use crate::style::{DrawingStyle, FillMode, skia_color};

thread_local! {
    static LIVE_BUFFERS: Cell<usize> = const { Cell::new(0) };
}

/// Number of paint caches currently alive on the calling thread
pub fn live_buffers() -> usize {
    LIVE_BUFFERS.with(Cell::get)
}

/// Persistent pixel buffer holding everything drawn so far.
///
/// A zero width or height yields a cache that reports its dimensions but
/// holds no pixels.
pub struct PaintCache {
    width: u32,
    height: u32,
    pixmap: Option<Pixmap>,
}

// Custom Debug implementation so the pixel data isn't dumped
impl std::fmt::Debug for PaintCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintCache")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_pixels", &self.pixmap.is_some())
            .finish()
    }
}

impl PaintCache {
    /// Allocate a buffer of exactly `width` x `height` filled with `background`
    pub fn new(width: u32, height: u32, background: Color32) -> Result<Self, CanvasError> {
        let pixmap = if width == 0 || height == 0 {
            None
        } else {
            let mut pixmap =
                Pixmap::new(width, height).ok_or(CanvasError::Allocation { width, height })?;
            pixmap.fill(skia_color(background));
            Some(pixmap)
        };

        LIVE_BUFFERS.with(|live| live.set(live.get() + 1));
        Ok(Self {
            width,
            height,
            pixmap,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Color at a pixel, `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        let pixel = self.pixmap.as_ref()?.pixel(x, y)?;
        Some(Color32::from_rgba_premultiplied(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }

    fn draw(&mut self, path: &tiny_skia::Path, style: &DrawingStyle) {
        if let Some(pixmap) = &mut self.pixmap {
            draw_path(pixmap, path, style);
        }
    }
}

impl Drop for PaintCache {
    fn drop(&mut self) {
        LIVE_BUFFERS.with(|live| live.set(live.get().saturating_sub(1)));
    }
}

/// Decorative frame, inset from the view edges. Not committed to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FrameRect {
    pub fn inset(width: u32, height: u32, inset: i32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            left: inset,
            top: inset,
            right: width.saturating_sub(inset),
            bottom: height.saturating_sub(inset),
        }
    }

    /// Normalized rasterizer rect; `None` when the frame has no area
    pub fn to_skia_rect(&self) -> Option<tiny_skia::Rect> {
        let (left, right) = (self.left.min(self.right), self.left.max(self.right));
        let (top, bottom) = (self.top.min(self.bottom), self.top.max(self.bottom));
        if left == right || top == bottom {
            return None;
        }
        tiny_skia::Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32)
    }
}

/// Owns the paint cache and the frame derived from the current dimensions
#[derive(Debug)]
pub struct RasterSurface {
    background: Color32,
    inset: i32,
    cache: Option<PaintCache>,
    frame: Option<FrameRect>,
}

impl RasterSurface {
    /// An unsized surface; nothing can be drawn until the first `resize`
    pub fn new(background: Color32, inset: i32) -> Self {
        Self {
            background,
            inset,
            cache: None,
            frame: None,
        }
    }

    pub fn cache(&self) -> Option<&PaintCache> {
        self.cache.as_ref()
    }

    pub fn frame(&self) -> Option<FrameRect> {
        self.frame
    }

    pub fn is_sized(&self) -> bool {
        self.cache.is_some()
    }

    /// Replace the paint cache with a fresh one of the given size.
    ///
    /// The previous cache is dropped before the new one is allocated, so the
    /// two never coexist. On failure the surface is left unsized.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        self.cache = None;
        self.frame = None;

        let cache = PaintCache::new(width, height, self.background).inspect_err(|err| {
            error!("Paint cache allocation failed: {err}");
        })?;
        self.cache = Some(cache);
        self.frame = Some(FrameRect::inset(width, height, self.inset));
        debug!("Paint cache resized to {width}x{height}");
        Ok(())
    }

    /// Draw `path` permanently into the paint cache
    pub fn commit(&mut self, path: &PendingPath, style: &DrawingStyle) -> Result<(), CanvasError> {
        let cache = self.cache.as_mut().ok_or(CanvasError::NotSized)?;
        if let Some(path) = path.to_skia_path() {
            cache.draw(&path, style);
        }
        Ok(())
    }

    /// Copy the paint cache onto `target`, then outline the frame with `style`
    pub fn present(&self, target: &mut Pixmap, style: &DrawingStyle) -> Result<(), CanvasError> {
        let cache = self.cache.as_ref().ok_or(CanvasError::NotSized)?;
        if let Some(pixmap) = cache.pixmap() {
            target.draw_pixmap(
                0,
                0,
                pixmap.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }

        if let Some(rect) = self.frame.as_ref().and_then(FrameRect::to_skia_rect) {
            draw_path(target, &PathBuilder::from_rect(rect), style);
        }
        Ok(())
    }
}

fn draw_path(pixmap: &mut Pixmap, path: &tiny_skia::Path, style: &DrawingStyle) {
    let paint = style.paint();
    match style.fill_mode() {
        FillMode::Stroke => {
            pixmap.stroke_path(path, &paint, &style.stroke(), Transform::identity(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    const BACKGROUND: Color32 = Color32::from_rgb(0xFF, 0x55, 0x00);
    const INK: Color32 = Color32::from_rgb(0xFF, 0xEB, 0x3B);

    fn style() -> DrawingStyle {
        DrawingStyle::new(INK, 12.0)
    }

    fn diagonal(from: f32, to: f32) -> PendingPath {
        let mut path = PendingPath::new();
        path.move_to(pos2(from, from));
        path.quad_to(pos2(from, from), pos2(to, to));
        path
    }

    #[test]
    fn test_resize_fills_background() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        surface.resize(100, 60).unwrap();

        let cache = surface.cache().unwrap();
        assert_eq!((cache.width(), cache.height()), (100, 60));
        let pixmap = cache.pixmap().unwrap();
        for y in 0..60 {
            for x in 0..100 {
                assert_eq!(cache.pixel(x, y), Some(BACKGROUND));
            }
        }
        assert_eq!(pixmap.width(), 100);
        assert_eq!(
            surface.frame(),
            Some(FrameRect { left: 40, top: 40, right: 60, bottom: 20 })
        );
    }

    #[test]
    fn test_resize_keeps_one_live_buffer() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        let baseline = live_buffers();

        surface.resize(50, 50).unwrap();
        assert_eq!(live_buffers(), baseline + 1);
        surface.resize(80, 120).unwrap();
        assert_eq!(live_buffers(), baseline + 1);

        drop(surface);
        assert_eq!(live_buffers(), baseline);
    }

    #[test]
    fn test_zero_sized_surface() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        surface.resize(0, 30).unwrap();

        let cache = surface.cache().unwrap();
        assert_eq!((cache.width(), cache.height()), (0, 30));
        assert!(cache.pixmap().is_none());
        assert_eq!(cache.pixel(0, 0), None);
        assert_eq!(
            surface.frame(),
            Some(FrameRect { left: 40, top: 40, right: -40, bottom: -10 })
        );

        surface.commit(&diagonal(0.0, 10.0), &style()).unwrap();
    }

    #[test]
    fn test_commit_before_resize() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        let result = surface.commit(&diagonal(0.0, 10.0), &style());
        assert!(matches!(result, Err(CanvasError::NotSized)));
    }

    #[test]
    fn test_commit_draws_into_cache() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        surface.resize(100, 100).unwrap();
        surface.commit(&diagonal(10.0, 20.0), &style()).unwrap();

        let cache = surface.cache().unwrap();
        assert_ne!(cache.pixel(15, 15), Some(BACKGROUND));
        assert_eq!(cache.pixel(90, 90), Some(BACKGROUND));
    }

    #[test]
    fn test_origin_only_path_draws_nothing() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        surface.resize(40, 40).unwrap();

        let mut path = PendingPath::new();
        path.move_to(pos2(20.0, 20.0));
        surface.commit(&path, &style()).unwrap();

        assert_eq!(surface.cache().unwrap().pixel(20, 20), Some(BACKGROUND));
    }

    #[test]
    fn test_present_copies_and_frames() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        surface.resize(100, 100).unwrap();
        let before = surface.cache().unwrap().pixmap().unwrap().data().to_vec();

        let mut target = Pixmap::new(100, 100).unwrap();
        surface.present(&mut target, &style()).unwrap();

        // Frame edge at x = 40, y in 40..60
        let edge = target.pixel(40, 50).unwrap();
        assert_eq!((edge.red(), edge.green(), edge.blue()), (0xFF, 0xEB, 0x3B));
        let corner = target.pixel(5, 5).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (0xFF, 0x55, 0x00));

        // The frame never lands in the cache
        assert_eq!(surface.cache().unwrap().pixmap().unwrap().data(), &before[..]);
    }

    #[test]
    fn test_present_is_repeatable() {
        let mut surface = RasterSurface::new(BACKGROUND, 40);
        surface.resize(120, 90).unwrap();
        surface.commit(&diagonal(10.0, 70.0), &style()).unwrap();

        let mut first = Pixmap::new(120, 90).unwrap();
        let mut second = Pixmap::new(120, 90).unwrap();
        surface.present(&mut first, &style()).unwrap();
        surface.present(&mut second, &style()).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_present_before_resize() {
        let surface = RasterSurface::new(BACKGROUND, 40);
        let mut target = Pixmap::new(10, 10).unwrap();
        assert!(matches!(
            surface.present(&mut target, &style()),
            Err(CanvasError::NotSized)
        ));
    }

    #[test]
    fn test_inverted_frame_is_normalized() {
        let frame = FrameRect::inset(60, 100, 40);
        let rect = frame.to_skia_rect().unwrap();
        assert_eq!((rect.left(), rect.right()), (20.0, 40.0));
        assert_eq!((rect.top(), rect.bottom()), (40.0, 60.0));

        assert!(FrameRect::inset(80, 80, 40).to_skia_rect().is_none());
    }
}
