#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod stroke;
pub mod style;
pub mod surface;
pub mod tracker;
pub mod view;

pub use app::MiniPaintApp;
pub use config::ViewConfig;
pub use error::CanvasError;
pub use input::{TouchAction, TouchEvent, TouchTranslator};
pub use renderer::Renderer;
pub use stroke::{PathSegment, PendingPath};
pub use style::{DrawingStyle, FillMode};
pub use surface::{FrameRect, PaintCache, RasterSurface};
pub use tracker::{Motion, StrokeTracker, TrackerPhase};
pub use view::{CanvasView, RedrawRequester};
