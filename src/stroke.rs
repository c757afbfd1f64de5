use egui::Pos2;
use tiny_skia::PathBuilder;

/// One piece of an open curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Starts the curve at a point
    MoveTo(Pos2),
    /// Quadratic curve from the previous end point
    QuadTo { control: Pos2, end: Pos2 },
}

impl PathSegment {
    pub fn end(&self) -> Pos2 {
        match *self {
            Self::MoveTo(pos) => pos,
            Self::QuadTo { end, .. } => end,
        }
    }
}

/// The open curve of the touch contact currently in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingPath {
    segments: Vec<PathSegment>,
}

impl PendingPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every segment, keeping the allocation for the next contact
    pub fn reset(&mut self) {
        self.segments.clear();
    }

    /// Start the curve at `pos`, discarding anything recorded before
    pub fn move_to(&mut self, pos: Pos2) {
        self.segments.clear();
        self.segments.push(PathSegment::MoveTo(pos));
    }

    /// Extend the curve. Ignored on an empty path since a curve needs an origin.
    pub fn quad_to(&mut self, control: Pos2, end: Pos2) {
        if self.segments.is_empty() {
            return;
        }
        self.segments.push(PathSegment::QuadTo { control, end });
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Where the curve starts
    pub fn origin(&self) -> Option<Pos2> {
        self.segments.first().map(PathSegment::end)
    }

    /// Where the curve currently ends
    pub fn end_point(&self) -> Option<Pos2> {
        self.segments.last().map(PathSegment::end)
    }

    /// Every point of the curve, control points included, in drawing order
    pub fn points(&self) -> Vec<Pos2> {
        let mut points = Vec::with_capacity(self.segments.len() * 2);
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(pos) => points.push(pos),
                PathSegment::QuadTo { control, end } => {
                    points.push(control);
                    points.push(end);
                }
            }
        }
        points
    }

    /// Build a rasterizer path. `None` while the curve has no extent yet.
    pub fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        if self.segments.len() < 2 {
            return None;
        }
        let mut builder = PathBuilder::new();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(pos) => builder.move_to(pos.x, pos.y),
                PathSegment::QuadTo { control, end } => {
                    builder.quad_to(control.x, control.y, end.x, end.y)
                }
            }
        }
        builder.finish()
    }
}
