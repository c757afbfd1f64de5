use egui::{Pos2, Rect, Vec2};

/// Touch lifecycle actions the view understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

impl TouchAction {
    /// Map a platform action code. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::Move),
            _ => None,
        }
    }
}

/// A single touch sample in view pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub position: Pos2,
}

impl TouchEvent {
    pub fn new(action: TouchAction, position: Pos2) -> Self {
        Self { action, position }
    }
}

/// Primary pointer state for one host frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    /// Pointer position in host points
    pub position: Option<Pos2>,
    pub delta: Vec2,
}

impl PointerSample {
    /// Read the primary pointer from the current egui input state
    pub fn capture(ctx: &egui::Context) -> Self {
        ctx.input(|input| Self {
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            released: input.pointer.primary_released(),
            position: input.pointer.interact_pos(),
            delta: input.pointer.delta(),
        })
    }
}

/// Converts host pointer input into touch events for a single contact
#[derive(Debug, Clone)]
pub struct TouchTranslator {
    canvas_rect: Rect,
    pixels_per_point: f32,
    in_contact: bool,
    /// View position of the last event sent, used to close a contact
    /// when the pointer position is gone
    last_view_pos: Pos2,
}

impl TouchTranslator {
    pub fn new(canvas_rect: Rect, pixels_per_point: f32) -> Self {
        Self {
            canvas_rect,
            pixels_per_point,
            in_contact: false,
            last_view_pos: Pos2::ZERO,
        }
    }

    /// Update the canvas placement (e.g. if the window is resized)
    pub fn set_canvas(&mut self, canvas_rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = canvas_rect;
        self.pixels_per_point = pixels_per_point;
    }

    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    /// View pixel coordinates for a host position
    pub fn to_view(&self, pos: Pos2) -> Pos2 {
        ((pos - self.canvas_rect.min) * self.pixels_per_point).to_pos2()
    }

    /// Translate one frame of pointer state into touch events.
    ///
    /// A press while a contact is still open first closes that contact, and
    /// a release always closes it, even when the pointer position is gone.
    pub fn translate(&mut self, sample: PointerSample) -> Vec<TouchEvent> {
        let mut events = Vec::new();

        if sample.pressed {
            if self.in_contact {
                events.push(self.close_contact());
            }
            if let Some(pos) = sample.position.filter(|pos| self.canvas_rect.contains(*pos)) {
                self.in_contact = true;
                events.push(self.event(TouchAction::Down, pos));
            }
        } else if let Some(pos) = sample.position {
            if self.in_contact && sample.down && sample.delta != Vec2::ZERO {
                events.push(self.event(TouchAction::Move, pos));
            }
        }

        if sample.released && self.in_contact {
            if let Some(pos) = sample.position {
                self.last_view_pos = self.to_view(pos);
            }
            events.push(self.close_contact());
        }

        events
    }

    fn event(&mut self, action: TouchAction, pos: Pos2) -> TouchEvent {
        self.last_view_pos = self.to_view(pos);
        TouchEvent::new(action, self.last_view_pos)
    }

    fn close_contact(&mut self) -> TouchEvent {
        self.in_contact = false;
        TouchEvent::new(TouchAction::Up, self.last_view_pos)
    }
}
