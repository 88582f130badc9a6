//! Normalized input events.
//!
//! Mouse and touch arrive as one pointer stream; hosts convert their raw
//! events into these types before they reach the controller.

/// Where a pointer event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    // Terminal hosts never report touch input.
    #[allow(dead_code)]
    Touch,
}

/// A single pointer sample in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Mouse,
            x,
            y,
        }
    }

    #[allow(dead_code)]
    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Touch,
            x,
            y,
        }
    }
}

/// Every event family the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Viewport geometry may have changed.
    Resize,
    /// Vertical wheel delta in pixels (positive scrolls toward the end).
    Wheel { delta_y: f64 },
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp,
    /// The pointer left the document.
    PointerLeave,
}

/// Whether the host should suppress its default handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Prevent,
}
