//! Terminal event abstraction.
//!
//! A background task forwards crossterm events over a channel so the main
//! loop stays non-blocking.  [`normalize_mouse`] turns raw mouse events into
//! the carousel's [`InputEvent`] model at the boundary.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

use crate::core::input::{InputEvent, PointerEvent};

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal window lost focus; treated as the pointer leaving.
    FocusLost,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  The task exits once the receiver is dropped.
pub fn spawn_event_reader(poll_timeout: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            // Poll with a timeout so a dropped receiver is noticed even when
            // the terminal is idle.
            if !event::poll(poll_timeout).unwrap_or(false) {
                continue;
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            let app_event = match ev {
                CtEvent::Key(k) => AppEvent::Key(k),
                CtEvent::Mouse(m) => AppEvent::Mouse(m),
                CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                CtEvent::FocusLost => AppEvent::FocusLost,
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}

/// Map a terminal mouse event into pixel-space carousel input.
///
/// Every wheel direction scrolls the track; only the left button drags.
pub fn normalize_mouse(mouse: MouseEvent, px_per_cell: f64, wheel_step: f64) -> Option<InputEvent> {
    let pointer = || {
        PointerEvent::mouse(
            mouse.column as f64 * px_per_cell,
            // Cells are roughly twice as tall as they are wide.
            mouse.row as f64 * px_per_cell * 2.0,
        )
    };
    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            Some(InputEvent::Wheel { delta_y: wheel_step })
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            Some(InputEvent::Wheel { delta_y: -wheel_step })
        }
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown(pointer())),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(InputEvent::PointerMove(pointer()))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn wheel_notches_become_signed_deltas() {
        assert_eq!(
            normalize_mouse(mouse(MouseEventKind::ScrollDown, 0, 0), 8.0, 100.0),
            Some(InputEvent::Wheel { delta_y: 100.0 })
        );
        assert_eq!(
            normalize_mouse(mouse(MouseEventKind::ScrollLeft, 0, 0), 8.0, 100.0),
            Some(InputEvent::Wheel { delta_y: -100.0 })
        );
    }

    #[test]
    fn left_button_drag_maps_to_pointer_stream() {
        assert_eq!(
            normalize_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2), 8.0, 100.0),
            Some(InputEvent::PointerDown(PointerEvent::mouse(80.0, 32.0)))
        );
        assert_eq!(
            normalize_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 7, 2), 8.0, 100.0),
            Some(InputEvent::PointerMove(PointerEvent::mouse(56.0, 32.0)))
        );
        assert_eq!(
            normalize_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 7, 2), 8.0, 100.0),
            Some(InputEvent::PointerUp)
        );
    }

    #[test]
    fn other_buttons_are_ignored() {
        assert_eq!(
            normalize_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), 8.0, 100.0),
            None
        );
    }
}
