//! Input handling: maps key/mouse/terminal events to controller input.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

use crate::config::Action;
use crate::core::input::InputEvent;

use super::event::normalize_mouse;
use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    // Every keyboard scroll goes through the wheel path so clamping applies.
    let span = state.controller.state().max_scroll.max(0.0);
    let delta_y = match action {
        Action::Quit => {
            state.should_quit = true;
            return;
        }
        Action::ScrollLeft => -state.config.key_step,
        Action::ScrollRight => state.config.key_step,
        Action::JumpStart => -span,
        Action::JumpEnd => span,
    };
    dispatch(state, InputEvent::Wheel { delta_y });
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let px_per_cell = state.controller.surface().px_per_cell();
    if let Some(input) = normalize_mouse(mouse, px_per_cell, state.config.wheel_step) {
        dispatch(state, input);
    }
}

/// The carousel viewport is now `viewport_cols` columns wide.
pub fn handle_resize(state: &mut AppState, viewport_cols: u16) {
    state
        .controller
        .surface_mut()
        .set_viewport_cols(viewport_cols);
    tracing::debug!(viewport_cols, "resize");
    dispatch(state, InputEvent::Resize);
    state.needs_redraw = true;
}

pub fn handle_focus_lost(state: &mut AppState) {
    dispatch(state, InputEvent::PointerLeave);
}

fn dispatch(state: &mut AppState, input: InputEvent) {
    match state.controller.dispatch(input) {
        Ok(_) => {
            // A stale error gives the status line back to the key hint.
            if state.status_message.take().is_some() {
                state.needs_redraw = true;
            }
        }
        Err(e) => {
            tracing::error!("carousel input {input:?} failed: {e}");
            state.status_message = Some(e.to_string());
            state.needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::slides;
    use crossterm::event::{MouseButton, MouseEventKind};

    fn state() -> AppState {
        // 4 × 25 cols × 8 px = 800 px of track, 50 cols = 400 px viewport.
        let config = AppConfig {
            item_width: 25,
            ..AppConfig::default()
        };
        AppState::new(slides::generated(4), config, 50).expect("state")
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_step_and_jump_within_bounds() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Right));
        assert_eq!(s.controller.state().target, 160.0);
        handle_key(&mut s, press(KeyCode::End));
        assert_eq!(s.controller.state().target, 400.0);
        handle_key(&mut s, press(KeyCode::Right));
        assert_eq!(s.controller.state().target, 400.0);
        handle_key(&mut s, press(KeyCode::Home));
        assert_eq!(s.controller.state().target, 0.0);
    }

    #[test]
    fn quit_and_ctrl_c() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);

        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }

    #[test]
    fn mouse_drag_moves_target_opposite_to_pointer() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 40));
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 35));
        // 5 cols × 8 px × 2.5
        assert_eq!(s.controller.state().target, 100.0);
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 35));
        assert!(!s.controller.is_dragging());
    }

    #[test]
    fn focus_loss_releases_drag() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 40));
        handle_focus_lost(&mut s);
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 0));
        assert_eq!(s.controller.state().target, 0.0);
    }

    #[test]
    fn resize_recomputes_max_scroll() {
        let mut s = state();
        handle_resize(&mut s, 75);
        assert_eq!(s.controller.state().max_scroll, 200.0);
        assert!(s.needs_redraw);
    }

    #[test]
    fn resize_after_scrolling_returns_to_start() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::End));
        for _ in 0..50 {
            s.controller.advance();
        }
        handle_resize(&mut s, 60);
        assert_eq!(s.controller.state().target, 0.0);
        assert!(s.controller.state().displayed <= s.controller.state().max_scroll);
    }

    #[test]
    fn successful_input_clears_error_status() {
        let mut s = state();
        s.status_message = Some("no slides".into());
        s.needs_redraw = false;
        handle_key(&mut s, press(KeyCode::Right));
        assert_eq!(s.status_message, None);
        assert!(s.needs_redraw);
    }
}
