//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Carousel pane on top, a one-row progress bar, and the status bar.
pub struct AppLayout {
    /// Bordered frame around the carousel.
    pub frame_area: Rect,
    /// Inside of `frame_area`; the carousel viewport.
    pub viewport_area: Rect,
    pub progress_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // carousel (takes all remaining space)
                Constraint::Length(1), // progress bar
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let frame_area = chunks[0];
        Self {
            frame_area,
            viewport_area: Rect::new(
                frame_area.x.saturating_add(1),
                frame_area.y.saturating_add(1),
                frame_area.width.saturating_sub(2),
                frame_area.height.saturating_sub(2),
            ),
            progress_area: chunks[1],
            status_area: chunks[2],
        }
    }
}
