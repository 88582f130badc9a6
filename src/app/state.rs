//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and event handling a function over `&mut AppState`.

use crate::config::AppConfig;
use crate::core::controller::ScrollController;
use crate::core::error::CarouselError;
use crate::core::slides::Slide;
use crate::ui::carousel::CarouselView;

/// Top-level application state.
pub struct AppState {
    /// Scroll physics, owning the surface it draws into.
    pub controller: ScrollController<CarouselView>,
    /// The items on the track, in display order.
    pub slides: Vec<Slide>,
    /// User configuration (bindings, steps, physics).
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Set by handlers when the next frame must repaint even if the
    /// scroll has settled (resize, status change).
    pub needs_redraw: bool,
}

impl AppState {
    pub fn new(
        slides: Vec<Slide>,
        config: AppConfig,
        viewport_cols: u16,
    ) -> Result<Self, CarouselError> {
        let view = CarouselView::new(slides.len(), config.item_width, viewport_cols, config.px_per_cell);
        let controller = ScrollController::new(view, config.physics)?;
        Ok(Self {
            controller,
            slides,
            config,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
        })
    }
}
