//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer turns the values the controller wrote into the
//! [`carousel::CarouselView`] surface into cells on the terminal.

pub mod carousel;
pub mod layout;
pub mod theme;
