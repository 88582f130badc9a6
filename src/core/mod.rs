//! Core logic – scroll physics, the controller, input model, and slide loading.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The
//! controller talks to the outside world only through [`surface::Surface`].

pub mod controller;
pub mod error;
pub mod input;
pub mod physics;
pub mod slides;
pub mod surface;
