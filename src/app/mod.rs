//! Application orchestration: state, event reader, frame loop, and input handling.

pub mod event;
pub mod frame;
pub mod handler;
pub mod state;
