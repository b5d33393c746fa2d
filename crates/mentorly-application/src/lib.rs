//! Application layer for Mentorly.
//!
//! This crate drives the live-session workflow on top of the domain types
//! in `mentorly-core` and renders the resulting forms.

pub mod live_session;
pub mod render;

pub use live_session::{LiveSessionController, LiveSessionSnapshot};
pub use render::FormRenderer;
