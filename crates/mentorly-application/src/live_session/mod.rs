//! Live-session record workflow.
//!
//! - `controller`: `LiveSessionController`, the state machine driven by the
//!   mentor's actions
//! - `state`: the visible page state and its snapshot
//! - `messages`: alert and label texts

mod controller;
pub mod messages;
mod state;

pub use controller::LiveSessionController;
pub use state::LiveSessionSnapshot;
