pub mod error;
pub mod form;
pub mod gateway;
pub mod prompter;
pub mod record;
pub mod session;

// Re-export common types
pub use error::{MentorlyError, Result};
pub use gateway::SessionGateway;
pub use prompter::SessionPrompter;
