//! User-facing prompts.

use async_trait::async_trait;

/// Where the controller sends alerts, confirmations and navigation.
///
/// The browser used blocking dialogs for these; hosts implement them with
/// whatever their surface offers (terminal lines in the CLI, a recorder in
/// tests).
#[async_trait]
pub trait SessionPrompter: Send + Sync {
    async fn alert(&self, message: &str);

    /// Asks a yes/no question. `false` means the user declined.
    async fn confirm(&self, message: &str) -> bool;

    /// Leaves the live-session page for `path`.
    async fn navigate(&self, path: &str);
}
