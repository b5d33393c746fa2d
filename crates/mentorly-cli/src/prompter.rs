use async_trait::async_trait;
use colored::Colorize;
use mentorly_core::SessionPrompter;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Prompter printing alerts to the terminal and reading confirmations from
/// stdin.
///
/// Navigation cannot leave a terminal, so the target is remembered and the
/// REPL exits once it sees one.
#[derive(Default)]
pub struct TerminalPrompter {
    navigated: Mutex<Option<String>>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigated(&self) -> Option<String> {
        self.navigated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl SessionPrompter for TerminalPrompter {
    async fn alert(&self, message: &str) {
        println!("{}", format!("! {message}").bright_yellow());
    }

    async fn confirm(&self, message: &str) -> bool {
        print!("{} {} ", message.bright_yellow(), "[y/N]".bright_black());
        let _ = std::io::stdout().flush();

        let answer = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            Ok(Err(e)) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
            Err(e) => {
                tracing::warn!("Confirmation task failed: {}", e);
                false
            }
        }
    }

    async fn navigate(&self, path: &str) {
        println!("{}", format!("-> {path}").bright_green());
        *self
            .navigated
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(path.to_string());
    }
}
