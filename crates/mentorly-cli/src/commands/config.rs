//! `mentorly config`: inspect and edit the client configuration.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use mentorly_infrastructure::{ClientConfig, ConfigService, MentorlyPaths};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration, environment overrides included
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file if none exists
    Init,
    /// Update values in the config file
    Set {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
        /// Cookie header value of a logged-in mentor; empty clears it
        #[arg(long)]
        session_cookie: Option<String>,
    },
}

/// Copy of `config` safe to print.
fn redacted(config: &ClientConfig) -> ClientConfig {
    ClientConfig {
        session_cookie: config.session_cookie.as_ref().map(|_| "<redacted>".to_string()),
        ..config.clone()
    }
}

pub fn run(action: ConfigAction, paths: &MentorlyPaths) -> Result<()> {
    let service = ConfigService::new(paths.clone());

    match action {
        ConfigAction::Show => {
            let config = service.get_config()?;
            print!("{}", toml::to_string_pretty(&redacted(&config))?);
        }
        ConfigAction::Path => println!("{}", service.config_path()?.display()),
        ConfigAction::Init => {
            let (path, created) = service.init()?;
            if created {
                println!("{}", format!("Created {}", path.display()).green());
            } else {
                println!("{}", format!("{} already exists", path.display()).bright_black());
            }
        }
        ConfigAction::Set {
            base_url,
            timeout,
            session_cookie,
        } => {
            let mut config = service.load_file()?;
            if let Some(base_url) = base_url {
                config.base_url = base_url.trim_end_matches('/').to_string();
            }
            if let Some(timeout) = timeout {
                config.request_timeout_secs = timeout;
            }
            if let Some(cookie) = session_cookie {
                config.session_cookie = Some(cookie).filter(|c| !c.trim().is_empty());
            }
            let path = service.save(&config)?;
            println!("{}", format!("Saved {}", path.display()).green());
        }
    }

    Ok(())
}
