use anyhow::Result;
use clap::{Parser, Subcommand};
use mentorly_infrastructure::MentorlyPaths;
use std::path::PathBuf;

mod commands;
mod logging;
mod prompter;

#[derive(Parser)]
#[command(name = "mentorly")]
#[command(about = "Mentorly CLI - record mentee data during a live mentoring session", long_about = None)]
struct Cli {
    /// Use this directory instead of the platform config directory
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the live-session REPL
    Live(commands::live::LiveArgs),
    /// Manage the client configuration file
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = MentorlyPaths::new(cli.config_dir);
    let _log_guard = logging::init(&paths, cli.verbose)?;

    match cli.command {
        Commands::Live(args) => commands::live::run(args, &paths).await?,
        Commands::Config { action } => commands::config::run(action, &paths)?,
    }

    Ok(())
}
