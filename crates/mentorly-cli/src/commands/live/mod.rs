//! `mentorly live`: drive a live mentoring session from the terminal.

mod command;
mod helper;
mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use mentorly_application::{FormRenderer, LiveSessionController};
use mentorly_core::form::FormInput;
use mentorly_core::session::{Mentee, SessionId};
use mentorly_infrastructure::{ConfigService, HttpSessionGateway, MentorlyPaths};

use crate::prompter::TerminalPrompter;
use command::{HELP, ReplCommand};
use helper::CliHelper;

#[derive(Args)]
pub struct LiveArgs {
    /// Session id as assigned by the server
    #[arg(long)]
    session: SessionId,

    /// Mentee of the batch, repeatable
    #[arg(long = "mentee", value_name = "ID:NAME[:leave]", required = true)]
    mentees: Vec<Mentee>,

    /// Override the configured server URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the configured request timeout, in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

/// What the REPL should do after a command.
enum Flow {
    Continue,
    Exit,
}

pub async fn run(args: LiveArgs, paths: &MentorlyPaths) -> Result<()> {
    let service = ConfigService::new(paths.clone());
    let mut config = service.get_config()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }

    let gateway = Arc::new(HttpSessionGateway::new(&config)?);
    let prompter = Arc::new(TerminalPrompter::new());
    let controller =
        LiveSessionController::new(args.session, args.mentees, gateway, prompter.clone());
    let renderer = FormRenderer::new().context("Failed to load form templates")?;

    tracing::info!(
        "[Live] Session {} against {}",
        controller.session_id(),
        config.base_url
    );

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Mentorly Live Session ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/select <id>' to pick a mentee, '/help' for commands, or 'quit' to exit."
            .bright_black()
    );
    println!();
    view::print_mentees(&controller.snapshot().await);

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match trimmed.parse::<ReplCommand>() {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.yellow());
                        continue;
                    }
                };

                if let Flow::Exit = dispatch(&controller, &renderer, command).await {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if prompter.navigated().is_some() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

fn report(result: mentorly_core::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("[Live] Command failed: {}", e);
            println!("{}", format!("({e})").bright_black());
            false
        }
    }
}

async fn show(controller: &LiveSessionController) {
    view::print_snapshot(&controller.snapshot().await);
}

async fn dispatch(
    controller: &LiveSessionController,
    renderer: &FormRenderer,
    command: ReplCommand,
) -> Flow {
    match command {
        ReplCommand::Quit => return Flow::Exit,
        ReplCommand::Help => {
            for (usage, about) in HELP {
                println!("  {:<30} {}", usage.bright_cyan(), about.bright_black());
            }
        }
        ReplCommand::Mentees => view::print_mentees(&controller.snapshot().await),
        ReplCommand::Types => view::print_record_types(),
        ReplCommand::Select(mentee_id) => {
            if report(controller.select_mentee(mentee_id).await) {
                show(controller).await;
            }
        }
        ReplCommand::Type(record_type) => {
            if report(controller.show_form(record_type).await) {
                show(controller).await;
            }
        }
        ReplCommand::Set { field, value } => {
            report(controller.set_field(&field, FormInput::Text(value)).await);
        }
        ReplCommand::Check { field, checked } => {
            report(controller.set_field(&field, FormInput::Checked(checked)).await);
        }
        ReplCommand::AddSubject => match controller.add_subject().await {
            Ok(index) => println!("Added subject {}", index + 1),
            Err(e) => {
                report(Err(e));
            }
        },
        ReplCommand::SubjectSet {
            subject,
            field,
            value,
        } => {
            report(
                controller
                    .set_subject_field(subject, &field, FormInput::Text(value))
                    .await,
            );
        }
        ReplCommand::SubjectCheck {
            subject,
            field,
            checked,
        } => {
            report(
                controller
                    .set_subject_field(subject, &field, FormInput::Checked(checked))
                    .await,
            );
        }
        ReplCommand::Attempt(subject) => match controller.add_ese_attempt(subject).await {
            Ok(true) => println!("Added an ESE attempt to subject {}", subject + 1),
            Ok(false) => println!("{}", "No more ESE attempts allowed.".bright_black()),
            Err(e) => {
                report(Err(e));
            }
        },
        ReplCommand::Course(course_type) => {
            report(controller.set_course_type(course_type.as_deref()).await);
        }
        ReplCommand::Edit => {
            if report(controller.edit().await) {
                show(controller).await;
            }
        }
        ReplCommand::Save => {
            if report(controller.submit().await) {
                show(controller).await;
            }
        }
        ReplCommand::Absent(absent) => {
            if report(controller.handle_attendance_change(absent).await) {
                show(controller).await;
            }
        }
        ReplCommand::Show => show(controller).await,
        ReplCommand::Html => match controller.snapshot().await.form {
            Some(form) => match renderer.render(&form) {
                Ok(html) => println!("{html}"),
                Err(e) => {
                    report(Err(e));
                }
            },
            None => println!("{}", "No form is shown.".bright_black()),
        },
        ReplCommand::State => match serde_json::to_string_pretty(&controller.snapshot().await) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{}", format!("Error: {e}").red()),
        },
        ReplCommand::End => match controller.handle_end_session().await {
            Ok(true) => {}
            Ok(false) => println!("{}", "Session continues.".bright_black()),
            Err(e) => {
                report(Err(e));
            }
        },
    }
    Flow::Continue
}
