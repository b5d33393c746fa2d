use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use mentorly_core::record::{COURSE_TYPE_OPTIONS, RecordType};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use strum::IntoEnumIterator;

use super::command::COMMANDS;

const SWITCHES: &[&str] = &["on", "off"];

/// Rustyline helper completing slash commands and the fixed-choice
/// arguments of `/type`, `/course` and `/absent`.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    record_types: Vec<String>,
    course_types: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        let mut record_types: Vec<String> =
            RecordType::iter().map(|t| t.as_str().to_string()).collect();
        record_types.push("none".to_string());
        let mut course_types: Vec<String> =
            COURSE_TYPE_OPTIONS.iter().map(|c| c.value.to_string()).collect();
        course_types.push("none".to_string());

        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            record_types,
            course_types,
        }
    }

    /// Choices for the word being typed, with the byte offset it starts at.
    fn suggestions<'a>(&'a self, line: &'a str) -> Option<(usize, Vec<&'a str>)> {
        if !line.starts_with('/') {
            return None;
        }
        let Some((command, arg)) = line.split_once(' ') else {
            let matches = self
                .commands
                .iter()
                .map(String::as_str)
                .filter(|cmd| cmd.starts_with(line))
                .collect();
            return Some((0, matches));
        };
        if arg.contains(' ') {
            return None;
        }

        let choices: Vec<&str> = match command {
            "/type" => self.record_types.iter().map(String::as_str).collect(),
            "/course" => self.course_types.iter().map(String::as_str).collect(),
            "/absent" => SWITCHES.to_vec(),
            _ => return None,
        };
        let matches = choices
            .into_iter()
            .filter(|choice| choice.to_lowercase().starts_with(&arg.to_lowercase()))
            .collect();
        Some((command.len() + 1, matches))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        match self.suggestions(&line[..pos]) {
            Some((start, matches)) => {
                let candidates = matches
                    .into_iter()
                    .map(|choice| Pair {
                        display: choice.to_string(),
                        replacement: choice.to_string(),
                    })
                    .collect();
                Ok((start, candidates))
            }
            None => Ok((0, vec![])),
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    /// Hints the rest of the first match, when the typed prefix matches it
    /// exactly in case.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, matches) = self.suggestions(line)?;
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|choice| choice.starts_with(typed) && choice.len() > typed.len())
            .map(|choice| choice[typed.len()..].to_string())
    }
}

impl Validator for CliHelper {}
