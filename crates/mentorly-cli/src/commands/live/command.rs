//! Parsing of REPL input lines.

use mentorly_core::record::RecordType;
use mentorly_core::session::MenteeId;
use std::str::FromStr;

/// One line typed at the live-session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Mentees,
    Select(MenteeId),
    /// `None` clears the selector and hides the form.
    Type(Option<RecordType>),
    Types,
    Set { field: String, value: String },
    Check { field: String, checked: bool },
    AddSubject,
    SubjectSet { subject: usize, field: String, value: String },
    SubjectCheck { subject: usize, field: String, checked: bool },
    Attempt(usize),
    Course(Option<String>),
    Edit,
    Save,
    Absent(bool),
    Show,
    Html,
    State,
    End,
    Quit,
}

/// Completion candidates, in help order.
pub const COMMANDS: &[&str] = &[
    "/help", "/mentees", "/select", "/type", "/types", "/set", "/check", "/subject", "/sset",
    "/scheck", "/attempt", "/course", "/edit", "/save", "/absent", "/show", "/html", "/state",
    "/end",
];

pub const HELP: &[(&str, &str)] = &[
    ("/mentees", "list mentees in this session"),
    ("/select <id>", "select a mentee"),
    ("/types", "list record types"),
    ("/type <record_type|none>", "choose the record form"),
    ("/set <field> [value]", "fill a field of the current form"),
    ("/check <field> on|off", "toggle a checkbox field"),
    ("/subject add", "append a blank subject"),
    ("/sset <n> <field> [value]", "fill a field of subject n"),
    ("/scheck <n> <field> on|off", "toggle a checkbox of subject n"),
    ("/attempt <n>", "add an ESE attempt to subject n"),
    ("/course <Honors|Minors|none>", "pick the course type"),
    ("/edit", "unlock saved data for editing"),
    ("/save", "submit the current form"),
    ("/absent on|off", "mark attendance"),
    ("/show", "print the page state"),
    ("/html", "print the rendered form markup"),
    ("/state", "print the page state as JSON"),
    ("/end", "end the session"),
    ("quit", "leave without ending the session"),
];

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("Expected on/off, got '{other}'")),
    }
}

/// Parses a 1-based subject number into an index.
fn parse_subject(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Invalid subject number '{raw}'")),
    }
}

fn require<'a>(arg: &'a str, usage: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(arg)
    }
}

/// Splits `rest` into its first word and the trimmed remainder.
fn split_word(rest: &str) -> (&str, &str) {
    let rest = rest.trim_start();
    match rest.split_once(char::is_whitespace) {
        Some((word, tail)) => (word, tail.trim()),
        None => (rest, ""),
    }
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Ok(Self::Quit);
        }
        let (head, rest) = split_word(line);

        match head {
            "/help" => Ok(Self::Help),
            "/mentees" => Ok(Self::Mentees),
            "/select" => {
                let raw = require(rest, "/select <id>")?;
                raw.parse()
                    .map(Self::Select)
                    .map_err(|_| format!("Invalid mentee id '{raw}'"))
            }
            "/types" => Ok(Self::Types),
            "/type" => {
                let raw = require(rest, "/type <record_type|none>")?;
                if raw.eq_ignore_ascii_case("none") {
                    return Ok(Self::Type(None));
                }
                RecordType::from_str(raw)
                    .map(|t| Self::Type(Some(t)))
                    .map_err(|_| format!("Unknown record type '{raw}' (see /types)"))
            }
            "/set" => {
                let (field, value) = split_word(rest);
                let field = require(field, "/set <field> [value]")?;
                Ok(Self::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "/check" => {
                let (field, switch) = split_word(rest);
                let field = require(field, "/check <field> on|off")?;
                let checked = parse_switch(require(switch, "/check <field> on|off")?)?;
                Ok(Self::Check {
                    field: field.to_string(),
                    checked,
                })
            }
            "/subject" => match rest {
                "add" => Ok(Self::AddSubject),
                _ => Err("Usage: /subject add".to_string()),
            },
            "/sset" | "/scheck" => {
                let usage = if head == "/sset" {
                    "/sset <n> <field> [value]"
                } else {
                    "/scheck <n> <field> on|off"
                };
                let (n, tail) = split_word(rest);
                let subject = parse_subject(require(n, usage)?)?;
                let (field, value) = split_word(tail);
                let field = require(field, usage)?.to_string();
                if head == "/sset" {
                    Ok(Self::SubjectSet {
                        subject,
                        field,
                        value: value.to_string(),
                    })
                } else {
                    let checked = parse_switch(require(value, usage)?)?;
                    Ok(Self::SubjectCheck {
                        subject,
                        field,
                        checked,
                    })
                }
            }
            "/attempt" => {
                let raw = require(rest, "/attempt <n>")?;
                parse_subject(raw).map(Self::Attempt)
            }
            "/course" => {
                let raw = require(rest, "/course <Honors|Minors|none>")?;
                if raw.eq_ignore_ascii_case("none") {
                    Ok(Self::Course(None))
                } else {
                    Ok(Self::Course(Some(raw.to_string())))
                }
            }
            "/edit" => Ok(Self::Edit),
            "/save" => Ok(Self::Save),
            "/absent" => {
                let raw = require(rest, "/absent on|off")?;
                parse_switch(raw).map(Self::Absent)
            }
            "/show" => Ok(Self::Show),
            "/html" => Ok(Self::Html),
            "/state" => Ok(Self::State),
            "/end" => Ok(Self::End),
            other => Err(format!("Unknown command '{other}' (try /help)")),
        }
    }
}
