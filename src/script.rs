//! Headless driver: reads one command per line and prints the session state
//! as JSON after each command.

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::games::guess::{feedback_message, Session, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Guess(String),
    TogglePause,
    TryAgain,
    Reveal,
    Show,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// Blank lines and `#` comments parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "guess" => {
            if rest.is_empty() {
                return Err(ScriptError::MissingArgument("guess"));
            }
            Command::Guess(rest.to_string())
        }
        "pause" | "toggle" => Command::TogglePause,
        "try-again" | "retry" => Command::TryAgain,
        "reveal" => Command::Reveal,
        "show" => Command::Show,
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub command: String,
    #[serde(flatten)]
    pub snapshot: Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn apply<R: Rng>(session: &mut Session<R>, command: &Command) -> Option<String> {
    match command {
        Command::Start => session.start(),
        Command::Guess(text) => {
            if let Err(e) = session.guess_input(text) {
                return Some(e.to_string());
            }
        }
        Command::TogglePause => session.toggle_pause(),
        Command::TryAgain => session.try_again(),
        Command::Reveal => {
            session.reveal();
        }
        Command::Show => {}
    }
    None
}

/// Runs every line of `input` against `session`, writing one JSON report per
/// command to `output`. Bad lines are reported and skipped.
/// Lines that are not valid UTF-8 are decoded lossily and end up reported
/// as unknown commands.
pub fn run<R: Rng>(session: &mut Session<R>, mut input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let error = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => apply(session, &command),
            Err(e) => {
                warn!(line = %line.trim(), "skipping bad script line: {e}");
                Some(e.to_string())
            }
        };

        let report = StepReport {
            command: line.trim().to_string(),
            snapshot: session.snapshot(),
            message: feedback_message(session),
            error,
        };
        serde_json::to_writer(&mut output, &report)?;
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse_command("start"), Ok(Some(Command::Start)));
        assert_eq!(parse_command("  GUESS  4 "), Ok(Some(Command::Guess("4".into()))));
        assert_eq!(parse_command("guess four"), Ok(Some(Command::Guess("four".into()))));
        assert_eq!(parse_command("toggle"), Ok(Some(Command::TogglePause)));
        assert_eq!(parse_command("pause"), Ok(Some(Command::TogglePause)));
        assert_eq!(parse_command("retry"), Ok(Some(Command::TryAgain)));
        assert_eq!(parse_command("try-again"), Ok(Some(Command::TryAgain)));
        assert_eq!(parse_command("reveal"), Ok(Some(Command::Reveal)));
        assert_eq!(parse_command("show"), Ok(Some(Command::Show)));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(parse_command("# warm up"), Ok(None));
    }

    #[test]
    fn rejects_bad_lines() {
        assert_eq!(parse_command("guess"), Err(ScriptError::MissingArgument("guess")));
        assert_eq!(parse_command("jump 3"), Err(ScriptError::UnknownCommand("jump".into())));
    }

    #[test]
    fn run_writes_one_report_per_command() {
        let mut session = Session::with_rng(1..=10, StdRng::seed_from_u64(3)).unwrap();
        let script = "start\n\n# comment\nguess 0\nguess x\nfly\npause\nreveal\n";
        let mut out = Vec::new();
        run(&mut session, script.as_bytes(), &mut out).unwrap();

        let reports: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(reports.len(), 6);

        assert_eq!(reports[0]["command"], "start");
        assert_eq!(reports[0]["status"], "active");
        assert_eq!(reports[0]["message"], "Make a guess!");
        assert!(reports[0]["target"].is_null());

        assert_eq!(reports[1]["attempts"], 1);
        assert_eq!(reports[1]["last_feedback"], "too_low");

        assert_eq!(reports[2]["error"], "'x' is not a number");
        assert_eq!(reports[2]["attempts"], 1);

        assert_eq!(reports[3]["error"], "unknown command 'fly'");

        assert_eq!(reports[4]["paused"], true);
        assert_eq!(reports[4]["message"], "Paused.");

        assert_eq!(reports[5]["answer_revealed"], true);
        assert_eq!(reports[5]["target"], serde_json::json!(session.target().unwrap()));
        assert!(reports[5].get("error").is_none());
    }

    #[test]
    fn invalid_utf8_line_is_reported_and_the_run_continues() {
        let mut session = Session::with_rng(1..=10, StdRng::seed_from_u64(3)).unwrap();
        let script: &[u8] = b"start\n\xff\xfe\nguess 0\nshow";
        let mut out = Vec::new();
        run(&mut session, script, &mut out).unwrap();

        let reports: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(reports.len(), 4);

        assert!(reports[1]["error"].as_str().unwrap().starts_with("unknown command"));
        assert_eq!(reports[1]["attempts"], 0);

        assert_eq!(reports[2]["command"], "guess 0");
        assert_eq!(reports[2]["attempts"], 1);
        assert_eq!(reports[3]["command"], "show");
        assert_eq!(session.attempts(), 1);
    }
}
