use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use date_calculator::{DiffResult, DisplayState, Event, Outcome, Session};
use serde::Serialize;

use crate::logging::Verbosity;

const HELP: &str = "\
Commands:
  start <date>      set the start date
  end <date>        set the end date
  today start|end   set a date to today
  swap              exchange start and end
  show              print the current result
  quit              leave";

#[derive(Debug, Parser)]
#[command(name = "datecalc", version, about = "Years, months and days between two dates")]
pub struct Cli {
    /// Start date in any accepted format [default: today]
    pub start: Option<String>,

    /// End date in any accepted format [default: today]
    pub end: Option<String>,

    /// Swap start and end before computing
    #[arg(long)]
    pub swap: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,

    /// Read commands from stdin
    #[arg(short, long, conflicts_with_all = ["start", "end", "swap"])]
    pub interactive: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "debug")]
    pub quiet: bool,

    /// Log debug detail
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    from: &'a str,
    to:   &'a str,
    #[serde(flatten)]
    diff: DiffResult,
}

/// One-shot mode: apply the positional dates, print, exit.
pub fn run(cli: &Cli, session: &mut Session, out: &mut impl Write) -> Result<()> {
    if let Some(text) = &cli.start {
        apply(session, Event::StartText(text.clone()))
            .with_context(|| format!("Invalid start date {text:?}"))?;
    }
    if let Some(text) = &cli.end {
        apply(session, Event::EndText(text.clone()))
            .with_context(|| format!("Invalid end date {text:?}"))?;
    }
    if cli.swap {
        apply(session, Event::Swap)?;
    }

    if cli.json {
        let display = session.display();
        let report = Report {
            from: &display.from,
            to:   &display.to,
            diff: session.result(),
        };
        serde_json::to_writer_pretty(&mut *out, &report).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        write_summary(out, session.display())?;
    }
    Ok(())
}

/// Reads commands line by line until `quit` or end of input.
pub fn interactive(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Some(Command::Apply(event)) => match session.dispatch(event) {
                Outcome::Updated(_) => write_summary(out, session.display())?,
                Outcome::Rejected(err) => writeln!(out, "Could not read date: {err}")?,
                Outcome::Ignored => {},
            },
            Some(Command::Show) => {
                writeln!(out, "{}", session.display().today)?;
                write_summary(out, session.display())?;
            },
            Some(Command::Help) => writeln!(out, "{HELP}")?,
            Some(Command::Quit) => break,
            None => writeln!(out, "Unknown command: {line} (try `help`)")?,
        }
        out.flush()?;
    }
    Ok(())
}

fn apply(session: &mut Session, event: Event) -> Result<DiffResult> {
    match session.dispatch(event) {
        Outcome::Updated(diff) => Ok(diff),
        Outcome::Rejected(err) => Err(err.into()),
        Outcome::Ignored => bail!("Session is in the middle of an update"),
    }
}

fn write_summary(out: &mut impl Write, display: &DisplayState) -> std::io::Result<()> {
    writeln!(out, "From:   {}", display.from)?;
    writeln!(out, "To:     {}", display.to)?;
    writeln!(out, "Days:   {}", display.days)?;
    writeln!(out, "Months: {}", display.months)?;
    writeln!(out, "Years:  {}", display.years)
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Apply(Event),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match (word.to_ascii_lowercase().as_str(), rest) {
        ("start", text) if !text.is_empty() => Command::Apply(Event::StartText(text.to_owned())),
        ("end", text) if !text.is_empty() => Command::Apply(Event::EndText(text.to_owned())),
        ("today", "start") => Command::Apply(Event::StartToday),
        ("today", "end") => Command::Apply(Event::EndToday),
        ("swap", "") => Command::Apply(Event::Swap),
        ("show", "") => Command::Show,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit", "") => Command::Quit,
        _ => return None,
    };
    Some(command)
}
