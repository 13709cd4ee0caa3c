// UI layer: the read-submit-confirm-log loop. Terminal streams are passed in
// so the loop can be driven from a test with in-memory buffers.

use crate::api::AttendanceService;
use crate::config::SessionConfig;
use crate::input::{classify, Command, SwipeEvent};
use crate::logbook::Logbook;
use crate::parse::{self, AttendanceRecord, Confirmation};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Swipe Card Now (or enter UID): ";

/// Result of handling one swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Confirmed(AttendanceRecord),
    /// No attendee id came back, usually because the session cookie expired.
    SubmissionFailed,
    /// The comments page did not show a name and UID.
    ParseFailed,
}

/// Run the attendance loop until an exit keyword or end of input.
///
/// The session separator is written to the log before the first prompt.
/// Log file errors end the loop; everything that goes wrong remotely is
/// reported and the operator is prompted again.
pub fn run<S, R, O, E>(
    config: &SessionConfig,
    service: &S,
    mut input: R,
    out: &mut O,
    err: &mut E,
) -> Result<()>
where
    S: AttendanceService,
    R: BufRead,
    O: Write,
    E: Write,
{
    let logbook = Logbook::new(&config.log_file);
    logbook.start_session()?;
    log::info!(
        "taking attendance for course {} assignment {} into {}",
        config.course_id,
        config.assignment_id,
        logbook.path().display()
    );

    let mut buf = Vec::new();
    loop {
        write!(out, "{}", PROMPT.white())?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).context("Failed to read input")? == 0 {
            writeln!(out)?;
            break;
        }
        // Card readers can emit stray 8-bit bytes; those become U+FFFD and
        // the line is classified like any other.
        let line = String::from_utf8_lossy(&buf);

        let event = match classify(&line) {
            Command::Blank => {
                logbook.blank()?;
                continue;
            }
            Command::Exit => break,
            Command::Swipe(event) => event,
        };
        log::debug!("classified input as {:?}", event);

        match take_attendance(config, service, &event) {
            Outcome::Confirmed(record) => {
                writeln!(
                    out,
                    "{}",
                    format!("Success: {}", record.name.as_str().bold()).green()
                )?;
                logbook.record(&record)?;
            }
            Outcome::SubmissionFailed => {
                error_signal(err, "ERROR (probably an expired session)")?;
            }
            Outcome::ParseFailed => error_signal(err, "ERROR")?,
        }
    }

    writeln!(out, "Exiting...")?;
    Ok(())
}

/// Submit one swipe and, if the server accepted it, look up who it was.
/// A transport error on the submission counts as a failed submission; one on
/// the lookup counts as an unreadable page.
pub fn take_attendance<S: AttendanceService>(
    config: &SessionConfig,
    service: &S,
    event: &SwipeEvent,
) -> Outcome {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Submitting...");

    let outcome = confirm(config, service, event, &spinner);
    spinner.finish_and_clear();
    outcome
}

fn confirm<S: AttendanceService>(
    config: &SessionConfig,
    service: &S,
    event: &SwipeEvent,
    spinner: &ProgressBar,
) -> Outcome {
    let body = match service.submit(config, event) {
        Ok(body) => body,
        Err(e) => {
            log::warn!("attendance request failed: {:#}", e);
            return Outcome::SubmissionFailed;
        }
    };
    let Some(attendee_id) = parse::attendee_id(&body) else {
        log::warn!("no attendee id in attendance response");
        return Outcome::SubmissionFailed;
    };
    log::debug!("attendee id {}", attendee_id);

    spinner.set_message("Confirming...");
    let page = match service.view_comments(config, attendee_id) {
        Ok(page) => page,
        Err(e) => {
            log::warn!("comments request failed: {:#}", e);
            return Outcome::ParseFailed;
        }
    };
    match parse::confirmation(&page) {
        Confirmation::Confirmed(record) => Outcome::Confirmed(record),
        Confirmation::Unrecognized => {
            log::warn!("comments page for attendee {} has no name/UID", attendee_id);
            Outcome::ParseFailed
        }
    }
}

/// Red message followed by the terminal bell.
fn error_signal<E: Write>(err: &mut E, message: &str) -> Result<()> {
    writeln!(err, "{}", message.red().bold())?;
    write!(err, "\x07")?;
    err.flush()?;
    Ok(())
}
