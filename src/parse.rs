// Response parsing: pure functions from the grades server's HTML to typed
// results. Nothing here performs I/O, so a structured API could replace the
// scraping without touching the session loop.

use regex::Regex;
use std::sync::LazyLock;

// `[0-9]` rather than `\d`: the regex crate's `\d` matches any Unicode digit.
static ATTENDEE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"attendeeID=([0-9]+)").expect("valid regex"));
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h2>(.*)</h2>").expect("valid regex"));
static UID_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"UID Number: ([0-9]{9})").expect("valid regex"));

/// A student confirmed by the comments page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub uid: String,
    pub name: String,
}

impl AttendanceRecord {
    /// `uid,"name"`, as written to the attendance log.
    pub fn log_line(&self) -> String {
        format!("{},\"{}\"", self.uid, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed(AttendanceRecord),
    Unrecognized,
}

/// Attendee identifier the attendance form links to after a successful
/// submission.
pub fn attendee_id(body: &str) -> Option<&str> {
    ATTENDEE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Extract name and UID from the comments page. Only lines carrying an
/// `<h2>` heading are considered; the UID label shares that line.
pub fn confirmation(page: &str) -> Confirmation {
    let heading = page
        .lines()
        .filter(|line| line.contains("<h2>"))
        .collect::<Vec<_>>()
        .join("\n");

    let name = NAME.captures(&heading).and_then(|c| c.get(1));
    let uid = UID_NUMBER.captures(&heading).and_then(|c| c.get(1));
    match (name, uid) {
        (Some(name), Some(uid)) => Confirmation::Confirmed(AttendanceRecord {
            uid: uid.as_str().to_string(),
            name: name.as_str().trim().to_string(),
        }),
        _ => Confirmation::Unrecognized,
    }
}
