// Attendance log: a plain text file that is only ever appended to. Each
// write opens the file, appends, and closes it again, so nothing is lost if
// the process is killed between swipes.

use crate::parse::AttendanceRecord;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const SEPARATOR: &str = "----------------------------";

#[derive(Debug, Clone)]
pub struct Logbook {
    path: PathBuf,
}

impl Logbook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Logbook { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mark the start of a session: a dashed separator, the local time and
    /// an empty line.
    pub fn start_session(&self) -> Result<()> {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z");
        self.append(&format!("{}\n{}\n\n", SEPARATOR, now))
    }

    /// Blank input is recorded as an empty line, e.g. to separate sections.
    pub fn blank(&self) -> Result<()> {
        self.append("\n")
    }

    pub fn record(&self, record: &AttendanceRecord) -> Result<()> {
        self.append(&format!("{}\n", record.log_line()))
    }

    fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file {}", self.path.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write log file {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn session_header_is_separator_timestamp_blank() {
        let dir = tempdir().unwrap();
        let logbook = Logbook::new(dir.path().join("log.txt"));
        logbook.start_session().unwrap();

        let text = fs::read_to_string(logbook.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], SEPARATOR);
        assert!(chrono::DateTime::parse_from_str(lines[1], "%Y-%m-%d %H:%M:%S %z").is_ok());
        assert_eq!(lines[2], "");
    }

    #[test]
    fn appends_never_truncate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "earlier\n").unwrap();

        let logbook = Logbook::new(&path);
        logbook
            .record(&AttendanceRecord {
                uid: "123456789".into(),
                name: "Jane Doe".into(),
            })
            .unwrap();
        logbook.blank().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "earlier\n123456789,\"Jane Doe\"\n\n"
        );
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempdir().unwrap();
        let logbook = Logbook::new(dir.path().join("no/such/dir/log.txt"));
        let err = logbook.blank().unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
