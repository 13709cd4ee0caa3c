// Session parameters: everything the loop needs to know about the course
// being taken, fixed once at startup and passed by reference afterwards.

use anyhow::{bail, Context, Result};
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::path::PathBuf;

/// Grades server used when `ATTENDANCE_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://grades.cs.umd.edu/classWeb";

/// Printed on stderr when the command line is incomplete.
pub const USAGE: &str = "Usage: swipe-attendance <courseID> <assignmentID> <cookies> <logFile>";

/// Immutable configuration for one attendance session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub course_id: String,
    pub assignment_id: String,
    /// Raw `Cookie` header value, forwarded untouched.
    cookie: HeaderValue,
    pub log_file: PathBuf,
    base_url: Url,
}

impl SessionConfig {
    pub fn new(
        course_id: impl Into<String>,
        assignment_id: impl Into<String>,
        cookies: impl Into<String>,
        log_file: impl Into<PathBuf>,
        base_url: &str,
    ) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;
        if base_url.host_str().is_none() {
            bail!("Base URL has no host: {}", trimmed);
        }
        let cookie = HeaderValue::from_str(&cookies.into())
            .context("Cookie string is not a valid header value")?;
        Ok(SessionConfig {
            course_id: course_id.into(),
            assignment_id: assignment_id.into(),
            cookie,
            log_file: log_file.into(),
            base_url,
        })
    }

    /// Build the configuration from positional arguments (program name
    /// already skipped). Extra arguments are ignored. The base URL comes
    /// from `ATTENDANCE_BASE_URL` or falls back to [`DEFAULT_BASE_URL`].
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let base_url =
            std::env::var("ATTENDANCE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::from_args_with_base(args, &base_url)
    }

    pub fn from_args_with_base<I>(args: I, base_url: &str) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let (Some(course), Some(assignment), Some(cookies), Some(log_file)) =
            (args.next(), args.next(), args.next(), args.next())
        else {
            bail!(USAGE);
        };
        Self::new(course, assignment, cookies, log_file, base_url)
    }

    pub fn cookie(&self) -> &HeaderValue {
        &self.cookie
    }

    fn endpoint(&self, page: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), page)
    }

    pub fn attendance_url(&self) -> String {
        self.endpoint("takeAttendance.cgi")
    }

    pub fn comments_url(&self) -> String {
        self.endpoint("viewComments.cgi")
    }

    /// Referer the attendance form expects: the form page for this
    /// course/assignment pair.
    pub fn attendance_referer(&self) -> String {
        format!(
            "{}?assignmentID={}&courseID={}",
            self.attendance_url(),
            self.assignment_id,
            self.course_id
        )
    }

    pub fn comments_referer(&self) -> String {
        self.comments_url()
    }

    /// Value for the explicit `Host` header, including a non-default port.
    pub fn host(&self) -> String {
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }
}
