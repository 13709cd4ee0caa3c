// API client module: a small blocking HTTP client for the two grades
// server pages the attendance loop talks to. It returns raw response text;
// interpreting it is left to `parse`.

use crate::config::SessionConfig;
use crate::input::SwipeEvent;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, HOST, REFERER};

/// The two remote calls made per swipe. `ApiClient` talks to the real
/// server; tests substitute canned pages.
pub trait AttendanceService {
    /// POST the attendance form and return the response body.
    fn submit(&self, config: &SessionConfig, event: &SwipeEvent) -> Result<String>;

    /// GET the comments page for an attendee and return its body.
    fn view_comments(&self, config: &SessionConfig, attendee_id: &str) -> Result<String>;
}

/// Form body for the attendance POST. The payload was escaped when the
/// line was classified, so values are inserted as-is.
pub fn form_body(config: &SessionConfig, event: &SwipeEvent) -> String {
    format!(
        "courseID={}&assignmentID={}&uid={}&idcard={}&submit=Take+Attendance",
        config.course_id,
        config.assignment_id,
        event.uid(),
        event.idcard()
    )
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Build the client with reqwest defaults (no explicit timeout).
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client })
    }

    /// Headers shared by both requests: the session cookie (validated when
    /// the config was built), the server's host name and the referring page.
    fn session_headers(config: &SessionConfig, referer: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, config.cookie().clone());
        headers.insert(
            HOST,
            HeaderValue::from_str(&config.host()).context("Invalid Host header")?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(referer).context("Invalid Referer header")?,
        );
        Ok(headers)
    }
}

impl AttendanceService for ApiClient {
    fn submit(&self, config: &SessionConfig, event: &SwipeEvent) -> Result<String> {
        let url = config.attendance_url();
        let mut headers = Self::session_headers(config, &config.attendance_referer())?;
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        log::debug!("POST {}", url);
        let res = self
            .client
            .post(&url)
            .headers(headers)
            .body(form_body(config, event))
            .send()
            .context("Failed to send attendance request")?;
        // The form reports problems in the page itself, so the body is
        // returned whatever the status.
        log::debug!("attendance response: {}", res.status());
        res.text().context("Failed to read attendance response")
    }

    fn view_comments(&self, config: &SessionConfig, attendee_id: &str) -> Result<String> {
        let url = format!(
            "{}?stuID={}&courseID={}",
            config.comments_url(),
            attendee_id,
            config.course_id
        );
        let headers = Self::session_headers(config, &config.comments_referer())?;

        log::debug!("GET {}", url);
        let res = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .context("Failed to send comments request")?;
        log::debug!("comments response: {}", res.status());
        res.text().context("Failed to read comments page")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    fn config() -> SessionConfig {
        SessionConfig::new("CMSC216", "42", "sid=abc", "log.txt", DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn uid_form_body_leaves_idcard_empty() {
        let body = form_body(&config(), &SwipeEvent::Uid("123456789".into()));
        assert_eq!(
            body,
            "courseID=CMSC216&assignmentID=42&uid=123456789&idcard=&submit=Take+Attendance"
        );
    }

    #[test]
    fn card_form_body_leaves_uid_empty() {
        let body = form_body(&config(), &SwipeEvent::Card("%3B6009%3F".into()));
        assert_eq!(
            body,
            "courseID=CMSC216&assignmentID=42&uid=&idcard=%3B6009%3F&submit=Take+Attendance"
        );
    }

    #[test]
    fn session_headers_carry_raw_cookie() {
        let cfg = config();
        let headers = ApiClient::session_headers(&cfg, &cfg.comments_referer()).unwrap();
        assert_eq!(headers[COOKIE], "sid=abc");
        assert_eq!(headers[HOST], "grades.cs.umd.edu");
        assert_eq!(
            headers[REFERER],
            "https://grades.cs.umd.edu/classWeb/viewComments.cgi"
        );
    }

    #[test]
    fn referer_with_newline_is_rejected() {
        let cfg = config();
        assert!(ApiClient::session_headers(&cfg, "r\nx").is_err());
    }
}
