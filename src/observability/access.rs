//! Access log in a common-log-like format:
//! `host [2006-01-02 15:04:05] "GET /path" 42`.

use std::fmt;

use chrono::{DateTime, Local};

/// Log target for access lines, filterable independently of the gateway.
pub const ACCESS_TARGET: &str = "access";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One handled request.
#[derive(Debug, Clone, Copy)]
pub struct AccessLogEntry<'a> {
    pub host: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    pub status: u16,
    /// Length of the response body text the function returned.
    pub body_len: usize,
}

impl<'a> AccessLogEntry<'a> {
    /// Render the line as of `at`.
    pub fn line(&self, at: DateTime<Local>) -> AccessLine<'a> {
        AccessLine { entry: *self, at }
    }

    pub fn emit(&self) {
        tracing::info!(
            target: ACCESS_TARGET,
            status = self.status,
            "{}",
            self.line(Local::now())
        );
    }
}

/// Displayable access line.
pub struct AccessLine<'a> {
    entry: AccessLogEntry<'a>,
    at: DateTime<Local>,
}

impl fmt::Display for AccessLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] \"{} {}\" {}",
            self.entry.host,
            self.at.format(TIMESTAMP_FORMAT),
            self.entry.method,
            self.entry.path,
            self.entry.body_len
        )
    }
}
