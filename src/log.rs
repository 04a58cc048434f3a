//! Run log.
//!
//! Every entry is appended to a plain text file as
//! `[HH:MM:SS-Mon-DD-YYYY]: message` and echoed to stdout.

use crate::error::EtlResult;
use chrono::{DateTime, Local, TimeZone};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Hour-Minute-Second-MonthName-Day-Year
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S-%b-%d-%Y";

/// Separator written around each phase.
pub const RULE: &str = "-------------------------------------------------------------";

/// Append-only phase log.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
    echo: bool,
}

impl RunLog {
    /// Log to `path`, echoing to stdout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            echo: true,
        }
    }

    /// Log to `path` without the stdout echo.
    pub fn quiet(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            echo: false,
        }
    }

    /// Append one entry stamped with the local time.
    pub fn log(&self, message: &str) -> EtlResult<()> {
        self.log_at(&Local::now(), message)
    }

    /// Append one entry with an explicit timestamp.
    pub fn log_at<Tz>(&self, at: &DateTime<Tz>, message: &str) -> EtlResult<()>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_entry(at, message).as_bytes())?;
        if self.echo {
            println!("{}", message);
        }
        Ok(())
    }

    /// Write the separator line.
    pub fn rule(&self) -> EtlResult<()> {
        self.log(RULE)
    }
}

/// Render a single log line, newline included.
pub fn format_entry<Tz>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("[{}]: {}\n", at.format(TIMESTAMP_FORMAT), message)
}
