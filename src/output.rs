//! Output formatting and display utilities

use crate::codec::CookieEntry;
use crate::config::OutputConfig;
use crate::error::Result;
use std::io::{self, Write};

/// Renders command results to stdout and diagnostics to stderr
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write a line of content unless silenced
    pub fn write(&self, content: &str) -> Result<()> {
        if self.config.silent {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }

    /// Write a single cookie's value, or the whole entry as JSON
    pub fn write_entry(&self, entry: &CookieEntry) -> Result<()> {
        let rendered = if self.config.format_json {
            serde_json::to_string_pretty(entry)?
        } else {
            entry.value.to_string()
        };
        self.write(&rendered)
    }

    /// Write a list of cookies as `name=value` lines, or as a JSON array
    pub fn write_entries(&self, entries: &[CookieEntry]) -> Result<()> {
        let rendered = format_entries(entries, self.config.format_json)?;
        if rendered.is_empty() {
            return Ok(());
        }
        self.write(&rendered)
    }

    /// Write verbose information (if enabled)
    pub fn write_verbose(&self, message: &str) -> Result<()> {
        if self.config.verbose && !self.config.silent {
            eprintln!("* {}", message);
        }
        Ok(())
    }
}

pub(crate) fn format_entries(entries: &[CookieEntry], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(entries)?);
    }
    Ok(entries
        .iter()
        .map(|entry| format!("{}={}", entry.name, entry.value))
        .collect::<Vec<_>>()
        .join("\n"))
}
