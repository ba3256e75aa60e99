//! Utility functions and helpers

use crate::error::{CookieError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        let rest = match path.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                rest.trim_start_matches('/')
            }
            _ => return Ok(PathBuf::from(path)),
        };

        match dirs::home_dir() {
            Some(home_dir) if rest.is_empty() => Ok(home_dir),
            Some(home_dir) => Ok(home_dir.join(rest)),
            None => Err(CookieError::Config(
                "Cannot determine home directory".to_string(),
            )),
        }
    }

    /// Check if file exists and is readable
    pub fn check_file_readable(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(CookieError::FileNotFound(format!(
                "File not found: {:?}",
                path
            )));
        }

        if !path.is_file() {
            return Err(CookieError::Config(format!("Path is not a file: {:?}", path)));
        }

        std::fs::File::open(path)?;
        Ok(())
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse durations (supports suffixes 's', 'm', 'h', 'd')
    pub fn parse_duration(input: &str) -> Result<Duration> {
        if let Ok(seconds) = input.parse::<u64>() {
            return Ok(Duration::from_secs(seconds));
        }

        let (number_part, unit) = if let Some(stripped) = input.strip_suffix('s') {
            (stripped, 1)
        } else if let Some(stripped) = input.strip_suffix('m') {
            (stripped, 60)
        } else if let Some(stripped) = input.strip_suffix('h') {
            (stripped, 3600)
        } else if let Some(stripped) = input.strip_suffix('d') {
            (stripped, 86400)
        } else {
            return Err(CookieError::Config(format!(
                "Invalid duration format: '{}'. Use number with optional suffix (s/m/h/d)",
                input
            )));
        };

        let number: u64 = number_part.parse().map_err(|_| {
            CookieError::Config(format!("Invalid duration number: '{}'", number_part))
        })?;

        number
            .checked_mul(unit)
            .map(Duration::from_secs)
            .ok_or_else(|| CookieError::Config(format!("Duration too large: '{}'", input)))
    }
}
