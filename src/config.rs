//! Configuration management for crumbs

use std::path::PathBuf;

/// Environment variable naming the cookie jar file
pub const JAR_ENV: &str = "CRUMBS_JAR";

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub verbose: bool,
    pub silent: bool,
    pub format_json: bool,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub jar_path: PathBuf,
    pub parse_values: bool,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            jar_path: default_jar_path(),
            parse_values: false,
            output: OutputConfig::default(),
        }
    }
}

/// `<data dir>/crumbs/jar.json`, falling back to the working directory.
pub fn default_jar_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crumbs")
        .join("jar.json")
}
