//! Configuration loading from files (std only).

use core::fmt::Write;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::ShieldConfig;

/// Load a shield configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use motor_shield::load_config;
///
/// let config = load_config("shield.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ShieldConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        let mut msg = heapless::String::new();
        let _ = write!(msg, "{}: {}", path.display(), e);
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse a shield configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation. Parse
/// errors start with the 1-based line they were found on.
pub fn parse_config(content: &str) -> Result<ShieldConfig> {
    let config: ShieldConfig = toml::from_str(content).map_err(|e| {
        let mut msg = heapless::String::new();
        let _ = match e.span() {
            Some(span) => write!(msg, "line {}: {}", line_of(content, span.start), e.message()),
            None => write!(msg, "{}", e.message()),
        };
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

fn line_of(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .map_or(0, |before| before.matches('\n').count())
        + 1
}
