use std::fmt;

/// Configuration-shaped failure (bad file, unsupported version, invalid
/// filter value). Everything else goes through `anyhow`.
#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}
