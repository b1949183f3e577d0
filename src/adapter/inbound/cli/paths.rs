//! Path utilities for tokenwatch.
//!
//! All data lives under `~/.tokenwatch/`:
//! - `~/.tokenwatch/config.toml` - main configuration
//! - `~/.tokenwatch/tokenwatch.db` - alert database

use std::path::PathBuf;

/// Returns the tokenwatch home directory (`~/.tokenwatch/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tokenwatch")
}

/// Returns the default config file path (`~/.tokenwatch/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.tokenwatch/tokenwatch.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("tokenwatch.db")
}

/// Ensures the tokenwatch home directory exists.
pub fn ensure_home_dir() -> std::io::Result<()> {
    std::fs::create_dir_all(home_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_tokenwatch_home() {
        let home = home_dir();
        let config = default_config();
        let db = default_database();

        assert!(home.to_string_lossy().contains(".tokenwatch"));
        assert!(config.starts_with(&home));
        assert!(db.starts_with(&home));
    }
}
