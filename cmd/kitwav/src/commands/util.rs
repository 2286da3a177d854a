//! Utility functions for CLI commands.

use std::path::Path;

use anyhow::Context as _;

use crate::Cli;
use crate::config::Config;

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = Config::resolve_path(cli.config.as_deref())?;
    Config::load(&path)
}

/// Reads a source file.
pub fn read_source(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Rejects exports longer than the configured limit.
pub fn check_duration(duration_secs: f64, cfg: &Config) -> anyhow::Result<()> {
    if duration_secs > cfg.max_duration_secs {
        anyhow::bail!(
            "export is {:.2}s long, limit is {:.2}s (max_duration_secs)",
            duration_secs,
            cfg.max_duration_secs
        );
    }
    Ok(())
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_duration() {
        let cfg = Config::default();
        assert!(check_duration(20.0, &cfg).is_ok());
        assert!(check_duration(0.0, &cfg).is_ok());
        let err = check_duration(20.5, &cfg).unwrap_err();
        assert!(err.to_string().contains("limit is 20.00s"));
    }
}
