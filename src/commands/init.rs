use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, if needed, and writes a default `config.json` into it.
///
/// # Errors
/// - Returns an error if a config file already exists or any file operations fail.
pub fn init(fintrack_home: &Path) -> Result<Out<()>> {
    let config = Config::create(fintrack_home)
        .context("Unable to create the home directory and config")?;
    Ok(format!("Wrote {}", config.config_path().display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("fintrack");
        let out = init(&home).unwrap();
        assert!(out.message().starts_with("Wrote "));
        assert!(home.join("config.json").is_file());
        assert!(init(&home).is_err());
    }
}
