//! Write a default quarry.toml.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    println!("{} Initializing Quarry project...", "→".blue());
    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if config_path.exists() {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    } else {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  {} quarry check scenario.txt", "1.".blue());
    println!("  {} quarry run scenario.txt", "2.".blue());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_default_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sim");
        run(Some(target.display().to_string())).unwrap();

        let path = target.join(CONFIG_FILE);
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        std::fs::write(&path, "[render]\nenabled = false\n").unwrap();
        run(Some(target.display().to_string())).unwrap();
        assert!(!Config::load_from(&path).unwrap().render.enabled);
    }
}
