//! Configuration management for the Quarry CLI.

use anyhow::{Context, Result};
use quarry_runtime::supervisor::AgentProgram;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "quarry.toml";

/// Quarry project configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Agent executables. Unset entries resolve to the binaries installed next
/// to `quarry` itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunter_program: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prey_program: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_render_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_render_enabled() -> bool { true }
fn default_log_level() -> String { "warn".to_string() }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: default_render_enabled(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AgentsConfig {
    pub fn hunter(&self) -> Result<AgentProgram> {
        resolve(self.hunter_program.as_deref(), "quarry-hunter")
    }

    pub fn prey(&self) -> Result<AgentProgram> {
        resolve(self.prey_program.as_deref(), "quarry-prey")
    }
}

fn resolve(configured: Option<&Path>, binary: &str) -> Result<AgentProgram> {
    match configured {
        Some(path) => Ok(AgentProgram::new(path)),
        None => AgentProgram::sibling_of_current_exe(binary)
            .with_context(|| format!("Failed to locate {binary} next to the quarry executable")),
    }
}

impl Config {
    /// Load `explicit` if given, else quarry.toml from the current or parent
    /// directories, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit.map(Path::to_path_buf).or_else(find_config_file) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize config")
    }
}

/// Find quarry.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_and_log_at_warn() {
        let config = Config::default();
        assert!(config.render.enabled);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.agents.hunter_program, None);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[render]\nenabled = false\n").unwrap();
        assert!(!config.render.enabled);
        assert_eq!(config.log, LogConfig::default());
        assert_eq!(config.agents, AgentsConfig::default());
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = Config {
            agents: AgentsConfig {
                hunter_program: Some(PathBuf::from("/opt/quarry/hunter")),
                prey_program: None,
            },
            render: RenderConfig { enabled: false },
            log: LogConfig { level: "debug".into() },
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn configured_program_wins_over_sibling() {
        let agents = AgentsConfig {
            hunter_program: Some(PathBuf::from("/opt/quarry/hunter")),
            prey_program: None,
        };
        assert_eq!(agents.hunter().unwrap().program, PathBuf::from("/opt/quarry/hunter"));
        let prey = agents.prey().unwrap();
        assert!(prey.program.ends_with("quarry-prey"));
    }

    #[test]
    fn unparsable_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[render]\nenabled = \"sometimes\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config"));
    }

    #[test]
    fn default_toml_parses_back() {
        let text = Config::default_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
