use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::platform::Platform;

pub const DEFAULT_NETSTAT: &str = "netstat";
pub const DEFAULT_SS: &str = "ss";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub commands: CommandConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the file cannot be read
    /// - the TOML cannot be parsed into [`AppConfig`]
    /// - validation fails
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let cfg: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;

        cfg.validate()?;

        Ok(cfg)
    }

    /// Validates configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured program name is blank.
    pub fn validate(&self) -> Result<()> {
        for (key, program) in [
            ("commands.netstat", &self.commands.netstat),
            ("commands.ss", &self.commands.ss),
        ] {
            if program.trim().is_empty() {
                bail!("{key} must not be empty");
            }
        }

        Ok(())
    }

    /// Configured platform override, or the detected host platform.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.lookup.platform.unwrap_or_else(Platform::current)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
    pub platform: Option<Platform>,
}

/// Programs run by the platform adapters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandConfig {
    pub netstat: String,
    pub ss: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            netstat: DEFAULT_NETSTAT.to_string(),
            ss: DEFAULT_SS.to_string(),
        }
    }
}
