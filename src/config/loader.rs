use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.secretary/config.toml`, writing a default file on first run,
    /// then apply environment overrides.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let secretary_dir = home.join(".secretary");

        if !secretary_dir.exists() {
            fs::create_dir_all(&secretary_dir)
                .context("Failed to create .secretary directory")?;
        }

        let mut config = Self::load_from(&secretary_dir.join("config.toml"))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load a config file from an explicit path. A missing file is created
    /// with defaults so the user has something to edit.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents =
                fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
