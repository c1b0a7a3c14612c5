use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

/// Overrides the base directory, mainly for scripted runs and tests.
pub const HOME_ENV: &str = "GAGYEBU_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// `$GAGYEBU_HOME`, else `~/.gagyebu`, else `./.gagyebu`.
pub fn default_base_dir() -> PathBuf {
    if let Some(dir) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gagyebu")
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(base_dir: PathBuf, config_path: PathBuf) -> Self {
        Self {
            base_dir,
            config_path,
        }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        let config_path = base.join(CONFIG_FILE);
        Ok(Self::new(base, config_path))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads and validates the stored configuration, falling back to defaults
    /// when no file exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config = if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
