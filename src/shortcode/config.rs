use crate::codegen::{CodeGenerator, DEFAULT_MAX_ATTEMPTS};
use crate::error::{Result, ShortenError};
use crate::store::fs::DEFAULT_STORE_FILE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "shortcode.json";

/// Configuration for shortcode, stored in shortcode.json
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ShortenerConfig {
    /// Where mappings are persisted
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,

    /// How many codes to draw before giving up on a single add
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_store_file() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ShortenerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShortenError::Io)?;
        let config: ShortenerConfig = serde_json::from_str(&content).map_err(|e| {
            ShortenError::Config(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ShortenError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.store_file.as_os_str().is_empty() {
            return Err(ShortenError::Config("store_file cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn generator(&self) -> CodeGenerator {
        CodeGenerator::new(self.max_attempts)
    }

    /// Resolve the store file against `base_dir` when it is relative.
    pub fn store_path(&self, base_dir: &Path) -> PathBuf {
        if self.store_file.is_absolute() {
            self.store_file.clone()
        } else {
            base_dir.join(&self.store_file)
        }
    }
}
