use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, TemplateError};
use crate::template;

/// Built-in article guideline used until the user saves their own.
pub const DEFAULT_PROMPT_TEMPLATE: &str = include_str!("default_prompt.md");
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";

const CONFIG_FILE_NAME: &str = "prompt_config.json";

/// The persisted prompt template and model choice.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    #[serde(default = "default_template")]
    pub prompt_template: String,
    #[serde(default = "default_model")]
    pub openai_model_name: String,
}

fn default_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            prompt_template: default_template(),
            openai_model_name: default_model(),
        }
    }
}

impl PromptConfig {
    pub fn validate_template(&self) -> Result<(), TemplateError> {
        template::validate(&self.prompt_template)
    }

    pub fn is_default_template(&self) -> bool {
        self.prompt_template == DEFAULT_PROMPT_TEMPLATE
    }
}

/// Reads and writes `PromptConfig` as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the platform config directory (`<config_dir>/inbecs/prompt_config.json`).
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::at(config_dir.join("inbecs").join(CONFIG_FILE_NAME)))
    }

    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted config. A missing file yields the defaults.
    pub fn load(&self) -> Result<PromptConfig, ConfigError> {
        if !self.path.exists() {
            tracing::debug!("No config at {:?}, using defaults", self.path);
            return Ok(PromptConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the persisted config, falling back to defaults on any error.
    /// The error is handed back so the caller can surface it.
    pub fn load_or_default(&self) -> (PromptConfig, Option<ConfigError>) {
        match self.load() {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!("Falling back to default prompt config: {}", e);
                (PromptConfig::default(), Some(e))
            }
        }
    }

    /// Persist the config. The document is written to a sibling temp file and
    /// renamed over the target, so a crash never leaves a half-written file.
    pub fn save(&self, config: &PromptConfig) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(write_err)?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        config.serialize(&mut serializer)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(write_err)?;
        tmp.write_all(&buf).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::info!("Saved prompt config to {:?}", self.path);
        Ok(())
    }

    pub fn save_template(&self, config: &mut PromptConfig, template: &str) -> Result<(), ConfigError> {
        config.prompt_template = template.to_string();
        self.save(config)
    }

    /// Restore the built-in template and persist it.
    pub fn reset_template(&self, config: &mut PromptConfig) -> Result<(), ConfigError> {
        self.save_template(config, DEFAULT_PROMPT_TEMPLATE)
    }

    pub fn save_model(&self, config: &mut PromptConfig, model: &str) -> Result<(), ConfigError> {
        config.openai_model_name = model.trim().to_string();
        self.save(config)
    }
}
