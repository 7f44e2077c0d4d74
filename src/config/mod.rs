//! Tool configuration for `folio.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                 |
//! |--------------|-----------------------------------------|
//! | `[template]` | Template directory to inspect           |
//! | `[remote]`   | Remote script/asset fetching            |
//!
//! # Example
//!
//! ```toml
//! [template]
//! root = "templates/portfolio"
//!
//! [remote]
//! enable = true
//! user_agent = "folio"
//! ```

pub mod defaults;
mod error;

pub use error::ConfigError;

use crate::loader::HttpRemote;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

/// `[template]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Template directory, relative to the config file.
    #[serde(default = "defaults::template::root")]
    #[educe(Default = defaults::template::root())]
    pub root: PathBuf,
}

/// `[remote]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Install the HTTP source for remote scripts.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// `User-Agent` sent with remote fetches.
    #[serde(default = "defaults::remote::user_agent")]
    #[educe(Default = defaults::remote::user_agent())]
    pub user_agent: String,
}

impl FolioConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_path(path) {
            Err(ConfigError::Io(_, err)) if err.kind() == io::ErrorKind::NotFound => Ok(Self {
                config_path: path.to_path_buf(),
                ..Self::default()
            }),
            result => result,
        }
    }

    /// Template directory, resolved against the config file's directory.
    pub fn template_root(&self) -> PathBuf {
        let base = self.config_path.parent().unwrap_or(Path::new(""));
        base.join(&self.template.root)
    }

    /// Override the template directory (already relative to the caller).
    pub fn set_template_root(&mut self, root: &Path) {
        self.template.root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    }

    /// The remote source to install, if remote loading is enabled.
    pub fn remote_source(&self) -> Option<HttpRemote> {
        self.remote
            .enable
            .then(|| HttpRemote::new(&self.remote.user_agent))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.enable && self.remote.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[remote.user_agent] must not be empty".into(),
            ));
        }
        Ok(())
    }
}
