//! Configuration defaults available before any prompt runs

use super::config::{Action, PlatformVersion};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fallback values for the generated role file
///
/// Keys use the names the role template expects (`machineId`, `drupalDocroot`, ...).
/// A YAML file may override any subset of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigDefaults {
    pub machine_id: String,
    pub git_host: String,
    #[serde(rename = "gitURI")]
    pub git_uri: String,
    pub git_revision: String,
    pub drupal_docroot: String,
    pub drupal_profile: String,
    pub actions: Vec<Action>,
    pub db_file: String,
    pub drupal_version: PlatformVersion,
    pub drupal_site_settings: String,
    pub drupal_site_files: String,
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            machine_id: "example".to_string(),
            git_host: "github.com".to_string(),
            git_uri: "https://github.com/drupal/drupal.git".to_string(),
            git_revision: "7.33".to_string(),
            drupal_docroot: String::new(),
            drupal_profile: "standard".to_string(),
            actions: vec![Action::Deploy, Action::Install],
            db_file: String::new(),
            drupal_version: PlatformVersion::Seven,
            drupal_site_settings: "sites/default/settings.php".to_string(),
            drupal_site_files: "site/default/files".to_string(),
        }
    }
}

impl ConfigDefaults {
    /// Load defaults from a YAML file, keeping built-in values for missing keys
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse defaults file {}", path.display()))
    }

    /// Parse defaults from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from `path` when given, otherwise use the built-in values
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
