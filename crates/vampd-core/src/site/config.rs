//! Site configuration record and its choice types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Install profile used when none is asked for
pub const DEFAULT_INSTALL_PROFILE: &str = "standard";

/// Actions the provisioner can run against a site
///
/// Variant order is the order actions are listed in the role file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Deploy,
    Install,
    Import,
    Update,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Deploy,
        Action::Install,
        Action::Import,
        Action::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Deploy => "deploy",
            Action::Install => "install",
            Action::Import => "import",
            Action::Update => "update",
        }
    }

    /// Short description shown next to the action in the picker
    pub fn description(&self) -> &'static str {
        match self {
            Action::Deploy => "places your code",
            Action::Install => "runs a clean site install on your code",
            Action::Import => "brings in an existing db file",
            Action::Update => "runs update.php",
        }
    }

    /// Whether the action only makes sense for a site with its own repository
    pub fn needs_repository(&self) -> bool {
        matches!(self, Action::Import | Action::Update)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}

/// Major Drupal release line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlatformVersion {
    #[serde(rename = "6.x")]
    Six,
    #[serde(rename = "7.x")]
    Seven,
}

impl PlatformVersion {
    pub const ALL: [PlatformVersion; 2] = [PlatformVersion::Six, PlatformVersion::Seven];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformVersion::Six => "6.x",
            PlatformVersion::Seven => "7.x",
        }
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformVersion::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown version '{}'", s))
    }
}

/// Answers accumulated across the collector steps
///
/// Optional fields are only filled in when the step that owns them ran,
/// and are left out of the serialized form otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub machine_id: String,
    pub uses_git: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wants_clean_install: Option<bool>,
    pub actions: BTreeSet<Action>,
    pub install_profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<Vec<PlatformVersion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_nested_docroot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docroot_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_files_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_settings_path: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            machine_id: String::new(),
            uses_git: true,
            git_host: None,
            git_uri: None,
            git_revision: None,
            wants_clean_install: None,
            actions: BTreeSet::from([Action::Deploy, Action::Install]),
            install_profile: DEFAULT_INSTALL_PROFILE.to_string(),
            db_file_path: None,
            platform_version: None,
            has_nested_docroot: None,
            docroot_path: None,
            site_files_path: None,
            site_settings_path: None,
        }
    }
}

impl SiteConfig {
    pub fn has_action(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Compact JSON list of the selected actions, e.g. `["deploy","install"]`
    pub fn actions_json(&self) -> String {
        let names: Vec<&str> = self.actions.iter().map(Action::as_str).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Directory the template repository is cloned into
    pub fn project_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.machine_id)
    }

    /// Where the rendered role file is written: `<base>/<id>/chef/roles/<id>.json`
    pub fn role_path(&self, base: &Path) -> PathBuf {
        self.project_dir(base)
            .join("chef")
            .join("roles")
            .join(format!("{}.json", self.machine_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_declared_values() {
        let site = SiteConfig::default();
        assert!(site.uses_git);
        assert_eq!(site.install_profile, "standard");
        assert!(site.has_action(Action::Deploy));
        assert!(site.has_action(Action::Install));
        assert!(!site.has_action(Action::Import));
        assert!(site.git_host.is_none());
        assert!(site.wants_clean_install.is_none());
    }

    #[test]
    fn test_actions_json_is_compact_and_ordered() {
        let mut site = SiteConfig::default();
        site.actions = BTreeSet::from([Action::Update, Action::Deploy]);
        assert_eq!(site.actions_json(), r#"["deploy","update"]"#);
    }

    #[test]
    fn test_role_path_uses_machine_id() {
        let site = SiteConfig {
            machine_id: "acme".to_string(),
            ..Default::default()
        };
        assert_eq!(
            site.role_path(Path::new(".")),
            PathBuf::from("./acme/chef/roles/acme.json")
        );
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let site = SiteConfig {
            machine_id: "acme".to_string(),
            uses_git: false,
            wants_clean_install: Some(true),
            ..Default::default()
        };
        let value = serde_json::to_value(&site).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("wants_clean_install"));
        assert!(!obj.contains_key("git_host"));
        assert!(!obj.contains_key("docroot_path"));
        assert_eq!(obj["actions"], serde_json::json!(["deploy", "install"]));
    }

    #[test]
    fn test_parse_choice_names() {
        assert_eq!("import".parse::<Action>(), Ok(Action::Import));
        assert!("destroy".parse::<Action>().is_err());
        assert_eq!("6.x".parse::<PlatformVersion>(), Ok(PlatformVersion::Six));
        assert!("8.x".parse::<PlatformVersion>().is_err());
    }
}
