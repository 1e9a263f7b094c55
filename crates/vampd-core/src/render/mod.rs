//! Role file rendering
//!
//! The Chef role template is compiled into the binary and rendered with Tera.
//! The context holds three values:
//! - `site`: the collected `SiteConfig` (absent fields are undefined)
//! - `actions_json`: the compact action list, e.g. `["deploy","install"]`
//! - `defaults`: `ConfigDefaults`, used wherever a site field is absent

use crate::site::{ConfigDefaults, SiteConfig};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tokio::fs;

/// Name the embedded role template is registered under
pub const ROLE_TEMPLATE: &str = "role.json";

const ROLE_TEMPLATE_SOURCE: &str = include_str!("../../templates/role.json.tera");

/// Renders the site role file
pub struct RoleRenderer {
    tera: Tera,
}

impl RoleRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(ROLE_TEMPLATE, ROLE_TEMPLATE_SOURCE)
            .context("Failed to parse role template")?;
        Ok(Self { tera })
    }

    fn context(site: &SiteConfig, defaults: &ConfigDefaults) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", site);
        ctx.insert("actions_json", &site.actions_json());
        ctx.insert("defaults", defaults);
        ctx
    }

    /// Render the role file contents
    pub fn render(&self, site: &SiteConfig, defaults: &ConfigDefaults) -> Result<String> {
        self.tera
            .render(ROLE_TEMPLATE, &Self::context(site, defaults))
            .with_context(|| format!("Failed to render role for '{}'", site.machine_id))
    }

    /// Render and write to `<base>/<id>/chef/roles/<id>.json`, returning the path
    pub async fn write(
        &self,
        site: &SiteConfig,
        defaults: &ConfigDefaults,
        base: &Path,
    ) -> Result<PathBuf> {
        let content = self.render(site, defaults)?;
        let target = site.role_path(base);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target, content)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;

        tracing::info!(path = %target.display(), "role file written");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{Action, PlatformVersion};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::collections::BTreeSet;

    fn git_site() -> SiteConfig {
        SiteConfig {
            machine_id: "acme".to_string(),
            git_host: Some("github.com".to_string()),
            git_uri: Some("https://example.com/r.git".to_string()),
            git_revision: Some("master".to_string()),
            platform_version: Some(vec![PlatformVersion::Seven]),
            has_nested_docroot: Some(false),
            site_files_path: Some("sites/default/files".to_string()),
            site_settings_path: Some("sites/default/settings.php".to_string()),
            ..Default::default()
        }
    }

    fn render_json(site: &SiteConfig) -> Value {
        let out = RoleRenderer::new()
            .unwrap()
            .render(site, &ConfigDefaults::default())
            .unwrap();
        serde_json::from_str(&out).expect("role file must be valid JSON")
    }

    #[test]
    fn test_render_git_site() {
        let role = render_json(&git_site());
        let site = &role["default_attributes"]["drupal"]["sites"]["acme"];

        assert_eq!(role["name"], json!("acme"));
        assert_eq!(site["deploy"]["action"], json!(["deploy", "install"]));
        assert_eq!(site["repository"]["uri"], json!("https://example.com/r.git"));
        assert_eq!(site["repository"]["revision"], json!("master"));
        assert_eq!(site["drupal"]["version"], json!("7.x"));
        assert_eq!(site["drupal"]["settings"]["docroot"], json!(""));
        assert_eq!(site["drupal"]["install"]["install_profile"], json!("standard"));
    }

    #[test]
    fn test_clean_install_falls_back_to_defaults() {
        let site = SiteConfig {
            machine_id: "fresh".to_string(),
            uses_git: false,
            wants_clean_install: Some(true),
            ..Default::default()
        };
        let role = render_json(&site);
        let s = &role["default_attributes"]["drupal"]["sites"]["fresh"];

        assert_eq!(s["repository"]["uri"], json!("https://github.com/drupal/drupal.git"));
        assert_eq!(s["repository"]["revision"], json!("7.33"));
        assert_eq!(s["drupal"]["settings"]["files"], json!("site/default/files"));
    }

    #[test]
    fn test_user_input_is_json_escaped() {
        let mut site = git_site();
        site.actions = BTreeSet::from([Action::Deploy, Action::Import]);
        site.db_file_path = Some(r#"/vagrant/"odd" db.sql"#.to_string());
        let role = render_json(&site);
        assert_eq!(
            role["default_attributes"]["drupal"]["sites"]["acme"]["drupal"]["settings"]["db_file"],
            json!(r#"/vagrant/"odd" db.sql"#)
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = RoleRenderer::new().unwrap();
        let defaults = ConfigDefaults::default();
        let site = git_site();
        assert_eq!(
            renderer.render(&site, &defaults).unwrap(),
            renderer.render(&site, &defaults).unwrap()
        );
    }

    #[tokio::test]
    async fn test_write_creates_role_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = RoleRenderer::new()
            .unwrap()
            .write(&git_site(), &ConfigDefaults::default(), dir.path())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("acme/chef/roles/acme.json"));
        assert!(path.exists());
    }
}
