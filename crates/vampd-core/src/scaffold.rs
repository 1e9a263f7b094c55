//! Final step: clone the provisioning repository and write the role file

use crate::render::RoleRenderer;
use crate::site::{ConfigDefaults, SiteConfig};
use crate::vcs::GitTool;
use anyhow::Result;
use std::path::PathBuf;
use url::Url;

/// Options for [`generate`]
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory the `<machine id>` project directory is created in
    pub base_dir: PathBuf,
    /// Repository to clone into the project directory
    pub clone_url: Url,
    /// Skip the clone and only write the role file
    pub skip_clone: bool,
}

/// What [`generate`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub project_dir: PathBuf,
    pub role_path: PathBuf,
    pub cloned: bool,
}

/// Clone (unless skipped), then render the role file
///
/// Failures are not retried; the clone must succeed before anything is rendered.
pub async fn generate(
    site: &SiteConfig,
    defaults: &ConfigDefaults,
    options: &GenerateOptions,
    git: &GitTool,
) -> Result<Generated> {
    let project_dir = site.project_dir(&options.base_dir);

    let cloned = if options.skip_clone {
        tracing::debug!("clone skipped");
        false
    } else {
        git.clone_repo(&options.clone_url, &project_dir).await?;
        true
    };

    let role_path = RoleRenderer::new()?
        .write(site, defaults, &options.base_dir)
        .await?;

    Ok(Generated {
        project_dir,
        role_path,
        cloned,
    })
}
