//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to say which provisioning repository is
//! cloned, where its docs live and what to tell the user once the role is written.

use crate::site::SiteConfig;
use std::path::Path;

/// Configuration trait for the vampd CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Repository cloned into `./<machine id>` before the role is written
    fn default_clone_url(&self) -> &'static str;

    /// Environment variable overriding the clone URL (`<NAME>_REPO_URL`)
    fn clone_url_env(&self) -> String {
        format!("{}_REPO_URL", self.name().to_uppercase().replace('-', "_"))
    }

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after the role file is written
    fn next_steps(&self, dir: &Path, site: &SiteConfig) -> Vec<String>;
}
