//! git detection and repository cloning

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use url::Url;

/// Timeout for a clone (5 minutes)
const CLONE_TIMEOUT: Duration = Duration::from_secs(300);

/// Where to get git if it is missing
pub const GIT_DOCS_URL: &str = "https://git-scm.com/downloads";

/// Resolve the repository to clone: the product's env override, else its default
pub fn resolve_clone_url<C: ProductConfig>(config: &C) -> Result<Url> {
    let url_str = std::env::var(config.clone_url_env())
        .unwrap_or_else(|_| config.default_clone_url().to_string());
    Url::parse(&url_str).with_context(|| format!("Invalid repository URL: {}", url_str))
}

/// Wrapper around the `git` binary
#[derive(Debug, Clone)]
pub struct GitTool {
    binary: String,
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitTool {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Check if git is available
    pub fn is_installed(&self) -> bool {
        self.version().is_some()
    }

    /// Get the installed git version (if available)
    pub fn version(&self) -> Option<String> {
        std::process::Command::new(&self.binary)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// The command line shown to the user before cloning
    pub fn clone_command(&self, url: &Url, dest: &Path) -> String {
        format!("{} clone {} {}", self.binary, url, dest.display())
    }

    /// Clone `url` into `dest`, streaming git's output
    pub async fn clone_repo(&self, url: &Url, dest: &Path) -> Result<()> {
        let cmd = self.clone_command(url, dest);
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new(&self.binary)
            .arg("clone")
            .arg("--progress")
            .arg(url.as_str())
            .arg(dest)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.binary))?;

        let stdout = child.stdout.take().context("Failed to capture stdout")?;
        let stderr = child.stderr.take().context("Failed to capture stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        // git reports progress on stderr; keep reading until both streams close
        let output_task = async {
            let mut stdout_open = true;
            let mut stderr_open = true;
            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_reader.next_line(), if stdout_open => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => stdout_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_open = false;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.dimmed()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(CLONE_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            println!();
            anyhow::bail!(
                "Clone timed out after {} seconds.\n\
                 The server may be unreachable. Please try again later or clone manually:\n\
                 {}",
                CLONE_TIMEOUT.as_secs(),
                cmd
            );
        }

        match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                if status.success() {
                    tracing::info!(dest = %dest.display(), "repository cloned");
                    Ok(())
                } else {
                    anyhow::bail!(
                        "git clone failed with exit code: {}\n\
                         Please try cloning manually: {}",
                        status.code().unwrap_or(-1),
                        cmd
                    );
                }
            }
            Ok(Err(e)) => {
                anyhow::bail!("Failed to wait for git: {}", e);
            }
            Err(_) => {
                let _ = child.kill().await;
                anyhow::bail!("git clone hung. Please try cloning manually:\n{}", cmd);
            }
        }
    }

    /// Open the git download page in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!("{}", "Opening git download page in your browser...".cyan());
        open::that(GIT_DOCS_URL)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteConfig;

    #[derive(Clone)]
    struct TestProduct {
        default_url: &'static str,
    }

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "vampd-clone-url-test"
        }

        fn display_name(&self) -> &'static str {
            "clone url test"
        }

        fn default_clone_url(&self) -> &'static str {
            self.default_url
        }

        fn docs_url(&self) -> &'static str {
            "https://example.com/docs"
        }

        fn next_steps(&self, _dir: &Path, _site: &SiteConfig) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_clone_url_env_follows_product_name() {
        let product = TestProduct {
            default_url: "https://example.com/p.git",
        };
        assert_eq!(product.clone_url_env(), "VAMPD_CLONE_URL_TEST_REPO_URL");
    }

    #[test]
    fn test_clone_url_falls_back_to_default() {
        let product = TestProduct {
            default_url: "https://example.com/p.git",
        };
        assert_eq!(
            resolve_clone_url(&product).unwrap().as_str(),
            "https://example.com/p.git"
        );

        let broken = TestProduct {
            default_url: "not a url",
        };
        assert!(resolve_clone_url(&broken).is_err());
    }

    #[test]
    fn test_missing_binary_is_not_installed() {
        let git = GitTool::new("definitely-not-a-real-git-binary");
        assert!(!git.is_installed());
        assert!(git.version().is_none());
    }

    #[test]
    fn test_clone_command_names_destination() {
        let git = GitTool::default();
        let url = Url::parse("https://github.com/vampd/vampd.git").unwrap();
        assert_eq!(
            git.clone_command(&url, Path::new("./acme")),
            "git clone https://github.com/vampd/vampd.git ./acme"
        );
    }

    #[tokio::test]
    async fn test_clone_with_missing_binary_fails() {
        let git = GitTool::new("definitely-not-a-real-git-binary");
        let url = Url::parse("https://github.com/vampd/vampd.git").unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(git.clone_repo(&url, &dir.path().join("acme")).await.is_err());
    }
}
