//! vampd Core - site role generation for the vampd provisioner
//!
//! This library asks the questions needed to describe a Drupal site, then renders
//! the answers into the Chef role file (`<id>/chef/roles/<id>.json`) vampd consumes.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - `SiteConfig`, role rendering, git cloning
//! - **Layer 2: Workflow Orchestration** - the step `Collector`, the `Prompter` trait
//!   and `ProductConfig` for custom front ends
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use vampd_core::{Collector, ConfigDefaults, RoleRenderer, prompt::{Reply, ScriptedPrompter}};
//!
//! let mut prompter = ScriptedPrompter::new([Reply::text("acme"), Reply::no(), Reply::yes()]);
//! let site = Collector::standard().collect(&mut prompter)?;
//! let role = RoleRenderer::new()?.render(&site, &ConfigDefaults::default())?;
//! ```

pub mod collector;
pub mod error;
pub mod product;
pub mod prompt;
pub mod render;
pub mod scaffold;
pub mod site;
pub mod vcs;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use collector::{Collector, Step};
pub use error::CollectError;
pub use product::ProductConfig;
pub use prompt::{Answer, Answers, Prompter, Question};
pub use render::RoleRenderer;
pub use scaffold::{generate, GenerateOptions, Generated};
pub use site::{Action, ConfigDefaults, PlatformVersion, SiteConfig};
pub use vcs::GitTool;

#[cfg(feature = "tui")]
pub use tui::run;
