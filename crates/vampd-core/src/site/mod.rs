//! The site record built up by the collector
//!
//! This module provides:
//! - `SiteConfig`, the answers accumulated across every step
//! - `Action` and `PlatformVersion`, the closed choice sets
//! - `ConfigDefaults`, fallback values available before any prompt runs

pub mod config;
pub mod defaults;

pub use config::{Action, PlatformVersion, SiteConfig};
pub use defaults::ConfigDefaults;
