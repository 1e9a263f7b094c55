//! vampd CLI - Chef role generation for vampd Drupal sites

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vampd_core::tui::CreateArgs;
use vampd_core::{Action, ProductConfig, SiteConfig};

/// vampd product configuration
#[derive(Clone)]
pub struct VampdConfig;

impl ProductConfig for VampdConfig {
    fn name(&self) -> &'static str {
        "vampd"
    }

    fn display_name(&self) -> &'static str {
        "vampd"
    }

    fn default_clone_url(&self) -> &'static str {
        "https://github.com/vampd/vampd.git"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/vampd/vampd"
    }

    fn next_steps(&self, dir: &Path, site: &SiteConfig) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Review the generated role
        steps.push(format!(
            "Review chef/roles/{}.json (everything is editable)",
            site.machine_id
        ));

        if site.has_action(Action::Import) {
            if let Some(db) = &site.db_file_path {
                steps.push(format!("Make sure {} is reachable from the VM", db));
            }
        }

        // Step 3: Boot the machine
        steps.push("vagrant up".to_string());

        steps.push(format!("Read the docs at {}", self.docs_url()));

        steps
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vampd")]
#[command(about = "CLI for generating vampd site role files")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Diagnostic log level (RUST_LOG takes precedence when set)
    #[arg(long = "log-level", value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask about a site and write its role file
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Directory the project is created in (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// YAML file overriding the configuration defaults
    #[arg(long = "defaults")]
    pub defaults_file: Option<PathBuf>,

    /// Skip cloning the vampd repository
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Answer every prompt with its default (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            directory: args.directory,
            defaults_file: args.defaults_file,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

/// Diagnostics go to stderr so they never mix with the prompts' layout
fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    initialize_tracing(args.log_level);
    let config = VampdConfig;

    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        // No subcommand provided, default to create behavior (interactive mode)
        None => CreateArgs::default(),
    };

    let result = vampd_core::run(&config, create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
