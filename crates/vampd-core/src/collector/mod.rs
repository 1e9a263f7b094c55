//! The answer collector: a fixed, ordered pipeline of prompt steps
//!
//! Every step sees the `SiteConfig` built so far, decides whether it applies,
//! asks its questions and writes the answers back. Steps never run out of order
//! and never revisit an earlier step.

mod steps;

pub use steps::{
    ActionsStep, DatabaseImportStep, DocrootInitStep, DocrootStep, InstallProfileStep,
    MachineStep, PlatformVersionStep, SiteFilesStep, SiteSettingsStep, SourceStep,
};

use crate::error::CollectError;
use crate::prompt::{Answers, Prompter, Question};
use crate::site::SiteConfig;

/// Question names, shared by the steps and the defaults prompter
pub mod keys {
    pub const MACHINE_ID: &str = "machine_id";
    pub const USES_GIT: &str = "uses_git";
    pub const GIT_HOST: &str = "git_host";
    pub const GIT_URI: &str = "git_uri";
    pub const GIT_REVISION: &str = "git_revision";
    pub const CLEAN_INSTALL: &str = "wants_clean_install";
    pub const ACTIONS: &str = "actions";
    pub const INSTALL_PROFILE: &str = "install_profile";
    pub const DB_FILE: &str = "db_file";
    pub const PLATFORM_VERSION: &str = "platform_version";
    pub const NESTED_DOCROOT: &str = "has_nested_docroot";
    pub const DOCROOT: &str = "docroot";
    pub const SITE_FILES: &str = "site_files";
    pub const SITE_SETTINGS: &str = "site_settings";
}

/// One unit of the pipeline
pub trait Step {
    fn name(&self) -> &'static str;

    /// Whether the step prompts at all, given what is already known
    fn applies(&self, site: &SiteConfig) -> bool;

    /// Lines shown before the questions
    fn intro(&self, _site: &SiteConfig) -> Vec<String> {
        Vec::new()
    }

    fn questions(&self, site: &SiteConfig) -> Vec<Question>;

    /// Write validated answers into the record
    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError>;

    /// Guard run after `apply`; an error halts the pipeline
    fn check(&self, _site: &SiteConfig) -> Result<(), CollectError> {
        Ok(())
    }
}

/// Runs steps in order against a single `SiteConfig`
pub struct Collector {
    steps: Vec<Box<dyn Step>>,
}

impl Collector {
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self { steps }
    }

    /// The ten vampd steps, in the order users see them
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(MachineStep),
            Box::new(SourceStep),
            Box::new(ActionsStep),
            Box::new(InstallProfileStep),
            Box::new(DatabaseImportStep),
            Box::new(PlatformVersionStep),
            Box::new(DocrootInitStep),
            Box::new(DocrootStep),
            Box::new(SiteFilesStep),
            Box::new(SiteSettingsStep),
        ])
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step, returning the finished record
    pub fn collect(&self, prompter: &mut dyn Prompter) -> Result<SiteConfig, CollectError> {
        let mut site = SiteConfig::default();

        for step in &self.steps {
            if !step.applies(&site) {
                tracing::debug!(step = step.name(), "step skipped");
                continue;
            }

            for line in step.intro(&site) {
                prompter.note(&line)?;
            }

            let questions = step.questions(&site);
            let answers = prompter.ask(&questions)?;
            step.apply(&mut site, &answers)?;
            tracing::debug!(step = step.name(), answered = answers.len(), "step applied");

            step.check(&site)?;
        }

        Ok(site)
    }
}
