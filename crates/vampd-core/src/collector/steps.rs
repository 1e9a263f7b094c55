//! The vampd prompt steps

use super::{keys, Step};
use crate::error::CollectError;
use crate::prompt::{Answers, Choice, Question};
use crate::site::config::DEFAULT_INSTALL_PROFILE;
use crate::site::{Action, PlatformVersion, SiteConfig};
use std::collections::BTreeSet;

/// Machine name and whether the site has its own repository
pub struct MachineStep;

impl Step for MachineStep {
    fn name(&self) -> &'static str {
        "machine"
    }

    fn applies(&self, _site: &SiteConfig) -> bool {
        true
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        vec![
            Question::text(keys::MACHINE_ID, "What is the machine name of your site?")
                .required("You must provide a Machine Name"),
            Question::confirm(keys::USES_GIT, "Do you have a git repo for your site?", true),
        ]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        site.machine_id = answers.text(keys::MACHINE_ID)?;
        site.uses_git = answers.confirm(keys::USES_GIT)?;
        Ok(())
    }
}

/// Repository coordinates, or the clean-install fallback
pub struct SourceStep;

impl Step for SourceStep {
    fn name(&self) -> &'static str {
        "source"
    }

    fn applies(&self, _site: &SiteConfig) -> bool {
        true
    }

    fn questions(&self, site: &SiteConfig) -> Vec<Question> {
        if site.uses_git {
            vec![
                Question::text(keys::GIT_HOST, "What is the git host?").default_text("github.com"),
                Question::text(keys::GIT_URI, "What is the git uri?")
                    .required("You must provide a git uri"),
                Question::text(keys::GIT_REVISION, "What is the revision?")
                    .default_text("master")
                    .required("You must provide a revision, tag, branch, etc."),
            ]
        } else {
            vec![Question::confirm(
                keys::CLEAN_INSTALL,
                "Do you want to pull down a clean drupal site?",
                true,
            )]
        }
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        if site.uses_git {
            site.git_host = Some(answers.text(keys::GIT_HOST)?);
            site.git_uri = Some(answers.text(keys::GIT_URI)?);
            site.git_revision = Some(answers.text(keys::GIT_REVISION)?);
        } else {
            site.wants_clean_install = Some(answers.confirm(keys::CLEAN_INSTALL)?);
        }
        Ok(())
    }

    fn check(&self, site: &SiteConfig) -> Result<(), CollectError> {
        if !site.uses_git && site.wants_clean_install != Some(true) {
            return Err(CollectError::NoSource);
        }
        Ok(())
    }
}

fn offered_actions(site: &SiteConfig) -> impl Iterator<Item = Action> + '_ {
    Action::ALL
        .into_iter()
        .filter(move |a| site.uses_git || !a.needs_repository())
}

/// Which provisioning actions to run
pub struct ActionsStep;

impl Step for ActionsStep {
    fn name(&self) -> &'static str {
        "actions"
    }

    fn applies(&self, _site: &SiteConfig) -> bool {
        true
    }

    fn intro(&self, site: &SiteConfig) -> Vec<String> {
        let mut lines = vec!["Select an action to complete for your site.".to_string()];
        lines.extend(
            offered_actions(site).map(|a| format!("[{}] -- {}.", a, a.description())),
        );
        lines.push(
            "If you aren't sure what to select, go with the defaults. Everything is editable later."
                .to_string(),
        );
        lines
    }

    fn questions(&self, site: &SiteConfig) -> Vec<Question> {
        let choices = offered_actions(site)
            .map(|a| {
                Choice::new(a.as_str())
                    .hint(a.description())
                    .checked(!a.needs_repository())
            })
            .collect();
        vec![Question::multi_select(keys::ACTIONS, "Select Actions", choices)
            .required("You must choose at least one action.")]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        let mut actions = BTreeSet::new();
        for name in answers.choices(keys::ACTIONS)? {
            let action: Action = name
                .parse()
                .map_err(|e: String| CollectError::invalid(keys::ACTIONS, e))?;
            if action.needs_repository() && !site.uses_git {
                return Err(CollectError::invalid(
                    keys::ACTIONS,
                    format!("'{}' requires a git repository", action),
                ));
            }
            actions.insert(action);
        }
        if actions.is_empty() {
            return Err(CollectError::invalid(keys::ACTIONS, "no action selected"));
        }
        if !actions.contains(&Action::Install) {
            site.install_profile = DEFAULT_INSTALL_PROFILE.to_string();
        }
        site.actions = actions;
        Ok(())
    }
}

/// Install profile, only when installing
pub struct InstallProfileStep;

impl Step for InstallProfileStep {
    fn name(&self) -> &'static str {
        "install-profile"
    }

    fn applies(&self, site: &SiteConfig) -> bool {
        site.has_action(Action::Install)
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        vec![
            Question::text(keys::INSTALL_PROFILE, "What install profile would you like to use?")
                .default_text(DEFAULT_INSTALL_PROFILE)
                .required("You must provide a drupal install profile"),
        ]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        site.install_profile = answers.text(keys::INSTALL_PROFILE)?;
        Ok(())
    }
}

/// Database dump location, only when importing
pub struct DatabaseImportStep;

impl Step for DatabaseImportStep {
    fn name(&self) -> &'static str {
        "db-import"
    }

    fn applies(&self, site: &SiteConfig) -> bool {
        site.has_action(Action::Import)
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        vec![Question::text(
            keys::DB_FILE,
            "Where is the db file located? Example: /vagrant/sites/db_file.sql",
        )
        .required("You must provide a db file location.")]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        site.db_file_path = Some(answers.text(keys::DB_FILE)?);
        Ok(())
    }
}

/// Drupal major version of the repository
pub struct PlatformVersionStep;

impl Step for PlatformVersionStep {
    fn name(&self) -> &'static str {
        "platform-version"
    }

    fn applies(&self, site: &SiteConfig) -> bool {
        site.uses_git
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        let choices = PlatformVersion::ALL
            .into_iter()
            .map(|v| Choice::new(v.as_str()).checked(v == PlatformVersion::Seven))
            .collect();
        vec![Question::multi_select(
            keys::PLATFORM_VERSION,
            "What major version of Drupal are you using?",
            choices,
        )
        .required("You must choose a version.")]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        let versions = answers
            .choices(keys::PLATFORM_VERSION)?
            .iter()
            .map(|v| v.parse::<PlatformVersion>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CollectError::invalid(keys::PLATFORM_VERSION, e))?;
        site.platform_version = Some(versions);
        Ok(())
    }
}

/// Whether the code lives below a nested docroot
pub struct DocrootInitStep;

impl Step for DocrootInitStep {
    fn name(&self) -> &'static str {
        "docroot-init"
    }

    fn applies(&self, site: &SiteConfig) -> bool {
        site.uses_git
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        vec![Question::confirm(
            keys::NESTED_DOCROOT,
            r#"Are the files in a docroot besides the base? Example: "htdocs", "docroot""#,
            false,
        )]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        site.has_nested_docroot = Some(answers.confirm(keys::NESTED_DOCROOT)?);
        Ok(())
    }
}

/// The nested docroot path
pub struct DocrootStep;

impl Step for DocrootStep {
    fn name(&self) -> &'static str {
        "docroot"
    }

    fn applies(&self, site: &SiteConfig) -> bool {
        site.has_nested_docroot == Some(true)
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        vec![Question::text(
            keys::DOCROOT,
            r#"What is the docroot? Example: "htdocs", "docroot""#,
        )
        .required("You must provide a docroot location.")]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        site.docroot_path = Some(answers.text(keys::DOCROOT)?);
        Ok(())
    }
}

pub struct SiteFilesStep;

impl Step for SiteFilesStep {
    fn name(&self) -> &'static str {
        "site-files"
    }

    fn applies(&self, site: &SiteConfig) -> bool {
        site.uses_git
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        vec![Question::text(
            keys::SITE_FILES,
            "Where do your site files live, relative to the docroot?",
        )
        .default_text("sites/default/files")
        .required("Your files must live somewhere. Please give them a home.")]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        site.site_files_path = Some(answers.text(keys::SITE_FILES)?);
        Ok(())
    }
}

pub struct SiteSettingsStep;

impl Step for SiteSettingsStep {
    fn name(&self) -> &'static str {
        "site-settings"
    }

    fn applies(&self, site: &SiteConfig) -> bool {
        site.uses_git
    }

    fn questions(&self, _site: &SiteConfig) -> Vec<Question> {
        vec![Question::text(
            keys::SITE_SETTINGS,
            "Where does your sites settings.php live, relative to docroot?",
        )
        .default_text("sites/default/settings.php")
        .required("Your settings.php must live somewhere. Please give it a home.")]
    }

    fn apply(&self, site: &mut SiteConfig, answers: &Answers) -> Result<(), CollectError> {
        site.site_settings_path = Some(answers.text(keys::SITE_SETTINGS)?);
        Ok(())
    }
}
