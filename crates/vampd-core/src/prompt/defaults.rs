//! Non-interactive prompter for `--yes` runs

use super::{Answer, Answers, Prompter, Question};
use crate::collector::keys;
use crate::error::CollectError;
use crate::site::ConfigDefaults;

/// Answers every question without user input
///
/// Each question takes its own pre-filled value. Required questions without one
/// fall back to the matching [`ConfigDefaults`] entry.
#[derive(Debug, Clone)]
pub struct DefaultsPrompter {
    defaults: ConfigDefaults,
}

impl DefaultsPrompter {
    pub fn new(defaults: ConfigDefaults) -> Self {
        Self { defaults }
    }

    fn fallback(&self, name: &str) -> Option<Answer> {
        let value = match name {
            keys::MACHINE_ID => &self.defaults.machine_id,
            keys::GIT_HOST => &self.defaults.git_host,
            keys::GIT_URI => &self.defaults.git_uri,
            keys::GIT_REVISION => &self.defaults.git_revision,
            keys::INSTALL_PROFILE => &self.defaults.drupal_profile,
            keys::DB_FILE => &self.defaults.db_file,
            keys::DOCROOT => &self.defaults.drupal_docroot,
            keys::SITE_FILES => &self.defaults.drupal_site_files,
            keys::SITE_SETTINGS => &self.defaults.drupal_site_settings,
            _ => return None,
        };
        Some(Answer::Text(value.clone()))
    }

    fn answer(&self, question: &Question) -> Result<Answer, CollectError> {
        let candidates = [question.default_answer(), self.fallback(question.name)];
        candidates
            .into_iter()
            .flatten()
            .find(|a| question.check_shape(a).is_ok() && question.validate(a).is_ok())
            .ok_or(CollectError::Unanswered(question.name))
    }
}

impl Prompter for DefaultsPrompter {
    fn ask(&mut self, questions: &[Question]) -> Result<Answers, CollectError> {
        let mut answers = Answers::new();
        for question in questions {
            let answer = self.answer(question)?;
            tracing::debug!(question = question.name, ?answer, "answered from defaults");
            answers.insert(question.name, answer);
        }
        Ok(answers)
    }

    fn note(&mut self, message: &str) -> Result<(), CollectError> {
        tracing::info!("{}", message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefilled_value_wins_over_config() {
        let q = Question::text(keys::GIT_REVISION, "What is the revision?")
            .default_text("master")
            .required("You must provide a revision, tag, branch, etc.");
        let mut prompter = DefaultsPrompter::new(ConfigDefaults::default());
        let answers = prompter.ask(&[q]).unwrap();
        assert_eq!(answers.text(keys::GIT_REVISION).unwrap(), "master");
    }

    #[test]
    fn test_required_question_falls_back_to_config() {
        let q = Question::text(keys::MACHINE_ID, "What is the machine name of your site?")
            .required("You must provide a Machine Name");
        let mut prompter = DefaultsPrompter::new(ConfigDefaults::default());
        let answers = prompter.ask(&[q]).unwrap();
        assert_eq!(answers.text(keys::MACHINE_ID).unwrap(), "example");
    }

    #[test]
    fn test_empty_config_value_cannot_satisfy_required_question() {
        let q = Question::text(keys::DB_FILE, "Where is the db file located?")
            .required("You must provide a db file location.");
        let mut prompter = DefaultsPrompter::new(ConfigDefaults::default());
        assert!(matches!(
            prompter.ask(&[q]),
            Err(CollectError::Unanswered(keys::DB_FILE))
        ));
    }
}
