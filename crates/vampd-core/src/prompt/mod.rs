//! Question/answer abstraction between the collector and the terminal
//!
//! Steps describe what they want to know as a list of [`Question`]s and get an
//! [`Answers`] map back. A [`Prompter`] decides how the answers are obtained:
//! interactively through cliclack, from a scripted queue, or from defaults.

mod defaults;
mod scripted;

pub use defaults::DefaultsPrompter;
pub use scripted::{Reply, ScriptedPrompter};

use crate::error::CollectError;
use std::collections::HashMap;

/// Input widget a question is asked with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    Confirm,
    Select,
    MultiSelect,
}

/// One option of a select or multi-select question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub hint: String,
    pub checked: bool,
}

impl Choice {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            hint: String::new(),
            checked: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// A validated answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Choice(String),
    Choices(Vec<String>),
}

impl Answer {
    fn kind(&self) -> QuestionKind {
        match self {
            Answer::Text(_) => QuestionKind::Text,
            Answer::Confirm(_) => QuestionKind::Confirm,
            Answer::Choice(_) => QuestionKind::Select,
            Answer::Choices(_) => QuestionKind::MultiSelect,
        }
    }
}

/// A single prompt posed by a step
#[derive(Debug, Clone)]
pub struct Question {
    /// Key the answer is stored under
    pub name: &'static str,
    pub message: String,
    pub kind: QuestionKind,
    pub default: Option<Answer>,
    /// Rejection message for empty input; `None` accepts anything
    pub required: Option<&'static str>,
    pub choices: Vec<Choice>,
}

impl Question {
    fn new(name: &'static str, message: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            name,
            message: message.into(),
            kind,
            default: None,
            required: None,
            choices: Vec::new(),
        }
    }

    pub fn text(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name, message, QuestionKind::Text)
    }

    pub fn confirm(name: &'static str, message: impl Into<String>, default: bool) -> Self {
        let mut q = Self::new(name, message, QuestionKind::Confirm);
        q.default = Some(Answer::Confirm(default));
        q
    }

    pub fn select(name: &'static str, message: impl Into<String>, choices: Vec<Choice>) -> Self {
        let mut q = Self::new(name, message, QuestionKind::Select);
        q.choices = choices;
        q
    }

    pub fn multi_select(
        name: &'static str,
        message: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        let mut q = Self::new(name, message, QuestionKind::MultiSelect);
        q.choices = choices;
        q
    }

    /// Pre-filled text used when the user just presses enter
    pub fn default_text(mut self, value: impl Into<String>) -> Self {
        self.default = Some(Answer::Text(value.into()));
        self
    }

    /// Reject empty input (or an empty selection) with `message`
    pub fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    /// The answer given when the user accepts what is pre-filled
    pub fn default_answer(&self) -> Option<Answer> {
        match self.kind {
            QuestionKind::Text | QuestionKind::Confirm => self.default.clone(),
            QuestionKind::Select => self.default.clone().or_else(|| {
                self.choices
                    .iter()
                    .find(|c| c.checked)
                    .map(|c| Answer::Choice(c.value.clone()))
            }),
            QuestionKind::MultiSelect => Some(Answer::Choices(
                self.choices
                    .iter()
                    .filter(|c| c.checked)
                    .map(|c| c.value.clone())
                    .collect(),
            )),
        }
    }

    /// Empty text on an optional question means "keep the pre-filled value"
    ///
    /// Required questions keep the empty answer so `validate` can reject it.
    pub fn fill_default(&self, answer: Answer) -> Answer {
        let empty = matches!(&answer, Answer::Text(s) if s.is_empty());
        match (&self.default, self.required) {
            (Some(Answer::Text(default)), None) if empty => Answer::Text(default.clone()),
            _ => answer,
        }
    }

    pub fn offers(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }

    /// Check that `answer` fits this question's widget and offered choices
    pub fn check_shape(&self, answer: &Answer) -> Result<(), CollectError> {
        if answer.kind() != self.kind {
            return Err(CollectError::invalid(
                self.name,
                format!("expected a {:?} answer, got {:?}", self.kind, answer),
            ));
        }
        let picked: &[String] = match answer {
            Answer::Choice(v) => std::slice::from_ref(v),
            Answer::Choices(vs) => vs.as_slice(),
            _ => &[],
        };
        if let Some(bad) = picked.iter().find(|v| !self.offers(v)) {
            return Err(CollectError::invalid(
                self.name,
                format!("'{}' is not one of the offered choices", bad),
            ));
        }
        Ok(())
    }

    /// Apply the non-empty rule; `Err` carries the message to show before re-asking
    pub fn validate(&self, answer: &Answer) -> Result<(), &'static str> {
        let Some(message) = self.required else {
            return Ok(());
        };
        let empty = match answer {
            Answer::Text(s) | Answer::Choice(s) => s.is_empty(),
            Answer::Choices(vs) => vs.is_empty(),
            Answer::Confirm(_) => false,
        };
        if empty {
            Err(message)
        } else {
            Ok(())
        }
    }
}

/// Ask `question` until the answer passes validation
///
/// `ask` obtains one raw answer; `reject` shows the question's rejection
/// message before the next attempt.
pub fn ask_until_valid<A, R>(
    question: &Question,
    mut ask: A,
    mut reject: R,
) -> Result<Answer, CollectError>
where
    A: FnMut() -> Result<Answer, CollectError>,
    R: FnMut(&'static str) -> Result<(), CollectError>,
{
    loop {
        let answer = question.fill_default(ask()?);
        question.check_shape(&answer)?;
        match question.validate(&answer) {
            Ok(()) => return Ok(answer),
            Err(message) => reject(message)?,
        }
    }
}

/// Validated answers keyed by question name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: HashMap<&'static str, Answer>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, answer: Answer) {
        self.values.insert(name, answer);
    }

    pub fn get(&self, name: &'static str) -> Option<&Answer> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, name: &'static str) -> Result<&Answer, CollectError> {
        self.values.get(name).ok_or(CollectError::Unanswered(name))
    }

    pub fn text(&self, name: &'static str) -> Result<String, CollectError> {
        match self.require(name)? {
            Answer::Text(s) => Ok(s.clone()),
            other => Err(CollectError::invalid(name, format!("expected text, got {:?}", other))),
        }
    }

    pub fn confirm(&self, name: &'static str) -> Result<bool, CollectError> {
        match self.require(name)? {
            Answer::Confirm(b) => Ok(*b),
            other => Err(CollectError::invalid(name, format!("expected yes/no, got {:?}", other))),
        }
    }

    pub fn choice(&self, name: &'static str) -> Result<String, CollectError> {
        match self.require(name)? {
            Answer::Choice(s) => Ok(s.clone()),
            other => Err(CollectError::invalid(name, format!("expected a choice, got {:?}", other))),
        }
    }

    pub fn choices(&self, name: &'static str) -> Result<Vec<String>, CollectError> {
        match self.require(name)? {
            Answer::Choices(vs) => Ok(vs.clone()),
            other => Err(CollectError::invalid(
                name,
                format!("expected a list of choices, got {:?}", other),
            )),
        }
    }
}

/// Source of answers for the collector
pub trait Prompter {
    /// Ask every question, returning only once each has a valid answer
    fn ask(&mut self, questions: &[Question]) -> Result<Answers, CollectError>;

    /// Show an informational line
    fn note(&mut self, message: &str) -> Result<(), CollectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_empty() {
        let q = Question::text("uri", "What is the git uri?").required("You must provide a git uri");
        assert_eq!(
            q.validate(&Answer::Text(String::new())),
            Err("You must provide a git uri")
        );
        assert!(q.validate(&Answer::Text("x".into())).is_ok());
    }

    #[test]
    fn test_optional_text_accepts_empty() {
        let q = Question::text("host", "What is the git host?").default_text("github.com");
        assert!(q.validate(&Answer::Text(String::new())).is_ok());
    }

    #[test]
    fn test_multi_select_default_is_checked_choices() {
        let q = Question::multi_select(
            "v",
            "Version?",
            vec![Choice::new("6.x"), Choice::new("7.x").checked(true)],
        );
        assert_eq!(q.default_answer(), Some(Answer::Choices(vec!["7.x".into()])));
    }

    #[test]
    fn test_required_multi_select_rejects_empty_selection() {
        let q = Question::multi_select("v", "Version?", vec![Choice::new("7.x")])
            .required("You must choose a version.");
        assert_eq!(
            q.validate(&Answer::Choices(vec![])),
            Err("You must choose a version.")
        );
    }

    #[test]
    fn test_check_shape_rejects_unoffered_choice() {
        let q = Question::multi_select("a", "Actions", vec![Choice::new("deploy")]);
        assert!(q.check_shape(&Answer::Choices(vec!["deploy".into()])).is_ok());
        assert!(matches!(
            q.check_shape(&Answer::Choices(vec!["import".into()])),
            Err(CollectError::InvalidAnswer { question: "a", .. })
        ));
        assert!(q.check_shape(&Answer::Text("deploy".into())).is_err());
    }

    #[test]
    fn test_empty_optional_text_takes_default() {
        let q = Question::text("host", "What is the git host?").default_text("github.com");
        assert_eq!(
            q.fill_default(Answer::Text(String::new())),
            Answer::Text("github.com".into())
        );
        assert_eq!(
            q.fill_default(Answer::Text("gitlab.com".into())),
            Answer::Text("gitlab.com".into())
        );
    }

    #[test]
    fn test_empty_required_text_keeps_empty_answer() {
        let q = Question::text("rev", "What is the revision?")
            .default_text("master")
            .required("You must provide a revision, tag, branch, etc.");
        assert_eq!(
            q.fill_default(Answer::Text(String::new())),
            Answer::Text(String::new())
        );
    }

    #[test]
    fn test_empty_selection_shows_step_message_then_reasks() {
        let q = Question::multi_select(
            "actions",
            "Select Actions",
            vec![Choice::new("deploy"), Choice::new("install")],
        )
        .required("You must choose at least one action.");
        let mut attempts = vec![
            Answer::Choices(vec!["install".into()]),
            Answer::Choices(vec![]),
        ];
        let mut shown = Vec::new();

        let answer = ask_until_valid(
            &q,
            || attempts.pop().ok_or(CollectError::Unanswered("actions")),
            |message| {
                shown.push(message);
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(answer, Answer::Choices(vec!["install".into()]));
        assert_eq!(shown, vec!["You must choose at least one action."]);
    }

    #[test]
    fn test_answers_accessors() {
        let mut answers = Answers::new();
        answers.insert("git", Answer::Confirm(true));
        assert!(answers.confirm("git").unwrap());
        assert!(answers.text("git").is_err());
        assert!(matches!(
            answers.text("missing"),
            Err(CollectError::Unanswered("missing"))
        ));
    }
}
