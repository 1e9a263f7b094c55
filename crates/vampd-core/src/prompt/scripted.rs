//! Prompter that replays a fixed sequence of replies

use super::{ask_until_valid, Answer, Answers, Prompter, Question, QuestionKind};
use crate::error::CollectError;
use std::collections::VecDeque;

/// One scripted keypress-level response to a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Accept whatever the question pre-fills
    Default,
    Answer(Answer),
}

impl Reply {
    pub fn text(value: impl Into<String>) -> Self {
        Reply::Answer(Answer::Text(value.into()))
    }

    pub fn yes() -> Self {
        Reply::Answer(Answer::Confirm(true))
    }

    pub fn no() -> Self {
        Reply::Answer(Answer::Confirm(false))
    }

    pub fn choose(value: impl Into<String>) -> Self {
        Reply::Answer(Answer::Choice(value.into()))
    }

    pub fn pick(values: &[&str]) -> Self {
        Reply::Answer(Answer::Choices(
            values.iter().map(|v| v.to_string()).collect(),
        ))
    }
}

/// Answers questions from a queue of replies
///
/// A reply that fails validation is recorded as a rejection and the next reply
/// is used for the same question, just like a user typing again after an error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    asked: Vec<&'static str>,
    rejections: Vec<(&'static str, &'static str)>,
    notes: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Names of the questions asked, in order (repeated on re-prompt)
    pub fn asked(&self) -> &[&'static str] {
        &self.asked
    }

    /// `(question, message)` pairs for every rejected reply
    pub fn rejections(&self) -> &[(&'static str, &'static str)] {
        &self.rejections
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Replies that were never consumed
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn resolve(question: &Question, reply: Reply) -> Result<Answer, CollectError> {
        match reply {
            Reply::Answer(answer) => Ok(answer),
            Reply::Default => match question.default_answer() {
                Some(answer) => Ok(answer),
                None if question.kind == QuestionKind::Text => Ok(Answer::Text(String::new())),
                None => Err(CollectError::Unanswered(question.name)),
            },
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, questions: &[Question]) -> Result<Answers, CollectError> {
        let mut answers = Answers::new();
        for question in questions {
            let answer = ask_until_valid(
                question,
                || {
                    self.asked.push(question.name);
                    let reply = self
                        .replies
                        .pop_front()
                        .ok_or(CollectError::Unanswered(question.name))?;
                    Self::resolve(question, reply)
                },
                |message| {
                    self.rejections.push((question.name, message));
                    Ok(())
                },
            )?;
            answers.insert(question.name, answer);
        }
        Ok(answers)
    }

    fn note(&mut self, message: &str) -> Result<(), CollectError> {
        self.notes.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Choice;

    #[test]
    fn test_empty_reply_is_rejected_then_retried() {
        let questions = [Question::text("db_file", "Where is the db file?")
            .required("You must provide a db file location.")];
        let mut prompter = ScriptedPrompter::new([Reply::text(""), Reply::text("/vagrant/db.sql")]);

        let answers = prompter.ask(&questions).unwrap();

        assert_eq!(answers.text("db_file").unwrap(), "/vagrant/db.sql");
        assert_eq!(
            prompter.rejections(),
            &[("db_file", "You must provide a db file location.")]
        );
        assert_eq!(prompter.asked(), &["db_file", "db_file"]);
    }

    #[test]
    fn test_default_reply_takes_prefilled_value() {
        let questions = [
            Question::text("rev", "Revision?").default_text("master"),
            Question::confirm("nested", "Nested?", false),
        ];
        let mut prompter = ScriptedPrompter::new([Reply::Default, Reply::Default]);

        let answers = prompter.ask(&questions).unwrap();

        assert_eq!(answers.text("rev").unwrap(), "master");
        assert!(!answers.confirm("nested").unwrap());
    }

    #[test]
    fn test_default_without_prefill_on_required_text_is_rejected() {
        let questions = [Question::text("id", "Machine name?").required("You must provide a Machine Name")];
        let mut prompter = ScriptedPrompter::new([Reply::Default, Reply::text("acme")]);

        let answers = prompter.ask(&questions).unwrap();

        assert_eq!(answers.text("id").unwrap(), "acme");
        assert_eq!(prompter.rejections().len(), 1);
    }

    #[test]
    fn test_empty_reply_on_optional_question_keeps_default() {
        let questions = [Question::text("host", "What is the git host?").default_text("github.com")];
        let mut prompter = ScriptedPrompter::new([Reply::text("")]);

        let answers = prompter.ask(&questions).unwrap();

        assert_eq!(answers.text("host").unwrap(), "github.com");
        assert!(prompter.rejections().is_empty());
    }

    #[test]
    fn test_exhausted_script_fails() {
        let questions = [Question::text("id", "Machine name?")];
        let mut prompter = ScriptedPrompter::new(Vec::<Reply>::new());
        assert!(matches!(
            prompter.ask(&questions),
            Err(CollectError::Unanswered("id"))
        ));
    }

    #[test]
    fn test_single_select_reply() {
        let questions = [Question::select(
            "next",
            "What would you like to do?",
            vec![Choice::new("docs"), Choice::new("skip")],
        )];
        let mut prompter = ScriptedPrompter::new([Reply::choose("skip")]);
        assert_eq!(prompter.ask(&questions).unwrap().choice("next").unwrap(), "skip");
    }

    #[test]
    fn test_select_without_default_cannot_take_default() {
        let questions = [Question::select("next", "Pick", vec![Choice::new("docs")])];
        let mut prompter = ScriptedPrompter::new([Reply::Default]);
        assert!(matches!(
            prompter.ask(&questions),
            Err(CollectError::Unanswered("next"))
        ));
    }
}
