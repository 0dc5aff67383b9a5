use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display};
use serde::Deserialize;

use crate::quiz::QuestionKind;

/// Acceptable schema for new quizzes.
#[derive(Debug, Deserialize)]
pub struct Submission {
    /// Title displayed in listings.
    pub title: String,
    /// Questions in authoring order.
    pub questions: Vec<QuestionSubmission>,
}

/// One inbound question, tagged by its `type` field. Only the checkbox
/// variant carries options; anything clients attach to the other kinds is
/// dropped during deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionSubmission {
    Boolean { text: String, answer: String },
    Input { text: String, answer: String },
    Checkbox { text: String, options: OptionsField, answer: String },
}

/// Checkbox options arrive either comma-joined or as a ready-made list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OptionsField {
    Joined(String),
    Listed(Vec<String>),
}

impl OptionsField {
    /// Splits a comma-joined string into trimmed, non-empty labels. An
    /// already-structured list passes through unchanged.
    fn into_labels(self) -> Vec<String> {
        match self {
            Self::Joined(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(String::from)
                .collect(),
            Self::Listed(labels) => labels,
        }
    }
}

/// A validated quiz ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
    pub questions: Vec<NewQuestion>,
}

/// A validated question ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub kind: QuestionKind,
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    EmptyTitle,
    EmptyText,
    TooFewOptions,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyTitle => "Quiz title must not be empty",
            Self::EmptyText => "Question text must not be empty",
            Self::TooFewOptions => "Checkbox questions need at least two options",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;

impl QuestionSubmission {
    fn normalize(self) -> Result<NewQuestion> {
        let (kind, text, options, answer) = match self {
            Self::Boolean { text, answer } => (QuestionKind::Boolean, text, Vec::new(), answer),
            Self::Input { text, answer } => (QuestionKind::Input, text, Vec::new(), answer),
            Self::Checkbox { text, options, answer } => {
                let labels = options.into_labels();
                if labels.len() < 2 {
                    return Err(Error::TooFewOptions);
                }
                (QuestionKind::Checkbox, text, labels, answer)
            }
        };
        if text.trim().is_empty() {
            return Err(Error::EmptyText);
        }
        Ok(NewQuestion { kind, text, options, answer })
    }
}

impl Submission {
    /// The single validating step between the wire shape and the store.
    pub fn normalize(self) -> Result<NewQuiz> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        let questions = self
            .questions
            .into_iter()
            .map(QuestionSubmission::normalize)
            .collect::<Result<Vec<_>>>()?;
        Ok(NewQuiz { title: self.title, questions })
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, QuestionKind, Submission};

    fn normalize(json: &str) -> super::Result<super::NewQuiz> {
        let submission: Submission = serde_json::from_str(json).unwrap();
        submission.normalize()
    }

    #[test]
    fn joined_options_are_split_and_trimmed() {
        let quiz = normalize(
            r#"{"title":"Colors","questions":[
                {"type":"checkbox","text":"Pick","options":"Red, Blue ,Green","answer":"Red"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(quiz.questions[0].options, ["Red", "Blue", "Green"]);
    }

    #[test]
    fn empty_pieces_are_dropped_from_joined_options() {
        let quiz = normalize(
            r#"{"title":"T","questions":[
                {"type":"checkbox","text":"Pick","options":"A,, ,B,","answer":"A"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(quiz.questions[0].options, ["A", "B"]);
    }

    #[test]
    fn listed_options_pass_through_unchanged() {
        let quiz = normalize(
            r#"{"title":"T","questions":[
                {"type":"checkbox","text":"Pick","options":[" A ","B"],"answer":"A"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(quiz.questions[0].options, [" A ", "B"]);
    }

    #[test]
    fn non_checkbox_options_are_discarded() {
        let quiz = normalize(
            r#"{"title":"T","questions":[
                {"type":"boolean","text":"True?","options":"yes,no","answer":"true"},
                {"type":"input","text":"Name?","options":["a","b"],"answer":"b"}
            ]}"#,
        )
        .unwrap();
        assert!(quiz.questions.iter().all(|question| question.options.is_empty()));
        assert_eq!(quiz.questions[0].kind, QuestionKind::Boolean);
        assert_eq!(quiz.questions[1].kind, QuestionKind::Input);
    }

    #[test]
    fn single_option_checkbox_is_rejected() {
        assert_eq!(
            normalize(
                r#"{"title":"T","questions":[
                    {"type":"checkbox","text":"Pick","options":"Only","answer":"Only"}
                ]}"#,
            )
            .unwrap_err(),
            Error::TooFewOptions,
        );
    }

    #[test]
    fn blank_title_and_text_are_rejected() {
        assert_eq!(normalize(r#"{"title":"  ","questions":[]}"#).unwrap_err(), Error::EmptyTitle);
        assert_eq!(
            normalize(
                r#"{"title":"T","questions":[{"type":"input","text":" ","answer":"x"}]}"#,
            )
            .unwrap_err(),
            Error::EmptyText,
        );
    }

    #[test]
    fn unknown_type_tag_fails_to_parse() {
        let result: Result<Submission, _> = serde_json::from_str(
            r#"{"title":"T","questions":[{"type":"radio","text":"?","answer":"x"}]}"#,
        );
        assert!(result.is_err());
    }
}
