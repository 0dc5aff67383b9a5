use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// A persisted quiz together with all of the questions it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i32,
    /// Title displayed in listings.
    pub title: String,
    /// Owned questions in authoring order.
    pub questions: Vec<Question>,
}

/// A single prompt owned by exactly one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    #[serde(rename = "quizId")]
    pub quiz_id: i32,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Prompt displayed to the quiz taker.
    pub text: String,
    /// Selectable labels; empty unless `kind` is [`QuestionKind::Checkbox`].
    pub options: Vec<String>,
    /// Expected answer. Checkboxes conventionally store a comma-joined
    /// list of the correct labels.
    pub answer: String,
}

/// Closed set of question variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Boolean,
    Input,
    Checkbox,
}

impl QuestionKind {
    /// Tag stored in the `question.type` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Input => "input",
            Self::Checkbox => "checkbox",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "boolean" => Self::Boolean,
            "input" => Self::Input,
            "checkbox" => Self::Checkbox,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Question, QuestionKind};

    #[test]
    fn question_serializes_with_wire_field_names() {
        let question = Question {
            id: 7,
            quiz_id: 3,
            kind: QuestionKind::Checkbox,
            text: String::from("Pick one"),
            options: vec![String::from("A"), String::from("B")],
            answer: String::from("A"),
        };
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["quizId"], 3);
        assert_eq!(json["type"], "checkbox");
        assert_eq!(json["options"], serde_json::json!(["A", "B"]));
    }

    #[test]
    fn kind_tags_round_trip() {
        for kind in [QuestionKind::Boolean, QuestionKind::Input, QuestionKind::Checkbox] {
            assert_eq!(QuestionKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(QuestionKind::from_tag("radio"), None);
    }
}
