use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    #[serde(rename = "isActive", default = "active_default")]
    pub is_active: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    // May be zero or negative
    pub points: i64,
}

// One selected answer, as sent by the survey form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolveSelection {
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "answerId")]
    pub answer_id: String,
}

// A complete respondent submission: identity fields plus one selection per question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "pollId")]
    pub poll_id: String,
    pub name: String,
    pub email: String,
    pub employment_status: String,
    pub teaching: String,
    pub date_of_birth: String,
    pub address: String,
    pub gender: String,
    pub solve: Vec<SolveSelection>,
    #[serde(rename = "submittedAt", default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

/// Identity record of one poll participant, as shown on the detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Respondent {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub teaching: Option<String>,
    pub employment_status: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
}

fn active_default() -> bool {
    true
}

impl Poll {
    pub fn new(title: String, description: String, questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            questions,
            is_active: true,
            created_at: Some(Utc::now()),
        }
    }
}

impl Question {
    pub fn new(text: String, answers: Vec<Answer>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            answers,
        }
    }
}

impl Answer {
    pub fn new(text: String, points: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_new_generates_unique_ids() {
        let answers = vec![Answer::new("نعم".to_string(), 5), Answer::new("لا".to_string(), 0)];
        let question = Question::new("هل أنت راضٍ عن الخدمة؟".to_string(), answers);
        let poll = Poll::new("استطلاع الرضا".to_string(), "قياس رضا المستفيدين".to_string(), vec![question]);

        assert!(poll.is_active);
        assert_ne!(poll.id, poll.questions[0].id);
        let q = &poll.questions[0];
        assert_ne!(q.answers[0].id, q.answers[1].id);
    }

    #[test]
    fn poll_deserializes_wire_field_names() {
        let json = serde_json::json!({
            "id": "p1",
            "title": "استطلاع",
            "description": "وصف",
            "questions": [],
            "isActive": false
        });
        let poll: Poll = serde_json::from_value(json).unwrap();
        assert!(!poll.is_active);
        assert!(poll.created_at.is_none());
    }

    #[test]
    fn poll_active_defaults_to_true_when_absent() {
        let json = serde_json::json!({
            "id": "p1",
            "title": "t",
            "description": "d",
            "questions": []
        });
        let poll: Poll = serde_json::from_value(json).unwrap();
        assert!(poll.is_active);
    }

    #[test]
    fn selection_uses_camel_case_on_the_wire() {
        let sel = SolveSelection {
            question_id: "q1".to_string(),
            answer_id: "a1".to_string(),
        };
        let value = serde_json::to_value(&sel).unwrap();
        assert_eq!(value["questionId"], "q1");
        assert_eq!(value["answerId"], "a1");
    }
}
