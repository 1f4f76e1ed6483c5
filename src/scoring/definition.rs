use crate::models::Poll;
use std::collections::HashMap;

/// Fast-lookup view of a poll definition: question id -> answer id -> points.
#[derive(Debug, Clone, Default)]
pub struct PointsLookup {
    questions: HashMap<String, HashMap<String, i64>>,
}

impl PointsLookup {
    pub fn build(poll: &Poll) -> Self {
        let mut questions: HashMap<String, HashMap<String, i64>> = HashMap::new();

        for question in &poll.questions {
            let mut answers: HashMap<String, i64> = HashMap::new();
            for answer in &question.answers {
                // Duplicate answer ids: the later occurrence wins silently
                answers.insert(answer.id.clone(), answer.points);
            }
            // Same for duplicate question ids
            questions.insert(question.id.clone(), answers);
        }

        Self { questions }
    }

    pub fn points_for(&self, question_id: &str, answer_id: &str) -> Option<i64> {
        self.questions.get(question_id)?.get(answer_id).copied()
    }

    pub fn has_question(&self, question_id: &str) -> bool {
        self.questions.contains_key(question_id)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
