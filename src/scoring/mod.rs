pub mod aggregate;
pub mod definition;
pub mod participants;
pub mod payload;

use serde::Serialize;

// Aggregated score for one poll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub poll_id: String,
    // Mean points across resolved selections, rounded to one decimal
    pub average_points: f64,
    // Number of selections that resolved against the poll definition
    pub sample_count: usize,
}

impl ScoreResult {
    // The defined result for polls with no parseable submissions
    pub fn empty(poll_id: &str) -> Self {
        Self {
            poll_id: poll_id.to_string(),
            average_points: 0.0,
            sample_count: 0,
        }
    }
}

// Per-answer selection count, one row per answer in poll definition order
#[derive(Debug, Clone, Serialize)]
pub struct AnswerTally {
    pub question_id: String,
    pub answer_id: String,
    pub answer_text: String,
    pub points: i64,
    pub responses: usize,
}
