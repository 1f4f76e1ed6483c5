use crate::models::Poll;
use crate::scoring::definition::PointsLookup;
use crate::scoring::payload::{id_string, ResponseValue, SolvePayload};
use crate::scoring::{AnswerTally, ScoreResult};
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;

/// Mean point score for one poll over its raw response payload.
///
/// Pure and total: malformed payloads and unresolvable selections degrade to
/// a zero result so one broken poll never takes the dashboard list down.
pub fn score(poll: &Poll, raw: &Value) -> ScoreResult {
    let lookup = PointsLookup::build(poll);
    let items = SolvePayload::parse(raw).normalize();

    let mut total_points = 0.0;
    let mut total_answers = 0usize;

    for item in &items {
        match &item.value {
            ResponseValue::Resolved(points) => {
                total_points += points;
                total_answers += 1;
            }
            ResponseValue::Selection(selection) => {
                match lookup.points_for(&selection.question_id, &selection.answer_id) {
                    Some(points) => {
                        total_points += points as f64;
                        total_answers += 1;
                    }
                    None => {
                        // Dropped from numerator and denominator both
                        warn!(
                            "poll {}: selection {}/{} not in definition, dropped",
                            poll.id, selection.question_id, selection.answer_id
                        );
                    }
                }
            }
        }
    }

    let average_points = if total_answers > 0 {
        round_one_decimal(total_points / total_answers as f64)
    } else {
        0.0
    };
    debug!(
        "poll {}: {} points over {} answers, average {}",
        poll.id, total_points, total_answers, average_points
    );

    ScoreResult {
        poll_id: poll.id.clone(),
        average_points,
        sample_count: total_answers,
    }
}

/// Selection counts per answer, one row per answer in definition order.
/// Answers nobody picked keep a zero row.
pub fn tally(poll: &Poll, raw: &Value) -> Vec<AnswerTally> {
    let lookup = PointsLookup::build(poll);
    let payload = SolvePayload::parse(raw);

    let mut counts: HashMap<(String, String), usize> = HashMap::new();

    match &payload {
        SolvePayload::Answers(entries) => {
            // Entries carry only the answer id; recover the owning question
            // from the definition
            let mut owner: HashMap<&str, &str> = HashMap::new();
            for question in &poll.questions {
                for answer in &question.answers {
                    owner.insert(answer.id.as_str(), question.id.as_str());
                }
            }
            for entry in entries {
                let answer_id = entry
                    .answer
                    .as_ref()
                    .and_then(|answer| id_string(answer.id.as_ref()));
                let Some(answer_id) = answer_id else { continue };
                match owner.get(answer_id.as_str()) {
                    Some(question_id) => {
                        *counts.entry((question_id.to_string(), answer_id)).or_insert(0) += 1;
                    }
                    None => warn!("poll {}: answer {} not in definition", poll.id, answer_id),
                }
            }
        }
        SolvePayload::Submissions(_) => {
            for item in payload.normalize() {
                if let ResponseValue::Selection(selection) = item.value {
                    if lookup
                        .points_for(&selection.question_id, &selection.answer_id)
                        .is_some()
                    {
                        *counts
                            .entry((selection.question_id, selection.answer_id))
                            .or_insert(0) += 1;
                    }
                }
            }
        }
        // A bare points scalar names no answer
        SolvePayload::Points(_) | SolvePayload::Unrecognized => {}
    }

    poll.questions
        .iter()
        .flat_map(|question| {
            question.answers.iter().map(|answer| AnswerTally {
                question_id: question.id.clone(),
                answer_id: answer.id.clone(),
                answer_text: answer.text.clone(),
                points: answer.points,
                responses: counts
                    .get(&(question.id.clone(), answer.id.clone()))
                    .copied()
                    .unwrap_or(0),
            })
        })
        .collect()
}

// The dashboard's Math.round((points / answers) * 10) / 10
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
