use crate::models::{Poll, Submission};
use crate::scoring::definition::PointsLookup;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

lazy_static! {
    // Same check the survey form applies before letting a respondent continue
    static ref EMAIL_RE: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("poll {0} is no longer active")]
    PollClosed(String),
    #[error("answered {answered} of {total} questions")]
    UnansweredQuestions { answered: usize, total: usize },
    #[error("question {0} does not belong to this poll")]
    UnknownQuestion(String),
    #[error("answer {answer_id} does not belong to question {question_id}")]
    UnknownAnswer {
        question_id: String,
        answer_id: String,
    },
}

/// Gate a submission before it is accepted: identity fields present, email
/// plausible, poll still open, every question answered with an answer the
/// poll actually defines.
pub fn validate_submission(poll: &Poll, submission: &Submission) -> Result<(), SubmissionError> {
    if !poll.is_active {
        return Err(SubmissionError::PollClosed(poll.id.clone()));
    }

    required(&submission.name, "name")?;
    required(&submission.email, "email")?;
    required(&submission.employment_status, "employment_status")?;
    required(&submission.teaching, "teaching")?;
    required(&submission.date_of_birth, "date_of_birth")?;
    required(&submission.address, "address")?;
    required(&submission.gender, "gender")?;

    if !EMAIL_RE.is_match(&submission.email) {
        return Err(SubmissionError::InvalidEmail(submission.email.clone()));
    }

    let lookup = PointsLookup::build(poll);
    let mut answered: HashSet<&str> = HashSet::new();
    for selection in &submission.solve {
        if !lookup.has_question(&selection.question_id) {
            return Err(SubmissionError::UnknownQuestion(selection.question_id.clone()));
        }
        if lookup
            .points_for(&selection.question_id, &selection.answer_id)
            .is_none()
        {
            return Err(SubmissionError::UnknownAnswer {
                question_id: selection.question_id.clone(),
                answer_id: selection.answer_id.clone(),
            });
        }
        answered.insert(selection.question_id.as_str());
    }

    if answered.len() < poll.questions.len() {
        return Err(SubmissionError::UnansweredQuestions {
            answered: answered.len(),
            total: poll.questions.len(),
        });
    }

    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<(), SubmissionError> {
    if value.trim().is_empty() {
        return Err(SubmissionError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, Poll, Question, SolveSelection};
    use chrono::Utc;

    fn open_poll() -> Poll {
        Poll {
            id: "p1".to_string(),
            title: "استطلاع".to_string(),
            description: "وصف".to_string(),
            questions: vec![
                Question {
                    id: "q1".to_string(),
                    text: "السؤال الأول".to_string(),
                    answers: vec![Answer {
                        id: "a1".to_string(),
                        text: "نعم".to_string(),
                        points: 5,
                    }],
                },
                Question {
                    id: "q2".to_string(),
                    text: "السؤال الثاني".to_string(),
                    answers: vec![Answer {
                        id: "a2".to_string(),
                        text: "لا".to_string(),
                        points: 0,
                    }],
                },
            ],
            is_active: true,
            created_at: None,
        }
    }

    fn full_submission() -> Submission {
        Submission {
            poll_id: "p1".to_string(),
            name: "سارة".to_string(),
            email: "sara@example.com".to_string(),
            employment_status: "موظف".to_string(),
            teaching: "جامعي".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            address: "عمان".to_string(),
            gender: "female".to_string(),
            solve: vec![
                SolveSelection {
                    question_id: "q1".to_string(),
                    answer_id: "a1".to_string(),
                },
                SolveSelection {
                    question_id: "q2".to_string(),
                    answer_id: "a2".to_string(),
                },
            ],
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn complete_submission_passes() {
        assert_eq!(validate_submission(&open_poll(), &full_submission()), Ok(()));
    }

    #[test]
    fn closed_poll_is_rejected() {
        let mut poll = open_poll();
        poll.is_active = false;
        assert_eq!(
            validate_submission(&poll, &full_submission()),
            Err(SubmissionError::PollClosed("p1".to_string()))
        );
    }

    #[test]
    fn blank_identity_field_is_rejected() {
        let mut submission = full_submission();
        submission.address = "  ".to_string();
        assert_eq!(
            validate_submission(&open_poll(), &submission),
            Err(SubmissionError::MissingField("address"))
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut submission = full_submission();
        submission.email = "sara-at-example".to_string();
        assert_eq!(
            validate_submission(&open_poll(), &submission),
            Err(SubmissionError::InvalidEmail("sara-at-example".to_string()))
        );
    }

    #[test]
    fn partial_answers_are_rejected() {
        let mut submission = full_submission();
        submission.solve.pop();
        assert_eq!(
            validate_submission(&open_poll(), &submission),
            Err(SubmissionError::UnansweredQuestions {
                answered: 1,
                total: 2
            })
        );
    }

    #[test]
    fn answering_the_same_question_twice_does_not_count_as_two() {
        let mut submission = full_submission();
        submission.solve[1] = SolveSelection {
            question_id: "q1".to_string(),
            answer_id: "a1".to_string(),
        };
        assert_eq!(
            validate_submission(&open_poll(), &submission),
            Err(SubmissionError::UnansweredQuestions {
                answered: 1,
                total: 2
            })
        );
    }

    #[test]
    fn foreign_question_and_answer_are_rejected() {
        let mut submission = full_submission();
        submission.solve[0].question_id = "q9".to_string();
        assert_eq!(
            validate_submission(&open_poll(), &submission),
            Err(SubmissionError::UnknownQuestion("q9".to_string()))
        );

        let mut submission = full_submission();
        submission.solve[0].answer_id = "a9".to_string();
        assert_eq!(
            validate_submission(&open_poll(), &submission),
            Err(SubmissionError::UnknownAnswer {
                question_id: "q1".to_string(),
                answer_id: "a9".to_string()
            })
        );
    }
}
