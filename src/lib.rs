//! Scoring and response aggregation for the istitlaa poll platform.
//!
//! The dashboard and detail views hand this crate a poll definition plus the
//! raw response payload fetched for it; the crate normalizes the payload
//! (three backend formats are tolerated), resolves selections against the
//! definition, and produces average scores, per-answer tallies, and the
//! unique participant list. Shape problems never raise: a poll that cannot
//! be scored reports zero.

pub mod models;
pub mod scoring;
pub mod source;
pub mod submission;

pub use models::{Answer, Poll, Question, Respondent, SolveSelection, Submission};
pub use scoring::aggregate::{score, tally};
pub use scoring::definition::PointsLookup;
pub use scoring::participants::participants;
pub use scoring::payload::SolvePayload;
pub use scoring::{AnswerTally, ScoreResult};
pub use source::{gather_scores, SolveSource, SourceError};
pub use submission::{validate_submission, SubmissionError};
