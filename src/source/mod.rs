use crate::models::Poll;
use crate::scoring::aggregate::score;
use crate::scoring::ScoreResult;
use async_trait::async_trait;
use log::error;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// Where raw solve payloads come from; the HTTP client behind it is the
// caller's concern
#[async_trait]
pub trait SolveSource: Send + Sync {
    async fn fetch_solves(&self, poll_id: &str) -> Result<Value, SourceError>;
}

/// Score every poll concurrently, one fetch per poll.
///
/// A poll whose fetch fails still gets a zero result so the rest of the
/// dashboard keeps rendering.
pub async fn gather_scores<S>(source: Arc<S>, polls: Vec<Poll>) -> HashMap<String, ScoreResult>
where
    S: SolveSource + 'static,
{
    let mut tasks = JoinSet::new();

    for poll in polls {
        let source = Arc::clone(&source);
        tasks.spawn(async move {
            match source.fetch_solves(&poll.id).await {
                Ok(raw) => score(&poll, &raw),
                Err(err) => {
                    error!("failed to fetch responses for poll {}: {}", poll.id, err);
                    ScoreResult::empty(&poll.id)
                }
            }
        });
    }

    let mut results = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => {
                results.insert(result.poll_id.clone(), result);
            }
            Err(err) => error!("score task failed: {}", err),
        }
    }
    results
}
