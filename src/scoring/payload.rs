use crate::models::SolveSelection;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

// The response endpoint's body drifted across backend versions: a rich
// "answers" format, an older array-of-solves format, and a bare points
// scalar. All three stay accepted; the parse is a tagged variant so a new
// shape is a new variant, not another nested conditional.
#[derive(Debug, Clone)]
pub enum SolvePayload {
    Answers(Vec<AnswerEntry>),
    Submissions(Vec<SolveRecord>),
    Points(f64),
    Unrecognized,
}

// Shape 1 entry: points pre-resolved by the backend, identity embedded
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerEntry {
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub answer: Option<AnswerDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerDetail {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

// Shape 2 record: one respondent's raw selections, resolved against the
// poll definition later
#[derive(Debug, Clone, Deserialize)]
pub struct SolveRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub solve: Vec<Value>,
}

// Canonical unit the aggregator consumes
#[derive(Debug, Clone)]
pub struct ResponseItem {
    pub submitter: Option<String>,
    pub value: ResponseValue,
}

#[derive(Debug, Clone)]
pub enum ResponseValue {
    // Points carried directly by the payload (shapes 1 and 3)
    Resolved(f64),
    // Needs resolution against the poll definition (shape 2)
    Selection(SolveSelection),
}

impl SolvePayload {
    /// Structurally detect the payload shape. Checks run in priority order;
    /// anything unmatched (including null or a malformed body) is
    /// `Unrecognized`, never an error.
    pub fn parse(raw: &Value) -> Self {
        let data = unwrap_envelope(raw);

        if let Some(entries) = data.get("answers").and_then(Value::as_array) {
            debug!("solve payload: answers format with {} entries", entries.len());
            return SolvePayload::Answers(collect_entries(entries));
        }
        if let Some(records) = data.as_array() {
            debug!("solve payload: submissions format with {} records", records.len());
            return SolvePayload::Submissions(collect_records(records));
        }
        if let Some(points) = data.get("points").and_then(Value::as_f64) {
            debug!("solve payload: direct points value {}", points);
            return SolvePayload::Points(points);
        }

        debug!("solve payload matched no known shape");
        SolvePayload::Unrecognized
    }

    // Flatten into the canonical item sequence
    pub fn normalize(&self) -> Vec<ResponseItem> {
        match self {
            SolvePayload::Answers(entries) => entries
                .iter()
                .filter_map(|entry| {
                    let points = entry.answer.as_ref().and_then(|answer| answer.points);
                    match points {
                        Some(points) => Some(ResponseItem {
                            submitter: entry.submitter_id(),
                            value: ResponseValue::Resolved(points),
                        }),
                        None => {
                            warn!("answer entry without numeric points, skipping");
                            None
                        }
                    }
                })
                .collect(),
            SolvePayload::Submissions(records) => {
                let mut items = Vec::new();
                for record in records {
                    let submitter = record.submitter_id();
                    for raw in &record.solve {
                        match serde_json::from_value::<SolveSelection>(raw.clone()) {
                            Ok(selection) => items.push(ResponseItem {
                                submitter: submitter.clone(),
                                value: ResponseValue::Selection(selection),
                            }),
                            Err(err) => warn!("skipping malformed selection: {}", err),
                        }
                    }
                }
                items
            }
            SolvePayload::Points(points) => vec![ResponseItem {
                submitter: None,
                value: ResponseValue::Resolved(*points),
            }],
            SolvePayload::Unrecognized => Vec::new(),
        }
    }
}

impl AnswerEntry {
    pub fn submitter_id(&self) -> Option<String> {
        id_string(self.user.as_ref()?.get("id"))
    }
}

impl SolveRecord {
    fn submitter_id(&self) -> Option<String> {
        id_string(self.id.as_ref()).or_else(|| self.email.clone())
    }
}

// Every endpoint wraps its body in { success, data }; tolerate bare payloads too
fn unwrap_envelope(raw: &Value) -> &Value {
    match raw.get("data") {
        Some(data) => data,
        None => raw,
    }
}

fn collect_entries(entries: &[Value]) -> Vec<AnswerEntry> {
    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping malformed answer entry: {}", err);
                None
            }
        })
        .collect()
}

fn collect_records(records: &[Value]) -> Vec<SolveRecord> {
    records
        .iter()
        .filter_map(|record| match serde_json::from_value(record.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping malformed submission record: {}", err);
                None
            }
        })
        .collect()
}

// Ids drift between strings and numbers across backend formats
pub(crate) fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
