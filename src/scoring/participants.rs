use crate::models::Respondent;
use crate::scoring::payload::{id_string, SolvePayload};
use log::warn;
use serde_json::Value;
use std::collections::HashMap;

/// Unique respondents for a poll, from an answers-format payload.
///
/// Only that format carries identity. Entries sharing an id collapse to one
/// record with the later entry's fields; first-seen order is kept. Entries
/// without a usable id are dropped.
pub fn participants(raw: &Value) -> Vec<Respondent> {
    let entries = match SolvePayload::parse(raw) {
        SolvePayload::Answers(entries) => entries,
        _ => return Vec::new(),
    };

    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, Respondent> = HashMap::new();

    for entry in &entries {
        let Some(user) = entry.user.as_ref() else { continue };
        let Some(id) = id_string(user.get("id")) else {
            warn!("answer entry user without id, dropped from participants");
            continue;
        };

        let respondent = Respondent {
            id: id.clone(),
            name: text_field(user, "name"),
            email: text_field(user, "email"),
            gender: text_field(user, "gender"),
            teaching: text_field(user, "teaching"),
            employment_status: text_field(user, "employment_status"),
            date_of_birth: text_field(user, "date_of_birth"),
            address: text_field(user, "address"),
        };

        if !by_id.contains_key(&id) {
            order.push(id.clone());
        }
        // Last entry for an id wins
        by_id.insert(id, respondent);
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect()
}

// The backend emits empty strings for missing identity fields; treat them as absent
fn text_field(user: &Value, key: &str) -> Option<String> {
    match user.get(key).and_then(Value::as_str) {
        Some("") | None => None,
        Some(text) => Some(text.to_string()),
    }
}
