//! Test fixtures and factory functions for request bodies.

use serde_json::json;
use uuid::Uuid;

/// Create a guardian register request body.
pub fn guardian_register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create a learner request body.
pub fn create_learner_request(name: &str) -> serde_json::Value {
    json!({ "name": name })
}

/// Create a custom word request body.
pub fn custom_word_request(text: &str, level: Option<&str>, hint: Option<&str>) -> serde_json::Value {
    json!({
        "text": text,
        "level": level,
        "hint_sentence": hint,
    })
}

/// Create a seed request body from (text, level, hint) triples.
pub fn seed_request(entries: &[(&str, &str, Option<&str>)]) -> serde_json::Value {
    let words: Vec<_> = entries
        .iter()
        .map(|(text, level, hint)| json!({ "text": text, "level": level, "hint_sentence": hint }))
        .collect();
    json!({ "words": words })
}

/// Create a submit outcome request body.
pub fn outcome_request(learner_id: Uuid, word_id: Uuid, outcome: &str) -> serde_json::Value {
    json!({
        "learner_id": learner_id,
        "word_id": word_id,
        "outcome": outcome,
    })
}

/// Create a check guess request body.
pub fn check_request(guess: &str, answer: &str) -> serde_json::Value {
    json!({ "guess": guess, "answer": answer })
}

/// Create an update voice request body.
pub fn update_voice_request(voice_id: Option<&str>) -> serde_json::Value {
    json!({ "voice_id": voice_id })
}

/// Generate a unique word text to avoid collisions between runs.
pub fn unique_word(prefix: &str) -> String {
    format!("{}{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}
