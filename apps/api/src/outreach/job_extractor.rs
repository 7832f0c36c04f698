//! Job Extractor — turns cleaned careers-page text into validated `JobPosting`s.
//!
//! The model's reply is never trusted to have the right shape. It is parsed
//! generically into a `serde_json::Value` first, then each expected field is
//! checked and coerced, with absent fields defaulting to empty values.

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{strip_json_fences, TextCompletion};
use crate::models::job::JobPosting;
use crate::outreach::prompts::EXTRACT_JOBS_PROMPT_TEMPLATE;

const JOB_FIELDS: [&str; 4] = ["role", "experience", "skills", "description"];

/// Extracts job postings from cleaned page text with one completion call.
pub async fn extract_jobs(
    page_text: &str,
    llm: &dyn TextCompletion,
) -> Result<Vec<JobPosting>, AppError> {
    let prompt = render(
        EXTRACT_JOBS_PROMPT_TEMPLATE,
        &[
            ("json_only_instruction", JSON_ONLY_INSTRUCTION),
            ("page_data", page_text),
        ],
    );

    let reply = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Service(format!("Job extraction failed: {e}")))?;

    parse_jobs(&reply)
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Parses an extraction reply.
///
/// A single object becomes a one-element list, even when none of its keys are
/// recognised; an array is returned in order. Anything that is not an object or
/// array of objects is `ExtractionParse`.
pub fn parse_jobs(reply: &str) -> Result<Vec<JobPosting>, AppError> {
    let value = parse_structured(reply).ok_or(AppError::ExtractionParse)?;

    match value {
        Value::Array(items) => Ok(items.into_iter().filter_map(normalize_entry).collect()),
        Value::Object(map) => match container_items(&map) {
            Some(items) => Ok(items.into_iter().filter_map(normalize_entry).collect()),
            None => Ok(vec![posting_from(&map)]),
        },
        _ => Err(AppError::ExtractionParse),
    }
}

/// Parses the reply as JSON. When the model surrounded the data with prose,
/// the first embedded object or array holding job data is used instead.
fn parse_structured(reply: &str) -> Option<Value> {
    let text = strip_json_fences(reply);
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }
    embedded_value(text)
}

/// Tries every `[` / `{` as a start position. A value that carries objects wins
/// over earlier bracketed noise such as "Found [2] openings".
fn embedded_value(text: &str) -> Option<Value> {
    let mut fallback = None;

    for (start, _) in text.match_indices(|c: char| c == '[' || c == '{') {
        let mut values = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        let Some(Ok(value)) = values.next() else {
            continue;
        };
        let carries_jobs = match &value {
            Value::Object(_) => true,
            Value::Array(items) => items.iter().any(Value::is_object),
            _ => false,
        };
        if carries_jobs {
            return Some(value);
        }
        if value.is_array() && fallback.is_none() {
            fallback = Some(value);
        }
    }

    fallback
}

/// `{"jobs": [...]}` style wrappers: an object without job keys whose only
/// value is an array of objects.
fn container_items(map: &Map<String, Value>) -> Option<Vec<Value>> {
    if has_job_fields(map) || map.len() != 1 {
        return None;
    }
    match map.values().next() {
        Some(Value::Array(items)) if items.iter().all(Value::is_object) => Some(items.clone()),
        _ => None,
    }
}

fn field<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

fn has_job_fields(map: &Map<String, Value>) -> bool {
    JOB_FIELDS.iter().any(|name| field(map, name).is_some())
}

/// Array members that are not objects, or carry none of the job keys, are noise.
fn normalize_entry(value: Value) -> Option<JobPosting> {
    match value {
        Value::Object(map) if has_job_fields(&map) => Some(posting_from(&map)),
        other => {
            warn!("Dropping extraction entry without job fields: {other}");
            None
        }
    }
}

fn posting_from(map: &Map<String, Value>) -> JobPosting {
    JobPosting {
        role: text_field(field(map, "role")),
        experience: text_field(field(map, "experience")),
        skills: skills_field(field(map, "skills")),
        description: text_field(field(map, "description")),
    }
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text_field(Some(item)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Some(other @ Value::Object(_)) => other.to_string(),
    }
}

fn skills_field(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<String> = match value {
        None | Some(Value::Null) | Some(Value::Object(_)) => Vec::new(),
        Some(Value::String(s)) => s.split(',').map(|part| part.trim().to_string()).collect(),
        Some(Value::Array(items)) => items.iter().map(|item| text_field(Some(item))).collect(),
        Some(scalar) => vec![text_field(Some(scalar))],
    };

    let mut skills: Vec<String> = Vec::with_capacity(raw.len());
    for skill in raw {
        if !skill.is_empty() && !skills.iter().any(|s| s.eq_ignore_ascii_case(&skill)) {
            skills.push(skill);
        }
    }
    skills
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
