//! Document parsing and validation.
//!
//! Parsing is all-or-nothing: the first bad field rejects the document.

use prefport_model::{
    APP_ID, ConfigDocument, PreferenceMap, PromptList, PromptRecord, SCHEMA_VERSION,
};
use serde_json::{Map, Value};

use crate::codec;
use crate::document::{
    FIELD_APP_ID, FIELD_EXPORTED_AT, FIELD_INCLUDE_SECRETS, FIELD_PREFERENCES, FIELD_PROMPTS,
    FIELD_VERSION, PROMPT_AUTO_APPLY, PROMPT_BODY, PROMPT_NAME, PROMPT_REQUIRES_SELECTION,
};
use crate::error::{Result, TransferError};

/// Parse and validate a document.
pub fn parse_document(bytes: &[u8]) -> Result<ConfigDocument> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|source| TransferError::Malformed { source })?;
    let root = root.as_object().ok_or(TransferError::NotAnObject)?;

    check_metadata(root)?;

    let preferences = root
        .get(FIELD_PREFERENCES)
        .and_then(Value::as_object)
        .ok_or(TransferError::MissingSection {
            section: FIELD_PREFERENCES,
        })?;
    let prompts = root
        .get(FIELD_PROMPTS)
        .and_then(Value::as_array)
        .ok_or(TransferError::MissingSection {
            section: FIELD_PROMPTS,
        })?;

    let preferences = parse_preferences(preferences)?;
    let prompts = parse_prompts(prompts)?;

    Ok(ConfigDocument {
        version: SCHEMA_VERSION,
        app_id: APP_ID.to_string(),
        exported_at_ms: root
            .get(FIELD_EXPORTED_AT)
            .and_then(Value::as_i64)
            .unwrap_or_default(),
        include_secrets: root
            .get(FIELD_INCLUDE_SECRETS)
            .and_then(Value::as_bool)
            .unwrap_or_default(),
        preferences,
        prompts,
    })
}

/// Check that `bytes` would import cleanly, without touching any store.
pub fn validate_bytes(bytes: &[u8]) -> Result<ConfigDocument> {
    parse_document(bytes)
}

fn check_metadata(root: &Map<String, Value>) -> Result<()> {
    let version = root.get(FIELD_VERSION).and_then(Value::as_i64);
    let app_id = root.get(FIELD_APP_ID).and_then(Value::as_str);

    if version == Some(i64::from(SCHEMA_VERSION)) && app_id == Some(APP_ID) {
        return Ok(());
    }
    Err(TransferError::MetadataMismatch {
        found_version: version,
        found_app_id: app_id.map(str::to_string),
    })
}

fn parse_preferences(section: &Map<String, Value>) -> Result<PreferenceMap> {
    section
        .iter()
        .map(|(key, envelope)| {
            codec::decode(envelope)
                .map(|value| (key.clone(), value))
                .map_err(|source| TransferError::InvalidPreference {
                    key: key.clone(),
                    source,
                })
        })
        .collect()
}

/// Imported prompts are always new records: identifiers reset to unassigned,
/// positions follow array order.
fn parse_prompts(section: &[Value]) -> Result<PromptList> {
    section
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_prompt(index, entry))
        .collect()
}

fn parse_prompt(index: usize, entry: &Value) -> Result<PromptRecord> {
    let invalid = |reason| TransferError::InvalidPrompt { index, reason };
    let object = entry.as_object().ok_or_else(|| invalid("not an object"))?;

    let name = required_text(object, PROMPT_NAME).map_err(invalid)?;
    let prompt = required_text(object, PROMPT_BODY).map_err(invalid)?;
    let requires_selection = optional_flag(object, PROMPT_REQUIRES_SELECTION).map_err(invalid)?;
    let auto_apply = optional_flag(object, PROMPT_AUTO_APPLY).map_err(invalid)?;

    Ok(PromptRecord::new_unassigned(
        name,
        prompt,
        requires_selection,
        auto_apply,
    ))
}

/// Absent and empty are both rejected.
fn required_text(
    object: &Map<String, Value>,
    field: &'static str,
) -> std::result::Result<String, &'static str> {
    match object.get(field) {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(match field {
            PROMPT_NAME => "name is empty",
            _ => "prompt is empty",
        }),
        Some(_) => Err(match field {
            PROMPT_NAME => "name is not a string",
            _ => "prompt is not a string",
        }),
    }
}

/// Absent or null means `false`.
fn optional_flag(
    object: &Map<String, Value>,
    field: &'static str,
) -> std::result::Result<bool, &'static str> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(match field {
            PROMPT_REQUIRES_SELECTION => "requiresSelection is not a boolean",
            _ => "autoApply is not a boolean",
        }),
    }
}
