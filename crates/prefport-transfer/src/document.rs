//! JSON wire form of [`ConfigDocument`].

use std::collections::BTreeMap;

use prefport_model::ConfigDocument;
use serde::Serialize;
use tracing::debug;

use crate::codec::{self, Envelope};
use crate::error::{Result, TransferError};

pub(crate) const FIELD_VERSION: &str = "version";
pub(crate) const FIELD_APP_ID: &str = "appId";
pub(crate) const FIELD_EXPORTED_AT: &str = "exportedAt";
pub(crate) const FIELD_INCLUDE_SECRETS: &str = "includeSecrets";
pub(crate) const FIELD_PREFERENCES: &str = "preferences";
pub(crate) const FIELD_PROMPTS: &str = "prompts";

pub(crate) const PROMPT_NAME: &str = "name";
pub(crate) const PROMPT_BODY: &str = "prompt";
pub(crate) const PROMPT_REQUIRES_SELECTION: &str = "requiresSelection";
pub(crate) const PROMPT_AUTO_APPLY: &str = "autoApply";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentWire<'a> {
    version: u32,
    app_id: &'a str,
    exported_at: i64,
    include_secrets: bool,
    preferences: BTreeMap<&'a str, Envelope>,
    prompts: Vec<PromptWire<'a>>,
}

/// Prompt identifiers and positions are not serialized; array order carries
/// the position.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptWire<'a> {
    name: &'a str,
    prompt: &'a str,
    requires_selection: bool,
    auto_apply: bool,
}

impl<'a> DocumentWire<'a> {
    fn from_document(document: &'a ConfigDocument) -> Self {
        let preferences = document
            .preferences
            .iter()
            .filter_map(|(key, value)| match codec::encode(value) {
                Some(envelope) => Some((key.as_str(), envelope)),
                None => {
                    debug!(key = %key, kind = %value.kind(), "skipping unencodable preference");
                    None
                }
            })
            .collect();

        let prompts = document
            .prompts
            .iter()
            .map(|record| PromptWire {
                name: &record.name,
                prompt: &record.prompt,
                requires_selection: record.requires_selection,
                auto_apply: record.auto_apply,
            })
            .collect();

        Self {
            version: document.version,
            app_id: &document.app_id,
            exported_at: document.exported_at_ms,
            include_secrets: document.include_secrets,
            preferences,
            prompts,
        }
    }
}

/// Serialize a document as pretty-printed (2-space) UTF-8 JSON.
pub fn to_json_bytes(document: &ConfigDocument) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(&DocumentWire::from_document(document))
        .map_err(|source| TransferError::Serialization { source })
}
