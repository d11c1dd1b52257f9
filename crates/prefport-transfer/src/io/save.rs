//! Export operations.

use std::io::Write;
use std::path::Path;

use prefport_model::ConfigDocument;
use tracing::info;

use super::atomic::write_atomic;
use crate::document::to_json_bytes;
use crate::error::{Result, TransferError};
use crate::export::{DocumentBuilder, ExportReport};
use crate::store::{PreferenceStore, PromptStore};

/// Write a complete document to `writer` and flush it.
///
/// A failed write leaves no usable document; callers must discard whatever
/// reached the sink.
pub fn export_to_writer<W: Write>(mut writer: W, document: &ConfigDocument) -> Result<()> {
    let bytes = to_json_bytes(document)?;
    let sink = |operation| {
        move |source| TransferError::Sink {
            operation,
            path: None,
            source,
        }
    };
    writer.write_all(&bytes).map_err(sink("write"))?;
    writer.flush().map_err(sink("flush"))?;
    Ok(())
}

/// Write a complete document to `path`.
///
/// Uses atomic write (temp file + rename), so the target either holds the
/// full document or is untouched.
pub fn export_to_path(path: &Path, document: &ConfigDocument) -> Result<()> {
    let bytes = to_json_bytes(document)?;
    write_atomic(path, &bytes).map_err(|failure| TransferError::Sink {
        operation: failure.operation,
        path: Some(failure.path),
        source: failure.source,
    })?;
    info!(
        path = %path.display(),
        preferences = document.preferences.len(),
        prompts = document.prompts.len(),
        include_secrets = document.include_secrets,
        "exported configuration"
    );
    Ok(())
}

/// Read both stores, build a document and write it to `path`.
pub fn export_stores<P, Q>(
    preferences: &P,
    prompts: &Q,
    include_secrets: bool,
    path: &Path,
) -> Result<ExportReport>
where
    P: PreferenceStore + ?Sized,
    Q: PromptStore + ?Sized,
{
    let current_preferences = preferences
        .get_all()
        .map_err(|source| TransferError::StoreRead { source })?;
    let current_prompts = prompts
        .get_all()
        .map_err(|source| TransferError::StoreRead { source })?;

    let (document, report) =
        DocumentBuilder::new(include_secrets).build(&current_preferences, &current_prompts);
    export_to_path(path, &document)?;
    Ok(report)
}
