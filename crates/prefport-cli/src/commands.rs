//! Subcommand implementations over file-backed stores.

use std::path::Path;

use anyhow::{Context, Result};
use prefport_model::ConfigDocument;
use prefport_transfer::{
    ExportReport, ImportReport, JsonPreferenceFile, JsonPromptFile, export_stores, import_file,
    read_document_bytes, validate_bytes,
};
use tracing::info_span;

use crate::settings::StorePaths;

/// Export both stores to `output`.
pub fn run_export(
    stores: &StorePaths,
    output: &Path,
    include_secrets: bool,
) -> Result<ExportReport> {
    let _span = info_span!("export", output = %output.display()).entered();
    let preferences = JsonPreferenceFile::new(stores.preferences.clone());
    let prompts = JsonPromptFile::new(stores.prompts.clone());
    export_stores(&preferences, &prompts, include_secrets, output)
        .with_context(|| format!("export to {}", output.display()))
}

/// Replace both stores with the document at `input`.
pub fn run_import(stores: &StorePaths, input: &Path) -> Result<ImportReport> {
    let _span = info_span!("import", input = %input.display()).entered();
    let mut preferences = JsonPreferenceFile::new(stores.preferences.clone());
    let mut prompts = JsonPromptFile::new(stores.prompts.clone());
    import_file(&mut preferences, &mut prompts, input)
        .with_context(|| format!("import from {}", input.display()))
}

/// Parse and validate the document at `input` without touching any store.
pub fn run_inspect(input: &Path) -> Result<ConfigDocument> {
    let bytes = read_document_bytes(input).with_context(|| format!("read {}", input.display()))?;
    validate_bytes(&bytes).with_context(|| format!("validate {}", input.display()))
}
