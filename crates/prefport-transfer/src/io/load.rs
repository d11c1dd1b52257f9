//! Import operations.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, TransferError};
use crate::import::{ImportReport, import_document};
use crate::store::{PreferenceStore, PromptStore};

/// Read a complete document from `path`.
pub fn read_document_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| TransferError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read `path` and import it into both stores.
///
/// A read failure happens before the snapshot and leaves both stores alone.
pub fn import_file<P, Q>(preferences: &mut P, prompts: &mut Q, path: &Path) -> Result<ImportReport>
where
    P: PreferenceStore + ?Sized,
    Q: PromptStore + ?Sized,
{
    let bytes = read_document_bytes(path)?;
    import_document(preferences, prompts, &bytes)
}

/// Drain `reader` and import the bytes into both stores.
pub fn import_reader<R, P, Q>(
    mut reader: R,
    preferences: &mut P,
    prompts: &mut Q,
) -> Result<ImportReport>
where
    R: Read,
    P: PreferenceStore + ?Sized,
    Q: PromptStore + ?Sized,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| TransferError::Io {
            operation: "read",
            path: "<reader>".into(),
            source: e,
        })?;
    import_document(preferences, prompts, &bytes)
}
