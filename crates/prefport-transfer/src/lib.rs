//! Export and import of the application's configuration.
//!
//! This crate turns the contents of the preference store and the prompt
//! store into a single JSON document, and replaces both stores from such a
//! document.
//!
//! # Features
//!
//! - **Typed values** carried as `{type, value}` envelopes so imports restore
//!   the exact preference type
//! - **Secret redaction** of credential keys unless the caller opts in
//! - **Atomic writes** so a failed export never leaves a partial file
//! - **All-or-nothing import** with snapshot and rollback across both stores
//!
//! # File Format
//!
//! ```text
//! {
//!   "version": 1,
//!   "appId": "net.devemperor.asr",
//!   "exportedAt": 1700000000000,
//!   "includeSecrets": false,
//!   "preferences": { "<key>": { "type": "boolean", "value": true } },
//!   "prompts": [ { "name": "...", "prompt": "...",
//!                  "requiresSelection": false, "autoApply": false } ]
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use prefport_transfer::{JsonPreferenceFile, JsonPromptFile, export_stores, import_file};
//!
//! let mut prefs = JsonPreferenceFile::new("prefs.json");
//! let mut prompts = JsonPromptFile::new("prompts.json");
//!
//! export_stores(&prefs, &prompts, false, Path::new("backup.json"))?;
//! let report = import_file(&mut prefs, &mut prompts, Path::new("backup.json"))?;
//! ```
//!
//! # Architecture
//!
//! - `codec.rs` - Typed value envelopes
//! - `sensitivity.rs` - Credential key classification
//! - `export.rs` - Document assembly and redaction
//! - `document.rs` - Wire layout and serialization
//! - `import/` - Parsing and the snapshot/replace/rollback transaction
//! - `store/` - Store ports plus memory and file-backed implementations
//! - `io/` - File and stream entry points
//! - `error.rs` - Error types with user-friendly messages

mod codec;
mod document;
mod error;
mod export;
mod import;
mod io;
mod sensitivity;
mod store;

pub use codec::{Envelope, TYPE_FIELD, VALUE_FIELD, decode, encode};
pub use document::to_json_bytes;
pub use error::{DecodeError, Result, StoreError, TransferError};
pub use export::{DocumentBuilder, ExportReport, build_document};
pub use import::{
    ImportPhase, ImportReport, Snapshot, import_document, parse_document, validate_bytes,
};
pub use io::{
    export_stores, export_to_path, export_to_writer, import_file, import_reader,
    read_document_bytes,
};
pub use sensitivity::{API_KEY_MARKER, SENSITIVE_KEYS, is_sensitive};
pub use store::{
    JsonPreferenceFile, JsonPromptFile, MemoryPreferenceStore, MemoryPromptStore,
    PreferenceStore, PromptStore,
};
