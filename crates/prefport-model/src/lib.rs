//! Data model for configuration snapshots.
//!
//! A snapshot bundles two independently owned stores:
//!
//! - the **preference store**, a key to [`TypedValue`] mapping
//! - the **prompt list**, an ordered sequence of [`PromptRecord`]s
//!
//! [`ConfigDocument`] is the exchange shape used by both export and import.
//! This crate has no I/O; encoding to JSON lives in `prefport-transfer`.

mod document;
mod prompt;
mod value;

pub use document::{APP_ID, ConfigDocument, SCHEMA_VERSION};
pub use prompt::{PromptList, PromptRecord, UNASSIGNED_PROMPT_ID};
pub use value::{PreferenceMap, TypedValue, ValueKind};
