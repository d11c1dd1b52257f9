//! Byte sink and source for configuration documents.
//!
//! This module handles:
//! - Writing export documents, atomically when the target is a file
//! - Reading import documents
//! - End-to-end export and import against store implementations

mod atomic;
mod load;
mod save;

pub(crate) use atomic::{WriteFailure, write_atomic};
pub use load::{import_file, import_reader, read_document_bytes};
pub use save::{export_stores, export_to_path, export_to_writer};
