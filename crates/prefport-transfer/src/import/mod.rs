//! Import: strict parsing followed by a transactional replace.
//!
//! - `parse` turns bytes into a fully decoded [`ConfigDocument`] or one error
//! - `transaction` snapshots both stores, replaces them, and rolls back on failure
//!
//! [`ConfigDocument`]: prefport_model::ConfigDocument

mod parse;
mod transaction;

pub use parse::{parse_document, validate_bytes};
pub use transaction::{ImportPhase, ImportReport, Snapshot, import_document};
