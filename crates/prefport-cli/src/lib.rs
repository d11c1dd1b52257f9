//! CLI library components for prefport.

pub mod commands;
pub mod logging;
pub mod settings;
pub mod summary;
