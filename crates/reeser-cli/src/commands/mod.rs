//! CLI command implementations.

pub mod common;
pub mod note;
pub mod patches;
pub mod render;
pub mod table;
