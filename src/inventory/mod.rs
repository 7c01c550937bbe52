//! Closure inventories
//!
//! An inventory maps package names to the raw `(version, selected)` entries
//! found in one build result's closure. Inventories are built once, written
//! as JSON, and consumed read-only by the differ.
//!
//! # Modules
//!
//! - [`builder`]: closure traversal and name/version resolution
//! - [`types`]: the persisted inventory document
//! - [`error`]: inventory I/O errors

pub mod builder;
pub mod error;
pub mod types;

pub use types::{Inventory, VersionEntry};
