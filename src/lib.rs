//! Inventory and diff the package closures of build results.
//!
//! Two pipelines share a version comparator:
//!
//! 1. The inventory builder queries the external store tool for a build
//!    result's closure and direct references, resolves a package
//!    name/version per store entry, and writes the result as JSON.
//! 2. The differ loads two inventories, classifies every package as added,
//!    removed, changed, or selection-changed, and renders the result for a
//!    terminal or a GitHub comment, alongside a structured JSON document.
//!
//! The store itself is an external collaborator; this crate only observes
//! already-built closures through the store tool's CLI contract.

pub mod config;
pub mod diff;
pub mod inventory;
pub mod store;
pub mod version;
