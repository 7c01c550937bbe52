//! Diff computation and rendering
//!
//! The differ loads two inventories, classifies every package name into one
//! of four change categories, and hands one diff structure to whichever
//! renderer the caller picked.
//!
//! # Modules
//!
//! - [`compute`]: grouping and change classification
//! - [`types`]: diff categories and the persisted diff document
//! - [`render`]: renderer trait and shared formatting helpers
//! - [`renderers`]: terminal and Markdown renderers

pub mod compute;
pub mod render;
pub mod renderers;
pub mod types;

pub use compute::diff_inventories;
pub use types::PackageDiff;
