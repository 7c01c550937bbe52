//! Version parsing and ordering
//!
//! Packages in a closure carry free-form version strings, so ordering is
//! chunk-based rather than semver-based. See [`compare::Version`] for the
//! exact rules.

pub mod compare;

pub use compare::Version;
