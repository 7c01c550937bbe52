//! Store query trait for the external store tool

#[cfg(test)]
use mockall::automock;

use crate::store::error::StoreError;

/// Name/version metadata embedded in a derivation's environment.
///
/// Either field may be empty when the derivation does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationMeta {
    pub pname: String,
    pub version: String,
}

/// Trait for querying the build-artifact store
///
/// All operations address the store through store paths. Implementations
/// degrade tool failures to empty results; only a tool that cannot be run at
/// all surfaces as an error.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait StoreQuery: Send + Sync {
    /// Full transitive closure of store paths reachable from `path`
    async fn closure(&self, path: &str) -> Result<Vec<String>, StoreError>;

    /// Store paths directly referenced by `path`
    async fn references(&self, path: &str) -> Result<Vec<String>, StoreError>;

    /// Deriver of each input path, aligned by index.
    ///
    /// `None` stands for the tool's "unknown" sentinel.
    async fn derivers(&self, paths: &[String]) -> Result<Vec<Option<String>>, StoreError>;

    /// `pname`/`version` metadata of one derivation
    async fn derivation_meta(&self, drv_path: &str) -> Result<DerivationMeta, StoreError>;
}
