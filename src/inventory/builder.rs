//! Inventory construction from a build result's closure

use std::collections::{BTreeSet, HashMap, HashSet};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::meta_worker_count;
use crate::inventory::types::{Inventory, VersionEntry};
use crate::store::error::StoreError;
use crate::store::path::parse_name_version;
use crate::store::query::{DerivationMeta, StoreQuery};

/// Build the inventory for `result_path`.
///
/// Queries the full closure and the direct-reference subset, then resolves a
/// `(name, version)` per closure entry: the deriver's metadata when it
/// carries a `pname`, the store-path naming convention otherwise. Entries
/// without a resolvable name are kept separately in input order.
pub async fn build<S: StoreQuery>(store: &S, result_path: &str) -> Result<Inventory, StoreError> {
    let closure = store.closure(result_path).await?;
    let selected: HashSet<String> = store.references(result_path).await?.into_iter().collect();
    debug!(
        "Closure of {result_path} has {} entries, {} selected",
        closure.len(),
        selected.len()
    );

    let mut derivers = store.derivers(&closure).await?;
    if derivers.len() != closure.len() {
        // A degraded deriver query cannot be aligned with the closure, so
        // every entry falls back to the path pattern.
        warn!(
            "Deriver query returned {} lines for {} paths; ignoring derivers",
            derivers.len(),
            closure.len()
        );
        derivers = vec![None; closure.len()];
    }
    let meta = fetch_derivation_meta(store, &derivers).await?;

    let mut inventory = Inventory::default();
    for (store_path, deriver) in closure.iter().zip(&derivers) {
        let (name, version) = resolve_name_version(store_path, deriver.as_deref(), &meta);
        if name.is_empty() {
            inventory.derivations_without_pname.push(store_path.clone());
            continue;
        }
        inventory.packages.entry(name).or_default().push(VersionEntry {
            version,
            selected: selected.contains(store_path),
        });
    }
    info!(
        "Inventoried {} packages and {} entries without a name",
        inventory.packages.len(),
        inventory.derivations_without_pname.len()
    );
    Ok(inventory)
}

/// Fetch metadata for every unique deriver, fanning the lookups out over a
/// bounded set of concurrent subprocess calls. Completion order is
/// arbitrary, so results are re-sorted by derivation path before use.
async fn fetch_derivation_meta<S: StoreQuery>(
    store: &S,
    derivers: &[Option<String>],
) -> Result<HashMap<String, DerivationMeta>, StoreError> {
    let unique: BTreeSet<&String> = derivers.iter().flatten().collect();
    if unique.is_empty() {
        return Ok(HashMap::new());
    }
    let workers = meta_worker_count();
    debug!(
        "Fetching metadata for {} derivations across {workers} workers",
        unique.len()
    );

    let mut results: Vec<(String, DerivationMeta)> = stream::iter(unique)
        .map(|drv| async move {
            let meta = store.derivation_meta(drv).await?;
            Ok::<_, StoreError>((drv.clone(), meta))
        })
        .buffer_unordered(workers)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<_, _>>()?;
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results.into_iter().collect())
}

/// Resolve `(name, version)` for one closure entry.
///
/// Metadata wins when it carries a `pname`; a missing metadata version falls
/// back to the version parsed from the store path. Entries without usable
/// metadata fall back to the path pattern entirely.
fn resolve_name_version(
    store_path: &str,
    deriver: Option<&str>,
    meta: &HashMap<String, DerivationMeta>,
) -> (String, String) {
    let (path_name, path_version) = parse_name_version(store_path).unwrap_or_default();
    if let Some(found) = deriver.and_then(|drv| meta.get(drv)) {
        if !found.pname.is_empty() {
            let version = if found.version.is_empty() {
                path_version
            } else {
                found.version.clone()
            };
            return (found.pname.clone(), version);
        }
    }
    (path_name, path_version)
}
