//! Store client shelling out to the nix CLI tools

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::store::error::StoreError;
use crate::store::query::{DerivationMeta, StoreQuery};

const NIX_STORE_BIN: &str = "nix-store";
const NIX_BIN: &str = "nix";

/// Sentinel line emitted by the deriver query when no deriver is known
const UNKNOWN_DERIVER: &str = "unknown";

/// Client for the local store.
///
/// Every query is one subprocess invocation. A process that exits non-zero is
/// treated as having produced no output; only a process that cannot be
/// spawned at all is an error.
#[derive(Debug, Default)]
pub struct NixStore;

impl NixStore {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, tool: &'static str, args: &[&str]) -> Result<String, StoreError> {
        debug!("Running {tool} {}", args.join(" "));
        let output = Command::new(tool)
            .args(args)
            .output()
            .await
            .map_err(|source| StoreError::Spawn { tool, source })?;
        if !output.status.success() {
            warn!(
                "{tool} exited with {}; treating its output as empty",
                output.status
            );
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// One derivation document from the structured metadata query, keyed by its
/// derivation path in the surrounding JSON object.
#[derive(Debug, Default, Deserialize)]
struct DerivationDoc {
    #[serde(default)]
    env: DerivationEnv,
}

#[derive(Debug, Default, Deserialize)]
struct DerivationEnv {
    #[serde(default)]
    pname: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

#[async_trait]
impl StoreQuery for NixStore {
    async fn closure(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let output = self
            .run(NIX_STORE_BIN, &["--query", "--requisites", path])
            .await?;
        Ok(lines(&output))
    }

    async fn references(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let output = self
            .run(NIX_STORE_BIN, &["--query", "--references", path])
            .await?;
        Ok(lines(&output))
    }

    async fn derivers(&self, paths: &[String]) -> Result<Vec<Option<String>>, StoreError> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }
        let mut args = vec!["--query", "--deriver"];
        args.extend(paths.iter().map(String::as_str));
        let output = self.run(NIX_STORE_BIN, &args).await?;
        Ok(lines(&output)
            .into_iter()
            .map(|line| {
                if line == UNKNOWN_DERIVER {
                    None
                } else {
                    Some(line)
                }
            })
            .collect())
    }

    async fn derivation_meta(&self, drv_path: &str) -> Result<DerivationMeta, StoreError> {
        let output = self.run(NIX_BIN, &["derivation", "show", drv_path]).await?;
        if output.trim().is_empty() {
            return Ok(DerivationMeta::default());
        }
        let mut docs: HashMap<String, DerivationDoc> = match serde_json::from_str(&output) {
            Ok(docs) => docs,
            Err(err) => {
                warn!("Unparsable derivation metadata for {drv_path}: {err}");
                return Ok(DerivationMeta::default());
            }
        };
        let env = docs.remove(drv_path).map(|doc| doc.env).unwrap_or_default();
        Ok(DerivationMeta {
            pname: env.pname.unwrap_or_default(),
            version: env.version.unwrap_or_default(),
        })
    }
}
