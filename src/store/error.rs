use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
}
