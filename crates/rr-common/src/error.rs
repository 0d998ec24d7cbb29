use crate::store::StoreError;

/// Hard failures of a ranking call. Per-candidate problems (blank text,
/// malformed stored data) are handled inside the batch and never surface
/// here; a ranking call either returns a complete list or fails atomically.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("embedder unavailable: {0}")]
    Embedder(String),
}
