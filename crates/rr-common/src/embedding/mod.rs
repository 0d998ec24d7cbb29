pub mod config;
pub mod hash;
pub mod similarity;

pub use config::EmbedderConfig;
pub use hash::HashEmbedder;
pub use similarity::{cosine_similarity, similarity_percent};

use tracing::warn;

/// Which side of the match a vector was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmbeddingSource {
    Job,
    Resume,
}

#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub source: EmbeddingSource,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Abstract interface over the fixed, pretrained text-embedding component.
///
/// The model is a swappable collaborator: implementations must be
/// deterministic for identical input (the ranking determinism contract) and
/// perform no training at runtime.
pub trait TextEmbedder: Send + Sync {
    /// Implementation name ("hash", ...), recorded for audit trails.
    fn name(&self) -> &'static str;

    /// Version marker; bump whenever the token design or hashing changes.
    fn version(&self) -> &str;

    fn dimension(&self) -> usize;

    /// Encode one text into a dense vector.
    fn embed(&self, text: &str, source: EmbeddingSource) -> Embedding;

    /// Raw cosine similarity in [-1, 1]; 0.0 on dimension mismatch.
    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        if a.vector.len() != b.vector.len() {
            warn!(
                source_a = ?a.source,
                source_b = ?b.source,
                a_len = a.vector.len(),
                b_len = b.vector.len(),
                "embedding dimension mismatch; returning zero similarity"
            );
            return 0.0;
        }
        cosine_similarity(&a.vector, &b.vector)
    }
}

/// Embedder factory. Unknown names fall back to the deterministic hash
/// implementation rather than failing the ranking call.
pub fn create_embedder(name: &str, config: EmbedderConfig) -> Box<dyn TextEmbedder> {
    match name {
        "hash" => Box::new(HashEmbedder::new(config)),
        other => {
            warn!(embedder = other, "unknown embedder name; falling back to hash");
            Box::new(HashEmbedder::new(config))
        }
    }
}

/// Build the embedder selected by `RR_EMBEDDER` with env-derived config.
pub fn embedder_from_env() -> Box<dyn TextEmbedder> {
    let name = std::env::var("RR_EMBEDDER").unwrap_or_else(|_| "hash".into());
    create_embedder(&name, EmbedderConfig::from_env())
}
