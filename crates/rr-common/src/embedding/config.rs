#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Embedding dimension (powers of two recommended: 256, 512, 1024).
    pub dimension: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self { dimension: 256 }
    }
}

impl EmbedderConfig {
    pub fn from_env() -> Self {
        Self {
            dimension: std::env::var("RR_EMBED_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(256),
        }
    }
}
