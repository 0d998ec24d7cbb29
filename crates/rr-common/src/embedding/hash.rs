use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::{Embedding, EmbedderConfig, EmbeddingSource, TextEmbedder};
use crate::text::tokenize_words;

/// Fixed seeds for deterministic hashing.
/// Changing either value changes every embedding; bump `version()` with it.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

const UNIGRAM_WEIGHT: f32 = 1.0;
const BIGRAM_WEIGHT: f32 = 0.5;

/// Feature-hashing text embedder.
///
/// - no training, no model files (fixed hash function)
/// - O(n) in token count
/// - SipHash13 with fixed seeds keeps vectors stable across Rust versions,
///   which is what makes repeated ranking runs reproducible
pub struct HashEmbedder {
    config: EmbedderConfig,
}

impl HashEmbedder {
    pub fn new(config: EmbedderConfig) -> Self {
        let mut cfg = config;
        cfg.dimension = cfg.dimension.max(1);
        Self { config: cfg }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.config.dimension
    }

    /// Word unigrams plus adjacent bigrams, so local phrase structure
    /// ("machine learning") contributes beyond the bag of words.
    fn weighted_tokens(text: &str) -> Vec<(String, f32)> {
        let words = tokenize_words(text);
        let mut tokens: Vec<(String, f32)> = words
            .iter()
            .map(|w| (w.clone(), UNIGRAM_WEIGHT))
            .collect();
        tokens.extend(
            words
                .windows(2)
                .map(|pair| (format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT)),
        );
        tokens
    }
}

impl TextEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn embed(&self, text: &str, source: EmbeddingSource) -> Embedding {
        let mut vector = vec![0.0f32; self.config.dimension];

        for (token, weight) in Self::weighted_tokens(text) {
            let idx = self.hash_token(&token);
            // Sign hashing: even hash -> +weight, odd hash -> -weight.
            let sign = if self.hash_token(&format!("{token}_sign")) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign * weight;
        }

        // L2 normalization
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Embedding {
            vector,
            source,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_unit_vectors() {
        let embedder = HashEmbedder::new(EmbedderConfig::default());
        let emb = embedder.embed("python sql developer", EmbeddingSource::Resume);

        let norm: f32 = emb.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "L2 norm should be 1.0, got {norm}");
    }

    #[test]
    fn embedding_is_deterministic() {
        let embedder = HashEmbedder::new(EmbedderConfig::default());

        let a = embedder.embed("machine learning engineer", EmbeddingSource::Job);
        let b = embedder.embed("machine learning engineer", EmbeddingSource::Job);

        assert_eq!(a.vector, b.vector);
    }

    #[test]
    fn overlapping_texts_are_more_similar() {
        let embedder = HashEmbedder::new(EmbedderConfig::default());

        let job = embedder.embed(
            "python sql data pipelines cloud deployment",
            EmbeddingSource::Job,
        );
        let close = embedder.embed(
            "python developer with sql and cloud experience",
            EmbeddingSource::Resume,
        );
        let far = embedder.embed(
            "oil painting watercolor portrait gallery",
            EmbeddingSource::Resume,
        );

        let close_score = embedder.similarity(&job, &close);
        let far_score = embedder.similarity(&job, &far);

        assert!(
            close_score > far_score,
            "overlapping text should score higher: {close_score} vs {far_score}"
        );
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let embedder = HashEmbedder::new(EmbedderConfig::default());
        let emb = embedder.embed("   ", EmbeddingSource::Resume);

        assert!(emb.vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn dimension_floor_is_one() {
        let embedder = HashEmbedder::new(EmbedderConfig { dimension: 0 });
        assert_eq!(embedder.dimension(), 1);
    }
}
