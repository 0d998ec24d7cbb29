/// Raw cosine similarity in [-1, 1]. Zero-norm or mismatched vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "vector length mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Scale a raw cosine to the 0-100 range the blend consumes. Negative cosine
/// clamps to 0 so the blended final score stays within [0, 100].
pub fn similarity_percent(cosine: f32) -> f64 {
    f64::from(cosine.max(0.0)) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn opposite_vectors_score_negative_raw_but_zero_percent() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];

        let cos = cosine_similarity(&a, &b);
        assert!((cos + 1.0).abs() < f32::EPSILON);
        assert_eq!(similarity_percent(cos), 0.0);
    }

    #[test]
    fn zero_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn percent_scales_into_range() {
        assert_eq!(similarity_percent(1.0), 100.0);
        assert_eq!(similarity_percent(0.5), 50.0);
    }
}
