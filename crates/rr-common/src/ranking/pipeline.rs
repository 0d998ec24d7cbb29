use tracing::debug;

use super::rule::rule_score;
use crate::embedding::{embedder_from_env, similarity_percent, EmbeddingSource, TextEmbedder};
use crate::error::RankingError;
use crate::store::ApplicationStore;
use crate::{Application, CandidateScore, JobFilter, RankedCandidate};

/// Fixed blend weights; `final_score` is always derivable from the two
/// component scores through these alone.
pub const RULE_WEIGHT: f64 = 0.5;
pub const SEMANTIC_WEIGHT: f64 = 0.5;

/// One scored application, before flattening into the report shape.
#[derive(Debug, Clone)]
pub struct ScoredApplication {
    pub application: Application,
    pub score: CandidateScore,
}

/// Orchestrates one ranking run: fetch, score both ways, blend, sort, cap.
pub struct RankingEngine {
    embedder: Box<dyn TextEmbedder>,
}

impl RankingEngine {
    pub fn new(embedder: Box<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    /// Embedder selected via `RR_EMBEDDER` / `RR_EMBED_DIMENSION`.
    pub fn from_env() -> Self {
        Self::new(embedder_from_env())
    }

    /// Ranked shortlist for a job, flattened to the report contract
    /// (rank 1..N = list order). Zero applications yield an empty list.
    pub fn rank_resumes(
        &self,
        store: &dyn ApplicationStore,
        job_id: i64,
        filter: &JobFilter,
    ) -> Result<Vec<RankedCandidate>, RankingError> {
        let scored = self.rank_applications(store, job_id, filter)?;
        Ok(scored
            .into_iter()
            .map(|s| RankedCandidate {
                candidate_id: s.application.candidate_id,
                candidate_name: s.application.candidate_name,
                email: s.application.email,
                phone: s.application.phone,
                resume_file_name: s.application.resume_file_name,
                applied_at: s.application.applied_at,
                final_score: s.score.final_score,
                explanation: s.score.explanation.join("\n"),
            })
            .collect())
    }

    /// Same run with the component scores still attached.
    pub fn rank_applications(
        &self,
        store: &dyn ApplicationStore,
        job_id: i64,
        filter: &JobFilter,
    ) -> Result<Vec<ScoredApplication>, RankingError> {
        let applications = store.fetch_applications_for_job(job_id)?;
        if applications.is_empty() {
            return Ok(Vec::new());
        }

        // Job embedding computed once and reused across all candidates.
        let job_text = job_text(filter);
        let job_embedding = self.embedder.embed(&job_text, EmbeddingSource::Job);

        let mut scored = Vec::with_capacity(applications.len());
        for application in applications {
            let resume = &application.structured_resume;

            // Participation gate, not a scoring branch: no text, no rank.
            if !resume.has_text() {
                debug!(
                    candidate_id = application.candidate_id,
                    "résumé text empty; excluded from ranking"
                );
                continue;
            }

            let rule = rule_score(resume, filter);

            let resume_embedding = self
                .embedder
                .embed(&resume.raw_text, EmbeddingSource::Resume);
            let cosine = self.embedder.similarity(&job_embedding, &resume_embedding);
            let semantic = similarity_percent(cosine);

            let final_score =
                (RULE_WEIGHT * rule.score + SEMANTIC_WEIGHT * semantic).round() as i64;

            let mut explanation = rule.explanation;
            explanation.push(format!(
                "semantic similarity to job description: {semantic:.2}%"
            ));

            scored.push(ScoredApplication {
                application,
                score: CandidateScore {
                    rule_score: rule.score,
                    semantic_score: semantic,
                    final_score,
                    explanation,
                },
            });
        }

        // Stable sort: candidates with equal scores keep application order.
        scored.sort_by(|a, b| b.score.final_score.cmp(&a.score.final_score));
        scored.truncate(filter.shortlist_size.max(1));

        Ok(scored)
    }
}

/// Prefer the recruiter's description; otherwise synthesize job text from the
/// filter lists so the semantic scorer always has non-empty input.
fn job_text(filter: &JobFilter) -> String {
    if !filter.job_description.trim().is_empty() {
        return filter.job_description.clone();
    }

    filter
        .required_skills
        .iter()
        .chain(filter.certifications.iter())
        .chain(filter.project_domains.iter())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}
