pub mod alias;
pub mod embedding;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod ranking;
pub mod store;
pub mod text;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Commonly used data models shared by extraction, scoring, and ranking.

/// Machine-readable representation of one résumé, derived once per upload.
///
/// Always produced, even when extraction finds nothing; absent fields stay
/// empty/default. Replaced wholesale on re-upload, never merged per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StructuredResume {
    /// Full extracted document text, lowercased.
    pub raw_text: String,
    pub name: String,
    pub email: String,
    pub skills: BTreeSet<String>,
    pub soft_skills: BTreeSet<String>,
    pub education: BTreeSet<String>,
    pub certifications: BTreeSet<String>,
    pub project_domains: BTreeSet<String>,
    pub experience_years: u32,
}

impl StructuredResume {
    /// A résumé with no usable text is excluded from ranking entirely,
    /// regardless of what the structured fields contain.
    pub fn has_text(&self) -> bool {
        !self.raw_text.trim().is_empty()
    }
}

/// Filter criteria for one ranking request. Absent fields default to
/// empty/zero and never block scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct JobFilter {
    pub required_skills: Vec<String>,
    pub certifications: Vec<String>,
    pub project_domains: Vec<String>,
    pub education_level: String,
    pub min_experience_years: u32,
    pub job_description: String,
    pub shortlist_size: usize,
}

impl Default for JobFilter {
    fn default() -> Self {
        Self {
            required_skills: Vec::new(),
            certifications: Vec::new(),
            project_domains: Vec::new(),
            education_level: String::new(),
            min_experience_years: 0,
            job_description: String::new(),
            shortlist_size: 5,
        }
    }
}

/// One submitted application, as handed over by the persistence collaborator.
/// The structured payload is validated at that boundary; a malformed record
/// never reaches the scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    pub resume_file_name: String,
    pub structured_resume: StructuredResume,
    pub applied_at: DateTime<Utc>,
}

/// Per-candidate score produced by one ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub rule_score: f64,
    pub semantic_score: f64,
    pub final_score: i64,
    /// Reason lines in evaluation order: skills, certifications, projects,
    /// education, experience, semantic similarity.
    pub explanation: Vec<String>,
}

/// Shortlist entry returned to UI/report collaborators. List order is the
/// rank contract (rank 1..N = list order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    pub resume_file_name: String,
    pub applied_at: DateTime<Utc>,
    pub final_score: i64,
    pub explanation: String,
}
