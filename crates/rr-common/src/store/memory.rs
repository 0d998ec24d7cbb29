use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use super::{ApplicationStore, ApplyOutcome, StoreError};
use crate::{Application, StructuredResume};

#[derive(Debug, Clone)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
struct ResumeRecord {
    file_name: String,
    /// Stored as JSON, the shape the external database persists. Decoded on
    /// fetch so malformed payloads are caught at the boundary.
    payload: Value,
}

#[derive(Debug, Clone)]
struct ApplicationRecord {
    candidate_id: i64,
    job_id: i64,
    applied_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    jobs: Vec<i64>,
    candidates: HashMap<i64, CandidateRecord>,
    resumes: HashMap<i64, ResumeRecord>,
    applications: Vec<ApplicationRecord>,
}

/// In-memory `ApplicationStore`, used by tests and the CLI. Mirrors the
/// relational layout (candidates, resumes, applications) without a driver.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_job(&self, job_id: i64) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if !inner.jobs.contains(&job_id) {
            inner.jobs.push(job_id);
        }
    }

    pub fn add_candidate(&self, candidate_id: i64, record: CandidateRecord) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.candidates.insert(candidate_id, record);
    }

    /// Store a raw JSON payload for a candidate's résumé. Exists so tests can
    /// seed malformed shapes and exercise boundary validation.
    pub fn store_resume_payload(&self, candidate_id: i64, file_name: &str, payload: Value) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.resumes.insert(
            candidate_id,
            ResumeRecord {
                file_name: file_name.to_string(),
                payload,
            },
        );
    }

    pub fn apply_at(
        &self,
        candidate_id: i64,
        job_id: i64,
        applied_at: DateTime<Utc>,
    ) -> Result<ApplyOutcome, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        if !inner.jobs.contains(&job_id) {
            return Ok(ApplyOutcome::JobNotFound);
        }
        if !inner.resumes.contains_key(&candidate_id) {
            return Ok(ApplyOutcome::NoResumeOnFile);
        }
        if inner
            .applications
            .iter()
            .any(|a| a.candidate_id == candidate_id && a.job_id == job_id)
        {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        inner.applications.push(ApplicationRecord {
            candidate_id,
            job_id,
            applied_at,
        });
        Ok(ApplyOutcome::Applied)
    }
}

impl ApplicationStore for MemoryStore {
    fn fetch_applications_for_job(&self, job_id: i64) -> Result<Vec<Application>, StoreError> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());

        let mut rows: Vec<&ApplicationRecord> = inner
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .collect();
        rows.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));

        let mut applications = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(candidate) = inner.candidates.get(&row.candidate_id) else {
                warn!(candidate_id = row.candidate_id, "application without candidate record; skipping");
                continue;
            };
            let Some(resume) = inner.resumes.get(&row.candidate_id) else {
                warn!(candidate_id = row.candidate_id, "application without résumé record; skipping");
                continue;
            };

            // Boundary validation: malformed structured payloads are logged
            // and excluded; the batch continues.
            let structured: StructuredResume =
                match serde_json::from_value(resume.payload.clone()) {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        warn!(
                            candidate_id = row.candidate_id,
                            error = %err,
                            "invalid structured résumé payload; excluding candidate"
                        );
                        continue;
                    }
                };

            applications.push(Application {
                candidate_id: row.candidate_id,
                candidate_name: candidate.name.clone(),
                email: candidate.email.clone(),
                phone: candidate.phone.clone(),
                resume_file_name: resume.file_name.clone(),
                structured_resume: structured,
                applied_at: row.applied_at,
            });
        }

        Ok(applications)
    }

    fn apply_to_job(&self, candidate_id: i64, job_id: i64) -> Result<ApplyOutcome, StoreError> {
        self.apply_at(candidate_id, job_id, Utc::now())
    }

    fn store_resume(
        &self,
        candidate_id: i64,
        file_name: &str,
        resume: &StructuredResume,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_value(resume)
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        self.store_resume_payload(candidate_id, file_name, payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_job(1);
        store.add_candidate(
            10,
            CandidateRecord {
                name: "Asha Rao".into(),
                email: "asha@example.com".into(),
                phone: "555-0100".into(),
            },
        );
        store
    }

    #[test]
    fn apply_outcomes_are_values_not_errors() {
        let store = seeded_store();

        assert_eq!(store.apply_to_job(10, 99).unwrap(), ApplyOutcome::JobNotFound);
        assert_eq!(store.apply_to_job(10, 1).unwrap(), ApplyOutcome::NoResumeOnFile);

        store
            .store_resume(10, "asha.pdf", &StructuredResume::default())
            .unwrap();
        assert_eq!(store.apply_to_job(10, 1).unwrap(), ApplyOutcome::Applied);
        assert_eq!(store.apply_to_job(10, 1).unwrap(), ApplyOutcome::AlreadyApplied);
    }

    #[test]
    fn fetch_orders_newest_first() {
        let store = seeded_store();
        store.add_candidate(
            11,
            CandidateRecord {
                name: "Ben Cole".into(),
                email: "ben@example.com".into(),
                phone: "555-0101".into(),
            },
        );
        store
            .store_resume(10, "asha.pdf", &StructuredResume::default())
            .unwrap();
        store
            .store_resume(11, "ben.pdf", &StructuredResume::default())
            .unwrap();

        let earlier = Utc::now() - chrono::Duration::hours(2);
        store.apply_at(10, 1, earlier).unwrap();
        store.apply_at(11, 1, Utc::now()).unwrap();

        let apps = store.fetch_applications_for_job(1).unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].candidate_id, 11);
        assert_eq!(apps[1].candidate_id, 10);
    }

    #[test]
    fn malformed_payload_is_excluded_not_fatal() {
        let store = seeded_store();
        store.add_candidate(
            11,
            CandidateRecord {
                name: "Ben Cole".into(),
                email: "ben@example.com".into(),
                phone: "555-0101".into(),
            },
        );
        store.store_resume_payload(10, "asha.pdf", json!({"raw_text": 42}));
        store
            .store_resume(11, "ben.pdf", &StructuredResume::default())
            .unwrap();
        store.apply_to_job(10, 1).unwrap();
        store.apply_to_job(11, 1).unwrap();

        let apps = store.fetch_applications_for_job(1).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].candidate_id, 11);
    }

    #[test]
    fn fetch_for_unknown_job_is_empty() {
        let store = seeded_store();
        assert!(store.fetch_applications_for_job(42).unwrap().is_empty());
    }
}
