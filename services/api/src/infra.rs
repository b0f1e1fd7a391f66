use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use talent_match::access::Role;
use talent_match::error::AppError;
use talent_match::workflows::recruitment::{
    start_of_day, ApplicationId, CandidateApplication, JobId, JobPosting,
    RecruitmentRepository, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Jobs and applications loaded at startup or by the `rank` command.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SeedData {
    #[serde(default)]
    pub(crate) jobs: Vec<JobPosting>,
    #[serde(default)]
    pub(crate) applications: Vec<CandidateApplication>,
}

impl SeedData {
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRecruitmentRepository {
    jobs: Arc<RwLock<BTreeMap<JobId, JobPosting>>>,
    applications: Arc<RwLock<Vec<CandidateApplication>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
}

impl InMemoryRecruitmentRepository {
    pub(crate) fn seeded(seed: SeedData) -> Self {
        let jobs = seed
            .jobs
            .into_iter()
            .map(|job| (job.id.clone(), job))
            .collect();
        Self {
            jobs: Arc::new(RwLock::new(jobs)),
            applications: Arc::new(RwLock::new(seed.applications)),
        }
    }

    pub(crate) fn counts(&self) -> Result<(usize, usize), RepositoryError> {
        let jobs = self.jobs.read().map_err(poisoned)?.len();
        let applications = self.applications.read().map_err(poisoned)?.len();
        Ok((jobs, applications))
    }
}

impl RecruitmentRepository for InMemoryRecruitmentRepository {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.jobs.read().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn applications_for_job(
        &self,
        id: &JobId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        let guard = self.applications.read().map_err(poisoned)?;
        Ok(guard
            .iter()
            .filter(|application| &application.job_id == id)
            .cloned()
            .collect())
    }

    fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<CandidateApplication>, RepositoryError> {
        let guard = self.applications.read().map_err(poisoned)?;
        Ok(guard.iter().find(|application| &application.id == id).cloned())
    }

    fn update_application(&self, record: CandidateApplication) -> Result<(), RepositoryError> {
        let mut guard = self.applications.write().map_err(poisoned)?;
        match guard.iter_mut().find(|application| application.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|err| err.to_string())
}

/// Midnight UTC of the given day, or the current instant.
pub(crate) fn reference_instant(as_of: Option<NaiveDate>) -> DateTime<Utc> {
    as_of
        .map(start_of_day)
        .unwrap_or_else(Utc::now)
}
