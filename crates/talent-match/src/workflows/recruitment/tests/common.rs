use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::config::RankingSettings;
use crate::workflows::recruitment::domain::{
    start_of_day, ApplicationId, ApplicationProfile, CandidateApplication, JobId, JobPosting, JobRequirement,
};
use crate::workflows::recruitment::repository::{RecruitmentRepository, RepositoryError};
use crate::workflows::recruitment::{recruitment_router, RecruitmentService, ScoringEngine};

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn job() -> JobPosting {
    JobPosting {
        id: JobId("job-backend".to_string()),
        title: "Développeur backend".to_string(),
        requirement: JobRequirement {
            experience_level: Some("Intermédiaire".to_string()),
            skills: vec![
                "Rust".to_string(),
                "PostgreSQL".to_string(),
                "Docker".to_string(),
            ],
            salary: Some("40k - 55k €".to_string()),
        },
    }
}

pub(super) fn application(id: &str, skills: &[&str], manual_score: Option<u8>) -> CandidateApplication {
    CandidateApplication {
        id: ApplicationId(id.to_string()),
        job_id: job().id,
        candidate_name: Some(format!("Candidate {id}")),
        manual_score,
        profile: ApplicationProfile {
            experience_level: Some("Senior".to_string()),
            skills: skills.iter().map(|skill| skill.to_string()).collect(),
            availability_date: NaiveDate::from_ymd_opt(2026, 11, 2).map(start_of_day),
            salary_expectation: Some("50k".to_string()),
            cover_letter: Some("Je souhaite rejoindre votre équipe. ".repeat(5)),
            cv_path: Some(format!("uploads/cv/{id}.pdf")),
            motivation_letter_path: None,
            phone: Some("+33 6 00 00 00 00".to_string()),
        },
        ..CandidateApplication::default()
    }
}

pub(super) fn seeded_repository() -> Arc<MemoryRepository> {
    let repository = MemoryRepository::default();
    repository.insert_job(job());
    repository.insert_application(application("app-full", &["Rust", "PostgreSQL", "Docker"], None));
    repository.insert_application(application("app-partial", &["rust"], Some(90)));
    repository.insert_application(application("app-none", &["Cobol"], Some(30)));
    Arc::new(repository)
}

pub(super) fn build_service() -> (RecruitmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = seeded_repository();
    let service = RecruitmentService::new(
        repository.clone(),
        ScoringEngine::default(),
        RankingSettings::default(),
    )
    .with_clock(fixed_now);
    (service, repository)
}

pub(super) fn router_with_service(service: RecruitmentService<MemoryRepository>) -> axum::Router {
    recruitment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    jobs: Arc<Mutex<BTreeMap<JobId, JobPosting>>>,
    applications: Arc<Mutex<Vec<CandidateApplication>>>,
}

impl MemoryRepository {
    pub(super) fn insert_job(&self, job: JobPosting) {
        self.jobs
            .lock()
            .expect("repository mutex poisoned")
            .insert(job.id.clone(), job);
    }

    pub(super) fn insert_application(&self, application: CandidateApplication) {
        self.applications
            .lock()
            .expect("repository mutex poisoned")
            .push(application);
    }

    pub(super) fn stored(&self, id: &str) -> CandidateApplication {
        self.applications
            .lock()
            .expect("repository mutex poisoned")
            .iter()
            .find(|application| application.id.0 == id)
            .cloned()
            .expect("application stored")
    }
}

impl RecruitmentRepository for MemoryRepository {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.jobs.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn applications_for_job(
        &self,
        id: &JobId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        let guard = self.applications.lock().expect("repository mutex poisoned");
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
        let guard = self.applications.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|application| &application.id == id).cloned())
    }

    fn update_application(&self, record: CandidateApplication) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|application| application.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

pub(super) struct UnavailableRepository;

impl RecruitmentRepository for UnavailableRepository {
    fn job(&self, _id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn applications_for_job(
        &self,
        _id: &JobId,
    ) -> Result<Vec<CandidateApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<CandidateApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_application(&self, _record: CandidateApplication) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
