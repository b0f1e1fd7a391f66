//! Candidate ranking for job postings and the service surface around it.
//!
//! Scoring is recomputed from job and application data on every call; cached scores on
//! stored applications are a convenience for listings, never the source of truth.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    parse_instant, start_of_day, ApplicationId, ApplicationProfile, ApplicationStatus,
    CandidateApplication, ExperienceLevel, JobId, JobPosting, JobRequirement,
};
pub use repository::{RecruitmentRepository, RepositoryError};
pub use router::{recruitment_router, ACTOR_ROLE_HEADER};
pub use scoring::{
    compute_auto_score, final_top_n, rank_candidates, CandidateRanking, ScoreBreakdown,
    ScoringConfig, ScoringConfigError, ScoringEngine, ValidationError, DEFAULT_FINALIST_COUNT,
    DEFAULT_RANKING_LIMIT,
};
pub use service::{RecruitmentService, RecruitmentServiceError};
