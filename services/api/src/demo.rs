use crate::infra::{
    parse_date, parse_role, reference_instant, InMemoryRecruitmentRepository, SeedData,
};
use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use talent_match::access::{AccessPolicy, Role};
use talent_match::config::RankingSettings;
use talent_match::error::AppError;
use talent_match::workflows::recruitment::{
    start_of_day, ApplicationId, ApplicationProfile, CandidateApplication, CandidateRanking, JobId,
    JobPosting, JobRequirement, RecruitmentService, ScoringEngine, DEFAULT_FINALIST_COUNT,
    DEFAULT_RANKING_LIMIT,
};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding a `job` and its `applications`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Maximum number of candidates to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Only rank applications that already carry a manual score
    #[arg(long)]
    pub(crate) finalists: bool,
    /// Score availability as of this date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RolesArgs {
    /// Restrict the output to a single role
    #[arg(value_parser = parse_role)]
    pub(crate) role: Option<Role>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Role acting during the walkthrough
    #[arg(long, value_parser = parse_role, default_value = "recruiter")]
    pub(crate) actor: Role,
}

#[derive(Debug, Deserialize)]
struct RankInput {
    job: JobPosting,
    #[serde(default)]
    applications: Vec<CandidateApplication>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let input: RankInput = serde_json::from_str(&raw)?;
    let now = reference_instant(args.as_of);
    let engine = ScoringEngine::default();

    let rankings = if args.finalists {
        let count = args.limit.unwrap_or(DEFAULT_FINALIST_COUNT);
        engine.final_top_n(&input.job, &input.applications, now, count)?
    } else {
        let limit = args.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
        engine.top_candidates(&input.job, &input.applications, now, limit)?
    };

    let heading = if args.finalists { "Finalists" } else { "Ranking" };
    let auto_percent = engine.config().blend.auto_percent;
    println!(
        "{heading} for {} ({}) as of {} | blend {auto_percent}% auto / {}% manual",
        input.job.title,
        input.job.id,
        now.date_naive(),
        100 - auto_percent
    );
    render_rankings(&rankings);
    Ok(())
}

pub(crate) fn run_roles(args: RolesArgs) -> Result<(), AppError> {
    let policy = AccessPolicy::standard();
    match args.role {
        Some(role) => render_role_detail(&policy, role),
        None => render_role_matrix(&policy),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let actor = args.actor;
    let today = Utc::now().date_naive();
    let repository = Arc::new(InMemoryRecruitmentRepository::seeded(sample_seed(today)));
    let service = RecruitmentService::new(
        repository,
        ScoringEngine::default(),
        RankingSettings::default(),
    );
    let job_id = JobId(SAMPLE_JOB_ID.to_string());

    println!("Talent match demo (acting as {})", actor.label());

    println!("\nCurrent ranking");
    let rankings = service.rankings(actor, &job_id, None)?;
    render_rankings(&rankings);

    let updated = service.refresh_auto_scores(actor, &job_id)?;
    println!("\nCached auto scores refreshed on {updated} application(s)");

    println!("\nRecording reviewer scores");
    for (id, score) in [("app-amina", 88), ("app-lucas", 64), ("app-ines", 75)] {
        let record = service.record_manual_score(actor, &ApplicationId(id.to_string()), score)?;
        println!(
            "- {} scored {score} ({})",
            display_name(record.candidate_name.as_deref(), &record.id.0),
            record.status.label()
        );
    }

    println!("\nFinalists");
    let finalists = service.finalists(actor, &job_id, None)?;
    render_rankings(&finalists);

    if let Some(top) = finalists.first() {
        let record = service.assign(actor, &top.application_id, "demo.recruiter")?;
        println!(
            "\n{} assigned to {}",
            display_name(record.candidate_name.as_deref(), &record.id.0),
            record.assigned_to.as_deref().unwrap_or("nobody")
        );
    }

    println!();
    render_role_matrix(service.access_policy());
    Ok(())
}

const SAMPLE_JOB_ID: &str = "job-platform";

/// Built-in dataset with availability dates relative to `today`.
pub(crate) fn sample_seed(today: NaiveDate) -> SeedData {
    let job = JobPosting {
        id: JobId(SAMPLE_JOB_ID.to_string()),
        title: "Ingénieur plateforme".to_string(),
        requirement: JobRequirement {
            experience_level: Some("Intermédiaire".to_string()),
            skills: vec![
                "Rust".to_string(),
                "Kubernetes".to_string(),
                "PostgreSQL".to_string(),
            ],
            salary: Some("45k - 60k €".to_string()),
        },
    };

    let applicant = |id: &str, name: &str, profile: ApplicationProfile| CandidateApplication {
        id: ApplicationId(id.to_string()),
        job_id: job.id.clone(),
        candidate_name: Some(name.to_string()),
        profile,
        ..CandidateApplication::default()
    };
    let letter =
        "Votre plateforme m'intéresse pour son exigence technique et son équipe. ".repeat(2);

    let applications = vec![
        applicant(
            "app-amina",
            "Amina Diallo",
            ApplicationProfile {
                experience_level: Some("Senior".to_string()),
                skills: skills(&["Rust", "Kubernetes", "PostgreSQL", "Terraform"]),
                availability_date: Some(start_of_day(today + Duration::days(10))),
                salary_expectation: Some("58k".to_string()),
                cover_letter: Some(letter.clone()),
                cv_path: Some("uploads/cv/amina.pdf".to_string()),
                motivation_letter_path: Some("uploads/lm/amina.pdf".to_string()),
                phone: Some("+33 6 12 34 56 78".to_string()),
            },
        ),
        applicant(
            "app-lucas",
            "Lucas Martin",
            ApplicationProfile {
                experience_level: Some("Débutant".to_string()),
                skills: skills(&["rust", "Docker"]),
                availability_date: Some(start_of_day(today)),
                salary_expectation: Some("40k".to_string()),
                cover_letter: Some("Disponible immédiatement.".to_string()),
                cv_path: Some("uploads/cv/lucas.pdf".to_string()),
                ..ApplicationProfile::default()
            },
        ),
        applicant(
            "app-ines",
            "Inès Moreau",
            ApplicationProfile {
                experience_level: Some("Intermédiaire".to_string()),
                skills: skills(&["Kubernetes (CKA)", "Go"]),
                availability_date: Some(start_of_day(today + Duration::days(45))),
                salary_expectation: Some("65k".to_string()),
                cover_letter: Some(letter),
                cv_path: Some("uploads/cv/ines.pdf".to_string()),
                phone: Some("+33 7 98 76 54 32".to_string()),
                ..ApplicationProfile::default()
            },
        ),
        applicant(
            "app-theo",
            "Théo Bernard",
            ApplicationProfile {
                availability_date: Some(start_of_day(today + Duration::days(90))),
                salary_expectation: Some("à négocier".to_string()),
                ..ApplicationProfile::default()
            },
        ),
    ];

    SeedData {
        jobs: vec![job],
        applications,
    }
}

fn skills(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn display_name<'a>(name: Option<&'a str>, fallback: &'a str) -> &'a str {
    name.unwrap_or(fallback)
}

fn render_rankings(rankings: &[CandidateRanking]) {
    if rankings.is_empty() {
        println!("  (no candidates)");
        return;
    }

    println!(
        "  {:<3} {:<20} {:>5} {:>6} {:>5} | {:>3} {:>3} {:>3} {:>3} {:>3}",
        "#", "candidate", "auto", "manual", "total", "exp", "skl", "avl", "sal", "qlt"
    );
    for (position, ranking) in rankings.iter().enumerate() {
        let manual = ranking
            .manual_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());
        let breakdown = &ranking.breakdown;
        println!(
            "  {:<3} {:<20} {:>5} {:>6} {:>5} | {:>3} {:>3} {:>3} {:>3} {:>3}",
            position + 1,
            display_name(ranking.candidate_name.as_deref(), &ranking.application_id.0),
            ranking.auto_score,
            manual,
            ranking.total_score,
            breakdown.experience_match,
            breakdown.skills_match,
            breakdown.availability_score,
            breakdown.salary_fit,
            breakdown.application_quality,
        );
    }
}

fn render_role_matrix(policy: &AccessPolicy) {
    println!("Role matrix");
    println!(
        "  {:<14} {:>5} {:>9} {:>11}  modules",
        "role", "level", "sensitive", "permissions"
    );
    for role in Role::ordered() {
        let summary = policy.summary(role);
        let modules: Vec<&str> = summary
            .modules
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(module, _)| module.as_str())
            .collect();
        println!(
            "  {:<14} {:>5} {:>9} {:>11}  {}",
            role.label(),
            summary.hierarchy_level,
            if role.is_sensitive() { "yes" } else { "no" },
            summary.permissions.len(),
            modules.join(", ")
        );
    }
}

fn render_role_detail(policy: &AccessPolicy, role: Role) {
    let summary = policy.summary(role);
    println!(
        "{} (level {}{})",
        role.label(),
        summary.hierarchy_level,
        if role.is_sensitive() { ", sensitive" } else { "" }
    );

    println!("Permissions:");
    for permission in summary.permissions.iter() {
        println!("  - {permission}");
    }

    println!("Modules:");
    for (module, visible) in &summary.modules {
        println!("  - {:<14} {}", module.as_str(), if *visible { "yes" } else { "no" });
    }

    let manageable: Vec<&str> = Role::ordered()
        .into_iter()
        .filter(|target| policy.can_manage(role, *target))
        .map(Role::as_str)
        .collect();
    println!(
        "Can manage: {}",
        if manageable.is_empty() {
            "none".to_string()
        } else {
            manageable.join(", ")
        }
    );
}
