use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRecruitmentRepository, SeedData};
use crate::routes::with_recruitment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::telemetry;
use talent_match::workflows::recruitment::{RecruitmentService, ScoringEngine};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let seed = match args.seed.take() {
        Some(path) => {
            let seed = SeedData::from_path(&path)?;
            info!(path = %path.display(), "loaded seed data");
            seed
        }
        None => SeedData::default(),
    };
    let repository = Arc::new(InMemoryRecruitmentRepository::seeded(seed));
    let (jobs, applications) = repository.counts()?;

    let recruitment_service = Arc::new(RecruitmentService::new(
        repository,
        ScoringEngine::default(),
        config.ranking,
    ));

    let settings = recruitment_service.settings();
    let app = with_recruitment_routes(recruitment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        jobs,
        applications,
        ranking_limit = settings.ranking_limit,
        finalist_count = settings.finalist_count,
        "talent match service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
