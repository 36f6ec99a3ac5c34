use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use fitfolio_core::goals::{GoalService, GoalServiceTrait};
use fitfolio_core::measurements::{MeasurementService, MeasurementServiceTrait};
use fitfolio_core::search::{SearchService, SearchServiceTrait};
use fitfolio_core::users::{UserService, UserServiceTrait};
use fitfolio_storage_sqlite::db;
use fitfolio_storage_sqlite::goals::GoalRepository;
use fitfolio_storage_sqlite::measurements::MeasurementRepository;
use fitfolio_storage_sqlite::search::SearchRepository;
use fitfolio_storage_sqlite::users::UserRepository;

use crate::auth::{self, AuthManager};
use crate::config::Config;
use crate::domain_events::{search_index_worker, ChannelEventSink, SearchIndexDeps};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub measurement_service: Arc<dyn MeasurementServiceTrait>,
    pub search_service: Arc<dyn SearchServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let measurement_repository = Arc::new(MeasurementRepository::new(pool.clone(), writer.clone()));
    let search_repository = Arc::new(SearchRepository::new(pool.clone(), writer.clone()));

    let search_service: Arc<dyn SearchServiceTrait> =
        Arc::new(SearchService::new(search_repository));

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let event_sink = Arc::new(ChannelEventSink::new(events_tx));

    tokio::spawn(search_index_worker(
        events_rx,
        SearchIndexDeps {
            goal_repository: goal_repository.clone(),
            measurement_repository: measurement_repository.clone(),
            search_service: search_service.clone(),
        },
    ));

    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));
    let goal_service: Arc<dyn GoalServiceTrait> =
        Arc::new(GoalService::new(goal_repository, event_sink.clone()));
    let measurement_service: Arc<dyn MeasurementServiceTrait> = Arc::new(
        MeasurementService::new(measurement_repository, event_sink),
    );

    let jwt_secret = auth::decode_secret_key(&config.jwt_secret)?;
    let auth = Arc::new(AuthManager::new(&jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        goal_service,
        measurement_service,
        search_service,
        auth,
    }))
}
