use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use crate::{
    config::{Config, StorageBackend},
    domain::events::AppEvent,
    repository::{MemStore, PgStore, Store},
    routes::{
        bot::bot_update,
        event::stream,
        health,
        referral::{claim_rewards, my_referrals},
        save::{load_game, save_game},
    },
};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
    tx: broadcast::Sender<AppEvent>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tx: broadcast::Sender<AppEvent>, config: Config) -> Self {
        Self { store, tx, config }
    }

    pub fn get_store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }

    pub fn get_sender(&self) -> broadcast::Sender<AppEvent> {
        self.tx.clone()
    }
}

pub struct Application;

impl Application {
    pub async fn build(config: Config) -> anyhow::Result<()> {
        Self::setup_tracing(&config.application.debug_mode);

        let store = Self::get_store(&config).await?;
        let (tx, _rx) = broadcast::channel(100);
        let app_state = Arc::new(AppState::new(store, tx, config.clone()));

        let app = Self::router(app_state);

        let ip = config.application.host.parse::<IpAddr>()?;
        let addr = SocketAddr::new(ip, config.application.port);
        tracing::info!("listening on {}", addr.port());
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await?;

        Ok(())
    }

    pub fn router(app_state: Arc<AppState>) -> Router {
        let cors = CorsLayer::permissive();
        Router::new()
            .route("/", get(health))
            .route("/my-referrals/:user_id", get(my_referrals))
            .route("/claim-rewards", post(claim_rewards))
            .route("/save", post(save_game))
            .route("/load/:user_id", get(load_game))
            .route("/bot/update", post(bot_update))
            .route("/stream", get(stream))
            .with_state(app_state)
            .layer(cors)
    }

    fn setup_tracing(debug_mode: &str) {
        let _ = tracing_log::LogTracer::init();
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| debug_mode.into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    async fn get_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
        match config.storage.backend {
            StorageBackend::Memory => Ok(Arc::new(MemStore::new())),
            StorageBackend::Postgres => {
                let pool = PgPoolOptions::new()
                    .acquire_timeout(std::time::Duration::from_secs(2))
                    .connect_lazy_with(config.database.get_connect_options());
                sqlx::migrate!().run(&pool).await?;
                Ok(Arc::new(PgStore::new(pool)))
            }
        }
    }
}
