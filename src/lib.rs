//! Halloween Image & Leaderboard API Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod origin;
pub mod routes;
pub mod templates;

pub use config::Config;
pub use db::Store;
pub use error::{AppError, Result};

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use constants::MAX_REQUEST_BODY_BYTES;
use templates::{RuleSet, TemplateRewriter};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub rewriter: Arc<TemplateRewriter>,
}

impl AppState {
    /// Create a new AppState with the given store and configuration
    pub fn new(store: Store, config: Config) -> Self {
        let rules = RuleSet::legacy(&config.legacy_api_origins);
        let rewriter = Arc::new(TemplateRewriter::new(config.templates_dir.clone(), rules));
        Self {
            store,
            config,
            rewriter,
        }
    }
}

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health_check))
        // Images
        .route("/images", get(routes::list_images).post(routes::upload_image))
        .route("/images/", get(routes::list_images).post(routes::upload_image))
        .route("/images/gemini", post(routes::upload_rich_content_image))
        .route("/images/save", post(routes::save_frontend_image))
        .route("/images/:id", get(routes::get_image))
        // Users
        .route("/users", get(routes::list_users).post(routes::create_user))
        .route("/users/", get(routes::list_users).post(routes::create_user))
        .route("/users/:id", get(routes::get_user))
        // Leaderboard
        .route("/cocteles", post(routes::submit_leaderboard))
        .route(
            "/cocteles/leaderboard",
            get(routes::list_leaderboard).delete(routes::clear_leaderboard),
        )
        // Administration
        .route("/database/stats", get(routes::database_stats))
        .route("/database/reset", post(routes::reset_database))
        .route("/database/clear", post(routes::clear_database))
        .route("/database/images", delete(routes::clear_images))
        .route("/database/users", delete(routes::clear_users))
        // Pages
        .route("/ranking", get(routes::ranking_page))
        .route("/photos", get(routes::photos_page))
        .route("/cocteles/ranking", get(routes::cocteles_ranking_page))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn allowed_origins(config: &Config) -> AllowOrigin {
    if config.allows_any_origin() {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    AllowOrigin::list(origins)
}
