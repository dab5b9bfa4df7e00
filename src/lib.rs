pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod utils;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::config::Config;
use crate::services::ValidationPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ValidationPipeline>,
    pub log_request_body: bool,
}

impl AppState {
    pub fn new(pipeline: ValidationPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            log_request_body: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let pipeline = ValidationPipeline::new(Arc::new(config.partner_directory()))
            .with_freshness_window(config.freshness_window());

        Self {
            log_request_body: config.log_request_body,
            ..Self::new(pipeline)
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/submittrxmessage",
            post(handlers::submit::submit_trx_message),
        )
        .route(
            "/api/SubmitTrxMessage",
            post(handlers::submit::submit_trx_message),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_logger_middleware,
        ))
        .with_state(state)
}
