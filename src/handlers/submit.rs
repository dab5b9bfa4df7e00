use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::domain::{SubmitResponse, TransactionRequest};
use crate::error::AppError;
use crate::AppState;

/// Validates and prices a partner submission.
pub async fn submit_trx_message(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Undecodable submission body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let pricing = state.pipeline.process(&request)?;

    Ok(Json(SubmitResponse::accepted(pricing)))
}
