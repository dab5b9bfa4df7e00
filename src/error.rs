use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::SubmitResponse;

/// Reasons a submission is rejected. The display text is the wire message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is Required.")]
    MissingField(&'static str),

    /// Unknown partner, wrong password and bad signature all share this variant.
    #[error("Access Denied!")]
    AccessDenied,

    #[error("Expired.")]
    Expired,

    #[error("Invalid Total Amount.")]
    AmountMismatch,

    #[error("partneritemref is Required.")]
    MissingItemRef,

    #[error("name for {0} is Required.")]
    MissingItemName(String),

    #[error("quantity must be more than 0")]
    InvalidQuantity,

    #[error("unitprice must be positive.")]
    InvalidUnitPrice,

    #[error("Internal Server Error.")]
    InternalFault,
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::AccessDenied => StatusCode::UNAUTHORIZED,
            ValidationError::InternalFault => StatusCode::INTERNAL_SERVER_ERROR,
            ValidationError::MissingField(_)
            | ValidationError::Expired
            | ValidationError::AmountMismatch
            | ValidationError::MissingItemRef
            | ValidationError::MissingItemName(_)
            | ValidationError::InvalidQuantity
            | ValidationError::InvalidUnitPrice => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    #[error("Invalid request body.")]
    BadRequest(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Rejected(reason) => reason.status_code(),
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(SubmitResponse::rejected(self.to_string()));

        (status, body).into_response()
    }
}
