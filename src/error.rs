use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::cashflow::EntryError;
use crate::store::StoreError;

/// Error side of every handler. Rendered as `{"status": "error", "message": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Transaksi tidak ditemukan.")]
    NotFound,

    #[error("Transaksi dengan ID tersebut sudah ada.")]
    Conflict,

    #[error("Terjadi kesalahan pada server.")]
    Internal(#[source] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EntryError> for AppError {
    fn from(err: EntryError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::NotFound,
            StoreError::DuplicateId(_) => AppError::Conflict,
            err => {
                tracing::error!("store error: {err}");
                AppError::Internal(err)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": "error",
            "message": self.to_string()
        }));
        (self.status(), body).into_response()
    }
}
