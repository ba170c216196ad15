use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ContractId, ContractRecord, ContractStatus, UserId};
use super::repository::{ContractRepository, RepositoryError};
use super::service::{TrustService, TrustServiceError};
use super::stats::StatsInput;

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: ContractStatus,
}

/// Router builder exposing contract ledger and trust endpoints.
pub fn trust_router<R>(service: Arc<TrustService<R>>) -> Router
where
    R: ContractRepository + 'static,
{
    Router::new()
        .route("/api/v1/contracts", post(register_handler::<R>))
        .route(
            "/api/v1/contracts/:contract_id",
            get(contract_handler::<R>),
        )
        .route(
            "/api/v1/contracts/:contract_id/status",
            put(status_update_handler::<R>),
        )
        .route("/api/v1/users/:user_id/trust", get(profile_handler::<R>))
        .route("/api/v1/trust/score", post(score_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<TrustService<R>>>,
    axum::Json(record): axum::Json<ContractRecord>,
) -> Response
where
    R: ContractRepository + 'static,
{
    match service.register(record) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(TrustServiceError::Repository(RepositoryError::Conflict)) => error_response(
            StatusCode::CONFLICT,
            "contract already exists".to_string(),
        ),
        Err(other) => service_error_response(other),
    }
}

pub(crate) async fn contract_handler<R>(
    State(service): State<Arc<TrustService<R>>>,
    Path(contract_id): Path<String>,
) -> Response
where
    R: ContractRepository + 'static,
{
    match service.get(&ContractId(contract_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(other) => service_error_response(other),
    }
}

pub(crate) async fn status_update_handler<R>(
    State(service): State<Arc<TrustService<R>>>,
    Path(contract_id): Path<String>,
    axum::Json(update): axum::Json<StatusUpdate>,
) -> Response
where
    R: ContractRepository + 'static,
{
    match service.update_status(&ContractId(contract_id), update.status) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(other) => service_error_response(other),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<TrustService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ContractRepository + 'static,
{
    match service.profile(&UserId(user_id)) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(other) => service_error_response(other),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<TrustService<R>>>,
    axum::Json(input): axum::Json<StatsInput>,
) -> Response
where
    R: ContractRepository + 'static,
{
    match service.assess(input) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(other) => service_error_response(other),
    }
}

fn service_error_response(error: TrustServiceError) -> Response {
    let status = match &error {
        TrustServiceError::InvalidRecord(_) | TrustServiceError::Validation(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        TrustServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        TrustServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        TrustServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    let payload = json!({ "error": message });
    (status, axum::Json(payload)).into_response()
}
