//! Loan handlers (v2): totals and status are managed by the service

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{parse_loan_id, ValidatedJson};
use crate::error::{ApiError, ApiResult};
use crate::loan::{LoanPatch, LoanServiceV2, LoanV2};

/// Create a new loan with computed interest
pub async fn create_loan(
    State(service): State<Arc<LoanServiceV2>>,
    ValidatedJson(loan): ValidatedJson<LoanV2>,
) -> impl IntoResponse {
    let created = service.create(loan).await;
    let location = format!("/v2/emprestimos/{}", created.loan.id);

    (StatusCode::CREATED, [(header::LOCATION, location)], Json(created))
}

/// List all loans
pub async fn list_loans(State(service): State<Arc<LoanServiceV2>>) -> Json<Vec<LoanV2>> {
    Json(service.list_all().await)
}

pub async fn get_loan(
    State(service): State<Arc<LoanServiceV2>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LoanV2>> {
    let loan_id = parse_loan_id(&id)?;

    service
        .get_by_id(loan_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::loan_not_found(&id))
}

/// Replace every field of an existing loan
pub async fn replace_loan(
    State(service): State<Arc<LoanServiceV2>>,
    Path(id): Path<String>,
    ValidatedJson(loan): ValidatedJson<LoanV2>,
) -> ApiResult<Json<LoanV2>> {
    let loan_id = parse_loan_id(&id)?;

    service
        .replace(loan_id, loan)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::loan_not_found(&id))
}

/// Update amount and/or term of an existing loan
pub async fn patch_loan(
    State(service): State<Arc<LoanServiceV2>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<LoanPatch>,
) -> ApiResult<Json<LoanV2>> {
    let loan_id = parse_loan_id(&id)?;

    service
        .partial_update(loan_id, patch)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::loan_not_found(&id))
}

pub async fn delete_loan(
    State(service): State<Arc<LoanServiceV2>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let loan_id = parse_loan_id(&id)?;

    if service.delete(loan_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::loan_not_found(&id))
    }
}
