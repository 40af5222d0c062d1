//! Loan handlers (v1)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{parse_loan_id, ValidatedJson};
use crate::error::{ApiError, ApiResult};
use crate::loan::{Loan, LoanPatch, LoanService};

/// Create a new loan
pub async fn create_loan(
    State(service): State<Arc<LoanService>>,
    ValidatedJson(loan): ValidatedJson<Loan>,
) -> impl IntoResponse {
    let created = service.create(loan).await;
    let location = format!("/v1/emprestimos/{}", created.id);

    (StatusCode::CREATED, [(header::LOCATION, location)], Json(created))
}

/// List all loans
pub async fn list_loans(State(service): State<Arc<LoanService>>) -> Json<Vec<Loan>> {
    Json(service.list_all().await)
}

pub async fn get_loan(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Loan>> {
    let loan_id = parse_loan_id(&id)?;

    service
        .get_by_id(loan_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::loan_not_found(&id))
}

/// Replace every field of an existing loan
pub async fn replace_loan(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
    ValidatedJson(loan): ValidatedJson<Loan>,
) -> ApiResult<Json<Loan>> {
    let loan_id = parse_loan_id(&id)?;

    service
        .replace(loan_id, loan)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::loan_not_found(&id))
}

/// Update amount and/or term of an existing loan
pub async fn patch_loan(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<LoanPatch>,
) -> ApiResult<Json<Loan>> {
    let loan_id = parse_loan_id(&id)?;

    service
        .partial_update(loan_id, patch)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::loan_not_found(&id))
}

pub async fn delete_loan(
    State(service): State<Arc<LoanService>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let loan_id = parse_loan_id(&id)?;

    if service.delete(loan_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::loan_not_found(&id))
    }
}
