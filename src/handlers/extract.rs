//! Request extraction helpers shared by the versioned handlers

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};

/// JSON body that has been deserialized and validated.
///
/// Malformed JSON is rejected as `BadRequest`; field constraint violations
/// are rejected as `ValidationError` with the per-field messages.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Parse a loan identifier from a path segment. Anything that is not a
/// UUID can never match a stored loan, so it is reported as not found.
pub fn parse_loan_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::loan_not_found(raw))
}
