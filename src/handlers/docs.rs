use axum::{
    extract::Path,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use utoipa::openapi::OpenApi;

use crate::docs::{self, ApiVersion};
use crate::error::{ApiError, ApiResult};

/// Serve the OpenAPI document for one API version
pub async fn openapi_document(Path(version): Path<String>) -> ApiResult<Json<OpenApi>> {
    let version = ApiVersion::from_segment(&version)
        .ok_or_else(|| ApiError::NotFound(format!("API version {} not found", version)))?;

    Ok(Json(docs::doc(version)))
}

/// Interactive documentation landing page
pub async fn swagger_index() -> Html<String> {
    Html(docs::ui_index_html())
}

pub async fn swagger_initializer() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        docs::ui_initializer_js(),
    )
}
