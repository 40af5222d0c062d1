//! API documentation routes

use axum::{routing::get, Router};
use utoipa_swagger_ui::{Config as SwaggerUiConfig, SwaggerUi, Url};

use crate::docs::{ApiVersion, UI_ASSETS_PATH};
use crate::handlers::{openapi_document, swagger_index, swagger_initializer};
use crate::state::AppState;

/// OpenAPI documents, the landing page and the bundled Swagger UI
pub fn docs_routes() -> Router<AppState> {
    let urls = ApiVersion::ALL
        .into_iter()
        .map(|version| Url::new(version.display_name(), version.document_path()));

    Router::new()
        .route("/", get(swagger_index))
        .route("/swagger-initializer.js", get(swagger_initializer))
        .route("/swagger/:version/swagger.json", get(openapi_document))
        .merge(SwaggerUi::new(UI_ASSETS_PATH).config(SwaggerUiConfig::new(urls)))
}
