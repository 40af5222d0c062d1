//! OpenAPI documents for the v1 and v2 loan APIs

use serde_json::{json, Value};
use utoipa::openapi::{
    path::{OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder},
    request_body::RequestBodyBuilder,
    ArrayBuilder, Components, ComponentsBuilder, ContactBuilder, ContentBuilder, InfoBuilder,
    ObjectBuilder, OpenApi, OpenApiBuilder, PathItemType, PathsBuilder, Ref, RefOr, Required,
    Response, ResponseBuilder, Schema, SchemaFormat, SchemaType,
};
use utoipa::ToSchema;

use crate::error::{ErrorDetails, ErrorResponse};
use crate::loan::{Loan, LoanPatch, LoanV2};

const SUPPORT_NAME: &str = "Equipe Suporte";
const SUPPORT_EMAIL: &str = "suporte@emprestimos.com";

/// Title of the interactive documentation page
pub const UI_TITLE: &str = "Documentação da API de Empréstimos";
/// Mount point of the bundled Swagger UI assets
pub const UI_ASSETS_PATH: &str = "/swagger-ui";

/// Published API versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    /// Parse a version path segment such as `v1`
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment.to_lowercase().as_str() {
            "v1" => Some(ApiVersion::V1),
            "v2" => Some(ApiVersion::V2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    /// Path the OpenAPI document of this version is served from
    pub fn document_path(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "/swagger/v1/swagger.json",
            ApiVersion::V2 => "/swagger/v2/swagger.json",
        }
    }

    /// Label shown in the Swagger UI document selector
    pub fn display_name(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "API de Empréstimos v1",
            ApiVersion::V2 => "API de Empréstimos v2",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "API de Gestão de Empréstimos",
            ApiVersion::V2 => "API de Gestão de Empréstimos - V2",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "API para gerenciamento de contratos de empréstimos.",
            ApiVersion::V2 => "Versão 2 da API com cálculo de juros e status estendido.",
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "Empréstimos",
            ApiVersion::V2 => "Empréstimos V2",
        }
    }

    fn loan_schema(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "Loan",
            ApiVersion::V2 => "LoanV2",
        }
    }

    fn loan_example(&self) -> Value {
        match self {
            ApiVersion::V1 => loan_example(),
            ApiVersion::V2 => loan_v2_example(),
        }
    }
}

/// Example v1 contract
pub fn loan_example() -> Value {
    json!({
        "cliente": "João da Silva",
        "valor": 15000,
        "prazoMeses": 36,
        "taxaJurosMensal": 1.2,
        "dataContrato": "2024-10-10T00:00:00Z"
    })
}

/// Example v2 contract
pub fn loan_v2_example() -> Value {
    json!({
        "id": "c6b7c0f9-b462-4b0e-bd27-01f9a6d0e024",
        "cliente": "Ana Clara Monteiro",
        "valor": 20000.00,
        "prazoMeses": 36,
        "taxaJurosMensal": 1.2,
        "dataContrato": "2024-10-10T00:00:00Z",
        "dataCriacao": "2024-10-10T12:00:00Z",
        "status": "Aprovado",
        "totalAPagar": 28615.38
    })
}

/// Example partial update
pub fn patch_example() -> Value {
    json!({
        "valor": 18000,
        "prazoMeses": 30
    })
}

/// Example validation failure body
pub fn validation_error_example() -> Value {
    json!({
        "error": {
            "code": "VALIDATION_ERROR",
            "message": "One or more validation errors occurred.",
            "fields": {
                "cliente": ["O nome do cliente é obrigatório."],
                "valor": ["O valor deve estar entre R$100 e R$100.000."]
            }
        }
    })
}

/// Example not-found body
pub fn not_found_example() -> Value {
    json!({
        "error": {
            "code": "NOT_FOUND",
            "message": "Resource not found: Loan c6b7c0f9-b462-4b0e-bd27-01f9a6d0e024 not found"
        }
    })
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn array_of(name: &str) -> RefOr<Schema> {
    RefOr::T(Schema::Array(
        ArrayBuilder::new().items(schema_ref(name)).build(),
    ))
}

fn json_response(description: &str, schema: RefOr<Schema>, example: Value) -> RefOr<Response> {
    RefOr::T(
        ResponseBuilder::new()
            .description(description)
            .content(
                "application/json",
                ContentBuilder::new()
                    .schema(schema)
                    .example(Some(example))
                    .build(),
            )
            .build(),
    )
}

fn validation_response() -> RefOr<Response> {
    json_response(
        "Dados inválidos",
        schema_ref("ErrorResponse"),
        validation_error_example(),
    )
}

fn not_found_response() -> RefOr<Response> {
    json_response(
        "Empréstimo não encontrado",
        schema_ref("ErrorResponse"),
        not_found_example(),
    )
}

fn empty_response(description: &str) -> RefOr<Response> {
    RefOr::T(ResponseBuilder::new().description(description).build())
}

fn json_body(
    description: &str,
    schema: &str,
    example: Value,
) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .description(Some(description))
        .required(Some(Required::True))
        .content(
            "application/json",
            ContentBuilder::new()
                .schema(schema_ref(schema))
                .example(Some(example))
                .build(),
        )
        .build()
}

/// Model schemas published with each document
fn components(version: ApiVersion) -> Components {
    let mut schemas = vec![
        Loan::schema(),
        LoanPatch::schema(),
        ErrorResponse::schema(),
        ErrorDetails::schema(),
    ];
    if version == ApiVersion::V2 {
        schemas.push(LoanV2::schema());
    }

    schemas
        .into_iter()
        .fold(ComponentsBuilder::new(), |builder, (name, schema)| {
            builder.schema(name, schema)
        })
        .build()
}

fn id_parameter() -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some("Identificador único do empréstimo (UUID)"))
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::String)
                .format(Some(SchemaFormat::Custom("uuid".to_string())))
                .build(),
        ))))
        .build()
}

/// Build the OpenAPI document for one API version
pub fn doc(version: ApiVersion) -> OpenApi {
    let tag = version.tag().to_string();
    let prefix = format!("/{}/emprestimos", version.as_str());
    let schema = version.loan_schema();
    let example = version.loan_example();
    let operation_id = |name: &str| Some(format!("{}_{}", version.as_str(), name));

    let create = OperationBuilder::new()
        .tags(Some(vec![tag.clone()]))
        .summary(Some(match version {
            ApiVersion::V1 => "Cria um novo empréstimo",
            ApiVersion::V2 => "Cria um novo empréstimo com juros",
        }))
        .operation_id(operation_id("create_loan"))
        .request_body(Some(json_body("Dados do contrato", schema, example.clone())))
        .response(
            "201",
            json_response("Empréstimo criado", schema_ref(schema), example.clone()),
        )
        .response("400", validation_response())
        .response("500", empty_response("Erro interno"))
        .build();

    let list = OperationBuilder::new()
        .tags(Some(vec![tag.clone()]))
        .summary(Some("Lista todos os empréstimos"))
        .operation_id(operation_id("list_loans"))
        .response(
            "200",
            json_response(
                "Empréstimos cadastrados",
                array_of(schema),
                json!([example.clone()]),
            ),
        )
        .build();

    let get = OperationBuilder::new()
        .tags(Some(vec![tag.clone()]))
        .summary(Some("Consulta empréstimo por ID"))
        .operation_id(operation_id("get_loan"))
        .parameter(id_parameter())
        .response(
            "200",
            json_response("Empréstimo encontrado", schema_ref(schema), example.clone()),
        )
        .response("404", not_found_response())
        .build();

    let replace = OperationBuilder::new()
        .tags(Some(vec![tag.clone()]))
        .summary(Some("Atualiza empréstimo"))
        .operation_id(operation_id("replace_loan"))
        .parameter(id_parameter())
        .request_body(Some(json_body(
            "Novos dados do contrato",
            schema,
            example.clone(),
        )))
        .response(
            "200",
            json_response("Empréstimo atualizado", schema_ref(schema), example.clone()),
        )
        .response("400", validation_response())
        .response("404", not_found_response())
        .build();

    let patch = OperationBuilder::new()
        .tags(Some(vec![tag.clone()]))
        .summary(Some("Atualiza parcialmente"))
        .operation_id(operation_id("patch_loan"))
        .parameter(id_parameter())
        .request_body(Some(json_body(
            "Valor e/ou prazo",
            "LoanPatch",
            patch_example(),
        )))
        .response(
            "200",
            json_response("Empréstimo atualizado", schema_ref(schema), example),
        )
        .response("400", validation_response())
        .response("404", not_found_response())
        .build();

    let delete = OperationBuilder::new()
        .tags(Some(vec![tag]))
        .summary(Some("Remove empréstimo"))
        .operation_id(operation_id("delete_loan"))
        .parameter(id_parameter())
        .response("204", empty_response("Empréstimo removido"))
        .response("404", not_found_response())
        .build();

    let paths = PathsBuilder::new()
        .path(
            prefix.clone(),
            PathItemBuilder::new()
                .operation(PathItemType::Post, create)
                .operation(PathItemType::Get, list)
                .build(),
        )
        .path(
            format!("{}/{{id}}", prefix),
            PathItemBuilder::new()
                .operation(PathItemType::Get, get)
                .operation(PathItemType::Put, replace)
                .operation(PathItemType::Patch, patch)
                .operation(PathItemType::Delete, delete)
                .build(),
        )
        .build();

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(version.title())
                .version(version.as_str())
                .description(Some(version.description()))
                .contact(Some(
                    ContactBuilder::new()
                        .name(Some(SUPPORT_NAME))
                        .email(Some(SUPPORT_EMAIL))
                        .build(),
                ))
                .build(),
        )
        .paths(paths)
        .components(Some(components(version)))
        .build()
}

/// Landing page: Swagger UI over both documents, styled by `custom.css`
pub fn ui_index_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <link rel="stylesheet" type="text/css" href="{assets}/swagger-ui.css">
  <link rel="stylesheet" type="text/css" href="/custom.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="{assets}/swagger-ui-bundle.js" charset="UTF-8"></script>
  <script src="{assets}/swagger-ui-standalone-preset.js" charset="UTF-8"></script>
  <script src="/swagger-initializer.js" charset="UTF-8"></script>
</body>
</html>
"#,
        title = UI_TITLE,
        assets = UI_ASSETS_PATH,
    )
}

/// Document selector entries, one per version
pub fn ui_urls() -> Value {
    Value::Array(
        ApiVersion::ALL
            .into_iter()
            .map(|version| {
                json!({
                    "url": version.document_path(),
                    "name": version.display_name(),
                })
            })
            .collect(),
    )
}

/// Script booting Swagger UI on the landing page
pub fn ui_initializer_js() -> String {
    format!(
        r##"window.onload = function () {{
  window.ui = SwaggerUIBundle({{
    urls: {urls},
    dom_id: "#swagger-ui",
    deepLinking: true,
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
    layout: "StandaloneLayout"
  }});
}};
"##,
        urls = ui_urls(),
    )
}
