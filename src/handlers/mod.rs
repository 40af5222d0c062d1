//! API handlers

mod docs;
mod extract;
mod health;
pub mod loan;
pub mod loan_v2;

pub use docs::{openapi_document, swagger_index, swagger_initializer};
pub use extract::{parse_loan_id, ValidatedJson};
pub use health::health_check;
