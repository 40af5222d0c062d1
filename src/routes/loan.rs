//! Loan route definitions, one group per API version

use axum::{routing::get, Router};

use crate::handlers::{loan, loan_v2};
use crate::state::AppState;

/// Routes mounted under `/v1`
pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/emprestimos",
            get(loan::list_loans).post(loan::create_loan),
        )
        .route(
            "/emprestimos/:id",
            get(loan::get_loan)
                .put(loan::replace_loan)
                .patch(loan::patch_loan)
                .delete(loan::delete_loan),
        )
}

/// Routes mounted under `/v2`
pub fn loan_v2_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/emprestimos",
            get(loan_v2::list_loans).post(loan_v2::create_loan),
        )
        .route(
            "/emprestimos/:id",
            get(loan_v2::get_loan)
                .put(loan_v2::replace_loan)
                .patch(loan_v2::patch_loan)
                .delete(loan_v2::delete_loan),
        )
}
