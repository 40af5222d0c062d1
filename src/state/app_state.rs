//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Environment;
use crate::loan::{LoanService, LoanServiceV2};

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loan_service: Arc<LoanService>,
    pub loan_service_v2: Arc<LoanServiceV2>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(
        loan_service: Arc<LoanService>,
        loan_service_v2: Arc<LoanServiceV2>,
        environment: Environment,
    ) -> Self {
        Self {
            loan_service,
            loan_service_v2,
            environment,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(LoanService::new()),
            Arc::new(LoanServiceV2::new()),
            Environment::default(),
        )
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<LoanServiceV2> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service_v2.clone()
    }
}
