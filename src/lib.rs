//! Loan Contracts API Library
//!
//! This library exports the core modules for the versioned loan ("empréstimo")
//! contract API: the v1/v2 services, their HTTP handlers and the ambient
//! configuration, error and middleware layers.

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod loan;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::build_app;
