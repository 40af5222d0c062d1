//! Loan contracts: models, interest calculation and versioned services

pub mod interest;
pub mod model;
pub mod service;
pub mod service_v2;
pub mod store;

pub use model::{status, Identified, Loan, LoanPatch, LoanV2};
pub use service::LoanService;
pub use service_v2::LoanServiceV2;
pub use store::RecordStore;
