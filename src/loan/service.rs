//! Loan service layer (v1): basic contract CRUD

use uuid::Uuid;

use super::model::{Loan, LoanPatch};
use super::store::RecordStore;

/// Service managing v1 loan contracts
#[derive(Default)]
pub struct LoanService {
    store: RecordStore<Loan>,
}

impl LoanService {
    /// Create a new, empty loan service instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new contract as given. Its identifier was generated when the
    /// body was read, unless the client supplied one.
    pub async fn create(&self, loan: Loan) -> Loan {
        let loan = self.store.insert(loan).await;

        tracing::info!(loan_id = %loan.id, amount = %loan.amount, "Loan created");
        loan
    }

    /// All contracts in insertion order
    pub async fn list_all(&self) -> Vec<Loan> {
        self.store.snapshot().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Option<Loan> {
        let loan = self.store.get(id).await;
        if loan.is_none() {
            tracing::debug!(loan_id = %id, "Loan not found");
        }
        loan
    }

    /// Replace a contract wholesale, keeping its identifier
    pub async fn replace(&self, id: Uuid, loan: Loan) -> Option<Loan> {
        let updated = self.store.replace(id, loan).await?;

        tracing::info!(loan_id = %id, "Loan replaced");
        Some(updated)
    }

    /// Apply the fields present in `patch`
    pub async fn partial_update(&self, id: Uuid, patch: LoanPatch) -> Option<Loan> {
        let updated = self
            .store
            .update(id, |loan| loan.apply_patch(&patch))
            .await?;

        tracing::info!(loan_id = %id, "Loan partially updated");
        Some(updated)
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        let removed = self.store.remove(id).await;
        if removed {
            tracing::info!(loan_id = %id, "Loan deleted");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}
