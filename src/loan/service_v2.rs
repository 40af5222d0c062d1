//! Loan service layer (v2): contract CRUD with interest and status tracking

use chrono::Utc;
use uuid::Uuid;

use super::model::{status, LoanPatch, LoanV2};
use super::store::RecordStore;

/// Service managing v2 loan contracts.
///
/// The total payable is recomputed on create, replace and partial update;
/// whatever the client sends for it is discarded.
#[derive(Default)]
pub struct LoanServiceV2 {
    store: RecordStore<LoanV2>,
}

impl LoanServiceV2 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new contract: fresh identifier, contract date set to now,
    /// status `Pendente` and computed total
    pub async fn create(&self, mut loan: LoanV2) -> LoanV2 {
        loan.loan.id = Uuid::new_v4();
        loan.loan.contract_date = Utc::now();
        loan.status = Some(status::PENDING.to_string());
        loan.recompute_total();

        let loan = self.store.insert(loan).await;

        tracing::info!(
            loan_id = %loan.loan.id,
            amount = %loan.loan.amount,
            term_months = loan.loan.term_months,
            total_payable = ?loan.total_payable,
            "Loan created"
        );
        loan
    }

    pub async fn list_all(&self) -> Vec<LoanV2> {
        self.store.snapshot().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Option<LoanV2> {
        let loan = self.store.get(id).await;
        if loan.is_none() {
            tracing::debug!(loan_id = %id, "Loan not found");
        }
        loan
    }

    /// Replace a contract wholesale. Status and timestamps are taken from
    /// the body as given.
    pub async fn replace(&self, id: Uuid, mut loan: LoanV2) -> Option<LoanV2> {
        loan.recompute_total();
        let updated = self.store.replace(id, loan).await?;

        tracing::info!(loan_id = %id, total_payable = ?updated.total_payable, "Loan replaced");
        Some(updated)
    }

    /// Apply the fields present in `patch`, then recompute the total
    pub async fn partial_update(&self, id: Uuid, patch: LoanPatch) -> Option<LoanV2> {
        let updated = self
            .store
            .update(id, |loan| {
                loan.loan.apply_patch(&patch);
                loan.recompute_total();
            })
            .await?;

        tracing::info!(loan_id = %id, total_payable = ?updated.total_payable, "Loan partially updated");
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
