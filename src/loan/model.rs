//! Loan contract models for the v1 and v2 APIs

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::interest;

/// Smallest principal accepted at the API boundary
pub const MIN_AMOUNT: Decimal = dec!(100);
/// Largest principal accepted at the API boundary
pub const MAX_AMOUNT: Decimal = dec!(100000);
pub const MAX_CUSTOMER_LEN: usize = 100;
pub const DEFAULT_MONTHLY_INTEREST_RATE: f64 = 1.0;

/// Conventional status values. The field itself accepts any string.
pub mod status {
    pub const PENDING: &str = "Pendente";
    pub const APPROVED: &str = "Aprovado";
    pub const REJECTED: &str = "Rejeitado";
    pub const SETTLED: &str = "Quitado";
}

/// Records addressable by a store-assigned identifier
pub trait Identified {
    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
}

/// Contrato de empréstimo (v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Loan {
    /// Identificador único do empréstimo
    #[serde(default = "Uuid::new_v4")]
    #[schema(read_only)]
    pub id: Uuid,

    /// Nome do cliente
    #[serde(rename = "cliente")]
    #[serde(default)]
    #[validate(custom = "validate_customer")]
    #[schema(min_length = 1, max_length = 100, example = "João da Silva")]
    pub customer: String,

    /// Valor do empréstimo
    #[serde(rename = "valor")]
    #[validate(custom = "validate_amount")]
    #[schema(value_type = f64, minimum = 100, maximum = 100000, example = 15000)]
    pub amount: Decimal,

    /// Prazo em meses
    #[serde(rename = "prazoMeses")]
    #[serde(default)]
    #[validate(range(min = 1, max = 120, message = "O prazo deve estar entre 1 e 120 meses."))]
    #[schema(minimum = 1, maximum = 120, example = 36)]
    pub term_months: i32,

    /// Taxa de juros mensal (%), informativa
    #[serde(rename = "taxaJurosMensal")]
    #[serde(default = "default_monthly_interest_rate")]
    #[schema(example = 1.2)]
    pub monthly_interest_rate: f64,

    /// Data do contrato
    #[serde(rename = "dataContrato")]
    #[serde(default = "Utc::now")]
    #[schema(example = "2024-10-10T00:00:00Z")]
    pub contract_date: DateTime<Utc>,
}

impl Loan {
    pub fn new(customer: impl Into<String>, amount: Decimal, term_months: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer: customer.into(),
            amount,
            term_months,
            monthly_interest_rate: DEFAULT_MONTHLY_INTEREST_RATE,
            contract_date: Utc::now(),
        }
    }

    /// Copy the fields present in `patch` onto this loan
    pub fn apply_patch(&mut self, patch: &LoanPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(term_months) = patch.term_months {
            self.term_months = term_months;
        }
    }
}

impl Identified for Loan {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

/// Contrato de empréstimo com juros e status (v2)
#[derive(Debug, Clone, PartialEq, Serialize, Validate, ToSchema)]
pub struct LoanV2 {
    #[serde(flatten)]
    #[validate]
    pub loan: Loan,

    /// Data de criação do registro
    #[serde(rename = "dataCriacao")]
    #[serde(default)]
    #[schema(example = "2024-10-10T12:00:00Z")]
    pub created_at: Option<DateTime<Utc>>,

    /// Status do empréstimo (Pendente, Aprovado, Rejeitado, Quitado)
    #[serde(default)]
    #[validate(length(max = 50, message = "O status não pode exceder 50 caracteres."))]
    #[schema(max_length = 50, example = "Aprovado")]
    pub status: Option<String>,

    /// Valor total a pagar, calculado com juros compostos de 1% ao mês
    #[serde(rename = "totalAPagar")]
    #[serde(default)]
    #[validate(custom = "validate_total_payable")]
    #[schema(value_type = Option<f64>, read_only, minimum = 0, example = 28615.38)]
    pub total_payable: Option<Decimal>,
}

/// Flat mirror of the v2 wire body. Numbers buffered for a flattened field
/// lose their arbitrary-precision form, so v2 bodies are read field by field.
#[derive(Deserialize)]
struct LoanV2Body {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(rename = "cliente")]
    #[serde(default)]
    customer: String,
    #[serde(rename = "valor")]
    amount: Decimal,
    #[serde(rename = "prazoMeses")]
    #[serde(default)]
    term_months: i32,
    #[serde(rename = "taxaJurosMensal")]
    #[serde(default = "default_monthly_interest_rate")]
    monthly_interest_rate: f64,
    #[serde(rename = "dataContrato")]
    #[serde(default = "Utc::now")]
    contract_date: DateTime<Utc>,
    #[serde(rename = "dataCriacao")]
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "totalAPagar")]
    #[serde(default)]
    total_payable: Option<Decimal>,
}

impl<'de> Deserialize<'de> for LoanV2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = LoanV2Body::deserialize(deserializer)?;
        Ok(Self {
            loan: Loan {
                id: body.id,
                customer: body.customer,
                amount: body.amount,
                term_months: body.term_months,
                monthly_interest_rate: body.monthly_interest_rate,
                contract_date: body.contract_date,
            },
            created_at: body.created_at,
            status: body.status,
            total_payable: body.total_payable,
        })
    }
}

impl LoanV2 {
    pub fn new(loan: Loan) -> Self {
        Self {
            loan,
            created_at: None,
            status: None,
            total_payable: None,
        }
    }

    pub fn recompute_total(&mut self) {
        self.total_payable = interest::total_payable(self.loan.amount, self.loan.term_months);
    }
}

impl Identified for LoanV2 {
    fn id(&self) -> Uuid {
        self.loan.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.loan.id = id;
    }
}

/// Atualização parcial: campos ausentes permanecem inalterados
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoanPatch {
    /// Novo valor do empréstimo
    #[serde(rename = "valor")]
    #[serde(default)]
    #[validate(custom = "validate_amount")]
    #[schema(value_type = Option<f64>, minimum = 100, maximum = 100000, example = 18000)]
    pub amount: Option<Decimal>,

    /// Novo prazo em meses
    #[serde(rename = "prazoMeses")]
    #[serde(default)]
    #[validate(range(min = 1, max = 120, message = "O prazo deve estar entre 1 e 120 meses."))]
    #[schema(minimum = 1, maximum = 120, example = 30)]
    pub term_months: Option<i32>,
}

fn default_monthly_interest_rate() -> f64 {
    DEFAULT_MONTHLY_INTEREST_RATE
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_customer(customer: &str) -> Result<(), ValidationError> {
    if customer.trim().is_empty() {
        return Err(validation_error(
            "required",
            "O nome do cliente é obrigatório.",
        ));
    }
    if customer.chars().count() > MAX_CUSTOMER_LEN {
        return Err(validation_error(
            "length",
            "O nome do cliente deve ter no máximo 100 caracteres.",
        ));
    }
    Ok(())
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if (MIN_AMOUNT..=MAX_AMOUNT).contains(amount) {
        Ok(())
    } else {
        Err(validation_error(
            "range",
            "O valor deve estar entre R$100 e R$100.000.",
        ))
    }
}

fn validate_total_payable(total: &Decimal) -> Result<(), ValidationError> {
    if total.is_sign_negative() && !total.is_zero() {
        Err(validation_error(
            "range",
            "O valor total a pagar deve ser positivo.",
        ))
    } else {
        Ok(())
    }
}
