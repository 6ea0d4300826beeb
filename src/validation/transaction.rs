use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::core::error::{FieldError, ValidationError};
use crate::models::transaction::{NewTransaction, TransactionKind, TransactionStatus};
use crate::validation::{finish, missing, optional_text, required_text, FieldReader};

/// Largest magnitude that fits a decimal(10, 2) column
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Body of POST /api/transactions, before validation
#[derive(Debug, Default)]
pub struct CreateTransactionRequest {
    pub user_id: Option<u32>,
    pub card_id: Option<u32>,
    /// Unsigned magnitude, as a decimal string or number
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    /// "income" or "expense", sent as `type`
    pub kind: Option<String>,
    /// Defaults to "completed"
    pub status: Option<String>,
    pub category: Option<String>,
    pub icon_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateTransactionRequest {
    /// Read the camelCase JSON body, collecting type errors per field
    pub fn from_json(body: &Value) -> (Self, Vec<FieldError>) {
        let mut reader = FieldReader::new(body);

        let request = Self {
            user_id: reader.read("userId"),
            card_id: reader.read("cardId"),
            amount: reader.read("amount"),
            description: reader.read("description"),
            kind: reader.read("type"),
            status: reader.read("status"),
            category: reader.read("category"),
            icon_type: reader.read("iconType"),
            created_at: reader.read("createdAt"),
        };

        (request, reader.into_errors())
    }

    /// Read and validate a JSON body in one step
    pub fn parse(body: &Value) -> Result<NewTransaction, ValidationError> {
        let (request, errors) = Self::from_json(body);
        request.validate_with(errors)
    }

    /// Check every field and report all problems at once
    pub fn validate(self) -> Result<NewTransaction, ValidationError> {
        self.validate_with(Vec::new())
    }

    fn validate_with(self, mut errors: Vec<FieldError>) -> Result<NewTransaction, ValidationError> {
        let user_id = match self.user_id {
            Some(0) => {
                errors.push(FieldError::new("userId", "must be a positive integer"));
                0
            }
            Some(id) => id,
            None => {
                missing("userId", &mut errors);
                0
            }
        };

        if self.card_id == Some(0) {
            errors.push(FieldError::new("cardId", "must be a positive integer"));
        }

        let amount = match self.amount {
            Some(amount) if amount <= Decimal::ZERO => {
                errors.push(FieldError::new("amount", "must be greater than 0"));
                Decimal::ZERO
            }
            Some(amount) if amount.round_dp(2) != amount => {
                errors.push(FieldError::new("amount", "must have at most 2 decimal places"));
                Decimal::ZERO
            }
            Some(amount) if amount > MAX_AMOUNT => {
                errors.push(FieldError::new("amount", "must not exceed 99999999.99"));
                Decimal::ZERO
            }
            Some(amount) => amount,
            None => {
                missing("amount", &mut errors);
                Decimal::ZERO
            }
        };

        let description = required_text("description", self.description, &mut errors);

        let kind = match self.kind.as_deref().map(str::trim) {
            Some(value) => TransactionKind::parse(value).unwrap_or_else(|| {
                errors.push(FieldError::new("type", "must be one of: income, expense"));
                TransactionKind::Expense
            }),
            None => {
                missing("type", &mut errors);
                TransactionKind::Expense
            }
        };

        let status = match self.status.as_deref().map(str::trim) {
            Some(value) => TransactionStatus::parse(value).unwrap_or_else(|| {
                errors.push(FieldError::new(
                    "status",
                    "must be one of: completed, pending, failed",
                ));
                TransactionStatus::default()
            }),
            None => TransactionStatus::default(),
        };

        let card_id = self.card_id;
        let category = optional_text(self.category);
        let icon_type = optional_text(self.icon_type);
        let created_at = self.created_at;

        finish(errors, || NewTransaction {
            user_id,
            card_id,
            amount,
            kind,
            description,
            category,
            icon_type,
            status,
            created_at,
        })
    }
}
