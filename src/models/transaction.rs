use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a monetary movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Top-up or other credit
    Income,
    /// Purchase or other debit
    Expense,
}

impl TransactionKind {
    /// Apply the sign implied by this kind to an unsigned magnitude
    pub fn signed(self, magnitude: Decimal) -> Decimal {
        let magnitude = magnitude.abs();
        match self {
            TransactionKind::Income => magnitude,
            TransactionKind::Expense => -magnitude,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(TransactionStatus::Completed),
            "pending" => Some(TransactionStatus::Pending),
            "failed" => Some(TransactionStatus::Failed),
            _ => None,
        }
    }
}

/// Immutable record of a monetary movement
///
/// `amount` is signed: positive for income, negative for expense.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u32,
    pub user_id: u32,
    /// Card whose balance this transaction moved, if any
    pub card_id: Option<u32>,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Merchant or cafeteria name
    pub description: String,
    /// Meal type for cafeteria purchases (breakfast, lunch, ...)
    pub category: Option<String>,
    pub icon_type: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Transaction fields prior to id assignment
///
/// `amount` is the unsigned magnitude; the sign comes from `kind`.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub user_id: u32,
    pub card_id: Option<u32>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
    pub category: Option<String>,
    pub icon_type: Option<String>,
    pub status: TransactionStatus,
    /// Stamped with the current time when absent
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTransaction {
    pub fn into_transaction(self, id: u32) -> Transaction {
        let amount = crate::utils::money::normalize(self.kind.signed(self.amount));

        Transaction {
            id,
            user_id: self.user_id,
            card_id: self.card_id,
            amount,
            kind: self.kind,
            description: self.description,
            category: self.category,
            icon_type: self.icon_type,
            status: self.status,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}
