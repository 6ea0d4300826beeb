use rust_decimal::Decimal;
use serde::Serialize;

/// Stored per-user spending cap
///
/// Spend is not stored here; it is derived from the transaction table on read.
#[derive(Clone, Debug)]
pub struct Budget {
    pub id: u32,
    pub user_id: u32,
    pub total: Decimal,
}

#[derive(Clone, Debug)]
pub struct NewBudget {
    pub user_id: u32,
    pub total: Decimal,
}

impl NewBudget {
    pub fn into_budget(self, id: u32) -> Budget {
        Budget {
            id,
            user_id: self.user_id,
            total: crate::utils::money::normalize(self.total),
        }
    }
}

/// Budget as served to the dashboard
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub id: u32,
    pub user_id: u32,
    /// Sum of expense magnitudes across the user's transactions
    pub spent: Decimal,
    pub total: Decimal,
    /// `total - spent`, floored at zero
    pub remaining: Decimal,
}

impl BudgetOverview {
    pub fn new(budget: &Budget, spent: Decimal) -> Self {
        let spent = crate::utils::money::normalize(spent);
        let remaining = crate::utils::money::normalize((budget.total - spent).max(Decimal::ZERO));

        Self {
            id: budget.id,
            user_id: budget.user_id,
            spent,
            total: budget.total,
            remaining,
        }
    }
}
