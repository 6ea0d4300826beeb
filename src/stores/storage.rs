use crate::core::error::StoreError;
use crate::models::budget::{Budget, BudgetOverview, NewBudget};
use crate::models::card::{Card, NewCard};
use crate::models::guide::{Guide, NewGuide};
use crate::models::transaction::{NewTransaction, Transaction, TransactionKind};
use crate::models::user::{NewUser, User};
use crate::stores::table::Table;
use crate::utils::money::normalize;
use rust_decimal::Decimal;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Row counts per table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    pub users: usize,
    pub cards: usize,
    pub transactions: usize,
    pub budgets: usize,
    pub guides: usize,
}

/// In-memory data store backing the dashboard API
///
/// Each entity lives in its own table with an independent id counter. Nothing is
/// ever deleted and nothing survives a restart.
pub struct Storage {
    users: Table<User>,
    cards: Table<Card>,
    transactions: Table<Transaction>,
    budgets: Table<Budget>,
    guides: Table<Guide>,
    /// Serializes username check + insert in `create_user_if_absent`
    registration: Mutex<()>,
}

impl Storage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: Table::new(),
            cards: Table::new(),
            transactions: Table::new(),
            budgets: Table::new(),
            guides: Table::new(),
            registration: Mutex::new(()),
        }
    }

    // Users

    pub fn get_user(&self, id: u32) -> Option<User> {
        self.users.get(id)
    }

    /// Usernames are expected to be unique. The table does not enforce it;
    /// registration goes through `create_user_if_absent`.
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.find(|user| user.username == username)
    }

    pub fn create_user(&self, new_user: NewUser) -> User {
        let user = self.users.insert_with(|id| new_user.into_user(id));
        info!(user_id = user.id, username = %user.username, "User created");
        user
    }

    /// Create the user unless the username is already taken
    /// Returns None on a taken username. Concurrent callers cannot both succeed.
    pub fn create_user_if_absent(&self, new_user: NewUser) -> Option<User> {
        let _guard = self
            .registration
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.get_user_by_username(&new_user.username).is_some() {
            return None;
        }

        Some(self.create_user(new_user))
    }

    // Cards

    pub fn get_card(&self, id: u32) -> Option<Card> {
        self.cards.get(id)
    }

    /// Cards owned by the user, ordered by id
    pub fn cards_by_user_id(&self, user_id: u32) -> Vec<Card> {
        let mut cards = self.cards.filter(|card| card.user_id == user_id);
        cards.sort_by_key(|card| card.id);
        cards
    }

    pub fn create_card(&self, new_card: NewCard) -> Card {
        let card = self.cards.insert_with(|id| new_card.into_card(id));
        info!(
            card_id = card.id,
            user_id = card.user_id,
            balance = %card.balance,
            "Card created"
        );
        card
    }

    /// Overwrite the stored balance of a card
    pub fn update_card_balance(&self, card_id: u32, new_balance: Decimal) -> Result<Card, StoreError> {
        let balance = normalize(new_balance);
        self.cards
            .update(card_id, |card| card.balance = balance)
            .ok_or(StoreError::CardNotFound(card_id))
    }

    /// Block or unblock a card
    /// Returns None if the card does not exist
    pub fn set_card_status(&self, card_id: u32, is_active: bool) -> Option<Card> {
        let card = self.cards.update(card_id, |card| card.is_active = is_active)?;
        info!(card_id, is_active, "Card status updated");
        Some(card)
    }

    // Transactions

    /// Transactions of the user, most recent first
    pub fn transactions_by_user_id(&self, user_id: u32) -> Vec<Transaction> {
        newest_first(self.transactions.filter(|tx| tx.user_id == user_id))
    }

    /// Transactions linked to the card, most recent first
    pub fn transactions_by_card_id(&self, card_id: u32) -> Vec<Transaction> {
        newest_first(self.transactions.filter(|tx| tx.card_id == Some(card_id)))
    }

    /// Record a transaction and apply it to the linked card's balance
    ///
    /// The transaction is always stored. When `card_id` names an existing card its
    /// balance moves by the signed amount; an unknown card is skipped without error.
    pub fn create_transaction(&self, new_transaction: NewTransaction) -> Transaction {
        let transaction = self.insert_transaction(new_transaction);

        if let Some(card_id) = transaction.card_id {
            // Read-modify-write happens under the card's entry lock
            let updated = self.cards.update(card_id, |card| {
                card.balance = normalize(card.balance + transaction.amount);
            });

            match updated {
                Some(card) => {
                    debug!(card_id, balance = %card.balance, "Card balance updated");
                }
                None => {
                    warn!(
                        transaction_id = transaction.id,
                        card_id,
                        "Transaction references unknown card, balance not updated"
                    );
                }
            }
        }

        info!(
            transaction_id = transaction.id,
            user_id = transaction.user_id,
            card_id = ?transaction.card_id,
            amount = %transaction.amount,
            "Transaction created"
        );

        transaction
    }

    /// Store a transaction without touching any card
    pub(crate) fn insert_transaction(&self, new_transaction: NewTransaction) -> Transaction {
        self.transactions
            .insert_with(|id| new_transaction.into_transaction(id))
    }

    // Budgets

    pub fn create_budget(&self, new_budget: NewBudget) -> Budget {
        let budget = self.budgets.insert_with(|id| new_budget.into_budget(id));
        info!(budget_id = budget.id, user_id = budget.user_id, total = %budget.total, "Budget created");
        budget
    }

    /// The user's budget with spend derived from their expense transactions
    pub fn budget_by_user_id(&self, user_id: u32) -> Option<BudgetOverview> {
        let budget = self
            .budgets
            .filter(|budget| budget.user_id == user_id)
            .into_iter()
            .min_by_key(|budget| budget.id)?;

        let spent: Decimal = self
            .transactions
            .filter(|tx| tx.user_id == user_id && tx.kind == TransactionKind::Expense)
            .iter()
            .map(|tx| tx.amount.abs())
            .sum();

        Some(BudgetOverview::new(&budget, spent))
    }

    // Guides

    pub fn create_guide(&self, new_guide: NewGuide) -> Guide {
        self.guides.insert_with(|id| new_guide.into_guide(id))
    }

    pub fn all_guides(&self) -> Vec<Guide> {
        self.guides.values()
    }

    pub fn stats(&self) -> StorageStats {
        StorageStats {
            users: self.users.len(),
            cards: self.cards.len(),
            transactions: self.transactions.len(),
            budgets: self.budgets.len(),
            guides: self.guides.len(),
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort by creation time descending; equal timestamps put the newer id first
fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::CardType;
    use crate::models::transaction::TransactionStatus;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "password".to_string(),
            name: "Test User".to_string(),
            email: format!("{}@campus.ac.ke", username),
            avatar_url: None,
        }
    }

    fn new_card(user_id: u32, balance: Decimal) -> NewCard {
        NewCard {
            user_id,
            card_type: CardType::Student,
            balance,
            card_number: "**** **** **** 0001".to_string(),
            card_holder: "Test User".to_string(),
            expiry_date: "12/28".to_string(),
            last_used_at: None,
            is_active: true,
        }
    }

    fn new_transaction(
        user_id: u32,
        card_id: Option<u32>,
        amount: Decimal,
        kind: TransactionKind,
    ) -> NewTransaction {
        NewTransaction {
            user_id,
            card_id,
            amount,
            kind,
            description: "Main Cafeteria".to_string(),
            category: Some("lunch".to_string()),
            icon_type: None,
            status: TransactionStatus::Completed,
            created_at: None,
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_user_lookup() {
        let storage = Storage::new();
        let alice = storage.create_user(new_user("alice"));
        let bob = storage.create_user(new_user("bob"));

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(storage.get_user(2).unwrap().username, "bob");
        assert_eq!(storage.get_user_by_username("alice").unwrap().id, 1);
        assert!(storage.get_user(3).is_none());
        assert!(storage.get_user_by_username("carol").is_none());
    }

    #[test]
    fn test_create_user_if_absent() {
        let storage = Storage::new();

        assert_eq!(storage.create_user_if_absent(new_user("alice")).map(|u| u.id), Some(1));
        assert!(storage.create_user_if_absent(new_user("alice")).is_none());
        assert_eq!(storage.create_user_if_absent(new_user("bob")).map(|u| u.id), Some(2));
        assert_eq!(storage.stats().users, 2);
    }

    #[test]
    fn test_concurrent_registration_single_winner() {
        use std::sync::{Arc, Barrier};

        for _ in 0..50 {
            let storage = Arc::new(Storage::new());
            let barrier = Arc::new(Barrier::new(8));

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let storage = Arc::clone(&storage);
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        storage.create_user_if_absent(new_user("same_name")).is_some()
                    })
                })
                .collect();

            let winners = handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|created| *created)
                .count();

            assert_eq!(winners, 1);
            assert_eq!(storage.stats().users, 1);
        }
    }

    #[test]
    fn test_cards_partitioned_by_user() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(10)));
        storage.create_card(new_card(2, dec!(20)));
        storage.create_card(new_card(1, dec!(30)));

        let cards = storage.cards_by_user_id(1);

        assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(cards.iter().all(|c| c.user_id == 1));
        assert!(storage.cards_by_user_id(99).is_empty());
    }

    #[test]
    fn test_expense_reduces_card_balance() {
        let storage = Storage::new();
        storage.create_user(new_user("demo"));
        storage.create_card(new_card(1, dec!(100.00)));

        storage.create_transaction(new_transaction(1, Some(1), dec!(50.00), TransactionKind::Expense));

        assert_eq!(storage.get_card(1).unwrap().balance.to_string(), "50.00");
    }

    #[test]
    fn test_income_increases_card_balance() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(100)));

        let tx = storage.create_transaction(new_transaction(1, Some(1), dec!(25.5), TransactionKind::Income));

        assert_eq!(tx.amount.to_string(), "25.50");
        assert_eq!(storage.get_card(1).unwrap().balance.to_string(), "125.50");
    }

    #[test]
    fn test_expense_may_overdraw() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(10)));

        storage.create_transaction(new_transaction(1, Some(1), dec!(30), TransactionKind::Expense));

        assert_eq!(storage.get_card(1).unwrap().balance, dec!(-20));
    }

    #[test]
    fn test_transaction_touches_only_linked_card() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(100)));
        storage.create_card(new_card(1, dec!(100)));

        storage.create_transaction(new_transaction(1, Some(2), dec!(40), TransactionKind::Expense));

        assert_eq!(storage.get_card(1).unwrap().balance, dec!(100));
        assert_eq!(storage.get_card(2).unwrap().balance, dec!(60));
        assert_eq!(storage.stats().transactions, 1);
        assert_eq!(storage.stats().cards, 2);
    }

    #[test]
    fn test_unknown_card_still_records_transactions() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(100)));

        for _ in 0..3 {
            storage.create_transaction(new_transaction(1, Some(42), dec!(5), TransactionKind::Expense));
        }

        assert_eq!(storage.stats().transactions, 3);
        assert_eq!(storage.transactions_by_card_id(42).len(), 3);
        assert_eq!(storage.get_card(1).unwrap().balance, dec!(100));
        assert!(storage.get_card(42).is_none());
    }

    #[test]
    fn test_unlinked_transaction_moves_no_balance() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(100)));

        let tx = storage.create_transaction(new_transaction(1, None, dec!(5), TransactionKind::Expense));

        assert_eq!(tx.card_id, None);
        assert_eq!(storage.get_card(1).unwrap().balance, dec!(100));
    }

    #[test]
    fn test_update_card_balance_unknown_card() {
        let storage = Storage::new();

        let result = storage.update_card_balance(7, dec!(1));

        assert!(matches!(result, Err(StoreError::CardNotFound(7))));
    }

    #[test]
    fn test_update_card_balance_in_place() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(1)));

        let card = storage.update_card_balance(1, dec!(12.3)).unwrap();

        assert_eq!(card.id, 1);
        assert_eq!(card.balance.to_string(), "12.30");
        assert_eq!(storage.stats().cards, 1);
    }

    #[test]
    fn test_set_card_status_persists() {
        let storage = Storage::new();
        storage.create_card(new_card(1, dec!(1)));

        let blocked = storage.set_card_status(1, false).unwrap();

        assert!(!blocked.is_active);
        assert!(!storage.get_card(1).unwrap().is_active);
        assert!(storage.set_card_status(1, true).unwrap().is_active);
        assert!(storage.set_card_status(2, false).is_none());
    }

    #[test]
    fn test_transactions_newest_first() {
        let storage = Storage::new();
        for day in [3, 1, 2] {
            let mut tx = new_transaction(1, None, dec!(1), TransactionKind::Expense);
            tx.created_at = Some(at(day));
            storage.create_transaction(tx);
        }

        let dates: Vec<_> = storage
            .transactions_by_user_id(1)
            .iter()
            .map(|tx| tx.created_at)
            .collect();

        assert_eq!(dates, vec![at(3), at(2), at(1)]);
    }

    #[test]
    fn test_transactions_partitioned_and_sorted() {
        let storage = Storage::new();
        for (user_id, card_id, day) in [(1, 1, 5), (2, 2, 9), (1, 1, 7), (1, 3, 8), (2, 1, 6)] {
            let mut tx = new_transaction(user_id, Some(card_id), dec!(1), TransactionKind::Income);
            tx.created_at = Some(at(day));
            storage.create_transaction(tx);
        }

        let by_user = storage.transactions_by_user_id(1);
        assert_eq!(by_user.len(), 3);
        assert!(by_user.iter().all(|tx| tx.user_id == 1));
        assert!(by_user.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let by_card = storage.transactions_by_card_id(1);
        assert_eq!(by_card.len(), 3);
        assert!(by_card.iter().all(|tx| tx.card_id == Some(1)));
        assert!(by_card.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        assert!(storage.transactions_by_user_id(3).is_empty());
    }

    #[test]
    fn test_equal_timestamps_newer_id_first() {
        let storage = Storage::new();
        for _ in 0..3 {
            let mut tx = new_transaction(1, None, dec!(1), TransactionKind::Expense);
            tx.created_at = Some(at(1));
            storage.create_transaction(tx);
        }

        let ids: Vec<u32> = storage.transactions_by_user_id(1).iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_budget_spent_is_derived_from_expenses() {
        let storage = Storage::new();
        storage.create_budget(NewBudget { user_id: 1, total: dec!(500) });
        storage.create_transaction(new_transaction(1, None, dec!(120), TransactionKind::Expense));
        storage.create_transaction(new_transaction(1, None, dec!(30.5), TransactionKind::Expense));
        storage.create_transaction(new_transaction(1, None, dec!(1000), TransactionKind::Income));
        storage.create_transaction(new_transaction(2, None, dec!(99), TransactionKind::Expense));

        let budget = storage.budget_by_user_id(1).unwrap();

        assert_eq!(budget.spent.to_string(), "150.50");
        assert_eq!(budget.total.to_string(), "500.00");
        assert_eq!(budget.remaining.to_string(), "349.50");
    }

    #[test]
    fn test_budget_missing_user() {
        let storage = Storage::new();
        storage.create_budget(NewBudget { user_id: 1, total: dec!(500) });

        assert!(storage.budget_by_user_id(999).is_none());
    }

    #[test]
    fn test_guides_ordered_by_id() {
        let storage = Storage::new();
        for title in ["First", "Second", "Third"] {
            storage.create_guide(NewGuide {
                title: title.to_string(),
                description: String::new(),
                icon_name: "book".to_string(),
            });
        }

        let titles: Vec<String> = storage.all_guides().into_iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_id_counters_are_independent() {
        let storage = Storage::new();
        let user = storage.create_user(new_user("demo"));
        let card = storage.create_card(new_card(user.id, dec!(0)));
        let tx = storage.create_transaction(new_transaction(user.id, Some(card.id), dec!(1), TransactionKind::Income));
        let second_tx = storage.create_transaction(new_transaction(user.id, Some(card.id), dec!(1), TransactionKind::Income));

        assert_eq!((user.id, card.id, tx.id, second_tx.id), (1, 1, 1, 2));
    }
}
