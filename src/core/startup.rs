use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::core::config::DemoConfig;
use crate::models::budget::NewBudget;
use crate::models::card::{CardType, NewCard};
use crate::models::guide::NewGuide;
use crate::models::transaction::{NewTransaction, TransactionKind, TransactionStatus};
use crate::models::user::NewUser;
use crate::stores::storage::Storage;

/// (description, meal type, icon, kind, amount, timestamp)
const DEMO_TRANSACTIONS: [(&str, &str, &str, TransactionKind, &str, &str); 6] = [
    ("Main Cafeteria", "lunch", "utensils", TransactionKind::Expense, "350.00", "2025-03-14T12:45:00Z"),
    ("Science Block Cafe", "breakfast", "coffee", TransactionKind::Expense, "180.00", "2025-03-14T07:30:00Z"),
    ("Hostel Dining Hall", "dinner", "utensils-crossed", TransactionKind::Expense, "420.00", "2025-03-13T18:20:00Z"),
    ("Library Kiosk", "snack", "pizza", TransactionKind::Expense, "90.00", "2025-03-13T15:10:00Z"),
    ("Card Top-up", "topup", "wallet", TransactionKind::Income, "2000.00", "2025-03-12T09:00:00Z"),
    ("Main Cafeteria", "lunch", "utensils", TransactionKind::Expense, "300.00", "2025-03-11T12:30:00Z"),
];

/// (title, description, icon)
const DEMO_GUIDES: [(&str, &str, &str); 4] = [
    (
        "Getting Started Guide",
        "Learn how to check your balance and read your meal history",
        "book",
    ),
    (
        "Card Usage Guidelines",
        "Keep your card safe and block it immediately if it is lost",
        "shield",
    ),
    (
        "Budgeting Tips",
        "Plan your monthly meal spending and avoid running low mid-term",
        "lightbulb",
    ),
    (
        "Frequently Asked Questions",
        "Top-ups, refunds and what to do when a payment fails",
        "book",
    ),
];

/// Build the process-wide store, seeded unless disabled in config
pub fn build_storage(config: &DemoConfig) -> Result<Storage> {
    let storage = Storage::new();

    if config.seed {
        seed_demo_data(&storage, &config.username)?;
    }

    let stats = storage.stats();
    info!(
        seeded = config.seed,
        users = stats.users,
        cards = stats.cards,
        transactions = stats.transactions,
        budgets = stats.budgets,
        guides = stats.guides,
        "Storage initialized"
    );

    Ok(storage)
}

/// Populate a fresh store with the fixed demo dataset
///
/// Running this twice on the same store duplicates every row.
pub fn seed_demo_data(storage: &Storage, username: &str) -> Result<()> {
    let user = storage.create_user(NewUser {
        username: username.to_string(),
        password: "password".to_string(),
        name: "John Kamau".to_string(),
        email: "john.kamau@students.campus.ac.ke".to_string(),
        avatar_url: None,
    });

    let student_card = storage.create_card(NewCard {
        user_id: user.id,
        card_type: CardType::Student,
        balance: parse_amount("2450.00")?,
        card_number: "**** **** **** 4589".to_string(),
        card_holder: user.name.clone(),
        expiry_date: "12/26".to_string(),
        last_used_at: Some("Main Cafeteria".to_string()),
        is_active: true,
    });

    storage.create_card(NewCard {
        user_id: user.id,
        card_type: CardType::Staff,
        balance: parse_amount("1200.00")?,
        card_number: "**** **** **** 7731".to_string(),
        card_holder: user.name.clone(),
        expiry_date: "06/27".to_string(),
        last_used_at: None,
        is_active: true,
    });

    // Seeded balances already reflect this history, so no balance mutation here
    for (description, category, icon, kind, amount, created_at) in DEMO_TRANSACTIONS {
        storage.insert_transaction(NewTransaction {
            user_id: user.id,
            card_id: Some(student_card.id),
            amount: parse_amount(amount)?,
            kind,
            description: description.to_string(),
            category: Some(category.to_string()),
            icon_type: Some(icon.to_string()),
            status: TransactionStatus::Completed,
            created_at: Some(parse_timestamp(created_at)?),
        });
    }

    storage.create_budget(NewBudget {
        user_id: user.id,
        total: parse_amount("5000.00")?,
    });

    for (title, description, icon) in DEMO_GUIDES {
        storage.create_guide(NewGuide {
            title: title.to_string(),
            description: description.to_string(),
            icon_name: icon.to_string(),
        });
    }

    Ok(())
}

fn parse_amount(value: &str) -> Result<Decimal> {
    value
        .parse::<Decimal>()
        .context(format!("Invalid demo amount: {}", value))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    value
        .parse::<DateTime<Utc>>()
        .context(format!("Invalid demo timestamp: {}", value))
}
