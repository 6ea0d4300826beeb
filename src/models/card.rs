use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Student,
    Staff,
}

/// Cafeteria meal card
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Card ID
    pub id: u32,
    /// Owning user
    pub user_id: u32,
    #[serde(rename = "type")]
    pub card_type: CardType,
    /// Current balance, scale 2. May go negative after an oversized expense.
    pub balance: Decimal,
    /// Masked card number as printed on the dashboard
    pub card_number: String,
    pub card_holder: String,
    /// MM/YY
    pub expiry_date: String,
    /// Name of the cafeteria where the card was last used
    pub last_used_at: Option<String>,
    /// Blocked cards report "false"
    #[serde(with = "bool_string")]
    pub is_active: bool,
}

/// Card fields prior to id assignment
#[derive(Clone, Debug)]
pub struct NewCard {
    pub user_id: u32,
    pub card_type: CardType,
    pub balance: Decimal,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub last_used_at: Option<String>,
    pub is_active: bool,
}

impl NewCard {
    pub fn into_card(self, id: u32) -> Card {
        Card {
            id,
            user_id: self.user_id,
            card_type: self.card_type,
            balance: crate::utils::money::normalize(self.balance),
            card_number: self.card_number,
            card_holder: self.card_holder,
            expiry_date: self.expiry_date,
            last_used_at: self.last_used_at,
            is_active: self.is_active,
        }
    }
}

/// The dashboard exchanges card status as the strings "true" / "false".
/// Plain JSON booleans are accepted on input as well.
pub mod bool_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Flag::deserialize(deserializer)? {
            Flag::Bool(value) => Ok(value),
            Flag::Text(text) => match text.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"\"true\" or \"false\"",
                )),
            },
        }
    }
}
