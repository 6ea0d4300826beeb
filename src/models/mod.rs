pub mod api;
pub mod budget;
pub mod card;
pub mod guide;
pub mod transaction;
pub mod user;
