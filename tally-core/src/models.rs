mod config;
mod money;
mod receipt;
mod record;

pub use config::ScoringConfig;
pub use money::{Money, MoneyDto, MoneyError};
pub use receipt::{Item, PurchaseDate, PurchaseTime, Receipt, ReceiptDto, ValidationError};
pub use record::ScoreRecord;
