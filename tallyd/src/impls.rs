//! The concrete application: SQLite storage, content-derived identifiers,
//! and the deployment's scoring toggles.

use tally_core::{identity, models::ScoringConfig, ports::Application};
use tally_sqlite::{
    Db,
    types::{DateTime, ReceiptId},
};

/// Main application implementation combining all system components.
#[derive(Clone)]
pub struct TallyApp {
    /// Database connection for persistent storage
    pub db: Db,
    /// Scoring rule toggles for this deployment
    pub scoring: ScoringConfig,
}

impl Application for TallyApp {
    type Repository = Db;

    fn database(&self) -> &Db {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_receipt_id(&self, payload: &str) -> ReceiptId {
        identity::derive_receipt_id(payload).into()
    }

    fn scoring(&self) -> ScoringConfig {
        self.scoring
    }
}
