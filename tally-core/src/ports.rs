use crate::models::{Receipt, ScoreRecord, ScoringConfig};

/// Associated types shared by every repository trait.
///
/// Implementations choose their own identifier, timestamp, and error types;
/// the core never constructs any of them itself. This is what lets the
/// HTTP layer and the tests run against any backend, including an
/// in-memory one.
pub trait Repository {
    /// The backend's error type
    type Error: std::error::Error + Send + Sync + 'static;
    /// The timestamp recorded alongside a stored receipt
    type DateTime: Clone + Send + Sync + 'static;
    /// The identifier a stored receipt is keyed on
    type ReceiptId: Clone + Send + Sync + 'static;
}

/// Repository interface for score-record persistence.
///
/// This is a plain keyed store: one put at submission time, two reads. The
/// repository never computes anything: `points` arrives precomputed by the
/// scoring engine, and the identifier arrives precomputed from the payload
/// content.
pub trait ReceiptRepository: Repository {
    /// Persist a scored receipt.
    ///
    /// Because the identifier is a pure function of the payload content,
    /// a byte-identical resubmission carries the same id and the same
    /// points. Implementations must treat that case as success and return
    /// the record, not as a key conflict.
    fn create_receipt(
        &self,
        receipt_id: Self::ReceiptId,
        points: u64,
        receipt: Receipt,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<ScoreRecord<Self::ReceiptId>, Self::Error>> + Send;

    /// Retrieve a full score record, `None` if the id is unknown.
    fn get_receipt(
        &self,
        receipt_id: Self::ReceiptId,
    ) -> impl Future<Output = Result<Option<ScoreRecord<Self::ReceiptId>>, Self::Error>> + Send;

    /// Retrieve just the awarded points, `None` if the id is unknown.
    fn get_points(
        &self,
        receipt_id: Self::ReceiptId,
    ) -> impl Future<Output = Result<Option<u64>, Self::Error>> + Send;
}

/// The composition root seen by the transport layer.
///
/// An application bundles a repository with the few ambient decisions the
/// core refuses to make for itself: what time it is, how payload text maps
/// to an identifier, and which optional scoring rules are switched on.
pub trait Application: Send + Sync {
    /// The repository backing this application
    type Repository: ReceiptRepository;

    /// The repository handle
    fn database(&self) -> &Self::Repository;

    /// The current timestamp
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Derive the identifier for a submitted payload.
    ///
    /// Must be deterministic in the payload bytes; see
    /// [`crate::identity::derive_receipt_id`] for the canonical
    /// implementation.
    fn generate_receipt_id(&self, payload: &str)
    -> <Self::Repository as Repository>::ReceiptId;

    /// The engine configuration for this deployment.
    fn scoring(&self) -> ScoringConfig;
}
