use super::receipt::Receipt;

/// The persisted outcome of an accepted submission.
///
/// A record is written exactly once, when the receipt is first accepted,
/// and never mutated: `points` is a pure function of `receipt`, so there is
/// nothing to update. The receipt itself is retained verbatim for audit and
/// debugging; it is never re-scored on read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ScoreRecord<ReceiptId> {
    /// Identifier derived from the submitted payload content
    pub id: ReceiptId,
    /// The awarded points
    pub points: u64,
    /// The receipt as it was submitted
    pub receipt: Receipt,
}
