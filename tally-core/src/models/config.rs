/// Configuration for the scoring engine.
///
/// The rule set is fixed with one exception: a conditional bonus that awards
/// 5 points when the receipt total exceeds 10.00. That rule is a deployment
/// toggle rather than an invariant of the engine, so it is carried here and
/// passed explicitly into [`crate::scoring::calculate_points`] instead of
/// being compiled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScoringConfig {
    /// Award 5 extra points when the total is greater than 10.00.
    /// Disabled unless a deployment opts in.
    pub large_total_bonus: bool,
}
