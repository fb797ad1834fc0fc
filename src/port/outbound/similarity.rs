//! Approximate warehouse-name matching port.

/// Best candidate for a piece of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub candidate: String,
    /// Similarity on a 0..=100 scale (100 = identical).
    pub score: u8,
}

/// Picks the closest candidate for free-form input.
///
/// Callers reject results whose score is below their configured threshold;
/// the algorithm behind the score is up to the implementation.
pub trait NameMatcher: Send + Sync {
    /// Best match among `candidates`, or `None` when there are none.
    fn best_match(&self, input: &str, candidates: &[String]) -> Option<NameMatch>;
}
