//! Subscription input rules.

use serde::Deserialize;

use crate::application::SubscriptionRules;

/// `[matching]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Lowest warehouse-name similarity (0..=100) accepted as a match.
    pub min_name_score: u8,
    /// Box types users may subscribe to, as the provider spells them.
    pub box_types: Vec<String>,
    /// Largest max coefficient a subscription may ask for.
    pub max_coefficient_limit: i32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let rules = SubscriptionRules::default();
        Self {
            min_name_score: rules.min_name_score,
            box_types: rules.box_types,
            max_coefficient_limit: rules.max_coefficient_limit,
        }
    }
}

impl From<&MatchingConfig> for SubscriptionRules {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            min_name_score: config.min_name_score,
            box_types: config.box_types.clone(),
            max_coefficient_limit: config.max_coefficient_limit,
        }
    }
}
