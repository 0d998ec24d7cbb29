pub mod pipeline;
pub mod rule;

pub use pipeline::{RankingEngine, ScoredApplication};
pub use rule::{rule_score, RuleScore};
