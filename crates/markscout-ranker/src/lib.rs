//! markscout-ranker: Risk scoring model.
//! Turns extracted conflict counts into a 1–10 risk score and two
//! probability-like percentages.

pub mod scorer;

pub use scorer::{calculate_risk_scores, score_tally, ConflictTally, RiskScores};
