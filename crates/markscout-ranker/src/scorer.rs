//! Tier-dominant risk scoring.
//!
//! Only trademark and company conflicts are tiered; common-law conflicts
//! count towards the total but carry no tier, and precedents are
//! informational. Branches are evaluated critical → high → medium → none:
//! any conflict in a higher tier fixes the branch regardless of how many
//! lower-tier conflicts exist. The literal clamp bounds below are part of
//! the scoring contract.

use serde::{Deserialize, Serialize};
use tracing::debug;

use markscout_common::{CommonLawConflict, CompanyConflict, RiskLevel, TrademarkConflict};

/// Conflict counts by severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictTally {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    /// |trademark| + |company| + |common_law|
    pub total: u32,
}

impl ConflictTally {
    pub fn from_conflicts(
        trademarks: &[TrademarkConflict],
        companies: &[CompanyConflict],
        common_law: &[CommonLawConflict],
    ) -> Self {
        let levels = trademarks
            .iter()
            .map(|c| c.risk_level)
            .chain(companies.iter().map(|c| c.risk_level));

        let mut tally = Self::default();
        for level in levels {
            match level {
                RiskLevel::Critical => tally.critical += 1,
                RiskLevel::High     => tally.high += 1,
                RiskLevel::Medium   => tally.medium += 1,
                RiskLevel::Low      => {}
            }
        }
        tally.total = (trademarks.len() + companies.len() + common_law.len()) as u32;
        tally
    }
}

/// Scoring output consumed by the result and the report renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScores {
    pub overall_risk_score: u32,               // 1–10
    pub registration_success_probability: u32, // 0–100
    pub opposition_probability: u32,           // 0–100
    pub critical_conflicts_count: u32,
    pub high_risk_conflicts_count: u32,
    pub total_conflicts_found: u32,
}

/// Score a tally. Deterministic and pure.
pub fn score_tally(tally: &ConflictTally) -> RiskScores {
    let ConflictTally { critical, high, medium, total } = *tally;

    let (overall, success, opposition) = if critical > 0 {
        (
            (8 + critical).min(10),
            30u32.saturating_sub(10 * critical).max(10),
            (60 + 15 * critical + 10 * high).min(90),
        )
    } else if high > 0 {
        let opposition = if high == 1 { 50 } else { (60 + 10 * high).min(90) };
        (
            (5 + high).min(9),
            60u32.saturating_sub(10 * high).max(30),
            opposition,
        )
    } else if medium > 0 {
        (
            (3 + medium).min(6),
            80u32.saturating_sub(5 * medium).max(50),
            (20 + 5 * medium).min(40),
        )
    } else {
        let bonus = if total == 0 { 5 } else { 0 };
        (total.clamp(1, 3), (85 + bonus).min(90), 10)
    };

    RiskScores {
        overall_risk_score: overall,
        registration_success_probability: success,
        opposition_probability: opposition,
        critical_conflicts_count: critical,
        high_risk_conflicts_count: high,
        total_conflicts_found: total,
    }
}

/// Count conflicts by tier and score them.
pub fn calculate_risk_scores(
    trademarks: &[TrademarkConflict],
    companies: &[CompanyConflict],
    common_law: &[CommonLawConflict],
) -> RiskScores {
    let tally = ConflictTally::from_conflicts(trademarks, companies, common_law);
    let scores = score_tally(&tally);
    debug!(?tally, risk = scores.overall_risk_score, "risk scored");
    scores
}
