//! Data models for the research pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use markscout_common::{CommonLawConflict, CompanyConflict, LegalPrecedent, TrademarkConflict};

/// Nice classification resolved for a research run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub code: u32,
    pub description: String,
    pub matched_term: String,
}

/// One hit as returned by a search provider, before tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: String, // provider name, e.g. "DuckDuckGo"
}

/// A provider hit tagged with the query that produced it.
/// Lives only for the duration of one research run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: String,
    pub query_purpose: String,
    /// Position of the originating query in the strategy list.
    pub query_index: usize,
}

impl SearchHit {
    pub fn from_raw(raw: RawHit, query_purpose: &str, query_index: usize) -> Self {
        Self {
            title: raw.title,
            url: raw.url,
            snippet: raw.snippet,
            source: raw.source,
            query_purpose: query_purpose.to_string(),
            query_index,
        }
    }
}

/// Complete findings of one research run. Built once by the pipeline and
/// handed to the caller; nothing is shared across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrademarkResearchResult {
    pub run_id: Uuid,
    pub brand_name: String,
    pub industry: String,
    pub category: String,
    pub countries: Vec<String>,
    pub research_timestamp: DateTime<Utc>,
    pub nice_classification: Classification,

    // Conflicts discovered
    pub trademark_conflicts: Vec<TrademarkConflict>,
    pub company_conflicts: Vec<CompanyConflict>,
    pub common_law_conflicts: Vec<CommonLawConflict>,
    pub legal_precedents: Vec<LegalPrecedent>,

    // Risk assessment
    pub overall_risk_score: u32,               // 1–10
    pub registration_success_probability: u32, // 0–100
    pub opposition_probability: u32,           // 0–100
    pub critical_conflicts_count: u32,
    pub high_risk_conflicts_count: u32,
    pub total_conflicts_found: u32,

    // Retrieval bookkeeping
    pub queries_executed: usize,
    pub failed_queries: usize,
    pub hits_collected: usize,

    /// Raw hits grouped by query purpose, for the LLM prompt
    pub search_results_summary: String,
}

impl TrademarkResearchResult {
    /// True when retrieval produced nothing usable, so scores sit on the
    /// no-conflict baseline for lack of data rather than lack of conflicts.
    pub fn is_low_confidence(&self) -> bool {
        self.hits_collected == 0 || self.failed_queries == self.queries_executed
    }
}
