//! Research pipeline orchestrator.
//!
//! Flow per run:
//!   1. Resolve the Nice class and plan the query strategy
//!   2. Retrieve hits in bounded batches (failures become empty results)
//!   3. Run the four extractors over the hits
//!   4. Score the trademark/company conflicts
//!   5. Assemble the result and the grouped evidence summary
//!
//! A run never fails. Every run owns its own hits and records; nothing is
//! shared between concurrent runs except the provider handle.

use std::sync::Arc;

use chrono::Utc;
use markscout_common::research_config::DefaultsConfig;
use markscout_ranker::calculate_risk_scores;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn, Span};
use uuid::Uuid;

use crate::classification::nice_classification;
use crate::extract::{
    extract_common_law_conflicts, extract_company_conflicts, extract_legal_precedents,
    extract_trademark_conflicts,
};
use crate::models::TrademarkResearchResult;
use crate::queries::{generate_search_queries, DEFAULT_COUNTRY};
use crate::retrieval::{RetrievalConfig, RetrievalEngine};
use crate::sources::SearchProvider;
use crate::summary::create_search_summary;

const DEFAULT_LABEL: &str = "General";

// ── Request ───────────────────────────────────────────────────────────────────

/// Input of one research run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub brand_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub category: String,
    /// First entry is the primary jurisdiction.
    #[serde(default)]
    pub countries: Vec<String>,
}

impl ResearchRequest {
    pub fn new(brand_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            ..Default::default()
        }
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Use the configured default country when the request names none.
    pub fn with_defaults(mut self, defaults: &DefaultsConfig) -> Self {
        if self.countries.iter().all(|c| c.trim().is_empty()) {
            self.countries = vec![defaults.country.clone()];
        }
        self
    }

    /// Trim every field and drop blank countries; India when none remain.
    /// Blank industry/category stay blank; only the result shows "General".
    pub fn normalized(self) -> Self {
        let mut countries: Vec<String> = self
            .countries
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if countries.is_empty() {
            countries.push(DEFAULT_COUNTRY.to_string());
        }
        Self {
            brand_name: self.brand_name.trim().to_string(),
            industry: self.industry.trim().to_string(),
            category: self.category.trim().to_string(),
            countries,
        }
    }
}

/// Label shown in the result for a blank industry or category.
fn display_label(value: String) -> String {
    if value.is_empty() { DEFAULT_LABEL.to_string() } else { value }
}

// ── Progress events ───────────────────────────────────────────────────────────

/// Progress event emitted during a run (cloneable for broadcast).
#[derive(Debug, Clone, Serialize)]
pub struct ResearchProgress {
    pub run_id: Uuid,
    /// plan | search | extract | score | done
    pub stage: String,
    pub message: String,
    pub queries_planned: usize,
    pub hits_collected: usize,
    pub failed_queries: usize,
    pub conflicts_found: usize,
}

impl ResearchProgress {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            stage: String::new(),
            message: String::new(),
            queries_planned: 0,
            hits_collected: 0,
            failed_queries: 0,
            conflicts_found: 0,
        }
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

/// Run one complete trademark research.
///
/// Progress events are sent via `progress_tx` if provided; a closed or
/// lagging receiver never affects the run.
#[instrument(
    skip(request, provider, config, progress_tx),
    fields(brand = %request.brand_name, run_id = tracing::field::Empty)
)]
pub async fn conduct_trademark_research(
    request: ResearchRequest,
    provider: Arc<dyn SearchProvider>,
    config: &RetrievalConfig,
    progress_tx: Option<broadcast::Sender<ResearchProgress>>,
) -> TrademarkResearchResult {
    let run_id = Uuid::new_v4();
    Span::current().record("run_id", tracing::field::display(run_id));

    let request = request.normalized();
    let mut progress = ResearchProgress::new(run_id);
    let emit = |stage: &str, message: String, progress: &mut ResearchProgress| {
        progress.stage = stage.to_string();
        progress.message = message;
        if let Some(ref tx) = progress_tx {
            let _ = tx.send(progress.clone());
        }
    };

    // ── 1. Plan ───────────────────────────────────────────────────────────────
    let classification = nice_classification(&request.category, &request.industry);
    let queries = generate_search_queries(
        &request.brand_name,
        &request.industry,
        &request.category,
        &request.countries,
    );
    info!(
        industry = %request.industry,
        class = classification.code,
        n_queries = queries.len(),
        provider = provider.name(),
        "🔍 Starting trademark research"
    );
    progress.queries_planned = queries.len();
    emit(
        "plan",
        format!("Class {} ({}), {} queries", classification.code, classification.matched_term, queries.len()),
        &mut progress,
    );

    // ── 2. Retrieve ───────────────────────────────────────────────────────────
    emit("search", format!("Searching via {}", provider.name()), &mut progress);
    let engine = RetrievalEngine::new(Arc::clone(&provider), config.clone());
    let retrieval = engine.execute(&queries).await;
    let hits = retrieval.hits;

    progress.hits_collected = hits.len();
    progress.failed_queries = retrieval.failed_queries;
    if hits.is_empty() {
        warn!(failed = retrieval.failed_queries, "No search results collected, scores will sit on the baseline");
    }

    // ── 3. Extract ────────────────────────────────────────────────────────────
    emit("extract", format!("Extracting conflicts from {} results", hits.len()), &mut progress);
    let trademark_conflicts = extract_trademark_conflicts(&hits, &request.brand_name);
    let company_conflicts = extract_company_conflicts(&hits, &request.brand_name);
    let common_law_conflicts =
        extract_common_law_conflicts(&hits, &request.brand_name, &request.industry);
    let legal_precedents = extract_legal_precedents(&hits);
    info!(
        trademarks = trademark_conflicts.len(),
        companies = company_conflicts.len(),
        common_law = common_law_conflicts.len(),
        precedents = legal_precedents.len(),
        "Extracted conflicts"
    );

    // ── 4. Score ──────────────────────────────────────────────────────────────
    let scores = calculate_risk_scores(&trademark_conflicts, &company_conflicts, &common_law_conflicts);
    progress.conflicts_found = scores.total_conflicts_found as usize;
    emit(
        "score",
        format!("Risk {}/10, success {}%", scores.overall_risk_score, scores.registration_success_probability),
        &mut progress,
    );

    // ── 5. Assemble ───────────────────────────────────────────────────────────
    let result = TrademarkResearchResult {
        run_id,
        brand_name: request.brand_name,
        industry: display_label(request.industry),
        category: display_label(request.category),
        countries: request.countries,
        research_timestamp: Utc::now(),
        nice_classification: classification,
        trademark_conflicts,
        company_conflicts,
        common_law_conflicts,
        legal_precedents,
        overall_risk_score: scores.overall_risk_score,
        registration_success_probability: scores.registration_success_probability,
        opposition_probability: scores.opposition_probability,
        critical_conflicts_count: scores.critical_conflicts_count,
        high_risk_conflicts_count: scores.high_risk_conflicts_count,
        total_conflicts_found: scores.total_conflicts_found,
        queries_executed: retrieval.queries_executed,
        failed_queries: retrieval.failed_queries,
        hits_collected: hits.len(),
        search_results_summary: create_search_summary(&hits),
    };

    info!(
        risk = result.overall_risk_score,
        conflicts = result.total_conflicts_found,
        "✅ Trademark research complete"
    );
    emit("done", "Research complete".to_string(), &mut progress);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sources::MockSearchProvider;
    use markscout_common::RiskLevel;

    #[test]
    fn test_request_defaults() {
        let request = ResearchRequest::new("  Zeno ").countries(["", "  "]).normalized();
        assert_eq!(request.brand_name, "Zeno");
        assert_eq!(request.industry, "");
        assert_eq!(request.category, "");
        assert_eq!(request.countries, vec!["India"]);
    }

    #[test]
    fn test_configured_default_country() {
        let defaults = DefaultsConfig { country: "USA".to_string() };
        let request = ResearchRequest::new("Zeno").with_defaults(&defaults).normalized();
        assert_eq!(request.countries, vec!["USA"]);

        let explicit = ResearchRequest::new("Zeno").countries(["UK"]).with_defaults(&defaults);
        assert_eq!(explicit.countries, vec!["UK"]);
    }

    #[tokio::test]
    async fn test_blank_industry_is_display_only() {
        let provider = Arc::new(MockSearchProvider::new().with_hits(
            "Zeno",
            vec![MockSearchProvider::hit(
                "Zeno Shop",
                "https://zenoshop.example.com/",
                "General store, buy online",
            )],
        ).fail_on("General"));
        let config = RetrievalConfig { batch_delay: std::time::Duration::ZERO, ..Default::default() };

        let result =
            conduct_trademark_research(ResearchRequest::new("Zeno"), provider, &config, None).await;

        assert_eq!(result.industry, "General");
        assert_eq!(result.category, "General");
        // No planned query carries the placeholder label.
        assert_eq!(result.failed_queries, 0);
        let matches: Vec<_> = result
            .common_law_conflicts
            .iter()
            .map(|c| (c.industry_match, c.risk_level))
            .collect();
        assert_eq!(matches, vec![(false, RiskLevel::Low)]);
    }

    #[test]
    fn test_request_keeps_values() {
        let request = ResearchRequest::new("Zeno")
            .industry("Technology")
            .category("SaaS")
            .countries(["USA", "India"])
            .normalized();
        assert_eq!(request.industry, "Technology");
        assert_eq!(request.countries, vec!["USA", "India"]);
    }
}
