//! End-to-end research runs against the in-memory provider.
//!
//! Run with: cargo test --package markscout-research --test test_research_e2e

use std::sync::Arc;
use std::time::Duration;

use markscout_common::{CompanyStatus, RiskLevel, TrademarkStatus};
use markscout_research::{
    conduct_trademark_research, format_research_for_prompt, MockSearchProvider, ResearchRequest,
    RetrievalConfig,
};
use tokio::sync::broadcast;

fn fast_config() -> RetrievalConfig {
    RetrievalConfig {
        batch_delay: Duration::ZERO,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_zero_hits_gives_baseline() {
    let provider = Arc::new(MockSearchProvider::new());
    let request = ResearchRequest::new("Zeno")
        .industry("Technology")
        .category("SaaS")
        .countries(["USA"]);

    let result = conduct_trademark_research(request, provider.clone(), &fast_config(), None).await;

    assert_eq!(result.nice_classification.code, 42);
    assert!(result.trademark_conflicts.is_empty());
    assert!(result.company_conflicts.is_empty());
    assert!(result.common_law_conflicts.is_empty());
    assert!(result.legal_precedents.is_empty());
    assert!((1..=3).contains(&result.overall_risk_score));
    assert!(result.registration_success_probability >= 85);
    assert_eq!(result.opposition_probability, 10);
    assert_eq!(result.queries_executed, 14);
    assert_eq!(provider.calls(), 14);
    assert_eq!(result.failed_queries, 0);
    assert!(result.is_low_confidence());
}

#[tokio::test]
async fn test_registered_company_hit_is_high_risk() {
    let provider = Arc::new(MockSearchProvider::new().with_hits(
        "Zen",
        vec![MockSearchProvider::hit(
            "\"ZenTech Pvt Ltd\"",
            "https://www.tofler.in/zentech-pvt-ltd/company/U72900KA2019PTC123456",
            "ZenTech Pvt Ltd trademark registered in class 9. Active company in Karnataka.",
        )],
    ));
    let request = ResearchRequest::new("Zen").industry("Technology").category("Software");

    let result = conduct_trademark_research(request, provider, &fast_config(), None).await;

    assert_eq!(result.countries, vec!["India"]);
    assert_eq!(result.trademark_conflicts.len(), 1);
    let tm = &result.trademark_conflicts[0];
    assert_eq!(tm.name, "ZenTech Pvt Ltd");
    assert_eq!(tm.status, Some(TrademarkStatus::Registered));
    assert_eq!(tm.class_number.as_deref(), Some("9"));
    assert_eq!(tm.risk_level, RiskLevel::High);

    assert_eq!(result.company_conflicts.len(), 1);
    let company = &result.company_conflicts[0];
    assert_eq!(company.risk_level, RiskLevel::High);
    assert_eq!(company.status, CompanyStatus::Active);
    assert_eq!(company.state.as_deref(), Some("Karnataka"));
    assert_eq!(company.source, "Tofler");

    // tofler is a registry, not informal usage
    assert!(result.common_law_conflicts.is_empty());

    assert_eq!(result.high_risk_conflicts_count, 2);
    assert_eq!(result.total_conflicts_found, 2);
    assert_eq!(result.overall_risk_score, 7);
    assert_eq!(result.registration_success_probability, 40);
    assert_eq!(result.opposition_probability, 80);
    assert!(!result.is_low_confidence());

    let prompt = format_research_for_prompt(&result);
    assert!(prompt.contains("COMPANY REGISTRY CONFLICTS:"));
    assert!(prompt.contains("Overall Risk Score: 7/10"));
}

#[tokio::test]
async fn test_failing_provider_still_completes() {
    let provider = Arc::new(MockSearchProvider::failing());
    let request = ResearchRequest::new("Zeno").industry("Fashion").category("Streetwear");

    let result = conduct_trademark_research(request, provider, &fast_config(), None).await;

    assert_eq!(result.failed_queries, result.queries_executed);
    assert_eq!(result.hits_collected, 0);
    assert_eq!(result.overall_risk_score, 1);
    assert_eq!(result.registration_success_probability, 90);
    assert_eq!(result.nice_classification.code, 25);
    assert!(result.is_low_confidence());
    assert!(format_research_for_prompt(&result).contains("LOW CONFIDENCE"));
}

#[tokio::test]
async fn test_progress_stages_in_order() {
    let (tx, mut rx) = broadcast::channel(16);
    let provider = Arc::new(MockSearchProvider::new());

    let result =
        conduct_trademark_research(ResearchRequest::new("Zeno"), provider, &fast_config(), Some(tx)).await;

    let mut stages = Vec::new();
    while let Ok(event) = rx.try_recv() {
        assert_eq!(event.run_id, result.run_id);
        stages.push(event.stage);
    }
    assert_eq!(stages, vec!["plan", "search", "extract", "score", "done"]);
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let provider = Arc::new(
        MockSearchProvider::new()
            .with_hits("\"Zeno\"", vec![MockSearchProvider::hit("\"Zeno Labs\"", "https://a.example.com", "pending")])
            .with_hits("\"Qwik\"", vec![MockSearchProvider::hit("\"Qwik Foods\"", "https://b.example.com", "registered")]),
    );
    let config = fast_config();

    let (zeno, qwik) = tokio::join!(
        conduct_trademark_research(ResearchRequest::new("Zeno"), provider.clone(), &config, None),
        conduct_trademark_research(ResearchRequest::new("Qwik"), provider.clone(), &config, None),
    );

    assert_ne!(zeno.run_id, qwik.run_id);
    let names = |r: &markscout_research::TrademarkResearchResult| -> Vec<String> {
        r.trademark_conflicts.iter().map(|c| c.name.clone()).collect()
    };
    assert_eq!(names(&zeno), vec!["Zeno Labs"]);
    assert_eq!(names(&qwik), vec!["Qwik Foods"]);
}
