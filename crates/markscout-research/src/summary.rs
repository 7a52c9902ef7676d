//! Rendering of research findings for the downstream LLM prompt.
//!
//! Pure formatting: no extraction or scoring happens here.

use crate::extract::truncate_chars;
use crate::models::{SearchHit, TrademarkResearchResult};

const HITS_PER_PURPOSE: usize = 5;
const SUMMARY_TITLE_CHARS: usize = 100;
const SUMMARY_SNIPPET_CHARS: usize = 150;
const PRECEDENT_RELEVANCE_CHARS: usize = 100;

const ANALYSIS_INSTRUCTIONS: &str = "
📝 INSTRUCTIONS FOR ANALYSIS:
-----------------------------
1. Use the above REAL data to populate the trademark analysis sections
2. If critical/high conflicts exist, explain their specific impact
3. Reference specific application numbers and company names where found
4. Calculate opposition risk based on the actual conflicts discovered
5. Provide mitigation strategies specific to the conflicts found
6. If conflicts exist in the same Nice class, this is HIGH priority
7. Company conflicts in the same industry = common law trademark risk
";

/// Raw hits grouped by query purpose, in first-seen purpose order, at
/// most five per group.
pub fn create_search_summary(hits: &[SearchHit]) -> String {
    let mut groups: Vec<(&str, Vec<&SearchHit>)> = Vec::new();
    for hit in hits {
        match groups.iter_mut().find(|(purpose, _)| *purpose == hit.query_purpose) {
            Some((_, members)) => members.push(hit),
            None => groups.push((hit.query_purpose.as_str(), vec![hit])),
        }
    }

    let mut lines = Vec::new();
    for (purpose, members) in groups {
        lines.push(format!("\n### {purpose}"));
        for hit in members.into_iter().take(HITS_PER_PURPOSE) {
            lines.push(format!(
                "- {}: {}",
                truncate_chars(&hit.title, SUMMARY_TITLE_CHARS),
                truncate_chars(&hit.snippet, SUMMARY_SNIPPET_CHARS)
            ));
        }
    }
    lines.join("\n")
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

/// Full research context block for the LLM prompt.
pub fn format_research_for_prompt(result: &TrademarkResearchResult) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(format!(
        "
⚠️ REAL-TIME TRADEMARK RESEARCH DATA ⚠️
========================================
Brand: {}
Industry: {}
Category: {}
Target Countries: {}
Nice Classification: Class {} - {}
Research Timestamp: {}
",
        result.brand_name,
        result.industry,
        result.category,
        result.countries.join(", "),
        result.nice_classification.code,
        result.nice_classification.description,
        result.research_timestamp.to_rfc3339(),
    ));

    sections.push(format!(
        "
📊 RISK ASSESSMENT SUMMARY
--------------------------
Overall Risk Score: {}/10
Registration Success Probability: {}%
Opposition Probability: {}%
Total Conflicts Found: {}
  - Critical: {}
  - High Risk: {}
",
        result.overall_risk_score,
        result.registration_success_probability,
        result.opposition_probability,
        result.total_conflicts_found,
        result.critical_conflicts_count,
        result.high_risk_conflicts_count,
    ));

    if result.is_low_confidence() {
        sections.push(format!(
            "\n⚠️ LOW CONFIDENCE: {} of {} searches failed and {} results were collected. \
             Scores reflect missing data, not a confirmed absence of conflicts.",
            result.failed_queries, result.queries_executed, result.hits_collected
        ));
    }

    if result.trademark_conflicts.is_empty() {
        sections.push("\n✅ NO DIRECT TRADEMARK CONFLICTS FOUND IN SEARCH".to_string());
    } else {
        sections.push("\n🔴 TRADEMARK CONFLICTS FOUND:".to_string());
        for (i, c) in result.trademark_conflicts.iter().take(10).enumerate() {
            sections.push(format!(
                "
  {}. {}
     Source: {}
     Status: {}
     Application #: {}
     Class: {}
     Risk Level: {}
     Details: {}
",
                i + 1,
                c.name,
                c.source,
                c.status.map(|s| s.to_string()).unwrap_or_else(|| "Unknown".to_string()),
                or_na(c.application_number.as_deref()),
                or_na(c.class_number.as_deref()),
                c.risk_level,
                or_na(c.details.as_deref().filter(|d| !d.is_empty())),
            ));
        }
    }

    if result.company_conflicts.is_empty() {
        sections.push("\n✅ NO COMPANY REGISTRY CONFLICTS FOUND".to_string());
    } else {
        sections.push("\n🏢 COMPANY REGISTRY CONFLICTS:".to_string());
        for (i, c) in result.company_conflicts.iter().take(10).enumerate() {
            sections.push(format!(
                "
  {}. {}
     CIN: {}
     Status: {}
     Industry: {}
     State: {}
     Source: {}
     Risk Level: {}
",
                i + 1,
                c.name,
                or_na(c.cin.as_deref()),
                c.status,
                or_na(c.industry.as_deref()),
                or_na(c.state.as_deref()),
                c.source,
                c.risk_level,
            ));
        }
    }

    if !result.common_law_conflicts.is_empty() {
        sections.push("\n📱 COMMON LAW / ONLINE PRESENCE CONFLICTS:".to_string());
        for (i, c) in result.common_law_conflicts.iter().take(5).enumerate() {
            sections.push(format!(
                "
  {}. {}
     Platform: {}
     Industry Match: {}
     Risk Level: {}
",
                i + 1,
                c.name,
                c.platform,
                if c.industry_match { "Yes" } else { "No" },
                c.risk_level,
            ));
        }
    }

    if !result.legal_precedents.is_empty() {
        sections.push("\n⚖️ RELEVANT LEGAL PRECEDENTS:".to_string());
        for (i, p) in result.legal_precedents.iter().take(5).enumerate() {
            let relevance = if p.relevance.is_empty() {
                "N/A".to_string()
            } else {
                truncate_chars(&p.relevance, PRECEDENT_RELEVANCE_CHARS)
            };
            sections.push(format!(
                "
  {}. {}
     Court: {}
     Year: {}
     Relevance: {}
",
                i + 1,
                p.case_name,
                or_na(p.court.as_deref()),
                or_na(p.year.as_deref()),
                relevance,
            ));
        }
    }

    if !result.search_results_summary.is_empty() {
        sections.push("\n🔎 SEARCH EVIDENCE BY QUERY PURPOSE:".to_string());
        sections.push(result.search_results_summary.clone());
    }

    sections.push(ANALYSIS_INSTRUCTIONS.to_string());
    sections.join("\n")
}

/// One-paragraph digest for terminal output.
pub fn format_brief(result: &TrademarkResearchResult) -> String {
    let mut brief = format!(
        "{} ({} / {}, class {}): risk {}/10, registration success {}%, opposition {}%\n\
         conflicts: {} total ({} trademark, {} company, {} common-law), {} precedents\n\
         searches: {} run, {} failed, {} results",
        result.brand_name,
        result.industry,
        result.category,
        result.nice_classification.code,
        result.overall_risk_score,
        result.registration_success_probability,
        result.opposition_probability,
        result.total_conflicts_found,
        result.trademark_conflicts.len(),
        result.company_conflicts.len(),
        result.common_law_conflicts.len(),
        result.legal_precedents.len(),
        result.queries_executed,
        result.failed_queries,
        result.hits_collected,
    );
    if result.is_low_confidence() {
        brief.push_str("\nwarning: low confidence, no usable search results");
    }
    brief
}
