//! Trademark filings mentioned in search hits.

use std::collections::HashSet;
use std::sync::OnceLock;

use markscout_common::{RiskLevel, TrademarkConflict, TrademarkStatus};
use regex::Regex;

use super::{canonical_order, truncate_chars, BrandMatch, BrandMatcher, HitView};
use crate::models::SearchHit;

const DETAILS_MAX_CHARS: usize = 200;

/// Status keywords in priority order. The first one present wins.
const STATUS_KEYWORDS: &[(&str, TrademarkStatus)] = &[
    ("registered", TrademarkStatus::Registered),
    ("pending", TrademarkStatus::Pending),
    ("objected", TrademarkStatus::Objected),
    ("opposed", TrademarkStatus::Opposed),
    ("abandoned", TrademarkStatus::Abandoned),
];

/// Extract trademark conflicts, deduplicated case-insensitively by name.
pub fn extract_trademark_conflicts(hits: &[SearchHit], brand_name: &str) -> Vec<TrademarkConflict> {
    let matcher = BrandMatcher::new(brand_name);
    let mut seen: HashSet<String> = HashSet::new();
    let mut conflicts = Vec::new();

    for view in canonical_order(hits) {
        let Some(brand_match) = matcher.matches(&view.combined) else { continue };
        let Some(name) = conflict_name(&view.hit.title, &matcher) else { continue };
        if !seen.insert(name.to_lowercase()) {
            continue;
        }

        let status = detect_status(&view);
        conflicts.push(TrademarkConflict {
            name,
            source: source_for_url(&view.hit.url).to_string(),
            conflict_type: "trademark_application".to_string(),
            application_number: application_number(&view.combined),
            status,
            owner: None,
            class_number: class_number(&view.combined),
            filing_date: None,
            similarity_score: Some(match brand_match {
                BrandMatch::Exact => "HIGH",
                BrandMatch::Variant => "MEDIUM",
            }.to_string()),
            industry_overlap: None,
            geographic_overlap: None,
            risk_level: risk_for_status(status),
            details: Some(truncate_chars(&view.hit.snippet, DETAILS_MAX_CHARS)),
            url: Some(view.hit.url.clone()),
        });
    }
    conflicts
}

fn detect_status(view: &HitView<'_>) -> Option<TrademarkStatus> {
    STATUS_KEYWORDS
        .iter()
        .find(|(kw, _)| view.combined.contains(kw))
        .map(|(_, status)| *status)
}

fn risk_for_status(status: Option<TrademarkStatus>) -> RiskLevel {
    match status {
        Some(TrademarkStatus::Registered) => RiskLevel::High,
        Some(TrademarkStatus::Objected) => RiskLevel::Low,
        _ => RiskLevel::Medium,
    }
}

fn source_for_url(url: &str) -> &'static str {
    if url.contains("trademarking.in") {
        "Trademarking.in"
    } else if url.contains("ipindia") {
        "IP India"
    } else if url.contains("justia") {
        "USPTO/Justia"
    } else {
        "Web Search"
    }
}

/// Indian application numbers are seven digits.
fn application_number(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\b(\d{7})\b").unwrap());
    re.captures(text).map(|c| c[1].to_string())
}

fn class_number(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"class\s*(\d{1,2})").unwrap());
    re.captures(text).map(|c| c[1].to_string())
}

/// Name of the conflicting mark, taken from the raw (cased) title.
///
/// Quoted text first, then a run of capitalised words next to
/// "trademark"/"brand"/"mark", then the brand itself if the title names it.
fn conflict_name(title: &str, matcher: &BrandMatcher) -> Option<String> {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    static BEFORE: OnceLock<Regex> = OnceLock::new();
    static AFTER: OnceLock<Regex> = OnceLock::new();

    let quoted = QUOTED.get_or_init(|| Regex::new(r#""([^"]+)""#).unwrap());
    if let Some(c) = quoted.captures(title) {
        return Some(c[1].to_string());
    }

    let before = BEFORE.get_or_init(|| {
        Regex::new(r"(\b[A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)\s+(?:trademark|brand|mark)").unwrap()
    });
    let after = AFTER.get_or_init(|| {
        Regex::new(r"(?:trademark|brand|mark)\s+(\b[A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)").unwrap()
    });
    for re in [before, after] {
        if let Some(c) = re.captures(title) {
            return Some(c[1].to_string());
        }
    }

    matcher.occurs_in(title).then(|| matcher.brand().to_string())
}
