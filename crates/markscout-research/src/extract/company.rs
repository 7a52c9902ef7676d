//! Registered companies whose names collide with the brand.

use std::collections::HashSet;
use std::sync::OnceLock;

use markscout_common::{CompanyConflict, CompanyStatus, RiskLevel};
use regex::Regex;

use super::{canonical_order, extract_industry_from_text, BrandMatcher, HitView};
use crate::models::SearchHit;

const COMPANY_KEYWORDS: &[&str] = &[
    "private limited",
    "pvt ltd",
    "limited",
    "llp",
    "incorporated",
    "company",
    "enterprises",
    "corporation",
];

const INDIAN_STATES: &[(&str, &str)] = &[
    ("maharashtra", "Maharashtra"),
    ("delhi", "Delhi"),
    ("karnataka", "Karnataka"),
    ("tamil nadu", "Tamil Nadu"),
    ("telangana", "Telangana"),
    ("gujarat", "Gujarat"),
    ("west bengal", "West Bengal"),
    ("rajasthan", "Rajasthan"),
    ("kerala", "Kerala"),
    ("andhra pradesh", "Andhra Pradesh"),
];

/// Extract company conflicts, deduplicated case-insensitively by name.
pub fn extract_company_conflicts(hits: &[SearchHit], brand_name: &str) -> Vec<CompanyConflict> {
    let matcher = BrandMatcher::new(brand_name);
    let mut seen: HashSet<String> = HashSet::new();
    let mut conflicts = Vec::new();

    for view in canonical_order(hits) {
        if !matcher.is_relevant(&view) || !view.contains_any(COMPANY_KEYWORDS) {
            continue;
        }
        let Some(name) = company_name(&view.hit.title) else { continue };
        if !seen.insert(name.to_lowercase()) {
            continue;
        }

        let risk_level = if matcher.occurs_in(&name) {
            RiskLevel::High
        } else {
            RiskLevel::Medium
        };

        conflicts.push(CompanyConflict {
            cin: cin(&view),
            status: company_status(&view),
            incorporation_date: None,
            industry: extract_industry_from_text(&view.hit.snippet),
            state: state(&view),
            source: source_for_url(&view.hit.url).to_string(),
            overlap_analysis: None,
            risk_level,
            url: Some(view.hit.url.clone()),
            name,
        });
    }
    conflicts
}

/// Corporate Identification Number, e.g. `U72900MH2015PTC123456`.
fn cin(view: &HitView<'_>) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)[UL]\d{5}[A-Z]{2}\d{4}[A-Z]{3}\d{6}").unwrap());
    let raw = format!("{} {}", view.hit.title, view.hit.snippet);
    re.find(&raw).map(|m| m.as_str().to_string())
}

/// Capitalised words followed by a legal-entity suffix, matched on the
/// title. Returns the whole match including the suffix.
fn company_name(title: &str) -> Option<String> {
    static SUFFIXED: OnceLock<Regex> = OnceLock::new();
    static GENERIC: OnceLock<Regex> = OnceLock::new();

    let suffixed = SUFFIXED.get_or_init(|| {
        Regex::new(
            r"(?i)([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)\s+(?:Private Limited|Pvt\.?\s*Ltd\.?|Limited|LLP|Inc\.?)",
        )
        .unwrap()
    });
    let generic = GENERIC.get_or_init(|| {
        Regex::new(r"(?i)([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)\s+(?:Enterprises|Corporation|Company)")
            .unwrap()
    });

    [suffixed, generic]
        .into_iter()
        .find_map(|re| re.find(title))
        .map(|m| m.as_str().trim().to_string())
}

fn company_status(view: &HitView<'_>) -> CompanyStatus {
    let text = &view.combined;
    if text.contains("dissolved") || text.contains("struck off") {
        CompanyStatus::Dissolved
    } else if text.contains("inactive") {
        CompanyStatus::Inactive
    } else if text.contains("active") {
        CompanyStatus::Active
    } else {
        CompanyStatus::Unknown
    }
}

fn state(view: &HitView<'_>) -> Option<String> {
    INDIAN_STATES
        .iter()
        .find(|(needle, _)| view.combined.contains(needle))
        .map(|(_, label)| label.to_string())
}

fn source_for_url(url: &str) -> &'static str {
    if url.contains("tofler.in") {
        "Tofler"
    } else if url.contains("zaubacorp") {
        "Zauba Corp"
    } else if url.contains("mca.gov.in") {
        "MCA"
    } else {
        "Web Search"
    }
}
