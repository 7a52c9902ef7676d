//! Operating businesses using the name without a formal registration.

use std::collections::HashSet;
use std::sync::OnceLock;

use markscout_common::{CommonLawConflict, RiskLevel};
use regex::Regex;

use super::{canonical_order, truncate_chars, BrandMatcher, HitView};
use crate::models::SearchHit;

pub const MAX_COMMON_LAW_CONFLICTS: usize = 10;
const SNIPPET_MAX_CHARS: usize = 150;

const BUSINESS_SIGNALS: &[&str] = &[
    "shop", "store", "buy", "order", "instagram", "facebook", "@", "official", "website",
    "online", ".com", "ecommerce",
];

/// URL markers of registries and legal sites. Those hits are formal
/// records, counted by the other extractors.
const REGISTRY_URL_MARKERS: &[&str] = &[
    "trademark", "ipindia", "wipo", "uspto", "tofler", "mca.gov", "court", "legal", "law",
];

/// Extract up to ten common-law conflicts, deduplicated by name.
pub fn extract_common_law_conflicts(
    hits: &[SearchHit],
    brand_name: &str,
    industry: &str,
) -> Vec<CommonLawConflict> {
    let matcher = BrandMatcher::new(brand_name);
    let industry_lower = industry.trim().to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut conflicts = Vec::new();

    for view in canonical_order(hits) {
        if conflicts.len() == MAX_COMMON_LAW_CONFLICTS {
            break;
        }
        if !matcher.is_relevant(&view) || !view.contains_any(BUSINESS_SIGNALS) || is_registry(&view) {
            continue;
        }
        let Some(name) = business_name(&view.hit.title, &matcher) else { continue };
        if !seen.insert(name.to_lowercase()) {
            continue;
        }

        let industry_match = !industry_lower.is_empty() && view.combined.contains(&industry_lower);
        conflicts.push(CommonLawConflict {
            name,
            platform: platform(&view).to_string(),
            industry_match,
            url: view.hit.url.clone(),
            snippet: truncate_chars(&view.hit.snippet, SNIPPET_MAX_CHARS),
            risk_type: "common_law".to_string(),
            risk_level: if industry_match { RiskLevel::Medium } else { RiskLevel::Low },
        });
    }
    conflicts
}

fn is_registry(view: &HitView<'_>) -> bool {
    let url = view.url_lower();
    REGISTRY_URL_MARKERS.iter().any(|m| url.contains(m))
}

fn platform(view: &HitView<'_>) -> &'static str {
    let url = view.url_lower();
    if url.contains("instagram") || view.combined.contains("instagram") {
        "Instagram"
    } else if url.contains("facebook") || view.combined.contains("facebook") {
        "Facebook"
    } else if url.contains("amazon") {
        "Amazon"
    } else if url.contains("flipkart") {
        "Flipkart"
    } else {
        "Website"
    }
}

/// Social handle, else "X Official|Shop|Store", else the brand if the
/// title names it.
fn business_name(title: &str, matcher: &BrandMatcher) -> Option<String> {
    static HANDLE: OnceLock<Regex> = OnceLock::new();
    static STOREFRONT: OnceLock<Regex> = OnceLock::new();

    let handle = HANDLE.get_or_init(|| Regex::new(r"(@\w+)").unwrap());
    let storefront = STOREFRONT.get_or_init(|| {
        Regex::new(r"([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)\s+(?:Official|Shop|Store)").unwrap()
    });

    [handle, storefront]
        .into_iter()
        .find_map(|re| re.captures(title))
        .map(|c| c[1].to_string())
        .or_else(|| matcher.occurs_in(title).then(|| matcher.brand().to_string()))
}
