//! Heuristic conflict extraction from search hits.
//!
//! Each extractor is a pure function over the hits of one run and never
//! fails: a hit that matches no pattern simply yields no record. All of
//! them share two building blocks defined here:
//!
//! - [`HitView`]: a hit plus its lower-cased `title + " " + snippet` text
//! - [`BrandMatcher`]: brand relevance (exact substring or near-spelling
//!   variant)
//!
//! Hits are walked in [`canonical_order`], so the output of every
//! extractor depends on the set of hits, not on the order retrieval
//! happened to deliver them in.

pub mod common_law;
pub mod company;
pub mod precedent;
pub mod trademark;

use crate::models::SearchHit;
use crate::phonetic::phonetic_variants;

pub use common_law::extract_common_law_conflicts;
pub use company::extract_company_conflicts;
pub use precedent::extract_legal_precedents;
pub use trademark::extract_trademark_conflicts;

/// Normalized view of a single hit.
#[derive(Debug, Clone)]
pub struct HitView<'a> {
    pub hit: &'a SearchHit,
    /// Lower-cased `title snippet`.
    pub combined: String,
}

impl<'a> HitView<'a> {
    pub fn new(hit: &'a SearchHit) -> Self {
        Self {
            hit,
            combined: format!("{} {}", hit.title, hit.snippet).to_lowercase(),
        }
    }

    pub fn url_lower(&self) -> String {
        self.hit.url.to_lowercase()
    }

    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|kw| self.combined.contains(kw))
    }
}

/// Views over `hits`, sorted by `(query_index, url, title, snippet)`.
///
/// Earlier queries keep priority for first-found-wins dedup, and ties
/// inside one query are broken by content rather than arrival order.
pub fn canonical_order(hits: &[SearchHit]) -> Vec<HitView<'_>> {
    let mut sorted: Vec<&SearchHit> = hits.iter().collect();
    sorted.sort_by(|a, b| {
        (a.query_index, &a.url, &a.title, &a.snippet)
            .cmp(&(b.query_index, &b.url, &b.title, &b.snippet))
    });
    sorted.into_iter().map(HitView::new).collect()
}

/// How a hit was judged relevant to the brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandMatch {
    Exact,
    Variant,
}

/// Brand relevance test shared by the extractors.
#[derive(Debug, Clone)]
pub struct BrandMatcher {
    brand: String,
    brand_lower: String,
    variants: Vec<String>,
}

impl BrandMatcher {
    pub fn new(brand_name: &str) -> Self {
        let brand = brand_name.trim().to_string();
        let variants = if brand.is_empty() {
            Vec::new()
        } else {
            phonetic_variants(&brand)
        };
        Self {
            brand_lower: brand.to_lowercase(),
            brand,
            variants,
        }
    }

    /// Brand as supplied, trimmed.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn brand_lower(&self) -> &str {
        &self.brand_lower
    }

    /// Match against already lower-cased text. An empty brand matches
    /// nothing.
    pub fn matches(&self, text_lower: &str) -> Option<BrandMatch> {
        if self.brand_lower.is_empty() {
            return None;
        }
        if text_lower.contains(&self.brand_lower) {
            Some(BrandMatch::Exact)
        } else if self.variants.iter().any(|v| text_lower.contains(v.as_str())) {
            Some(BrandMatch::Variant)
        } else {
            None
        }
    }

    pub fn is_relevant(&self, view: &HitView<'_>) -> bool {
        self.matches(&view.combined).is_some()
    }

    /// True when the exact brand occurs in `text`, ignoring case.
    pub fn occurs_in(&self, text: &str) -> bool {
        !self.brand_lower.is_empty() && text.to_lowercase().contains(&self.brand_lower)
    }
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Fashion", &["fashion", "apparel", "clothing", "garment", "textile"]),
    ("Technology", &["technology", "software", "tech", "it ", "digital"]),
    ("Cosmetics", &["cosmetic", "beauty", "skincare", "personal care"]),
    ("Food", &["food", "beverage", "restaurant", "cafe", "f&b"]),
    ("Pharma", &["pharmaceutical", "pharma", "medicine", "drug", "healthcare"]),
    ("Finance", &["finance", "banking", "investment", "fintech"]),
    ("Education", &["education", "edtech", "learning", "training"]),
];

/// Best-effort industry label for free text. First table entry wins.
pub fn extract_industry_from_text(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(label, _)| label.to_string())
}

#[cfg(test)]
pub(crate) fn hit(index: usize, title: &str, url: &str, snippet: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
        source: "Mock".to_string(),
        query_purpose: format!("purpose {index}"),
        query_index: index,
    }
}
