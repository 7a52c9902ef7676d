//! Court decisions describing the legal landscape for a mark.
//!
//! Precedents are not tied to the brand: any hit with legal context
//! counts.

use std::collections::HashSet;
use std::sync::OnceLock;

use markscout_common::LegalPrecedent;
use regex::Regex;
use url::Url;

use super::{canonical_order, truncate_chars, HitView};
use crate::models::SearchHit;

pub const MAX_PRECEDENTS: usize = 5;
const CASE_NAME_MAX_CHARS: usize = 150;
const TITLE_FALLBACK_CHARS: usize = 100;
const RELEVANCE_MAX_CHARS: usize = 200;

const LEGAL_KEYWORDS: &[&str] = &[
    " v ",
    " vs ",
    "case",
    "judgment",
    "court",
    "tribunal",
    "infringement",
    "passing off",
    "section 29",
    "trade marks act",
];

/// Extract up to five precedents, first found wins on case name.
pub fn extract_legal_precedents(hits: &[SearchHit]) -> Vec<LegalPrecedent> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut precedents = Vec::new();

    for view in canonical_order(hits) {
        if precedents.len() == MAX_PRECEDENTS {
            break;
        }
        if !view.contains_any(LEGAL_KEYWORDS) {
            continue;
        }
        let case_name = truncate_chars(&case_name(&view.hit.title), CASE_NAME_MAX_CHARS);
        if case_name.trim().is_empty() || !seen.insert(case_name.to_lowercase()) {
            continue;
        }

        precedents.push(LegalPrecedent {
            case_name,
            court: court(&view).map(str::to_string),
            year: year(&view.combined),
            relevance: truncate_chars(&view.hit.snippet, RELEVANCE_MAX_CHARS),
            outcome: None,
            key_principle: None,
            source: Some(host_or_unknown(&view.hit.url)),
            url: (!view.hit.url.is_empty()).then(|| view.hit.url.clone()),
        });
    }
    precedents
}

/// `Party v. Party` from the title, else the first 100 characters of it.
fn case_name(title: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"([A-Z][a-zA-Z\s]+)\s+(?:v|vs|versus)\.?\s+([A-Z][a-zA-Z\s]+)").unwrap()
    });
    match re.captures(title) {
        Some(c) => format!("{} v. {}", c[1].trim(), c[2].trim()),
        None => truncate_chars(title, TITLE_FALLBACK_CHARS),
    }
}

fn court(view: &HitView<'_>) -> Option<&'static str> {
    let text = &view.combined;
    let high_court = text.contains("high court");
    if text.contains("supreme court") {
        Some("Supreme Court of India")
    } else if text.contains("delhi") && (high_court || text.contains("hc")) {
        Some("Delhi High Court")
    } else if text.contains("bombay") && high_court {
        Some("Bombay High Court")
    } else if high_court {
        Some("High Court")
    } else {
        None
    }
}

fn year(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\b(19|20)\d{2}\b").unwrap());
    re.find(text).map(|m| m.as_str().to_string())
}

fn host_or_unknown(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::hit;

    #[test]
    fn test_party_v_party() {
        let hits = vec![hit(
            10,
            "Yahoo Inc v. Akash Arora - Delhi High Court 1999",
            "https://indiankanoon.org/doc/1741869/",
            "Passing off of domain names; the court held that...",
        )];
        let precedents = extract_legal_precedents(&hits);
        assert_eq!(precedents.len(), 1);
        let p = &precedents[0];
        assert_eq!(p.case_name, "Yahoo Inc v. Akash Arora");
        assert_eq!(p.court.as_deref(), Some("Delhi High Court"));
        assert_eq!(p.year.as_deref(), Some("1999"));
        assert_eq!(p.source.as_deref(), Some("indiankanoon.org"));
        assert!(p.outcome.is_none());
    }

    #[test]
    fn test_vs_with_supreme_court() {
        let hits = vec![hit(
            9,
            "Cadila Health Care vs Cadila Pharmaceuticals (2001) Supreme Court",
            "https://example.org/cadila",
            "Phonetic similarity test for pharmaceutical marks",
        )];
        let precedents = extract_legal_precedents(&hits);
        assert_eq!(precedents[0].case_name, "Cadila Health Care v. Cadila Pharmaceuticals");
        assert_eq!(precedents[0].court.as_deref(), Some("Supreme Court of India"));
        assert_eq!(precedents[0].year.as_deref(), Some("2001"));
    }

    #[test]
    fn test_title_fallback_and_unknown_source() {
        let title = format!("Trademark infringement explained {}", "x".repeat(200));
        let hits = vec![hit(0, &title, "", "")];
        let precedents = extract_legal_precedents(&hits);
        assert_eq!(precedents[0].case_name.chars().count(), 100);
        assert_eq!(precedents[0].source.as_deref(), Some("Unknown"));
        assert_eq!(precedents[0].url, None);
        assert_eq!(precedents[0].court, None);
    }

    #[test]
    fn test_non_legal_hits_ignored() {
        let hits = vec![hit(0, "Zeno shoes online", "https://zeno.example.com", "buy now")];
        assert!(extract_legal_precedents(&hits).is_empty());
    }

    #[test]
    fn test_capped_and_deduplicated() {
        let mut hits: Vec<SearchHit> = (0..7)
            .map(|i| {
                hit(
                    i,
                    &format!("Alpha{} v. Beta", char::from(b'A' + i as u8)),
                    "https://indiankanoon.org/doc",
                    "high court judgment",
                )
            })
            .collect();
        hits.push(hit(0, "ALPHAA V. BETA", "https://other.example.org", "case"));

        let precedents = extract_legal_precedents(&hits);
        assert_eq!(precedents.len(), MAX_PRECEDENTS);
        assert_eq!(precedents[0].case_name, "AlphaA v. Beta");
        assert_eq!(precedents[0].court.as_deref(), Some("High Court"));
    }

    #[test]
    fn test_order_insensitive_under_cap() {
        let mut hits: Vec<SearchHit> = (0..7)
            .map(|i| {
                hit(
                    6 - i,
                    &format!("Alpha{} v. Beta", char::from(b'A' + i as u8)),
                    "https://indiankanoon.org/doc",
                    "high court judgment",
                )
            })
            .collect();
        hits.push(hit(0, "AlphaG v. Beta", "https://a.example.org", "supreme court case"));

        let forward = extract_legal_precedents(&hits);
        hits.reverse();
        let backward = extract_legal_precedents(&hits);
        hits.rotate_left(3);
        let rotated = extract_legal_precedents(&hits);

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
        assert_eq!(forward.len(), MAX_PRECEDENTS);
        assert_eq!(forward[0].case_name, "AlphaG v. Beta");
        assert_eq!(forward[0].court.as_deref(), Some("Supreme Court of India"));
        assert_eq!(forward[1].case_name, "AlphaF v. Beta");
    }
}
