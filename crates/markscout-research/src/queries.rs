//! Search query strategy.
//!
//! Builds the ordered list of queries for one research run, grouped in
//! fixed strategy batches. Queries are not deduplicated: overlapping
//! queries across batches are accepted in exchange for recall.

use serde::{Deserialize, Serialize};

use crate::classification::nice_classification;
use crate::phonetic::phonetic_variants;

/// Used when the request names no country.
pub const DEFAULT_COUNTRY: &str = "India";

/// Secondary countries beyond this many are ignored.
pub const MAX_SECONDARY_COUNTRIES: usize = 3;

/// Variants folded into the single OR-joined phonetic query.
pub const MAX_QUERY_VARIANTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    /// Human-readable label used to group results in the summary
    pub purpose: String,
}

impl SearchQuery {
    fn new(query: String, purpose: impl Into<String>) -> Self {
        Self { query, purpose: purpose.into() }
    }
}

/// Generate the ordered query list. `countries[0]` is the primary market.
pub fn generate_search_queries(
    brand_name: &str,
    industry: &str,
    category: &str,
    countries: &[String],
) -> Vec<SearchQuery> {
    let b = brand_name;
    let primary = countries.first().map(String::as_str).unwrap_or(DEFAULT_COUNTRY);
    let class_code = nice_classification(category, industry).code;
    let variants = phonetic_variants(brand_name);

    let mut queries = Vec::with_capacity(20);

    // Direct trademark searches
    queries.push(SearchQuery::new(
        format!("\"{b}\" trademark registered {primary}"),
        "Find registered trademarks with exact name",
    ));
    queries.push(SearchQuery::new(
        format!("\"{b}\" trademark application status"),
        "Find pending trademark applications",
    ));
    queries.push(SearchQuery::new(
        format!("{b} trademark class {class_code}"),
        "Find trademarks in same Nice class",
    ));

    // Brand / business searches
    queries.push(SearchQuery::new(
        format!("\"{b}\" brand {industry}"),
        "Find existing brands with same name in industry",
    ));
    queries.push(SearchQuery::new(
        format!("\"{b}\" {category} company"),
        "Find companies operating with this name",
    ));
    queries.push(SearchQuery::new(
        format!("{b} {category} existing brands competitors"),
        "Find market competitors with similar names",
    ));

    // Company registries
    queries.push(SearchQuery::new(
        format!("\"{b}\" private limited company {primary}"),
        "Find registered companies",
    ));
    queries.push(SearchQuery::new(
        format!("site:tofler.in \"{b}\""),
        "Search Tofler company database",
    ));
    queries.push(SearchQuery::new(
        format!("site:zaubacorp.com \"{b}\""),
        "Search Zauba Corp company database",
    ));

    // Phonetic similarity
    if !variants.is_empty() {
        let joined = variants
            .iter()
            .take(MAX_QUERY_VARIANTS)
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(" OR ");
        queries.push(SearchQuery::new(
            format!("({joined}) trademark {primary} {industry}"),
            "Find phonetically similar trademarks",
        ));
    }

    // Legal precedents
    queries.push(SearchQuery::new(
        format!("{primary} trademark phonetic similarity legal case {category}"),
        "Find relevant legal precedents",
    ));
    queries.push(SearchQuery::new(
        format!("trademark opposition {category} {primary} case law"),
        "Find opposition case precedents",
    ));

    // Secondary markets
    for country in countries.iter().skip(1).take(MAX_SECONDARY_COUNTRIES) {
        queries.push(SearchQuery::new(
            format!("\"{b}\" trademark {country} {category}"),
            format!("Find trademarks in {country}"),
        ));
    }

    // Trademark registries
    queries.push(SearchQuery::new(
        format!("site:trademarking.in \"{b}\""),
        "Search trademark aggregator",
    ));
    queries.push(SearchQuery::new(
        format!("site:ipindia.gov.in \"{b}\""),
        "Search IP India official site",
    ));

    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_base_layout() {
        let q = generate_search_queries("Zeno", "Technology", "SaaS", &countries(&["USA"]));
        // 9 fixed + phonetic + 2 legal + 2 registry
        assert_eq!(q.len(), 14);
        assert_eq!(q[0].query, "\"Zeno\" trademark registered USA");
        assert_eq!(q[2].query, "Zeno trademark class 42");
        assert_eq!(q[9].query, "(\"seno\" OR \"zaeno\") trademark USA Technology");
        assert_eq!(q[9].purpose, "Find phonetically similar trademarks");
        assert_eq!(q[13].query, "site:ipindia.gov.in \"Zeno\"");
    }

    #[test]
    fn test_default_primary_country() {
        let q = generate_search_queries("Zeno", "Technology", "SaaS", &[]);
        assert!(q[0].query.ends_with("India"));
        assert_eq!(q.len(), 14);
    }

    #[test]
    fn test_count_increases_with_countries_until_cap() {
        let base = ["USA", "UK", "Germany", "Japan", "Brazil"];
        let mut last = 0;
        for n in 1..=4 {
            let len = generate_search_queries("Zeno", "Tech", "SaaS", &countries(&base[..n])).len();
            assert!(len > last, "n={n}: {len} <= {last}");
            last = len;
        }
        let capped = generate_search_queries("Zeno", "Tech", "SaaS", &countries(&base)).len();
        assert_eq!(capped, last);
    }

    #[test]
    fn test_secondary_country_purpose_labels() {
        let q = generate_search_queries("Zeno", "Tech", "SaaS", &countries(&["India", "UK"]));
        let uk = q.iter().find(|q| q.purpose == "Find trademarks in UK").unwrap();
        assert_eq!(uk.query, "\"Zeno\" trademark UK SaaS");
    }

    #[test]
    fn test_phonetic_query_depends_on_variants() {
        // "Tom" yields no substitution and no trailing-vowel variant
        let without = generate_search_queries("Tom", "Tech", "SaaS", &countries(&["USA"]));
        let with = generate_search_queries("Tim", "Tech", "SaaS", &countries(&["USA"]));
        assert!(without.iter().all(|q| !q.purpose.contains("phonetically")));
        assert_eq!(with.len(), without.len() + 1);
    }

    #[test]
    fn test_phonetic_query_caps_variants() {
        let q = generate_search_queries("Phoenix", "Tech", "SaaS", &countries(&["USA"]));
        let phon = q.iter().find(|q| q.purpose.contains("phonetically")).unwrap();
        assert_eq!(phon.query.matches(" OR ").count(), MAX_QUERY_VARIANTS - 1);
    }
}
