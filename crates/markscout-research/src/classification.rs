//! Nice classification lookup for a category / industry pair.

use crate::models::Classification;

/// Keyword → (class, description). Order matters: the first entry that
/// matches wins.
const NICE_CLASSES: &[(&str, u32, &str)] = &[
    ("fashion",        25, "Clothing, footwear, headgear"),
    ("apparel",        25, "Clothing, footwear, headgear"),
    ("streetwear",     25, "Clothing, footwear, headgear"),
    ("clothing",       25, "Clothing, footwear, headgear"),
    ("footwear",       25, "Clothing, footwear, headgear"),
    ("jewelry",        14, "Precious metals, jewelry, watches"),
    ("cosmetics",       3, "Cosmetics, cleaning preparations"),
    ("skincare",        3, "Cosmetics, cleaning preparations"),
    ("beauty",          3, "Cosmetics, cleaning preparations"),
    ("software",        9, "Scientific apparatus, computers, software"),
    ("technology",      9, "Scientific apparatus, computers, software"),
    ("tech",            9, "Scientific apparatus, computers, software"),
    ("app",             9, "Scientific apparatus, computers, software"),
    ("saas",           42, "Scientific and technological services"),
    ("food",           29, "Meat, fish, preserved foods"),
    ("restaurant",     43, "Food and drink services"),
    ("cafe",           43, "Food and drink services"),
    ("beverages",      32, "Beers, mineral waters, soft drinks"),
    ("pharmaceutical",  5, "Pharmaceuticals, medical preparations"),
    ("pharma",          5, "Pharmaceuticals, medical preparations"),
    ("healthcare",     44, "Medical and healthcare services"),
    ("education",      41, "Education, training, entertainment"),
    ("edtech",         41, "Education, training, entertainment"),
    ("finance",        36, "Insurance, financial affairs"),
    ("fintech",        36, "Insurance, financial affairs"),
    ("banking",        36, "Insurance, financial affairs"),
    ("real estate",    36, "Insurance, financial affairs, real estate"),
    ("automotive",     12, "Vehicles, apparatus for locomotion"),
    ("toys",           28, "Games, toys, sporting goods"),
    ("gaming",         28, "Games, toys, sporting goods"),
    ("furniture",      20, "Furniture, mirrors, picture frames"),
    ("home decor",     20, "Furniture, mirrors, picture frames"),
];

pub const DEFAULT_CLASS: u32 = 35;
pub const DEFAULT_DESCRIPTION: &str = "Advertising, business management, office functions";
pub const DEFAULT_MATCHED_TERM: &str = "general business";

/// Map a category / industry pair to a Nice class.
///
/// A keyword matches when it is a substring of the term or the term is a
/// substring of the keyword. Category is scanned before industry. Blank
/// terms are skipped. Never fails: unmatched input yields class 35.
pub fn nice_classification(category: &str, industry: &str) -> Classification {
    let terms = [category.trim().to_lowercase(), industry.trim().to_lowercase()];

    for term in terms.iter().filter(|t| !t.is_empty()) {
        for (keyword, code, description) in NICE_CLASSES {
            if term.contains(keyword) || keyword.contains(term.as_str()) {
                return Classification {
                    code: *code,
                    description: description.to_string(),
                    matched_term: keyword.to_string(),
                };
            }
        }
    }

    Classification {
        code: DEFAULT_CLASS,
        description: DEFAULT_DESCRIPTION.to_string(),
        matched_term: DEFAULT_MATCHED_TERM.to_string(),
    }
}
