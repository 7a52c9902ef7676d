//! Near-spelling variants of a brand name.
//!
//! This is a spelling heuristic, not a phonetic algorithm: each rule
//! rewrites only the first occurrence of its pattern and there is no
//! edit-distance or IPA modelling.

/// (pattern, replacement), applied in order to the lower-cased name.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("i", "ee"), ("i", "y"), ("ee", "i"),
    ("a", "ah"), ("a", "e"),
    ("c", "k"), ("k", "c"),
    ("ph", "f"), ("f", "ph"),
    ("s", "z"), ("z", "s"),
    ("x", "ks"), ("ks", "x"),
    ("ou", "u"), ("u", "ou"),
    ("oo", "u"), ("u", "oo"),
    ("ae", "e"), ("e", "ae"),
];

pub const MAX_VARIANTS: usize = 5;

/// Generate up to five variants in generation order. The lower-cased
/// original is never returned.
pub fn phonetic_variants(brand_name: &str) -> Vec<String> {
    let name = brand_name.to_lowercase();
    let mut candidates: Vec<String> = Vec::new();

    for (old, new) in SUBSTITUTIONS {
        if name.contains(old) {
            candidates.push(name.replacen(old, new, 1));
        }
    }

    if let Some(stem) = name.strip_suffix('a') {
        candidates.push(format!("{name}e"));
        candidates.push(stem.to_string());
    }
    if let Some(stem) = name.strip_suffix('e') {
        candidates.push(format!("{name}a"));
        candidates.push(stem.to_string());
    }

    let mut variants: Vec<String> = Vec::with_capacity(MAX_VARIANTS);
    for candidate in candidates {
        if candidate.is_empty() || candidate == name || variants.contains(&candidate) {
            continue;
        }
        variants.push(candidate);
        if variants.len() == MAX_VARIANTS {
            break;
        }
    }
    variants
}
