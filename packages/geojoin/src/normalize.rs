//! Region-name normalization.
//!
//! A deterministic pipeline applied symmetrically to statistics region
//! names and polygon names, so that "Landkreis Rosenheim" and the GADM
//! polygon "Rosenheim" produce the same normalized form. Normalization
//! is idempotent: running it on its own output changes nothing.

use regex::Regex;
use std::sync::LazyLock;

/// Administrative qualifier words stripped as whole tokens. These occur
/// on the statistics side ("Landkreis Rosenheim", "Stadt Augsburg") but
/// not in the GADM polygon names.
const QUALIFIER_TOKENS: &[&str] = &[
    "landkreis",
    "kreisfreie",
    "kreis",
    "stadt",
    "landeshauptstadt",
    "hansestadt",
    "wissenschaftsstadt",
    "freie",
    "region",
];

/// Regex to strip punctuation that does not contribute to matching.
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,/()'\-]+").expect("valid regex"));

/// Regex to collapse runs of whitespace into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Normalizes a region or polygon name into its comparable form.
///
/// The pipeline:
/// 1. Lowercase
/// 2. Transliterate umlauts and ß (ä→ae, ö→oe, ü→ue, ß→ss)
/// 3. Strip punctuation
/// 4. Drop administrative qualifier words as whole tokens
/// 5. Collapse whitespace and trim
#[must_use]
pub fn normalize_region(input: &str) -> String {
    let lower = input.to_lowercase();
    let transliterated = transliterate(&lower);
    let no_punct = PUNCTUATION_RE.replace_all(&transliterated, " ");

    let kept: Vec<&str> = no_punct
        .split_whitespace()
        .filter(|token| !QUALIFIER_TOKENS.contains(token))
        .collect();

    let joined = kept.join(" ");
    WHITESPACE_RE.replace_all(&joined, " ").trim().to_string()
}

/// Replaces German special characters with their ASCII digraphs.
fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_transliterates() {
        assert_eq!(normalize_region("München"), "muenchen");
        assert_eq!(normalize_region("Fürth"), "fuerth");
        assert_eq!(normalize_region("Gießen"), "giessen");
        assert_eq!(normalize_region("Köln"), "koeln");
    }

    #[test]
    fn strips_qualifier_words() {
        assert_eq!(normalize_region("Landkreis Rosenheim"), "rosenheim");
        assert_eq!(normalize_region("Stadt Augsburg"), "augsburg");
        assert_eq!(normalize_region("Kreis Düren"), "dueren");
        assert_eq!(normalize_region("Landeshauptstadt München"), "muenchen");
    }

    #[test]
    fn keeps_qualifiers_embedded_in_names() {
        // "Neustadt" contains "stadt" but is not the standalone token.
        assert_eq!(normalize_region("Neustadt"), "neustadt");
        assert_eq!(normalize_region("Ingolstadt"), "ingolstadt");
    }

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(
            normalize_region("Neustadt a.d. Waldnaab"),
            "neustadt a d waldnaab"
        );
        assert_eq!(normalize_region("Saale-Orla-Kreis"), "saale orla");
        assert_eq!(normalize_region("  Rosenheim   (Stadt)  "), "rosenheim");
    }

    #[test]
    fn is_idempotent() {
        for name in [
            "Landkreis Rosenheim",
            "Neustadt a.d. Waldnaab",
            "München",
            "Saale-Orla-Kreis",
            "Freie und Hansestadt Hamburg",
        ] {
            let once = normalize_region(name);
            assert_eq!(normalize_region(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn empty_and_qualifier_only_names_normalize_to_empty() {
        assert_eq!(normalize_region(""), "");
        assert_eq!(normalize_region("Landkreis"), "");
        assert_eq!(normalize_region("Stadt"), "");
    }
}
