//! Short crime-label derivation.
//!
//! The source files carry long offense descriptions ("Gefährliche und
//! schwere Körperverletzung §§ 224, 226, 231 StGB" and similar) that are
//! unusable as chart labels. An ordered rule table maps them to short
//! canonical labels; rules are evaluated top-down and the first match
//! wins, so broader patterns must come after narrower ones. Text matched
//! by no rule falls back to truncation, keeping the label derivation
//! total as later years introduce new offense groups.

use opferdash_stats_models::TOTAL_LABEL;

/// How a rule's pattern is applied to the trimmed offense text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Pattern must occur anywhere in the text.
    Contains,
    /// Pattern must be a prefix of the text.
    StartsWith,
}

/// One prioritized mapping from raw offense text to a short label.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    /// How to apply `pattern`.
    pub kind: MatchKind,
    /// Substring or prefix to look for in the raw text.
    pub pattern: &'static str,
    /// Canonical short label to assign on match.
    pub label: &'static str,
}

/// Maximum length of a fallback label before truncation.
const FALLBACK_MAX: usize = 45;

/// The prioritized rule table, mirroring the offense groups of the
/// 2019-2024 Opfer tables. Order matters: first match wins.
pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        kind: MatchKind::Contains,
        pattern: "Gefährliche und schwere Körperverletzung",
        label: "Gefährliche/schwere KV",
    },
    LabelRule {
        kind: MatchKind::Contains,
        pattern: "Vorsätzliche einfache Körperverletzung",
        label: "Einfache KV",
    },
    LabelRule {
        kind: MatchKind::StartsWith,
        pattern: "Mord Totschlag",
        label: "Mord/Totschlag",
    },
    LabelRule {
        kind: MatchKind::Contains,
        pattern: "Vergewaltigung sexuelle Nötigung",
        label: "Sexualdelikte",
    },
    LabelRule {
        kind: MatchKind::StartsWith,
        pattern: "Straftaten insgesamt",
        label: TOTAL_LABEL,
    },
];

/// Derives the short crime label for a raw `Straftat` string.
///
/// Applies [`LABEL_RULES`] in order; unmatched text is trimmed to
/// [`FALLBACK_MAX`] characters with a `…` suffix.
#[must_use]
pub fn short_label(raw: &str) -> String {
    let text = raw.trim();

    for rule in LABEL_RULES {
        let hit = match rule.kind {
            MatchKind::Contains => text.contains(rule.pattern),
            MatchKind::StartsWith => text.starts_with(rule.pattern),
        };
        if hit {
            return rule.label.to_string();
        }
    }

    // Truncate on a char boundary; offense texts are free-form UTF-8.
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(FALLBACK_MAX).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
