//! Lexical intent classification via verb-root matching.
//!
//! Roots match any inflection ("modifica", "modifiquen", "modificado")
//! through a prefix regex rather than exact containment, because user input
//! is free text with arbitrary conjugation.

use std::sync::LazyLock;

use regex::Regex;

use lexgraph_core::Intent;

use crate::canonical::normalize;

macro_rules! root_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

root_pattern!(RE_ROOT_MENTION, r"\bmencion\w*");
root_pattern!(RE_ROOT_MODIFY, r"\bmodific\w*");
root_pattern!(RE_ROOT_REPEAL, r"\bderog\w*");
root_pattern!(RE_ROOT_ARTICLE, r"\barticul\w*");

/// Topic keywords for the data-protection theme, post-normalization.
const TOPIC_KEYWORDS: [&str; 2] = ["proteccion de datos", "proteccion datos"];

fn has_root(normalized: &str, pattern: &LazyLock<Option<Regex>>) -> bool {
    pattern
        .as_ref()
        .is_some_and(|re| re.is_match(normalized))
}

/// Assign exactly one intent to a question.
///
/// The order is fixed and significant: a question matching several roots
/// ("menciona y modifica") resolves to the first in priority order — a
/// deliberate tie-break, not a bug. `HasArticles` additionally requires a
/// resolved canonical term: "qué artículos" with no document to anchor on
/// is not answerable by the articles template.
pub fn classify(question: &str, term: Option<&str>) -> Intent {
    let qn = normalize(question);

    if has_root(&qn, &RE_ROOT_MENTION) {
        return Intent::Mentions;
    }
    if has_root(&qn, &RE_ROOT_MODIFY) {
        return Intent::Modifies;
    }
    if has_root(&qn, &RE_ROOT_REPEAL) {
        return Intent::Repeals;
    }
    if has_root(&qn, &RE_ROOT_ARTICLE) && term.is_some() {
        return Intent::HasArticles;
    }
    if TOPIC_KEYWORDS.iter().any(|kw| qn.contains(kw)) {
        return Intent::AboutTopic;
    }
    Intent::Unrecognized
}
