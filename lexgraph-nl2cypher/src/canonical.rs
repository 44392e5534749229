//! Case/accent folding and domain-synonym resolution.
//!
//! Maps free-text mentions of Spanish data-protection norms (acronyms, long
//! names, BOE/CELEX spellings) to the canonical terms the template engine
//! parameterizes queries with. Pure functions over text.

use std::sync::LazyLock;

use regex::Regex;

use lexgraph_core::constants::{
    TERM_AEPD, TERM_LO_15_1999, TERM_LO_3_2018, TERM_MEMORIA_2024, TERM_RGPD,
};

macro_rules! term_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// RGPD / GDPR / Reglamento (UE) 2016/679
term_pattern!(RE_RGPD_ACRONYM, r"\brgpd\b");
term_pattern!(RE_GDPR_ACRONYM, r"\bgdpr\b");
term_pattern!(
    RE_RGPD_LONG,
    r"reglamento\s+general\s+de\s+proteccion\s+de\s+datos"
);
term_pattern!(
    RE_RGPD_REGULATION,
    r"reglamento\s*\(?\s*ue\s*\)?\s*2016\s*/\s*679"
);
term_pattern!(RE_RGPD_NUMBER, r"\b2016\s*/\s*679\b|\b2016\s+679\b");
term_pattern!(RE_RGPD_CANONICAL, r"\breglamento\s+ue\s+2016\s*679\b");

// LOPDGDD / LO 3/2018
term_pattern!(RE_LOPDGDD_ACRONYM, r"\blopdgdd\b");
term_pattern!(
    RE_LOPDGDD_LONG,
    r"ley\s+organica\s+de\s+proteccion\s+de\s+datos\s+y\s+garantia\s+de\s+derechos\s+digitales"
);
term_pattern!(
    RE_LO_3_2018,
    r"\blo\s*3\s*/\s*2018\b|\bley\s*organica\s*3\s*/\s*2018\b"
);

// LOPD / LO 15/1999
term_pattern!(RE_LOPD_ACRONYM, r"\blopd\b");
// Must stay AFTER the LOPDGDD long form in the scan order: the 3/2018 name
// starts with this exact phrase.
term_pattern!(RE_LOPD_LONG, r"ley\s+organica\s+de\s+proteccion\s+de\s+datos");
term_pattern!(
    RE_LO_15_1999,
    r"\blo\s*15\s*/\s*1999\b|\bley\s*organica\s*15\s*/\s*1999\b"
);

// AEPD
term_pattern!(RE_AEPD_ACRONYM, r"\baepd\b");
term_pattern!(
    RE_AEPD_LONG,
    r"agencia\s+espanola\s+de\s+proteccion\s+de\s+datos"
);

// Memoria AEPD 2024 (year-stamped report shortcut)
term_pattern!(
    RE_MEMORIA_2024,
    r"\bmemoria\s+(?:anual\s+)?aepd\s*2024\b|\bmemoria\s*2024\b|\baepd\s*2024\b"
);

term_pattern!(RE_QUOTED, r#""([^"]+)""#);

/// Ordered (pattern, canonical term) pairs. First match wins; specific
/// acronyms precede generic numeric patterns so overlaps resolve correctly.
fn synonym_table() -> [(&'static LazyLock<Option<Regex>>, &'static str); 15] {
    [
        (&RE_RGPD_ACRONYM, TERM_RGPD),
        (&RE_GDPR_ACRONYM, TERM_RGPD),
        (&RE_RGPD_LONG, TERM_RGPD),
        (&RE_RGPD_REGULATION, TERM_RGPD),
        (&RE_RGPD_NUMBER, TERM_RGPD),
        (&RE_RGPD_CANONICAL, TERM_RGPD),
        (&RE_LOPDGDD_ACRONYM, TERM_LO_3_2018),
        (&RE_LOPDGDD_LONG, TERM_LO_3_2018),
        (&RE_LO_3_2018, TERM_LO_3_2018),
        (&RE_LOPD_ACRONYM, TERM_LO_15_1999),
        (&RE_LOPD_LONG, TERM_LO_15_1999),
        (&RE_LO_15_1999, TERM_LO_15_1999),
        (&RE_AEPD_ACRONYM, TERM_AEPD),
        (&RE_AEPD_LONG, TERM_AEPD),
        (&RE_MEMORIA_2024, TERM_MEMORIA_2024),
    ]
}

/// Fold one character to its unaccented lowercase form.
/// Covers the accented letters that occur in Spanish legal text.
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

/// Lowercase, strip diacritics, collapse whitespace.
///
/// Hyphens become spaces; `/` is kept so norm numbers like `3/2018` and
/// `2016/679` survive normalization.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(fold_char)
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve the first matching synonym in the ordered table.
/// Expects already-normalized text.
pub fn resolve_synonym(normalized: &str) -> Option<&'static str> {
    for (pattern, canonical) in synonym_table() {
        let Some(re) = pattern.as_ref() else { continue };
        if re.is_match(normalized) {
            return Some(canonical);
        }
    }
    None
}

/// Extract the canonical document term a question talks about, if any.
///
/// Synonyms win over quoted literals; a small set of hard-coded domain
/// phrases is the last resort.
pub fn document_term(question: &str) -> Option<String> {
    let qn = normalize(question);
    if let Some(canonical) = resolve_synonym(&qn) {
        return Some(canonical.to_string());
    }
    if let Some(re) = RE_QUOTED.as_ref() {
        if let Some(caps) = re.captures(question) {
            return Some(normalize(&caps[1]));
        }
    }
    if qn.contains(TERM_MEMORIA_2024) {
        return Some(TERM_MEMORIA_2024.to_string());
    }
    None
}
