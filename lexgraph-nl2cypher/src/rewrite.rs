//! Best-effort textual query rewrites, applied after generation regardless
//! of which generator produced the query.
//!
//! These are not a parser. Each rewrite is a narrow regex transformation
//! that returns its input unchanged when nothing matches, and each is
//! idempotent. The regex behavior is the contract; callers rely on the
//! exact normalized output.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static RE_PRIMARY_DOC: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bMATCH\s*\(\s*([a-zA-Z]\w*)\s*:\s*Document\b").ok());

static RE_NODE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\(\s*([a-zA-Z]\w*)\s*:\s*([A-Z]\w*)\s*\)").ok());

static RE_LABEL_PROP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Za-z0-9_]*)\.(\w+)\b").ok());

static RE_DOC_ALIAS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\(\s*([a-zA-Z]\w*)\s*:\s*Document\b").ok());

static RE_RETURN_TO_END: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)\bRETURN\b.*$").ok());

/// A variable occurrence is "bare" when it is not a property access
/// (`var.`), not aliased (`var AS x`), and not a prefix of a longer name.
fn is_bare_use(query: &str, end: usize) -> bool {
    let rest = &query[end..];
    if let Some(c) = rest.chars().next() {
        if c == '.' || c == '_' || c.is_alphanumeric() {
            return false;
        }
    }
    let mut after_ws = rest.trim_start().chars();
    let (a, s, boundary) = (after_ws.next(), after_ws.next(), after_ws.next());
    if a == Some('.') {
        return false;
    }
    if let (Some(a), Some(s)) = (a, s) {
        if a.eq_ignore_ascii_case(&'a')
            && s.eq_ignore_ascii_case(&'s')
            && boundary.map_or(true, |c| !c.is_alphanumeric() && c != '_')
        {
            return false;
        }
    }
    true
}

/// Replace every accepted match of `re` with `replacement`, splicing around
/// rejected candidates.
fn splice_matches<F>(query: &str, re: &Regex, accept: F, replacement: &str) -> String
where
    F: Fn(usize) -> bool,
{
    let mut out = String::with_capacity(query.len());
    let mut last = 0;
    for m in re.find_iter(query) {
        if !accept(m.end()) {
            continue;
        }
        out.push_str(&query[last..m.start()]);
        out.push_str(replacement);
        last = m.end();
    }
    out.push_str(&query[last..]);
    out
}

/// Rewrite a result clause that returns the primary `Document` variable bare
/// into the normalized two-field projection (`id`, `title`), and re-point a
/// bare `ORDER BY <var>` at the label field.
///
/// No-op when no `Document` pattern is bound or nothing returns it bare.
pub fn normalize_projection(query: &str) -> String {
    let Some(re_primary) = RE_PRIMARY_DOC.as_ref() else {
        return query.to_string();
    };
    let Some(caps) = re_primary.captures(query) else {
        return query.to_string();
    };
    let var = regex::escape(&caps[1]);
    let v = &caps[1];
    let projection = format!("{v}.id AS id, {v}.title AS title");

    let rewrites: [(String, String); 4] = [
        (
            format!(r"(?i)\bRETURN\s+DISTINCT\s+{var}\b"),
            format!("RETURN DISTINCT {projection}"),
        ),
        (
            format!(r"(?i)\bRETURN\s+{var}\b"),
            format!("RETURN {projection}"),
        ),
        (format!(r"(?i),\s*{var}\b"), format!(", {projection}")),
        (
            format!(r"(?i)\bORDER\s+BY\s+{var}\b"),
            "ORDER BY title".to_string(),
        ),
    ];

    let mut out = query.to_string();
    for (pattern, replacement) in &rewrites {
        let Ok(re) = Regex::new(pattern) else {
            return query.to_string();
        };
        let current = out.clone();
        out = splice_matches(&current, &re, |end| is_bare_use(&current, end), replacement);
    }
    out
}

/// Rewrite type-qualified field paths (`Topic.name`) to use the variable
/// bound to that label (`t.name`). First declaration of a label wins.
///
/// No-op when the query declares no node patterns or the label is unbound.
pub fn rectify_aliases(query: &str) -> String {
    let (Some(re_node), Some(re_prop)) = (RE_NODE_PATTERN.as_ref(), RE_LABEL_PROP.as_ref())
    else {
        return query.to_string();
    };

    let mut label_to_alias: HashMap<String, String> = HashMap::new();
    for caps in re_node.captures_iter(query) {
        label_to_alias
            .entry(caps[2].to_string())
            .or_insert_with(|| caps[1].to_string());
    }
    if label_to_alias.is_empty() {
        return query.to_string();
    }

    re_prop
        .replace_all(query, |caps: &regex::Captures<'_>| {
            match label_to_alias.get(&caps[1]) {
                Some(alias) => format!("{alias}.{}", &caps[2]),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Model-output reinforcement: when exactly one `Document` variable is
/// declared, force the whole result clause to the canonical two-field
/// projection ordered by title. Queries with zero or several `Document`
/// variables pass through untouched.
pub fn enforce_document_return(query: &str) -> String {
    let (Some(re_alias), Some(re_return)) = (RE_DOC_ALIAS.as_ref(), RE_RETURN_TO_END.as_ref())
    else {
        return query.to_string();
    };

    let mut aliases: Vec<String> = Vec::new();
    for caps in re_alias.captures_iter(query) {
        let alias = caps[1].to_string();
        if !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }
    if aliases.len() != 1 {
        return query.to_string();
    }
    let a = &aliases[0];

    let trimmed = query.trim();
    if !re_return.is_match(trimmed) {
        // No RETURN clause to rewrite.
        return query.to_string();
    }
    // RETURN-to-end swallows any trailing ORDER BY; re-attach the canonical one.
    let replaced = re_return.replace(
        trimmed,
        format!("RETURN DISTINCT {a}.id AS id, {a}.title AS title"),
    );
    format!("{replaced}\nORDER BY title")
}
