//! Predicted-identifier extraction, robust to heterogeneous row shapes.
//!
//! Falls back through several strategies: a column literally named `id`,
//! then object-valued cells carrying an `id` key, then an `id: ...` pattern
//! match on a cell's text form, finally any string-typed column.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use lexgraph_core::models::Row;

static RE_ID_IN_TEXT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?i)\bid\b\s*[:=]\s*['"]?([\w\-./]+)"#).ok());

/// Cell value as plain text, without JSON string quoting.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pull an identifier out of one cell: an `id` key on an object value,
/// else a pattern match over the cell's text form.
fn cell_id(value: &serde_json::Value) -> Option<String> {
    if let Some(obj) = value.as_object() {
        if let Some(id) = obj.get("id").filter(|v| !v.is_null()) {
            return Some(cell_text(id));
        }
    }
    let text = cell_text(value);
    let re = RE_ID_IN_TEXT.as_ref()?;
    re.captures(&text).map(|caps| caps[1].to_string())
}

/// Extract the set of result identifiers from executed rows.
///
/// Empty input yields an empty set; an exhausted fallback chain does too.
pub fn extract_ids(rows: &[Row]) -> BTreeSet<String> {
    let Some(first) = rows.first() else {
        return BTreeSet::new();
    };
    let columns: Vec<&String> = first.keys().collect();

    // 1) Explicit id column.
    if let Some(col) = columns
        .iter()
        .find(|c| c.eq_ignore_ascii_case("id"))
    {
        return rows
            .iter()
            .filter_map(|row| row.get(*col))
            .filter(|v| !v.is_null())
            .map(|v| cell_text(v).trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // 2) Column sweep for cells that carry an id.
    for col in &columns {
        let got: BTreeSet<String> = rows
            .iter()
            .filter_map(|row| row.get(*col))
            .filter(|v| !v.is_null())
            .filter_map(cell_id)
            .collect();
        if !got.is_empty() {
            return got;
        }
    }

    // 3) Any string-typed column.
    for col in &columns {
        let got: BTreeSet<String> = rows
            .iter()
            .filter_map(|row| row.get(*col))
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !got.is_empty() {
            return got;
        }
    }

    BTreeSet::new()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn row(pairs: &[(&str, serde_json::Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>()
    }

    #[test]
    fn named_id_column_wins() {
        let rows = vec![
            row(&[
                ("id", serde_json::json!("boe-a-2018-16673")),
                ("title", serde_json::json!("LOPDGDD")),
            ]),
            row(&[
                ("id", serde_json::json!("boe-a-1999-23750")),
                ("title", serde_json::json!("LOPD")),
            ]),
        ];
        let ids = extract_ids(&rows);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("boe-a-2018-16673"));
    }

    #[test]
    fn object_cell_with_id_key() {
        let rows = vec![row(&[(
            "d",
            serde_json::json!({"id": "celex-32016r0679", "title": "RGPD"}),
        )])];
        let ids = extract_ids(&rows);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), ["celex-32016r0679"]);
    }

    #[test]
    fn pattern_match_on_cell_text() {
        let rows = vec![row(&[(
            "node",
            serde_json::json!("(:Document {id: 'boe-a-2018-16673', title: 'x'})"),
        )])];
        let ids = extract_ids(&rows);
        assert!(ids.contains("boe-a-2018-16673"));
    }

    #[test]
    fn falls_back_to_any_string_column() {
        let rows = vec![
            row(&[
                ("n", serde_json::json!(3)),
                ("titulo", serde_json::json!("Ley Orgánica 3/2018")),
            ]),
            row(&[
                ("n", serde_json::json!(4)),
                ("titulo", serde_json::json!("Ley Orgánica 15/1999")),
            ]),
        ];
        let ids = extract_ids(&rows);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("Ley Orgánica 3/2018"));
    }

    #[test]
    fn empty_rows_yield_empty_set() {
        assert!(extract_ids(&[]).is_empty());
        let rows = vec![row(&[("n", serde_json::json!(1))])];
        assert!(extract_ids(&rows).is_empty());
    }
}
