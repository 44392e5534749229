//! Static deny-list scan for mutating or dangerous Cypher.
//!
//! Syntactic, not semantic: a denied substring inside a string literal also
//! rejects the query. Conservative on purpose — a rejected query is simply
//! discarded as "no query produced" and never executed.

/// Tokens denoting mutation or dangerous procedure calls.
const DENY_LIST: [&str; 9] = [
    " create ",
    " merge ",
    " delete ",
    " set ",
    " detach ",
    " drop ",
    " load csv",
    " call db.",
    " call apoc.create",
];

/// True when the query contains none of the denied tokens,
/// case-insensitively, with any whitespace counting as separation.
pub fn is_safe(query: &str) -> bool {
    let lowered = query.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    let padded = format!(" {collapsed} ");
    !DENY_LIST.iter().any(|tok| padded.contains(tok))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_read_query_is_safe() {
        assert!(is_safe(
            "MATCH (d:Document) RETURN d.id AS id, d.title AS title ORDER BY title"
        ));
    }

    #[test]
    fn rejects_each_deny_token() {
        let cases = [
            "CREATE (n:Document {id: 'x'}) RETURN n",
            "MERGE (n:Document {id: 'x'}) RETURN n",
            "MATCH (n) DELETE n RETURN 1",
            "MATCH (n) SET n.title = 'x' RETURN n",
            "MATCH (n) DETACH DELETE n",
            "DROP INDEX doc_idx",
            "LOAD CSV FROM 'file:///x.csv' AS row RETURN row",
            "CALL db.index.fulltext.queryNodes('ft', 'x') YIELD node RETURN node",
            "CALL apoc.create.node(['X'], {}) YIELD node RETURN node",
        ];
        for cy in cases {
            assert!(!is_safe(cy), "should reject: {cy}");
        }
    }

    #[test]
    fn case_and_newlines_do_not_evade_the_scan() {
        assert!(!is_safe("MATCH (n)\nSeT n.x = 1\nRETURN n"));
        assert!(!is_safe("match (n)\n\tdelete n"));
    }

    #[test]
    fn token_must_stand_alone() {
        // 'settings' and 'dataset' contain denied substrings but are words.
        assert!(is_safe(
            "MATCH (d:Document) WHERE d.title CONTAINS 'settings dataset' RETURN d.id AS id"
        ));
    }
}
