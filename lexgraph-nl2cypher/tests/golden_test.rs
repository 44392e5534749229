//! Golden question fixtures: the rules pipeline checked end to end against
//! expected term, intent, sentinel flag, and Cypher fragments.

use serde::Deserialize;

use lexgraph_nl2cypher::{canonical, intent, rewrite, safety, templates};

#[derive(Debug, Deserialize)]
struct Fixture {
    description: String,
    input: Input,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct Input {
    question: String,
}

#[derive(Debug, Deserialize)]
struct Expected {
    term: Option<String>,
    intent: String,
    sentinel: bool,
    cypher_contains: Vec<String>,
}

#[test]
fn golden_questions() {
    let files = test_fixtures::list_fixtures("golden/questions");
    assert!(!files.is_empty(), "no golden question fixtures found");

    for file in files {
        let text = std::fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("reading {}: {e}", file.display()));
        let fx: Fixture = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("parsing {}: {e}", file.display()));
        let label = &fx.description;

        let term = canonical::document_term(&fx.input.question);
        assert_eq!(term.as_deref(), fx.expected.term.as_deref(), "term: {label}");

        let it = intent::classify(&fx.input.question, term.as_deref());
        assert_eq!(it.to_string(), fx.expected.intent, "intent: {label}");

        let cy = templates::build(&fx.input.question, it, term.as_deref());
        let cy = rewrite::rectify_aliases(&rewrite::normalize_projection(&cy));

        assert!(safety::is_safe(&cy), "safety: {label}");
        assert_eq!(
            cy.contains("question not recognized"),
            fx.expected.sentinel,
            "sentinel: {label}"
        );
        for fragment in &fx.expected.cypher_contains {
            assert!(
                cy.contains(fragment),
                "{label}: expected fragment {fragment:?} in:\n{cy}"
            );
        }
    }
}
