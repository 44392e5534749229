//! Model-backed query generation: prompt contract and response scraping.
//!
//! The model is asked to answer with exactly one fenced ```cypher block, or
//! the literal sentinel when it cannot generate. Anything else is accepted
//! only if it visually resembles a query.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use lexgraph_core::constants::MODEL_FALLBACK_SENTINEL;
use lexgraph_core::traits::IModelClient;

/// System instructions: schema description plus output contract, with
/// few-shot NL → Cypher examples.
pub const SYSTEM_PROMPT: &str = r#"You are a READ-ONLY Cypher generator. Schema:

(:Document {id, title, type, date, in_force})
  -[:HAS_ARTICLE]-> (:Article {id, doc?, number, title, text})
(:Document)-[:ABOUT_TOPIC]->(:Topic {name, norm?})
(:Document)-[:MENTIONS]->(:Entity {name, norm?})
(:Document)-[:MENTIONS_DOC]->(:Document)
(:Document)-[:REPEALS]->(:Document)
(:Document)-[:MODIFIES]->(:Document)

Rules:
- ONLY MATCH/OPTIONAL MATCH/WHERE/RETURN/ORDER/LIMIT. Never CREATE/MERGE/DELETE/SET.
- ALWAYS declare a main alias `d` for the (:Document) rows you want to list.
- Return EXACTLY:
  RETURN DISTINCT d.id AS id, d.title AS title
  (and ORDER BY title if needed)
- Never return the whole node `d`. Always return the requested properties.
- Answer with ONLY one ```cypher ...``` block.
- If you cannot, answer exactly: FALLBACK

Examples (NL -> Cypher):

- ¿Qué documentos mencionan RGPD?
```cypher
MATCH (d:Document)-[:MENTIONS]->(e:Entity)
WHERE toLower(coalesce(e.norm, e.name)) CONTAINS 'rgpd'
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title
```

- Documentos que mencionan la Ley Orgánica 3/2018
```cypher
MATCH (d:Document)-[:MENTIONS_DOC]->(x:Document)
WHERE toLower(x.id) CONTAINS 'boe-a-2018-16673'
   OR toLower(x.title) CONTAINS 'lo 3 2018'
   OR toLower(x.title) CONTAINS 'ley organica 3/2018'
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title
```

- Documentos que tratan sobre Protección de Datos vigentes
```cypher
MATCH (d:Document)-[:ABOUT_TOPIC]->(t:Topic)
WHERE coalesce(d.in_force, true) = true
  AND toLower(coalesce(t.norm, t.name)) CONTAINS 'proteccion de datos'
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title
```

- ¿Qué deroga LO 3/2018?
```cypher
MATCH (d:Document)-[:REPEALS]->(d2:Document)
WHERE toLower(d2.id) CONTAINS 'boe-a-2018-16673'
   OR toLower(d2.title) CONTAINS 'lo 3 2018'
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title
```

- Documentos que modifiquen LO 3/2018 y traten sobre consentimiento
```cypher
MATCH (d:Document)-[:MODIFIES]->(d2:Document)
WHERE toLower(d2.id) CONTAINS 'boe-a-2018-16673'
   OR toLower(d2.title) CONTAINS 'lo 3 2018'
WITH DISTINCT d
MATCH (d)-[:HAS_ARTICLE]->(a:Article)
WHERE toLower(coalesce(a.title, '')) CONTAINS 'consentimiento'
   OR toLower(coalesce(a.text, '')) CONTAINS 'consentimiento'
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title
```"#;

static RE_FENCED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:cypher)?\s*(.+?)```").ok());

/// Extract a query from raw model output.
///
/// Fenced code block first, then the explicit sentinel, then a heuristic
/// accept when the text looks like Cypher. `None` means "cannot generate".
pub fn scrape_response(content: &str) -> Option<String> {
    if let Some(re) = RE_FENCED.as_ref() {
        if let Some(caps) = re.captures(content) {
            return Some(caps[1].trim().to_string());
        }
    }
    if content.contains(MODEL_FALLBACK_SENTINEL) {
        return None;
    }
    let lower = content.to_lowercase();
    let looks_like_cypher = lower.contains("match") || lower.contains("return");
    if looks_like_cypher {
        Some(content.trim().to_string())
    } else {
        None
    }
}

/// Ask the model collaborator for a query.
///
/// Any client error is logged and treated as the "cannot generate" sentinel;
/// model failure is never fatal to the question-answering flow.
pub fn generate(client: &dyn IModelClient, question: &str) -> Option<String> {
    match client.complete(SYSTEM_PROMPT, question.trim()) {
        Ok(content) => scrape_response(&content),
        Err(err) => {
            warn!(model = client.model_name(), error = %err, "model call failed");
            None
        }
    }
}
