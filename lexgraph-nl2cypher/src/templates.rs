//! Per-intent Cypher synthesis.
//!
//! Each intent maps to one or more query skeletons parameterized by an
//! id-fragment slug derived from the canonical term. Three documents the
//! corpus references constantly (RGPD, LO 3/2018, LO 15/1999) get literal
//! identifier override clauses on top of the generic term match.

use lexgraph_core::constants::{
    ID_LO_15_1999, ID_LO_15_1999_CONSOLIDATED, ID_LO_3_2018, ID_RGPD_CELEX, ID_RGPD_SLUG,
    LIMIT_ARTICLE_ROWS, LIMIT_DOCUMENT_ROWS, LIMIT_RELATION_ROWS, TERM_AEPD, TERM_LO_15_1999,
    TERM_LO_3_2018, TERM_RGPD,
};
use lexgraph_core::Intent;

use crate::canonical::normalize;

/// Build the Cypher for a classified question.
///
/// Never fails: intents that are actionable without a canonical term emit an
/// un-parameterized "list all documents with this relation" skeleton, and
/// `Unrecognized` (or an unanswerable combination) emits the sentinel
/// diagnostic query.
pub fn build(question: &str, intent: Intent, term: Option<&str>) -> String {
    let qn = normalize(question);
    match intent {
        Intent::Mentions => mentions(term, &qn).unwrap_or_else(sentinel),
        Intent::Modifies => modifies(term),
        Intent::Repeals => repeals(term),
        Intent::HasArticles => term.map(has_articles).unwrap_or_else(sentinel),
        Intent::AboutTopic => about_topic(qn.contains("vigent")),
        Intent::Unrecognized => sentinel(),
    }
}

/// Canonical term → graph-id fragment.
fn id_slug(term: &str) -> String {
    term.replace(' ', "-")
}

/// Literal identifier override clause for the well-known documents,
/// or empty when the term is not one of them.
fn id_override(alias: &str, term: &str) -> String {
    match term {
        TERM_LO_3_2018 => format!("\n   OR toLower({alias}.id) CONTAINS '{ID_LO_3_2018}'"),
        TERM_LO_15_1999 => format!("\n   OR toLower({alias}.id) CONTAINS '{ID_LO_15_1999}'"),
        _ => String::new(),
    }
}

fn mentions(term: Option<&str>, qn: &str) -> Option<String> {
    let rgpd_keywords = ["rgpd", "gdpr", "2016/679", "2016 679"];
    if term == Some(TERM_RGPD) || rgpd_keywords.iter().any(|k| qn.contains(k)) {
        return Some(format!(
            "\
// Documents mentioning the RGPD, by document reference or by entity
MATCH (d:Document)-[:MENTIONS_DOC]->(x:Document)
WHERE toLower(x.id) CONTAINS '{ID_RGPD_SLUG}'
   OR toLower(x.id) CONTAINS '{ID_RGPD_CELEX}'
   OR toLower(x.title) CONTAINS '2016/679'
   OR toLower(x.title) CONTAINS '2016 679'
RETURN DISTINCT d.id AS id, d.title AS title
UNION
MATCH (d:Document)-[:MENTIONS]->(e:Entity)
WHERE toLower(coalesce(e.norm, e.name)) CONTAINS 'rgpd'
   OR toLower(e.name) CONTAINS 'gdpr'
   OR toLower(e.name) CONTAINS '2016 679'
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title"
        ));
    }

    if term == Some(TERM_AEPD)
        || qn.contains(" aepd")
        || qn.contains("agencia espanola de proteccion de datos")
    {
        return Some(
            "\
// Documents mentioning the AEPD, by entity or by id/title
MATCH (d:Document)-[:MENTIONS]->(e:Entity)
WHERE toLower(coalesce(e.norm, e.name)) CONTAINS 'aepd'
   OR toLower(coalesce(e.norm, e.name)) CONTAINS 'agencia espanola de proteccion de datos'
RETURN DISTINCT d.id AS id, d.title AS title
UNION
MATCH (d:Document)
WHERE toLower(d.id) CONTAINS 'aepd' OR toLower(d.title) CONTAINS 'aepd'
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title"
                .to_string(),
        );
    }

    let term = term?;
    let slug = id_slug(term);
    let overrides = id_override("x", term);
    Some(format!(
        "\
// Documents mentioning '{term}'
MATCH (d:Document)-[:MENTIONS_DOC]->(x:Document)
WHERE toLower(x.id) CONTAINS '{slug}'
   OR toLower(x.title) CONTAINS '{term}'{overrides}
RETURN DISTINCT d.id AS id, d.title AS title
ORDER BY title"
    ))
}

fn modifies(term: Option<&str>) -> String {
    let Some(term) = term else {
        return format!(
            "\
// Documents that modify other norms (general listing)
MATCH (src:Document)-[:MODIFIES]->(:Document)
RETURN DISTINCT src.id AS id, src.title AS title
ORDER BY title
LIMIT {LIMIT_DOCUMENT_ROWS}"
        );
    };
    let slug = id_slug(term);
    let overrides = id_override("src", term);
    format!(
        "\
// What does '{term}' modify?
MATCH (src:Document)-[:MODIFIES]->(dst:Document)
WHERE toLower(src.id) CONTAINS '{slug}'
   OR toLower(src.title) CONTAINS '{term}'{overrides}
RETURN src.title AS document, 'MODIFIES' AS relation, dst.title AS target
ORDER BY document
LIMIT {LIMIT_RELATION_ROWS}"
    )
}

fn repeals(term: Option<&str>) -> String {
    let Some(term) = term else {
        return format!(
            "\
// Documents that repeal other norms (general listing)
MATCH (src:Document)-[:REPEALS]->(:Document)
RETURN DISTINCT src.id AS id, src.title AS title
ORDER BY title
LIMIT {LIMIT_DOCUMENT_ROWS}"
        );
    };
    let slug = id_slug(term);
    // The term may sit on either endpoint; report the direction.
    let src_override = id_override("src", term);
    let dst_override = id_override("dst", term);
    format!(
        "\
// REPEALS relations involving '{term}'
MATCH (src:Document)-[:REPEALS]->(dst:Document)
WITH src, dst,
     (toLower(src.id) CONTAINS '{slug}'
      OR toLower(src.title) CONTAINS '{term}'{src_override}) AS is_src,
     (toLower(dst.id) CONTAINS '{slug}'
      OR toLower(dst.title) CONTAINS '{term}'{dst_override}) AS is_dst
WHERE is_src OR is_dst
RETURN src.title AS document,
       CASE WHEN is_src THEN 'REPEALS' ELSE 'REPEALED BY' END AS relation,
       dst.title AS target
ORDER BY document
LIMIT {LIMIT_RELATION_ROWS}"
    )
}

fn has_articles(term: &str) -> String {
    let slug = id_slug(term);
    let mut overrides = id_override("d", term);
    if term == TERM_LO_15_1999 {
        // The consolidated text carries a distinct id.
        overrides.push_str(&format!(
            "\n   OR toLower(d.id) CONTAINS '{ID_LO_15_1999_CONSOLIDATED}'"
        ));
    }
    format!(
        "\
// Articles of '{term}'
MATCH (d:Document)-[:HAS_ARTICLE]->(a:Article)
WHERE toLower(d.id) CONTAINS '{slug}'
   OR toLower(d.title) CONTAINS '{term}'{overrides}
RETURN d.id AS doc, a.id AS article_id, a.number AS number, a.title AS title
ORDER BY toInteger(coalesce(a.number, '0')) ASC, a.title
LIMIT {LIMIT_ARTICLE_ROWS}"
    )
}

fn about_topic(only_in_force: bool) -> String {
    let in_force_filter = if only_in_force {
        "\n  AND coalesce(d.in_force, true) = true"
    } else {
        ""
    };
    format!(
        "\
// Documents about the data-protection topic
MATCH (d:Document)-[:ABOUT_TOPIC]->(t:Topic)
WHERE (toLower(coalesce(t.norm, t.name)) CONTAINS 'proteccion'
   AND toLower(coalesce(t.norm, t.name)) CONTAINS 'datos'){in_force_filter}
RETURN d.id AS id, d.title AS title
ORDER BY title
LIMIT {LIMIT_DOCUMENT_ROWS}"
    )
}

/// Safe-to-execute diagnostic query. Returns one constant row; callers treat
/// it as "no usable result".
fn sentinel() -> String {
    "\
// Question pattern not recognized. Examples that work:
// - '¿Qué documentos mencionan RGPD?'
// - '¿Qué documentos mencionan la Ley Orgánica 3/2018?'
// - 'Documentos que tratan sobre Protección de Datos vigentes'
// - '¿Qué deroga LO 3/2018?' / '¿Quién deroga LO 15/1999?'
// - '¿Qué modifica LO 3/2018?'
// - '¿Qué artículos contiene LO 3/2018?'
RETURN 'question not recognized' AS notice"
        .to_string()
}
