/// The sentinel a model generator returns when it cannot produce a query.
pub const MODEL_FALLBACK_SENTINEL: &str = "FALLBACK";

/// The constant notice row emitted by the diagnostic sentinel query.
pub const SENTINEL_NOTICE: &str = "question not recognized";

/// Canonical term and graph-id fragments for the three documents the corpus
/// references constantly. Templates append literal override clauses for
/// these; everything else goes through the generic id-slug path.
pub const TERM_RGPD: &str = "reglamento ue 2016 679";
pub const TERM_LO_3_2018: &str = "lo 3 2018";
pub const TERM_LO_15_1999: &str = "lo 15 1999";
pub const TERM_AEPD: &str = "aepd";
pub const TERM_MEMORIA_2024: &str = "memoria 2024";

pub const ID_RGPD_CELEX: &str = "celex-32016r0679";
pub const ID_RGPD_SLUG: &str = "reglamento-ue-2016-679";
pub const ID_LO_3_2018: &str = "boe-a-2018-16673";
pub const ID_LO_15_1999: &str = "boe-a-1999-23750";
pub const ID_LO_15_1999_CONSOLIDATED: &str = "boe-a-1999-23750-consolidado";

/// Row limits baked into the query skeletons.
pub const LIMIT_RELATION_ROWS: usize = 100;
pub const LIMIT_DOCUMENT_ROWS: usize = 200;
pub const LIMIT_ARTICLE_ROWS: usize = 500;
