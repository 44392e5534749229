use crate::constants::SENTINEL_NOTICE;

/// Which strategy produced a query.
///
/// `Fallback` marks the pre-execution escalation (primary generator produced
/// nothing, the rules generator stepped in). `Rescue` wraps the tag that was
/// replaced by the post-execution rescue re-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generator {
    Rules,
    Model,
    Fallback,
    Rescue(Box<Generator>),
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Rules => f.write_str("rules"),
            Generator::Model => f.write_str("model"),
            Generator::Fallback => f.write_str("fallback"),
            Generator::Rescue(inner) => write!(f, "rescue({inner})"),
        }
    }
}

/// A generated Cypher query plus the generator tag that produced it.
///
/// Invariant: a `GeneratedQuery` handed to an executor has already passed the
/// safety validator; one that fails it is discarded, never executed.
#[derive(Debug, Clone)]
pub struct GeneratedQuery {
    pub text: String,
    pub generator: Generator,
}

impl GeneratedQuery {
    pub fn new(text: impl Into<String>, generator: Generator) -> Self {
        Self {
            text: text.into(),
            generator,
        }
    }

    /// True when this is the diagnostic sentinel query: safe to execute
    /// (returns one constant row) but equivalent to "no usable result".
    pub fn is_sentinel(&self) -> bool {
        self.text.contains(SENTINEL_NOTICE)
    }
}
