use serde::{Deserialize, Serialize};

/// The closed set of question categories the classifier assigns.
///
/// Exactly one intent is chosen per question; the classifier tests them in
/// a fixed priority order and the first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Which documents mention X (by document reference or by entity).
    Mentions,
    /// What does X modify.
    Modifies,
    /// What does X repeal / what repeals X.
    Repeals,
    /// Which articles does document X contain.
    HasArticles,
    /// Which documents are about a known topic.
    AboutTopic,
    /// No lexical rule matched.
    Unrecognized,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Intent::Mentions => "mentions",
            Intent::Modifies => "modifies",
            Intent::Repeals => "repeals",
            Intent::HasArticles => "has_articles",
            Intent::AboutTopic => "about_topic",
            Intent::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}
