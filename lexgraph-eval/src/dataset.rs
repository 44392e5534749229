//! Labeled question datasets.
//!
//! Input is a CSV with columns `qid, question, gt_type, gt_payload`. When
//! `gt_type` is `ids` the payload is a `|`-delimited identifier list; gold
//! identifiers are compared lowercased. The parser honors double-quoted
//! fields (questions contain commas) with doubled-quote escapes.

use std::collections::BTreeSet;
use std::path::Path;

use lexgraph_core::errors::EvalError;

/// One labeled question from the dataset.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub qid: Option<String>,
    pub question: String,
    pub gt_type: String,
    pub gt_payload: String,
}

impl QuestionRecord {
    /// Gold identifier set, lowercased. `None` when the question carries no
    /// ground truth of type `ids`.
    pub fn gold_ids(&self) -> Option<BTreeSet<String>> {
        if !self.gt_type.trim().eq_ignore_ascii_case("ids") || self.gt_payload.trim().is_empty() {
            return None;
        }
        Some(
            self.gt_payload
                .split('|')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// Split one CSV line into fields. Double-quoted fields may contain commas;
/// a doubled quote inside a quoted field is a literal quote.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse a dataset from CSV text. Column order is taken from the header;
/// `question` is the only required column.
pub fn parse_csv(text: &str) -> Result<Vec<QuestionRecord>, EvalError> {
    let mut lines = text.lines().enumerate();
    let (_, header) = lines.next().ok_or(EvalError::DatasetParse {
        line: 1,
        reason: "empty dataset".to_string(),
    })?;

    let columns = split_line(header);
    let index_of = |name: &str| {
        columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name))
    };
    let qid_idx = index_of("qid");
    let question_idx = index_of("question").ok_or(EvalError::DatasetParse {
        line: 1,
        reason: "missing 'question' column".to_string(),
    })?;
    let gt_type_idx = index_of("gt_type");
    let gt_payload_idx = index_of("gt_payload");

    let field = |fields: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| fields.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let mut records = Vec::new();
    for (n, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(line);
        let question = field(&fields, Some(question_idx));
        if question.is_empty() {
            return Err(EvalError::DatasetParse {
                line: n + 1,
                reason: "empty question".to_string(),
            });
        }
        let qid = field(&fields, qid_idx);
        records.push(QuestionRecord {
            qid: (!qid.is_empty()).then_some(qid),
            question,
            gt_type: field(&fields, gt_type_idx),
            gt_payload: field(&fields, gt_payload_idx),
        });
    }
    Ok(records)
}

/// Load a dataset from a CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<QuestionRecord>, EvalError> {
    let text = std::fs::read_to_string(path).map_err(|e| EvalError::DatasetRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_csv(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_quoted_rows() {
        let csv = "qid,question,gt_type,gt_payload\n\
                   q1,¿Qué documentos mencionan RGPD?,ids,a|b\n\
                   q2,\"Documentos que mencionan, o modifican, la LOPD\",,\n";
        let records = parse_csv(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].qid.as_deref(), Some("q1"));
        assert_eq!(
            records[1].question,
            "Documentos que mencionan, o modifican, la LOPD"
        );
        assert!(records[1].gold_ids().is_none());
    }

    #[test]
    fn doubled_quote_is_a_literal_quote() {
        let csv = "qid,question,gt_type,gt_payload\n\
                   q1,\"mencionan \"\"Real Decreto 1720/2007\"\"\",,\n";
        let records = parse_csv(csv).unwrap();
        assert_eq!(records[0].question, "mencionan \"Real Decreto 1720/2007\"");
    }

    #[test]
    fn gold_ids_are_lowercased_and_trimmed() {
        let record = QuestionRecord {
            qid: None,
            question: "q".to_string(),
            gt_type: "ids".to_string(),
            gt_payload: "BOE-A-2018-16673 | boe-a-1999-23750 |".to_string(),
        };
        let gold = record.gold_ids().unwrap();
        assert_eq!(gold.len(), 2);
        assert!(gold.contains("boe-a-2018-16673"));
        assert!(gold.contains("boe-a-1999-23750"));
    }

    #[test]
    fn non_ids_ground_truth_is_ignored() {
        let record = QuestionRecord {
            qid: None,
            question: "q".to_string(),
            gt_type: "text".to_string(),
            gt_payload: "whatever".to_string(),
        };
        assert!(record.gold_ids().is_none());
    }

    #[test]
    fn missing_question_column_is_an_error() {
        let err = parse_csv("qid,text\nq1,hello\n").unwrap_err();
        assert!(matches!(err, EvalError::DatasetParse { line: 1, .. }));
    }
}
