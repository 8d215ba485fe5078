use super::catalog::{CatalogQuestion, QuestionCatalog};
use super::domain::Answer;
use serde::Serialize;
use serde_json::Value;

/// Identifier-reconciliation strategy. Answers and questions were persisted
/// independently across schema revisions, so the matcher walks an ordered
/// list of strategies rather than requiring a data migration. New formats
/// are appended to the end; the existing tiers must keep their order because
/// later tiers are strictly looser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    ExactString,
    NormalizedObjectId,
    LegacyPrefixed,
    CaseInsensitiveScan,
}

impl MatchStrategy {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ExactString,
            Self::NormalizedObjectId,
            Self::LegacyPrefixed,
            Self::CaseInsensitiveScan,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExactString => "exact string",
            Self::NormalizedObjectId => "normalized object id",
            Self::LegacyPrefixed => "legacy prefixed",
            Self::CaseInsensitiveScan => "case-insensitive scan",
        }
    }
}

/// A catalog question paired with the answer value it reconciled to.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedAnswer<'a> {
    pub question: &'a CatalogQuestion,
    pub value: &'a Value,
    pub strategy: MatchStrategy,
}

/// Reconcile raw answers against a question catalog. Questions with no
/// matching answer are simply absent from the result; each answer key is
/// consumed by at most one question.
pub fn match_answers<'a>(
    answers: &'a [Answer],
    catalog: &'a QuestionCatalog,
) -> Vec<MatchedAnswer<'a>> {
    let mut consumed = vec![false; answers.len()];
    let mut matched = Vec::new();

    for question in catalog.questions() {
        if let Some((index, strategy)) = locate(question, answers, &consumed) {
            consumed[index] = true;
            matched.push(MatchedAnswer {
                question,
                value: &answers[index].value,
                strategy,
            });
        }
    }

    matched
}

fn locate(
    question: &CatalogQuestion,
    answers: &[Answer],
    consumed: &[bool],
) -> Option<(usize, MatchStrategy)> {
    for strategy in MatchStrategy::ordered() {
        for (index, answer) in answers.iter().enumerate() {
            if consumed[index] {
                continue;
            }
            if matches_with(strategy, &question.id.0, &answer.question_id) {
                return Some((index, strategy));
            }
        }
    }
    None
}

fn matches_with(strategy: MatchStrategy, question_id: &str, answer_key: &str) -> bool {
    match strategy {
        MatchStrategy::ExactString => question_id == answer_key,
        MatchStrategy::NormalizedObjectId => {
            match (normalize_object_id(question_id), normalize_object_id(answer_key)) {
                (Some(question), Some(answer)) => question == answer,
                _ => false,
            }
        }
        MatchStrategy::LegacyPrefixed => answer_key
            .strip_prefix("question-")
            .is_some_and(|rest| rest == question_id),
        MatchStrategy::CaseInsensitiveScan => question_id.eq_ignore_ascii_case(answer_key),
    }
}

/// Re-derive an identifier as a stored object id (24 hex characters) in its
/// normalized lowercase form.
pub(crate) fn normalize_object_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() == 24 && trimmed.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        Some(trimmed.to_ascii_lowercase())
    } else {
        None
    }
}
