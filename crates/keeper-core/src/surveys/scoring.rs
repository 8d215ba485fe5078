use super::answers::MatchedAnswer;
use super::catalog::CatalogQuestion;
use super::domain::QuestionKind;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Semantic evaluation axis a rating can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Potential,
    CultureHarmony,
    TeamEffect,
    ExecutiveObservation,
}

impl Dimension {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Potential,
            Self::CultureHarmony,
            Self::TeamEffect,
            Self::ExecutiveObservation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Potential => "Potential",
            Self::CultureHarmony => "Culture Harmony",
            Self::TeamEffect => "Team Effect",
            Self::ExecutiveObservation => "Executive Observation",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Potential => 0,
            Self::CultureHarmony => 1,
            Self::TeamEffect => 2,
            Self::ExecutiveObservation => 3,
        }
    }

    /// Bilingual (English/Turkish) trigger keywords, tested against the
    /// owning category's name and the question's display text. The table is
    /// deliberately explicit so the keyword set stays auditable.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Potential => &["potential", "potansiyel"],
            Self::CultureHarmony => &[
                "culture harmony",
                "kültür uyumu",
                "culture",
                "harmony",
                "kültür",
                "uyumu",
            ],
            Self::TeamEffect => &[
                "team effect",
                "takım etkisi",
                "team impact",
                "team",
                "takım",
            ],
            Self::ExecutiveObservation => &[
                "executive observation",
                "yönetici gözlemi",
                "manager evaluation",
                "executive",
                "observation",
                "yönetici",
            ],
        }
    }
}

/// Classify a question into zero or more dimensions. The category name is
/// the more reliable hint and is tested before the question's own text. A
/// question whose text carries overlapping keywords contributes to every
/// matching dimension; that overlap is accepted behavior.
pub fn classify(question: &CatalogQuestion) -> Vec<Dimension> {
    let category = question.category_name.to_lowercase();
    let text = question.name.to_lowercase();

    Dimension::ordered()
        .into_iter()
        .filter(|dimension| {
            dimension
                .keywords()
                .iter()
                .any(|keyword| category.contains(keyword) || text.contains(keyword))
        })
        .collect()
}

/// Per-response score set: four dimension averages, the externally supplied
/// KPI, and the four composite scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreCard {
    pub kpi_score: f64,
    pub potential: f64,
    pub culture_harmony: f64,
    pub team_effect: f64,
    pub executive_observation: f64,
    pub performance_score: f64,
    pub contribution_score: f64,
    pub potential_score: f64,
    pub keeper_score: f64,
}

impl ScoreCard {
    pub(crate) fn accumulate(&mut self, other: &ScoreCard) {
        self.potential += other.potential;
        self.culture_harmony += other.culture_harmony;
        self.team_effect += other.team_effect;
        self.executive_observation += other.executive_observation;
        self.performance_score += other.performance_score;
        self.contribution_score += other.contribution_score;
        self.potential_score += other.potential_score;
        self.keeper_score += other.keeper_score;
    }

    /// Average the accumulated fields over `count` responses. The KPI is
    /// admin-controlled and constant per employee, so it is carried through
    /// rather than averaged.
    pub(crate) fn averaged(&self, count: usize) -> ScoreCard {
        if count == 0 {
            return ScoreCard {
                kpi_score: self.kpi_score,
                ..ScoreCard::default()
            };
        }
        let divisor = count as f64;
        ScoreCard {
            kpi_score: self.kpi_score,
            potential: self.potential / divisor,
            culture_harmony: self.culture_harmony / divisor,
            team_effect: self.team_effect / divisor,
            executive_observation: self.executive_observation / divisor,
            performance_score: self.performance_score / divisor,
            contribution_score: self.contribution_score / divisor,
            potential_score: self.potential_score / divisor,
            keeper_score: self.keeper_score / divisor,
        }
    }
}

/// Derive the score card for one response from its matched answers and the
/// employee's KPI. The KPI is always read from the user record, never
/// recomputed from answers.
///
/// Composite formulas:
///   performance  = kpi * 0.5 + team_effect * 10
///   contribution = performance * 0.5 + culture * 10 * 0.3 + executive * 10 * 0.2
///   potential    = potential_avg * 20
///   keeper       = contribution * 0.6 + potential * 0.4
pub fn calculate_scores(matched: &[MatchedAnswer<'_>], kpi: f64) -> ScoreCard {
    let mut totals = [0.0f64; 4];
    let mut counts = [0usize; 4];

    for entry in matched {
        if entry.question.kind == QuestionKind::Text {
            continue;
        }

        let Some(rating) = numeric_value(entry.value) else {
            // A rating that fails numeric parsing is skipped, not coerced to
            // zero; coercion would silently corrupt the averages.
            warn!(
                question = %entry.question.id.0,
                value = %entry.value,
                "skipping non-numeric rating answer"
            );
            continue;
        };

        for dimension in classify(entry.question) {
            totals[dimension.index()] += rating;
            counts[dimension.index()] += 1;
        }
    }

    let average = |dimension: Dimension| -> f64 {
        let index = dimension.index();
        if counts[index] > 0 {
            totals[index] / counts[index] as f64
        } else {
            0.0
        }
    };

    let potential = average(Dimension::Potential);
    let culture_harmony = average(Dimension::CultureHarmony);
    let team_effect = average(Dimension::TeamEffect);
    let executive_observation = average(Dimension::ExecutiveObservation);

    let kpi_score = if kpi.is_finite() { kpi } else { 0.0 };

    let performance_score = kpi_score * 0.5 + team_effect * 10.0;
    let contribution_score =
        performance_score * 0.5 + culture_harmony * 10.0 * 0.3 + executive_observation * 10.0 * 0.2;
    let potential_score = potential * 20.0;
    let keeper_score = contribution_score * 0.6 + potential_score * 0.4;

    ScoreCard {
        kpi_score,
        potential,
        culture_harmony,
        team_effect,
        executive_observation,
        performance_score,
        contribution_score,
        potential_score,
        keeper_score,
    }
}

/// Parse an answer value as a finite number. Numbers pass through; strings
/// are trimmed and parsed; everything else is rejected.
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|parsed| parsed.is_finite()),
        Value::String(raw) => raw.trim().parse::<f64>().ok().filter(|parsed| parsed.is_finite()),
        _ => None,
    }
}
