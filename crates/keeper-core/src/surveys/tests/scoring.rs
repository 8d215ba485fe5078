use super::common::*;
use crate::surveys::answers::match_answers;
use crate::surveys::catalog::{CatalogQuestion, QuestionCatalog};
use crate::surveys::domain::{QuestionId, QuestionKind};
use crate::surveys::scoring::{calculate_scores, classify, Dimension};
use serde_json::json;

fn question(name: &str, category: &str) -> CatalogQuestion {
    CatalogQuestion {
        id: QuestionId(name.to_string()),
        name: name.to_string(),
        category_name: category.to_string(),
        kind: QuestionKind::Rating { min: 1, max: 5 },
    }
}

fn scored(answers: Vec<crate::surveys::domain::Answer>, kpi: f64) -> crate::surveys::ScoreCard {
    let survey = keeper_survey("s1");
    let catalog = QuestionCatalog::resolve(&survey, &dimension_categories(), &dimension_questions());
    let matched = match_answers(&answers, &catalog);
    calculate_scores(&matched, kpi)
}

#[test]
fn category_name_drives_classification() {
    assert_eq!(
        classify(&question("Growth readiness", "Potential")),
        vec![Dimension::Potential]
    );
    assert_eq!(
        classify(&question("Herhangi bir soru", "Kültür Uyumu")),
        vec![Dimension::CultureHarmony]
    );
}

#[test]
fn question_text_classifies_when_category_is_absent() {
    assert_eq!(
        classify(&question("Takım etkisi nasıl?", "")),
        vec![Dimension::TeamEffect]
    );
    assert_eq!(
        classify(&question("Yönetici gözlemi", "")),
        vec![Dimension::ExecutiveObservation]
    );
}

#[test]
fn unrelated_questions_classify_nowhere() {
    assert!(classify(&question("Favorite lunch spot", "Logistics")).is_empty());
}

// A question whose text carries overlapping keywords contributes to every
// matching dimension. That is accepted behavior, not an accident to fix.
#[test]
fn overlapping_keywords_count_toward_multiple_dimensions() {
    let overlapping = question("Team culture fit", "");
    let dimensions = classify(&overlapping);
    assert!(dimensions.contains(&Dimension::CultureHarmony));
    assert!(dimensions.contains(&Dimension::TeamEffect));
    assert_eq!(dimensions.len(), 2);
}

#[test]
fn composite_formulas_reproduce_reference_values() {
    // KPI 80, team effect 4 -> performance 80*0.5 + 4*10 = 80.
    let scores = scored(vec![answer("q-team", json!(4))], 80.0);
    assert_close(scores.team_effect, 4.0);
    assert_close(scores.performance_score, 80.0);
    // Only team effect answered: culture/executive/potential stay 0.
    assert_close(scores.contribution_score, 40.0);
    assert_close(scores.potential_score, 0.0);
    assert_close(scores.keeper_score, 24.0);
}

#[test]
fn full_answer_set_produces_all_composites() {
    let scores = scored(
        vec![
            answer("q-pot", json!(5)),
            answer("q-cul", json!(4)),
            answer("q-team", json!(3)),
            answer("q-exec", json!(2)),
        ],
        60.0,
    );

    let performance = 60.0 * 0.5 + 3.0 * 10.0;
    let contribution = performance * 0.5 + 4.0 * 10.0 * 0.3 + 2.0 * 10.0 * 0.2;
    let potential = 5.0 * 20.0;
    assert_close(scores.performance_score, performance);
    assert_close(scores.contribution_score, contribution);
    assert_close(scores.potential_score, potential);
    assert_close(scores.keeper_score, contribution * 0.6 + potential * 0.4);
    assert_close(scores.kpi_score, 60.0);
}

#[test]
fn dimension_with_no_matches_is_exactly_zero() {
    let scores = scored(vec![answer("q-cul", json!(5))], 0.0);
    assert_eq!(scores.potential, 0.0);
    assert_eq!(scores.team_effect, 0.0);
    assert_eq!(scores.executive_observation, 0.0);
    assert_close(scores.culture_harmony, 5.0);
}

#[test]
fn non_numeric_ratings_are_skipped_not_coerced() {
    let scores = scored(
        vec![
            answer("q-team", json!("not a number")),
            answer("q-cul", json!("4.5")),
        ],
        0.0,
    );

    // The unparsable team answer must not drag the average to zero.
    assert_eq!(scores.team_effect, 0.0);
    assert_eq!(scores.performance_score, 0.0);
    // Numeric strings parse fine.
    assert_close(scores.culture_harmony, 4.5);
}

#[test]
fn dimension_averages_stay_within_rating_bounds() {
    let scores = scored(
        vec![answer("q-pot", json!(5)), answer("q-team", json!(1))],
        100.0,
    );
    assert!(scores.potential >= 0.0 && scores.potential <= 5.0);
    assert!(scores.team_effect >= 0.0 && scores.team_effect <= 5.0);
}

#[test]
fn kpi_is_copied_from_the_user_never_derived() {
    let scores = scored(Vec::new(), 42.5);
    assert_close(scores.kpi_score, 42.5);
    assert_close(scores.performance_score, 21.25);
}
