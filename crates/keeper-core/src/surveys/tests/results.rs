use super::common::*;
use crate::surveys::domain::{ResponseStatus, Role};
use crate::surveys::results::ResponseAggregator;
use serde_json::json;

#[test]
fn keeper_responses_group_by_employee_and_survey() {
    let users = vec![employee("alice", "Sales"), employee("bob", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![keeper_survey("s1")];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![
        submitted_response("s1", "alice", vec![answer("q-team", json!(4))], 1),
        submitted_response("s1", "alice", vec![answer("q-team", json!(2))], 2),
        submitted_response("s1", "bob", vec![answer("q-team", json!(5))], 3),
    ];

    let summaries = aggregator.summarize_all(&responses);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].employee_id.0, "alice");
    assert_eq!(summaries[0].response_count, 2);
    assert_close(summaries[0].scores.team_effect, 3.0);
    assert_eq!(summaries[1].employee_id.0, "bob");
    assert_eq!(summaries[1].response_count, 1);
}

#[test]
fn composite_average_of_two_responses() {
    // Two keeper responses scoring team effect 6 and 8 on performance terms:
    // kpi 0 keeps performance = team * 10, so keeper averages cleanly.
    let users = vec![employee("alice", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![keeper_survey("s1")];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![
        submitted_response("s1", "alice", vec![answer("q-pot", json!(3))], 1),
        submitted_response("s1", "alice", vec![answer("q-pot", json!(4))], 2),
    ];

    let summaries = aggregator.summarize_all(&responses);

    assert_eq!(summaries.len(), 1);
    // potential_score per response: 60 and 80; averaged 70.
    assert_close(summaries[0].scores.potential_score, 70.0);
    assert_close(summaries[0].scores.keeper_score, 28.0);
}

#[test]
fn non_keeper_surveys_are_excluded_from_the_listing() {
    let users = vec![employee("alice", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![
        keeper_survey("s1"),
        survey("s2", "Yönetici Değerlendirme", &[]),
        survey("s3", "Engagement Pulse", &[]),
    ];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![
        submitted_response("s2", "alice", vec![answer("q-team", json!(5))], 1),
        submitted_response("s3", "alice", vec![answer("q-team", json!(5))], 2),
    ];

    assert!(aggregator.summarize_all(&responses).is_empty());
}

#[test]
fn draft_responses_never_contribute() {
    let users = vec![employee("alice", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![keeper_survey("s1")];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let mut draft = submitted_response("s1", "alice", vec![answer("q-team", json!(5))], 1);
    draft.status = ResponseStatus::Draft;
    draft.submitted_at = None;

    assert!(aggregator.summarize_all(&[draft]).is_empty());
}

#[test]
fn kpi_is_held_constant_across_responses() {
    let mut alice = employee("alice", "Sales");
    alice.kpi = 75.0;
    let users = vec![alice];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![keeper_survey("s1")];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![
        submitted_response("s1", "alice", vec![answer("q-team", json!(4))], 1),
        submitted_response("s1", "alice", vec![answer("q-team", json!(2))], 2),
        submitted_response("s1", "alice", vec![answer("q-team", json!(3))], 3),
    ];

    let summaries = aggregator.summarize_all(&responses);

    // Averaging three responses must not divide the KPI by three.
    assert_close(summaries[0].scores.kpi_score, 75.0);
}

#[test]
fn latest_submission_tracks_the_newest_timestamp() {
    let users = vec![employee("alice", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![keeper_survey("s1")];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![
        submitted_response("s1", "alice", vec![answer("q-team", json!(4))], 10),
        submitted_response("s1", "alice", vec![answer("q-team", json!(4))], 25),
        submitted_response("s1", "alice", vec![answer("q-team", json!(4))], 17),
    ];

    let summaries = aggregator.summarize_all(&responses);

    assert_eq!(summaries[0].latest_submission, Some(submitted_at(25)));
}

#[test]
fn unknown_employees_and_surveys_are_skipped() {
    let users = vec![employee("alice", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![keeper_survey("s1")];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![
        submitted_response("ghost-survey", "alice", vec![answer("q-team", json!(4))], 1),
        submitted_response("s1", "ghost-user", vec![answer("q-team", json!(4))], 2),
    ];

    assert!(aggregator.summarize_all(&responses).is_empty());
}

#[test]
fn employee_detail_separates_form_families() {
    let users = vec![employee("alice", "Sales"), manager("mira", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![
        keeper_survey("s1"),
        survey("s2", "Yönetici Değerlendirme Formu", &[]),
        survey("s3", "Takım Arkadaşı Değerlendirme", &[]),
    ];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![
        submitted_response("s1", "alice", vec![answer("q-team", json!(4))], 1),
        evaluated_response(
            "s2",
            "alice",
            "mira",
            vec![answer("x1", json!(5)), answer("x2", json!(3))],
            2,
        ),
        evaluated_response("s3", "alice", "mira", vec![answer("x1", json!(2))], 3),
    ];

    let summary = aggregator
        .summarize_employee(&users[0].id, &responses)
        .expect("alice has submitted responses");

    // Only the keeper response feeds composites.
    assert_eq!(summary.response_count, 1);
    assert_close(summary.scores.team_effect, 4.0);
    assert_close(summary.manager_form_average, 4.0);
    assert_close(summary.teammate_form_average, 2.0);
    assert_eq!(summary.role, Role::Employee);
}

#[test]
fn employee_detail_without_submissions_is_none() {
    let users = vec![employee("alice", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![keeper_survey("s1")];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    assert!(aggregator.summarize_employee(&users[0].id, &[]).is_none());
}

#[test]
fn employee_detail_with_only_form_responses_has_zeroed_composites() {
    let mut alice = employee("alice", "Sales");
    alice.kpi = 50.0;
    let users = vec![alice, manager("mira", "Sales")];
    let categories = dimension_categories();
    let questions = dimension_questions();
    let surveys = vec![survey("s2", "Yönetici Formu", &[])];
    let aggregator = ResponseAggregator::new(&users, &categories, &questions, &surveys);

    let responses = vec![evaluated_response(
        "s2",
        "alice",
        "mira",
        vec![answer("x1", json!(5))],
        1,
    )];

    let summary = aggregator
        .summarize_employee(&users[0].id, &responses)
        .expect("form response counts as submitted");

    assert_eq!(summary.response_count, 0);
    assert_close(summary.scores.keeper_score, 0.0);
    // KPI is still surfaced even with no keeper responses.
    assert_close(summary.scores.kpi_score, 50.0);
    assert_close(summary.manager_form_average, 5.0);
}
