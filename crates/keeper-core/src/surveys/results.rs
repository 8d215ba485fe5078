use super::answers::match_answers;
use super::catalog::QuestionCatalog;
use super::domain::{
    Category, Response, Role, Subcategory, Survey, SurveyId, SurveyKind, User, UserId,
};
use super::scoring::{calculate_scores, numeric_value, ScoreCard};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Aggregated scores for one (employee, survey) pair in the listing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSurveySummary {
    pub employee_id: UserId,
    pub survey_id: SurveyId,
    pub employee_name: String,
    pub department: Option<String>,
    pub survey_title: String,
    pub response_count: usize,
    pub latest_submission: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub scores: ScoreCard,
}

/// Cross-survey summary for a single employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub employee_id: UserId,
    pub employee_name: String,
    pub department: Option<String>,
    pub role: Role,
    /// Number of keeper-family responses feeding the score averages.
    pub response_count: usize,
    pub latest_submission: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub scores: ScoreCard,
    /// Plain average of all numeric answers from manager-evaluation forms
    /// about this employee. Never feeds composite scores.
    pub manager_form_average: f64,
    /// Plain average of all numeric answers from teammate-evaluation forms
    /// about this employee. Never feeds composite scores.
    pub teammate_form_average: f64,
}

/// Folds per-response score cards over an employee's submitted responses.
///
/// Only responses whose survey title carries the keeper marker participate
/// in composite-score aggregation; peer and manager evaluation families are
/// surfaced separately as raw averages.
pub struct ResponseAggregator<'a> {
    users: &'a [User],
    categories: &'a [Category],
    subcategories: &'a [Subcategory],
    surveys: &'a [Survey],
}

impl<'a> ResponseAggregator<'a> {
    pub fn new(
        users: &'a [User],
        categories: &'a [Category],
        subcategories: &'a [Subcategory],
        surveys: &'a [Survey],
    ) -> Self {
        Self {
            users,
            categories,
            subcategories,
            surveys,
        }
    }

    fn survey(&self, id: &SurveyId) -> Option<&'a Survey> {
        self.surveys.iter().find(|survey| survey.id == *id)
    }

    fn user(&self, id: &UserId) -> Option<&'a User> {
        self.users.iter().find(|user| user.id == *id)
    }

    fn score_response(&self, response: &Response, survey: &Survey, employee: &User) -> ScoreCard {
        let catalog = QuestionCatalog::resolve(survey, self.categories, self.subcategories);
        let matched = match_answers(&response.answers, &catalog);
        calculate_scores(&matched, employee.kpi)
    }

    /// Group submitted keeper responses by (employee, survey) and average
    /// each numeric field over the group's response count. Groups with zero
    /// responses never appear, so every summary has well-defined averages.
    pub fn summarize_all(&self, responses: &[Response]) -> Vec<EmployeeSurveySummary> {
        struct Group<'a> {
            employee: &'a User,
            survey: &'a Survey,
            totals: ScoreCard,
            response_count: usize,
            latest_submission: Option<DateTime<Utc>>,
        }

        let mut order: Vec<(UserId, SurveyId)> = Vec::new();
        let mut groups: HashMap<(UserId, SurveyId), Group<'a>> = HashMap::new();

        for response in responses {
            if !response.is_submitted() {
                continue;
            }
            let Some(survey) = self.survey(&response.survey) else {
                continue;
            };
            if !survey.is_keeper() {
                continue;
            }
            let Some(employee) = self.user(&response.employee) else {
                continue;
            };

            let scores = self.score_response(response, survey, employee);
            let key = (employee.id.clone(), survey.id.clone());
            let group = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Group {
                    employee,
                    survey,
                    totals: ScoreCard {
                        kpi_score: employee.kpi,
                        ..ScoreCard::default()
                    },
                    response_count: 0,
                    latest_submission: None,
                }
            });

            group.totals.accumulate(&scores);
            group.response_count += 1;
            if group.latest_submission < response.submitted_at {
                group.latest_submission = response.submitted_at;
            }
        }

        order
            .into_iter()
            .filter_map(|key| groups.remove(&key))
            .map(|group| EmployeeSurveySummary {
                employee_id: group.employee.id.clone(),
                survey_id: group.survey.id.clone(),
                employee_name: group.employee.name.clone(),
                department: group.employee.department.clone(),
                survey_title: group.survey.title.clone(),
                response_count: group.response_count,
                latest_submission: group.latest_submission,
                scores: group.totals.averaged(group.response_count),
            })
            .collect()
    }

    /// Detail view for one employee. Returns `None` when the employee has no
    /// submitted responses at all. Composite scores average over keeper
    /// responses only; manager/teammate forms contribute only their raw
    /// answer averages.
    pub fn summarize_employee(
        &self,
        employee_id: &UserId,
        responses: &[Response],
    ) -> Option<EmployeeSummary> {
        let employee = self.user(employee_id)?;

        let mut totals = ScoreCard {
            kpi_score: employee.kpi,
            ..ScoreCard::default()
        };
        let mut keeper_count = 0usize;
        let mut latest_submission: Option<DateTime<Utc>> = None;
        let mut any_submitted = false;

        let mut manager_form_total = 0.0f64;
        let mut manager_form_count = 0usize;
        let mut teammate_form_total = 0.0f64;
        let mut teammate_form_count = 0usize;

        for response in responses {
            if !response.is_submitted() || response.employee != *employee_id {
                continue;
            }
            let Some(survey) = self.survey(&response.survey) else {
                continue;
            };
            any_submitted = true;

            if survey.is_keeper() {
                let scores = self.score_response(response, survey, employee);
                totals.accumulate(&scores);
                keeper_count += 1;
                if latest_submission < response.submitted_at {
                    latest_submission = response.submitted_at;
                }
            }

            match survey.kind() {
                SurveyKind::ManagerForm => {
                    for answer in &response.answers {
                        if let Some(rating) = numeric_value(&answer.value) {
                            manager_form_total += rating;
                            manager_form_count += 1;
                        }
                    }
                }
                SurveyKind::TeammateForm => {
                    for answer in &response.answers {
                        if let Some(rating) = numeric_value(&answer.value) {
                            teammate_form_total += rating;
                            teammate_form_count += 1;
                        }
                    }
                }
                SurveyKind::General => {}
            }
        }

        if !any_submitted {
            return None;
        }

        Some(EmployeeSummary {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            department: employee.department.clone(),
            role: employee.role,
            response_count: keeper_count,
            latest_submission,
            scores: totals.averaged(keeper_count),
            manager_form_average: if manager_form_count > 0 {
                manager_form_total / manager_form_count as f64
            } else {
                0.0
            },
            teammate_form_average: if teammate_form_count > 0 {
                teammate_form_total / teammate_form_count as f64
            } else {
                0.0
            },
        })
    }
}
