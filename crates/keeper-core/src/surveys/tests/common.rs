use crate::surveys::domain::{
    Answer, AssignmentType, Category, CategoryId, QuestionId, QuestionKind, Response,
    ResponseStatus, Role, Subcategory, Survey, SurveyId, SurveyQuestion, SurveyStatus, User,
    UserId,
};
use crate::surveys::repository::{DirectoryRepository, RepositoryError};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Mutex;

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn user(id: &str, role: Role, department: Option<&str>) -> User {
    User {
        id: UserId(id.to_string()),
        name: id.to_string(),
        email: format!("{id}@dovec.example"),
        role,
        department: department.map(str::to_string),
        departments: Vec::new(),
        kpi: 0.0,
    }
}

pub(super) fn employee(id: &str, department: &str) -> User {
    user(id, Role::Employee, Some(department))
}

pub(super) fn manager(id: &str, department: &str) -> User {
    user(id, Role::Manager, Some(department))
}

pub(super) fn admin(id: &str) -> User {
    user(id, Role::Admin, None)
}

pub(super) fn category(id: &str, name: &str) -> Category {
    Category {
        id: CategoryId(id.to_string()),
        name: name.to_string(),
        parent: None,
    }
}

pub(super) fn rating_question(id: &str, name: &str, category: &str) -> Subcategory {
    Subcategory {
        id: QuestionId(id.to_string()),
        name: name.to_string(),
        category: CategoryId(category.to_string()),
        kind: QuestionKind::Rating { min: 1, max: 5 },
    }
}

pub(super) fn survey(id: &str, title: &str, categories: &[&str]) -> Survey {
    Survey {
        id: SurveyId(id.to_string()),
        title: title.to_string(),
        categories: categories.iter().map(|name| name.to_string()).collect(),
        status: SurveyStatus::Active,
        questions: Vec::new(),
        assignment_type: AssignmentType::All,
        assigned_departments: Vec::new(),
        assigned_users: Vec::new(),
        assigned_roles: Vec::new(),
        start_date: None,
        end_date: None,
    }
}

pub(super) fn legacy_question(id: &str, text: &str) -> SurveyQuestion {
    SurveyQuestion {
        id: QuestionId(id.to_string()),
        text: text.to_string(),
        kind: QuestionKind::Rating { min: 1, max: 5 },
    }
}

pub(super) fn answer(question_id: &str, value: Value) -> Answer {
    Answer {
        question_id: question_id.to_string(),
        value,
    }
}

pub(super) fn submitted_at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).single().expect("valid timestamp")
}

pub(super) fn submitted_response(
    survey_id: &str,
    employee_id: &str,
    answers: Vec<Answer>,
    day: u32,
) -> Response {
    Response {
        survey: SurveyId(survey_id.to_string()),
        employee: UserId(employee_id.to_string()),
        evaluator: None,
        answers,
        status: ResponseStatus::Submitted,
        submitted_at: Some(submitted_at(day)),
    }
}

pub(super) fn evaluated_response(
    survey_id: &str,
    employee_id: &str,
    evaluator_id: &str,
    answers: Vec<Answer>,
    day: u32,
) -> Response {
    Response {
        evaluator: Some(UserId(evaluator_id.to_string())),
        ..submitted_response(survey_id, employee_id, answers, day)
    }
}

/// The standard evaluation catalog: one category and one rating question
/// per dimension, referenced by name from a keeper survey.
pub(super) fn dimension_categories() -> Vec<Category> {
    vec![
        category("cat-pot", "Potential"),
        category("cat-cul", "Culture Harmony"),
        category("cat-team", "Team Effect"),
        category("cat-exec", "Executive Observation"),
    ]
}

pub(super) fn dimension_questions() -> Vec<Subcategory> {
    vec![
        rating_question("q-pot", "Growth readiness", "cat-pot"),
        rating_question("q-cul", "Values alignment", "cat-cul"),
        rating_question("q-team", "Collaboration quality", "cat-team"),
        rating_question("q-exec", "Delivery reliability", "cat-exec"),
    ]
}

pub(super) fn keeper_survey(id: &str) -> Survey {
    survey(
        id,
        "Keeper Evaluation 2025",
        &[
            "Potential",
            "Culture Harmony",
            "Team Effect",
            "Executive Observation",
        ],
    )
}

/// In-memory directory for handler tests.
#[derive(Default)]
pub(super) struct StubDirectory {
    pub(super) users: Vec<User>,
    pub(super) categories: Vec<Category>,
    pub(super) subcategories: Vec<Subcategory>,
    pub(super) surveys: Vec<Survey>,
    pub(super) responses: Mutex<Vec<Response>>,
}

impl DirectoryRepository for StubDirectory {
    fn users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.clone())
    }

    fn user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.iter().find(|user| user.id == *id).cloned())
    }

    fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.categories.clone())
    }

    fn subcategories(&self) -> Result<Vec<Subcategory>, RepositoryError> {
        Ok(self.subcategories.clone())
    }

    fn surveys(&self) -> Result<Vec<Survey>, RepositoryError> {
        Ok(self.surveys.clone())
    }

    fn survey(&self, id: &SurveyId) -> Result<Option<Survey>, RepositoryError> {
        Ok(self.surveys.iter().find(|survey| survey.id == *id).cloned())
    }

    fn responses(&self) -> Result<Vec<Response>, RepositoryError> {
        Ok(self.responses.lock().expect("responses mutex poisoned").clone())
    }

    fn upsert_response(&self, response: Response) -> Result<Response, RepositoryError> {
        let mut responses = self.responses.lock().expect("responses mutex poisoned");
        responses
            .retain(|existing| {
                existing.survey != response.survey || existing.employee != response.employee
            });
        responses.push(response.clone());
        Ok(response)
    }
}
