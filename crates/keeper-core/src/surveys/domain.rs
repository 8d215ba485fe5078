use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title marker identifying the keeper survey family (the only family that
/// feeds composite-score aggregation).
pub const KEEPER_MARKER: &str = "keeper";
/// Title marker for manager-evaluation forms.
pub const MANAGER_FORM_MARKER: &str = "yönetici";
/// Title marker for teammate-evaluation forms.
pub const TEAMMATE_FORM_MARKER: &str = "takım arkadaşı";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

/// Organizational role, ordered from least to most senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Manager,
    Coordinator,
    Director,
    Admin,
}

impl Role {
    /// The single shared rank table. Referenced by both the relation policy
    /// and completion logic; admin is deliberately off the evaluation chain.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Employee => 1,
            Self::Manager => 2,
            Self::Coordinator => 3,
            Self::Director => 4,
            Self::Admin => 99,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Manager => "Manager",
            Self::Coordinator => "Coordinator",
            Self::Director => "Director",
            Self::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Primary department, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// Additional departments for roles that cover several of them.
    #[serde(default)]
    pub departments: Vec<String>,
    /// Externally maintained KPI value, mutated only by admins. Never
    /// derived from survey answers.
    #[serde(default)]
    pub kpi: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<CategoryId>,
}

/// The answerable shape of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum QuestionKind {
    Rating { min: u8, max: u8 },
    Text,
}

/// A question belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: QuestionId,
    pub name: String,
    pub category: CategoryId,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Ad-hoc question carried directly on a survey. Kept for older synthetic
/// numeric-id surveys that predate the category catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub id: QuestionId,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    Draft,
    Active,
    Inactive,
}

/// Visibility rule attached to a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    All,
    Admins,
    Managers,
    Employees,
    Department,
    Specific,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    /// Category references; each entry may be a category name or id.
    #[serde(default)]
    pub categories: Vec<String>,
    pub status: SurveyStatus,
    /// Legacy fixed question list, concatenated with category questions.
    #[serde(default)]
    pub questions: Vec<SurveyQuestion>,
    pub assignment_type: AssignmentType,
    #[serde(default)]
    pub assigned_departments: Vec<String>,
    #[serde(default)]
    pub assigned_users: Vec<UserId>,
    #[serde(default)]
    pub assigned_roles: Vec<Role>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Survey family, classified from the title markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyKind {
    /// Self/keeper/general forms answered about oneself.
    General,
    /// Forms where the acting user evaluates a superior.
    ManagerForm,
    /// Forms where the acting user evaluates a same-department peer.
    TeammateForm,
}

impl Survey {
    pub fn kind(&self) -> SurveyKind {
        let title = self.title.to_lowercase();
        if title.contains(MANAGER_FORM_MARKER) {
            SurveyKind::ManagerForm
        } else if title.contains(TEAMMATE_FORM_MARKER) {
            SurveyKind::TeammateForm
        } else {
            SurveyKind::General
        }
    }

    /// Whether this survey participates in composite-score aggregation.
    pub fn is_keeper(&self) -> bool {
        self.title.to_lowercase().contains(KEEPER_MARKER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Draft,
    Submitted,
}

/// A single submitted answer. The question id is loosely typed on purpose:
/// answers were persisted across several schema revisions (string ids,
/// object ids, legacy prefixed ids) and are reconciled by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub survey: SurveyId,
    /// The user the response is about.
    pub employee: UserId,
    /// The acting user, when distinct from the target (peer/manager
    /// evaluations).
    #[serde(default)]
    pub evaluator: Option<UserId>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub status: ResponseStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Response {
    pub fn is_submitted(&self) -> bool {
        self.status == ResponseStatus::Submitted
    }

    /// The user whose action produced this response: the evaluator for
    /// manager/teammate forms, otherwise the target employee.
    pub fn actor_for(&self, kind: SurveyKind) -> &UserId {
        match kind {
            SurveyKind::ManagerForm | SurveyKind::TeammateForm => {
                self.evaluator.as_ref().unwrap_or(&self.employee)
            }
            SurveyKind::General => &self.employee,
        }
    }
}
