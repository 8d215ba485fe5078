use super::domain::{AssignmentType, Role, Survey, SurveyId, User, UserId};
use serde::Serialize;

/// Pure visibility gate for a single survey.
///
/// Admins always pass; everyone else is decided by the survey's assignment
/// type. Unknown configurations deny by default.
pub fn can_access(survey: &Survey, user: &User) -> bool {
    if user.role == Role::Admin {
        return true;
    }

    match survey.assignment_type {
        AssignmentType::All => true,
        AssignmentType::Admins => false,
        AssignmentType::Managers => user.role == Role::Manager,
        AssignmentType::Employees => user.role == Role::Employee,
        AssignmentType::Department => {
            if survey.assigned_departments.is_empty() {
                return false;
            }
            match user.department.as_deref().map(str::trim) {
                Some(department) if !department.is_empty() => survey
                    .assigned_departments
                    .iter()
                    .any(|assigned| assigned.trim() == department),
                _ => false,
            }
        }
        AssignmentType::Specific => survey.assigned_users.contains(&user.id),
    }
}

/// One disjunct of a listing filter: the survey must carry this assignment
/// type and, where present, the department/user constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentClause {
    pub assignment_type: AssignmentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserId>,
}

impl AssignmentClause {
    fn assignment(assignment_type: AssignmentType) -> Self {
        Self {
            assignment_type,
            department: None,
            user: None,
        }
    }

    fn matches(&self, survey: &Survey) -> bool {
        if survey.assignment_type != self.assignment_type {
            return false;
        }
        if let Some(department) = self.department.as_deref().map(str::trim) {
            if !survey
                .assigned_departments
                .iter()
                .any(|assigned| assigned.trim() == department)
            {
                return false;
            }
        }
        if let Some(user) = &self.user {
            if !survey.assigned_users.contains(user) {
                return false;
            }
        }
        true
    }
}

/// Declarative listing filter, translatable to a storage query or evaluated
/// in memory via [`SurveyFilter::matches`]. The filter and [`can_access`]
/// must stay semantically consistent: a listing must never surface a survey
/// the gate would reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "filter", content = "clauses")]
pub enum SurveyFilter {
    Unrestricted,
    AnyOf(Vec<AssignmentClause>),
}

impl SurveyFilter {
    pub fn matches(&self, survey: &Survey) -> bool {
        match self {
            SurveyFilter::Unrestricted => true,
            SurveyFilter::AnyOf(clauses) => clauses.iter().any(|clause| clause.matches(survey)),
        }
    }
}

/// Build the listing filter for a user.
///
/// Managers get the manager channel, employees the employee channel;
/// coordinators and directors get neither (the gate only admits those exact
/// roles to the role channels). The department clause is emitted only when
/// the user actually has a department.
pub fn build_list_filter(user: &User) -> SurveyFilter {
    if user.role == Role::Admin {
        return SurveyFilter::Unrestricted;
    }

    let mut clauses = vec![AssignmentClause::assignment(AssignmentType::All)];

    match user.role {
        Role::Manager => clauses.push(AssignmentClause::assignment(AssignmentType::Managers)),
        Role::Employee => clauses.push(AssignmentClause::assignment(AssignmentType::Employees)),
        _ => {}
    }

    if let Some(department) = user
        .department
        .as_deref()
        .map(str::trim)
        .filter(|department| !department.is_empty())
    {
        clauses.push(AssignmentClause {
            assignment_type: AssignmentType::Department,
            department: Some(department.to_string()),
            user: None,
        });
    }

    clauses.push(AssignmentClause {
        assignment_type: AssignmentType::Specific,
        department: None,
        user: Some(user.id.clone()),
    });

    SurveyFilter::AnyOf(clauses)
}

/// Convenience wrapper for callers that already hold the survey collection.
pub fn visible_survey_ids(user: &User, surveys: &[Survey]) -> Vec<SurveyId> {
    let filter = build_list_filter(user);
    surveys
        .iter()
        .filter(|survey| filter.matches(survey))
        .map(|survey| survey.id.clone())
        .collect()
}
