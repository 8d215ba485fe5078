use super::access::{build_list_filter, can_access};
use super::completion::{CompletionEntry, CompletionMatrix};
use super::domain::{
    Response, ResponseStatus, Role, Survey, SurveyId, SurveyKind, User, UserId,
    MANAGER_FORM_MARKER,
};
use super::relations::{all_departments, is_superior, primary_department, superiors, teammates};
use super::repository::{DirectoryRepository, RepositoryError};
use super::results::{EmployeeSummary, EmployeeSurveySummary, ResponseAggregator};
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Facade over the evaluation core, composing the access, relation, and
/// aggregation policies on top of a directory repository. All computation is
/// request-scoped; every call re-reads the current persisted state.
pub struct EvaluationService<R> {
    directory: Arc<R>,
}

/// A visible survey together with its submitted-response count: the global
/// count for admins, the acting user's own count otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyListEntry {
    #[serde(flatten)]
    pub survey: Survey,
    pub submitted_responses: usize,
}

/// Which population a results query covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultScope {
    /// Every employee visible to the acting user's role.
    AllVisible,
    /// One employee.
    Employee(UserId),
}

/// Result payload for [`EvaluationService::compute_results_for_scope`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultSummaries {
    Overview(Vec<EmployeeSurveySummary>),
    Employee(Box<EmployeeSummary>),
}

/// Which candidate list an evaluation-target query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationTargetKind {
    Teammates,
    Superiors,
}

/// Incoming response payload. The evaluator is the acting user; it is
/// recorded on the stored response only when distinct from the target.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseSubmission {
    pub survey: SurveyId,
    pub employee: UserId,
    pub evaluator: UserId,
    #[serde(default)]
    pub answers: Vec<super::domain::Answer>,
    pub status: ResponseStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("user '{0}' not found")]
    UserNotFound(String),
    #[error("survey '{0}' not found")]
    SurveyNotFound(String),
    #[error("no submitted responses for employee '{0}'")]
    NoResults(String),
    #[error("{0}")]
    Forbidden(String),
}

impl EvaluationServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UserNotFound(_) | Self::SurveyNotFound(_) | Self::NoResults(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl<R> EvaluationService<R>
where
    R: DirectoryRepository + 'static,
{
    pub fn new(directory: Arc<R>) -> Self {
        Self { directory }
    }

    fn require_user(&self, id: &UserId) -> Result<User, EvaluationServiceError> {
        self.directory
            .user(id)?
            .ok_or_else(|| EvaluationServiceError::UserNotFound(id.0.clone()))
    }

    fn require_survey(&self, id: &SurveyId) -> Result<Survey, EvaluationServiceError> {
        self.directory
            .survey(id)?
            .ok_or_else(|| EvaluationServiceError::SurveyNotFound(id.0.clone()))
    }

    /// Surveys the acting user may see, each with its submitted-response
    /// count.
    pub fn list_visible_surveys(
        &self,
        acting: &UserId,
    ) -> Result<Vec<SurveyListEntry>, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let filter = build_list_filter(&user);
        let surveys = self.directory.surveys()?;
        let responses = self.directory.responses()?;

        let entries = surveys
            .into_iter()
            .filter(|survey| filter.matches(survey))
            .map(|survey| {
                let submitted = responses
                    .iter()
                    .filter(|response| response.survey == survey.id && response.is_submitted());
                let submitted_responses = if user.role == Role::Admin {
                    submitted.count()
                } else {
                    let kind = survey.kind();
                    submitted
                        .filter(|response| *response.actor_for(kind) == user.id)
                        .count()
                };
                SurveyListEntry {
                    survey,
                    submitted_responses,
                }
            })
            .collect();

        Ok(entries)
    }

    /// Gate for single-survey retrieval.
    pub fn can_access_survey(
        &self,
        survey_id: &SurveyId,
        acting: &UserId,
    ) -> Result<bool, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let survey = self.require_survey(survey_id)?;
        Ok(can_access(&survey, &user))
    }

    pub fn get_survey(
        &self,
        survey_id: &SurveyId,
        acting: &UserId,
    ) -> Result<Survey, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let survey = self.require_survey(survey_id)?;
        if !can_access(&survey, &user) {
            return Err(EvaluationServiceError::Forbidden(
                "you don't have access to this survey".to_string(),
            ));
        }
        Ok(survey)
    }

    /// Aggregated composite scores, scoped to what the acting user may see.
    pub fn compute_results_for_scope(
        &self,
        acting: &UserId,
        scope: ResultScope,
    ) -> Result<ResultSummaries, EvaluationServiceError> {
        match scope {
            ResultScope::AllVisible => Ok(ResultSummaries::Overview(self.results_overview(acting)?)),
            ResultScope::Employee(employee_id) => Ok(ResultSummaries::Employee(Box::new(
                self.employee_results(acting, &employee_id)?,
            ))),
        }
    }

    /// Listing view: one summary per (employee, survey) pair, restricted to
    /// employees visible to the acting user. Managers additionally never see
    /// manager-form summaries in the listing.
    pub fn results_overview(
        &self,
        acting: &UserId,
    ) -> Result<Vec<EmployeeSurveySummary>, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let users = self.directory.users()?;
        let categories = self.directory.categories()?;
        let subcategories = self.directory.subcategories()?;
        let surveys = self.directory.surveys()?;
        let responses = self.directory.responses()?;

        let visible: Vec<Response> = responses
            .into_iter()
            .filter(|response| {
                users
                    .iter()
                    .find(|candidate| candidate.id == response.employee)
                    .is_some_and(|employee| can_view_employee(&user, employee))
            })
            .collect();

        let aggregator = ResponseAggregator::new(&users, &categories, &subcategories, &surveys);
        let mut summaries = aggregator.summarize_all(&visible);

        if user.role == Role::Manager {
            summaries.retain(|summary| {
                !summary
                    .survey_title
                    .to_lowercase()
                    .contains(MANAGER_FORM_MARKER)
            });
        }

        Ok(summaries)
    }

    /// Detail view for one employee.
    pub fn employee_results(
        &self,
        acting: &UserId,
        employee_id: &UserId,
    ) -> Result<EmployeeSummary, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let employee = self.require_user(employee_id)?;

        if !can_view_employee(&user, &employee) {
            return Err(EvaluationServiceError::Forbidden(
                "you can only view results for employees in your department or your own"
                    .to_string(),
            ));
        }

        let users = self.directory.users()?;
        let categories = self.directory.categories()?;
        let subcategories = self.directory.subcategories()?;
        let surveys = self.directory.surveys()?;
        let responses = self.directory.responses()?;

        let aggregator = ResponseAggregator::new(&users, &categories, &subcategories, &surveys);
        aggregator
            .summarize_employee(employee_id, &responses)
            .ok_or_else(|| EvaluationServiceError::NoResults(employee_id.0.clone()))
    }

    /// The full per-(user, survey) completion matrix.
    pub fn build_completion_matrix(&self) -> Result<CompletionMatrix, EvaluationServiceError> {
        let users = self.directory.users()?;
        let surveys = self.directory.surveys()?;
        let responses = self.directory.responses()?;
        Ok(CompletionMatrix::build(&users, &surveys, &responses))
    }

    /// Completion rows for one user, in survey order.
    pub fn completion_for(
        &self,
        acting: &UserId,
    ) -> Result<Vec<CompletionEntry>, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let surveys = self.directory.surveys()?;
        let matrix = self.build_completion_matrix()?;
        Ok(matrix.rows_for(&user.id, &surveys))
    }

    /// Candidate list for peer or superior evaluation.
    pub fn list_evaluation_targets(
        &self,
        acting: &UserId,
        kind: EvaluationTargetKind,
    ) -> Result<Vec<User>, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let users = self.directory.users()?;
        let targets = match kind {
            EvaluationTargetKind::Teammates => teammates(&user, &users),
            EvaluationTargetKind::Superiors => superiors(&user, &users),
        };
        Ok(targets.into_iter().cloned().collect())
    }

    /// Store a draft or submitted response. Manager-form submissions require
    /// the acting user to be an eligible evaluator of the target (admins
    /// bypass). A resubmission for the same (survey, employee) pair
    /// overwrites the previous record.
    pub fn submit_response(
        &self,
        submission: ResponseSubmission,
    ) -> Result<Response, EvaluationServiceError> {
        let acting = self.require_user(&submission.evaluator)?;
        let target = self.require_user(&submission.employee)?;
        let survey = self.require_survey(&submission.survey)?;

        if survey.kind() == SurveyKind::ManagerForm
            && acting.role != Role::Admin
            && !is_superior(&acting, &target)
        {
            return Err(EvaluationServiceError::Forbidden(
                "you can only evaluate your superior in the hierarchy".to_string(),
            ));
        }

        let submitted_at = if submission.status == ResponseStatus::Submitted {
            Some(Utc::now())
        } else {
            None
        };
        let evaluator = if acting.id != target.id {
            Some(acting.id.clone())
        } else {
            None
        };

        let response = Response {
            survey: survey.id,
            employee: target.id,
            evaluator,
            answers: submission.answers,
            status: submission.status,
            submitted_at,
        };

        Ok(self.directory.upsert_response(response)?)
    }

    /// Raw answers of one stored response. Manager-form detail is restricted
    /// to admins.
    pub fn response_detail(
        &self,
        survey_id: &SurveyId,
        employee_id: &UserId,
        acting: &UserId,
    ) -> Result<Response, EvaluationServiceError> {
        let user = self.require_user(acting)?;
        let survey = self.require_survey(survey_id)?;

        if survey.kind() == SurveyKind::ManagerForm && user.role != Role::Admin {
            return Err(EvaluationServiceError::Forbidden(
                "only admins can view results of manager surveys".to_string(),
            ));
        }

        self.directory
            .responses()?
            .into_iter()
            .find(|response| response.survey == *survey_id && response.employee == *employee_id)
            .ok_or(EvaluationServiceError::Repository(RepositoryError::NotFound))
    }
}

/// Which employees' results the acting user may see: admins everyone,
/// managers their own plus their primary department, coordinators and
/// directors every department they cover, employees only themselves.
fn can_view_employee(acting: &User, target: &User) -> bool {
    if acting.id == target.id {
        return true;
    }
    match acting.role {
        Role::Admin => true,
        Role::Manager => match (primary_department(acting), primary_department(target)) {
            (Some(acting_department), Some(target_department)) => {
                acting_department == target_department
            }
            _ => false,
        },
        Role::Coordinator | Role::Director => primary_department(target)
            .map(|target_department| all_departments(acting).contains(&target_department))
            .unwrap_or(false),
        Role::Employee => false,
    }
}
