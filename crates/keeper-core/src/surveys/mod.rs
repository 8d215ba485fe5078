//! Survey evaluation core: question resolution, answer reconciliation,
//! score computation, aggregation, and visibility/relation policies.

pub mod access;
pub mod answers;
pub mod catalog;
pub mod completion;
pub mod domain;
pub mod relations;
pub mod repository;
pub mod results;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use access::{build_list_filter, can_access, AssignmentClause, SurveyFilter};
pub use answers::{match_answers, MatchStrategy, MatchedAnswer};
pub use catalog::{CatalogQuestion, QuestionCatalog};
pub use completion::{CompletionCell, CompletionEntry, CompletionMatrix};
pub use domain::{
    Answer, AssignmentType, Category, CategoryId, QuestionId, QuestionKind, Response,
    ResponseStatus, Role, Subcategory, Survey, SurveyId, SurveyKind, SurveyQuestion, SurveyStatus,
    User, UserId,
};
pub use relations::{is_superior, is_teammate, superior_roles, superiors, teammates};
pub use repository::{DirectoryRepository, RepositoryError};
pub use results::{EmployeeSummary, EmployeeSurveySummary, ResponseAggregator};
pub use router::evaluation_router;
pub use scoring::{calculate_scores, classify, Dimension, ScoreCard};
pub use service::{
    EvaluationService, EvaluationServiceError, EvaluationTargetKind, ResponseSubmission,
    ResultScope, ResultSummaries, SurveyListEntry,
};
