use super::domain::{Category, Response, Subcategory, Survey, SurveyId, User, UserId};

/// Storage abstraction over the persisted directory. The core recomputes
/// everything per request from these collections; no caching happens on
/// this side of the boundary.
pub trait DirectoryRepository: Send + Sync {
    fn users(&self) -> Result<Vec<User>, RepositoryError>;
    fn user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn categories(&self) -> Result<Vec<Category>, RepositoryError>;
    fn subcategories(&self) -> Result<Vec<Subcategory>, RepositoryError>;
    fn surveys(&self) -> Result<Vec<Survey>, RepositoryError>;
    fn survey(&self, id: &SurveyId) -> Result<Option<Survey>, RepositoryError>;
    fn responses(&self) -> Result<Vec<Response>, RepositoryError>;

    /// Store a response, overwriting any existing record for the same
    /// (survey, employee) pair. At most one response per pair is current;
    /// concurrent submissions resolve as last-write-wins.
    fn upsert_response(&self, response: Response) -> Result<Response, RepositoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
