use stockroom_core::error::CoreError;

/// Error returned by repository methods that enforce domain rules
/// (hierarchy checks, tag normalization) in addition to running SQL.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
