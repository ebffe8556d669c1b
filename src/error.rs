/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed upstream record: {0}")]
    UpstreamData(String),

    #[error("Unknown model architecture: {0}")]
    UnknownModel(String),
}

pub type AppResult<T> = Result<T, AppError>;
