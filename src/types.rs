use crate::errors::AppError;

// Result type shared by services and handlers
pub type Result<T> = std::result::Result<T, AppError>;
