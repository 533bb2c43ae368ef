//! Result alias used across the workspace.

use crate::error::AppError;

pub type AppResult<T> = Result<T, AppError>;
