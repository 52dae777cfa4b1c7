use thiserror::Error;

use crate::database::store::StoreError;
use crate::database::update::UpdateRejection;
use crate::schema::ValidationReport;

/// The outcome classes a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    Infrastructure,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    SchemaViolation(#[from] ValidationReport),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl ServiceError {
    pub fn hobby_not_found() -> Self {
        ServiceError::NotFound("Hobby not found".to_string())
    }

    pub fn category_not_found(name: &str) -> Self {
        ServiceError::NotFound(format!("Category '{}' not found", name))
    }

    pub fn item_not_found() -> Self {
        ServiceError::NotFound("Item not found".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::InvalidInput(_) | ServiceError::SchemaViolation(_) => ErrorKind::InvalidInput,
            ServiceError::Store(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(rejection) => rejection.into(),
            other => ServiceError::Store(other),
        }
    }
}

impl From<UpdateRejection> for ServiceError {
    fn from(rejection: UpdateRejection) -> Self {
        ServiceError::Conflict(rejection.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
