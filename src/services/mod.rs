pub mod error;
pub mod hobby_service;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use hobby_service::HobbyService;
