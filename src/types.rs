/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// The authenticated caller on whose behalf the service acts.
/// `user_id` is the ownership key of every hobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub user_id: String,
}

impl Owner {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}
