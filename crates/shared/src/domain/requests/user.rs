use serde::{Deserialize, Serialize};

/// Row-level insert for `users`; `password` is already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}
