use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schemas::user::UserResponse;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct RegisterRequest {
    #[validate(length(min = 3, max = 150, message = "username must be 3-150 characters"))]
    pub(crate) username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub(crate) password: String,
    #[validate(length(min = 1, max = 30, message = "first_name is required"))]
    #[serde(alias = "firstName")]
    pub(crate) first_name: String,
    #[validate(length(min = 1, max = 30, message = "last_name is required"))]
    #[serde(alias = "lastName")]
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[validate(length(min = 1, max = 20, message = "student_id is required"))]
    #[serde(alias = "studentId")]
    pub(crate) student_id: String,
    #[validate(length(min = 6, max = 15, message = "phone must be 6-15 characters"))]
    pub(crate) phone: String,
    #[serde(alias = "batchId")]
    pub(crate) batch_id: String,
    #[serde(default)]
    #[serde(alias = "dateOfBirth")]
    pub(crate) date_of_birth: Option<time::Date>,
    #[serde(default)]
    pub(crate) address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdpLoginRequest {
    #[serde(alias = "idToken")]
    pub(crate) id_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct IdpRegisterRequest {
    #[serde(alias = "idToken")]
    pub(crate) id_token: String,
    #[validate(length(min = 1, max = 60, message = "full_name is required"))]
    #[serde(alias = "fullName")]
    pub(crate) full_name: String,
    #[validate(length(min = 1, max = 20, message = "student_id is required"))]
    #[serde(alias = "studentId")]
    pub(crate) student_id: String,
    #[validate(length(min = 6, max = 15, message = "phone must be 6-15 characters"))]
    pub(crate) phone: String,
    #[serde(alias = "batchId")]
    pub(crate) batch_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
    pub(crate) user: UserResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisteredResponse {
    pub(crate) detail: String,
    pub(crate) user: UserResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    pub(crate) detail: String,
}
