use serde::Serialize;

use crate::core::time::{format_offset, format_primitive};
use crate::db::models::{StudentProfile, User};
use crate::schemas::certificate::CertificateResponse;

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) email: Option<String>,
    pub(crate) full_name: String,
    pub(crate) is_staff: bool,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            is_staff: user.is_staff,
            is_active: user.is_active,
            created_at: format_primitive(user.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileResponse {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) student_id: String,
    pub(crate) full_name: String,
    pub(crate) phone: String,
    pub(crate) batch_id: Option<String>,
    pub(crate) date_of_birth: Option<String>,
    pub(crate) address: String,
    pub(crate) profile_picture_key: Option<String>,
    pub(crate) enrollment_date: String,
    pub(crate) is_active: bool,
    pub(crate) is_verified: bool,
    pub(crate) verified_at: Option<String>,
}

impl ProfileResponse {
    pub(crate) fn from_db(profile: StudentProfile, full_name: String) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            student_id: profile.student_id,
            full_name,
            phone: profile.phone,
            batch_id: profile.batch_id,
            date_of_birth: profile.date_of_birth.map(|date| date.to_string()),
            address: profile.address,
            profile_picture_key: profile.profile_picture_key,
            enrollment_date: profile.enrollment_date.to_string(),
            is_active: profile.is_active,
            is_verified: profile.is_verified,
            verified_at: profile.verified_at.map(format_offset),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileDetailResponse {
    #[serde(flatten)]
    pub(crate) profile: ProfileResponse,
    pub(crate) total_modules: i64,
    pub(crate) completed_modules: i64,
    pub(crate) certificates: Vec<CertificateResponse>,
}
