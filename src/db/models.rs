use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::db::types::ResourceType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) email: Option<String>,
    pub(crate) hashed_password: Option<String>,
    pub(crate) full_name: String,
    pub(crate) is_staff: bool,
    pub(crate) is_active: bool,
    pub(crate) idp_subject: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Batch {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) start_date: Date,
    pub(crate) end_date: Date,
    pub(crate) is_active: bool,
    pub(crate) description: String,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct StudentProfile {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) student_id: String,
    pub(crate) phone: String,
    pub(crate) batch_id: Option<String>,
    pub(crate) date_of_birth: Option<Date>,
    pub(crate) address: String,
    pub(crate) profile_picture_key: Option<String>,
    pub(crate) enrollment_date: Date,
    pub(crate) is_active: bool,
    pub(crate) is_verified: bool,
    pub(crate) verified_at: Option<OffsetDateTime>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) thumbnail_key: Option<String>,
    pub(crate) duration: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Module {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) order_index: i32,
    pub(crate) content: String,
    pub(crate) video_url: String,
    pub(crate) is_published: bool,
    pub(crate) admin_completed: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

/// A receipt that a student opened a module. Never consulted for
/// certificate eligibility; completion is admin-declared on the module.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct ModuleView {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) module_id: String,
    pub(crate) first_viewed_at: PrimitiveDateTime,
    pub(crate) last_viewed_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Resource {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) module_id: Option<String>,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) file_key: String,
    pub(crate) file_name: String,
    pub(crate) file_size: i64,
    pub(crate) resource_type: ResourceType,
    pub(crate) is_active: bool,
    pub(crate) uploaded_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Announcement {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) batch_id: Option<String>,
    pub(crate) is_global: bool,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Bulletin {
    pub(crate) id: String,
    pub(crate) text: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Branch {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) image_key: Option<String>,
    pub(crate) phone_number: String,
    pub(crate) address: String,
    pub(crate) google_map_link: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct BranchPhone {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) phone_number: String,
    pub(crate) is_active: bool,
    pub(crate) order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct GalleryImage {
    pub(crate) id: String,
    pub(crate) image_key: String,
    pub(crate) caption: String,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Certificate {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) certificate_number: String,
    pub(crate) issue_date: Date,
    pub(crate) pdf_key: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}
