use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct BatchCreate {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub(crate) name: String,
    #[serde(alias = "startDate")]
    pub(crate) start_date: time::Date,
    #[serde(alias = "endDate")]
    pub(crate) end_date: time::Date,
    #[serde(default = "default_true")]
    #[serde(alias = "isActive")]
    pub(crate) is_active: bool,
    #[serde(default)]
    pub(crate) description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchUpdate {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    #[serde(alias = "startDate")]
    pub(crate) start_date: Option<time::Date>,
    #[serde(default)]
    #[serde(alias = "endDate")]
    pub(crate) end_date: Option<time::Date>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default = "default_duration")]
    pub(crate) duration: String,
    #[serde(default = "default_true")]
    #[serde(alias = "isActive")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) duration: Option<String>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ModuleCreate {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(alias = "orderIndex")]
    #[validate(range(min = 0, message = "order_index must be non-negative"))]
    pub(crate) order_index: i32,
    #[serde(default)]
    pub(crate) content: String,
    #[serde(default)]
    #[serde(alias = "videoUrl")]
    pub(crate) video_url: String,
    #[serde(default)]
    #[serde(alias = "isPublished")]
    pub(crate) is_published: bool,
    #[serde(default)]
    #[serde(alias = "adminCompleted")]
    pub(crate) admin_completed: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModuleUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    #[serde(alias = "orderIndex")]
    pub(crate) order_index: Option<i32>,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    #[serde(alias = "videoUrl")]
    pub(crate) video_url: Option<String>,
    #[serde(default)]
    #[serde(alias = "isPublished")]
    pub(crate) is_published: Option<bool>,
    #[serde(default)]
    #[serde(alias = "adminCompleted")]
    pub(crate) admin_completed: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AnnouncementCreate {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub(crate) content: String,
    #[serde(default)]
    #[serde(alias = "batchId")]
    pub(crate) batch_id: Option<String>,
    #[serde(default)]
    #[serde(alias = "isGlobal")]
    pub(crate) is_global: bool,
    #[serde(default = "default_true")]
    #[serde(alias = "isActive")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnnouncementUpdate {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    #[serde(alias = "isGlobal")]
    pub(crate) is_global: Option<bool>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct BulletinCreate {
    #[validate(length(min = 1, max = 500, message = "text must be 1-500 characters"))]
    pub(crate) text: String,
    #[serde(default = "default_true")]
    #[serde(alias = "isActive")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulletinUpdate {
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct BranchCreate {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub(crate) name: String,
    #[validate(length(min = 6, max = 20, message = "phone_number must be 6-20 characters"))]
    #[serde(alias = "phoneNumber")]
    pub(crate) phone_number: String,
    #[serde(default)]
    pub(crate) address: String,
    #[serde(default)]
    #[serde(alias = "googleMapLink")]
    pub(crate) google_map_link: String,
    #[serde(default = "default_true")]
    #[serde(alias = "isActive")]
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchUpdate {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    #[serde(alias = "phoneNumber")]
    pub(crate) phone_number: Option<String>,
    #[serde(default)]
    pub(crate) address: Option<String>,
    #[serde(default)]
    #[serde(alias = "googleMapLink")]
    pub(crate) google_map_link: Option<String>,
    #[serde(default)]
    #[serde(alias = "isActive")]
    pub(crate) is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct BranchPhoneCreate {
    #[validate(length(min = 1, max = 100, message = "label is required"))]
    pub(crate) label: String,
    #[validate(length(min = 6, max = 20, message = "phone_number must be 6-20 characters"))]
    #[serde(alias = "phoneNumber")]
    pub(crate) phone_number: String,
    #[serde(default)]
    #[serde(alias = "orderIndex")]
    pub(crate) order_index: i32,
}

fn default_true() -> bool {
    true
}

fn default_duration() -> String {
    "12 Weeks".to_string()
}
