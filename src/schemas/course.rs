use serde::Serialize;

use crate::core::time::format_primitive;
use crate::db::models::{Course, Module, Resource};
use crate::db::types::ResourceType;
use crate::schemas::certificate::CertificateResponse;

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) thumbnail_key: Option<String>,
    pub(crate) duration: String,
    pub(crate) is_active: bool,
    pub(crate) modules_count: i64,
    pub(crate) created_at: String,
}

impl CourseResponse {
    pub(crate) fn from_db(course: Course, modules_count: i64) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            thumbnail_key: course.thumbnail_key,
            duration: course.duration,
            is_active: course.is_active,
            modules_count,
            created_at: format_primitive(course.created_at),
        }
    }
}

/// Public module listing entry; content stays behind the module endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ModuleOverview {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) order_index: i32,
}

impl ModuleOverview {
    pub(crate) fn from_db(module: Module) -> Self {
        Self {
            id: module.id,
            title: module.title,
            description: module.description,
            order_index: module.order_index,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ResourceResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) module_id: Option<String>,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) file_name: String,
    pub(crate) file_size: i64,
    pub(crate) resource_type: ResourceType,
    pub(crate) uploaded_at: String,
}

impl ResourceResponse {
    pub(crate) fn from_db(resource: Resource) -> Self {
        Self {
            id: resource.id,
            course_id: resource.course_id,
            module_id: resource.module_id,
            title: resource.title,
            description: resource.description,
            file_name: resource.file_name,
            file_size: resource.file_size,
            resource_type: resource.resource_type,
            uploaded_at: format_primitive(resource.uploaded_at),
        }
    }
}

/// Course overview. The gated fields are `None`/empty for anonymous and
/// non-enrolled viewers.
#[derive(Debug, Serialize)]
pub(crate) struct CourseDetailResponse {
    #[serde(flatten)]
    pub(crate) course: CourseResponse,
    pub(crate) modules: Vec<ModuleOverview>,
    pub(crate) resources: Vec<ResourceResponse>,
    pub(crate) is_enrolled: bool,
    pub(crate) completed_module_ids: Vec<String>,
    pub(crate) certificate: Option<CertificateResponse>,
}
