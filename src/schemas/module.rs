use serde::Serialize;

use crate::core::time::format_primitive;
use crate::db::models::{Module, ModuleView};
use crate::schemas::course::ResourceResponse;

#[derive(Debug, Serialize)]
pub(crate) struct ModuleContentResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) order_index: i32,
    pub(crate) content: String,
    pub(crate) video_url: String,
    pub(crate) admin_completed: bool,
    pub(crate) resources: Vec<ResourceResponse>,
    pub(crate) first_viewed_at: Option<String>,
    pub(crate) last_viewed_at: Option<String>,
}

impl ModuleContentResponse {
    pub(crate) fn from_db(
        module: Module,
        resources: Vec<ResourceResponse>,
        view: Option<ModuleView>,
    ) -> Self {
        Self {
            id: module.id,
            course_id: module.course_id,
            title: module.title,
            description: module.description,
            order_index: module.order_index,
            content: module.content,
            video_url: module.video_url,
            admin_completed: module.admin_completed,
            resources,
            first_viewed_at: view.as_ref().map(|v| format_primitive(v.first_viewed_at)),
            last_viewed_at: view.as_ref().map(|v| format_primitive(v.last_viewed_at)),
        }
    }
}
