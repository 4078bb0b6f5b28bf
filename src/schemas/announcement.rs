use serde::Serialize;

use crate::core::time::format_primitive;
use crate::db::models::Announcement;

#[derive(Debug, Serialize)]
pub(crate) struct AnnouncementResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) batch_id: Option<String>,
    pub(crate) is_global: bool,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl AnnouncementResponse {
    pub(crate) fn from_db(announcement: Announcement) -> Self {
        Self {
            id: announcement.id,
            title: announcement.title,
            content: announcement.content,
            batch_id: announcement.batch_id,
            is_global: announcement.is_global,
            is_active: announcement.is_active,
            created_at: format_primitive(announcement.created_at),
        }
    }
}
