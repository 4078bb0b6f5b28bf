use serde::Serialize;

use crate::schemas::announcement::AnnouncementResponse;
use crate::schemas::course::CourseResponse;
use crate::schemas::site::{BranchResponse, GalleryImageResponse};
use crate::schemas::user::ProfileResponse;

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) student: ProfileResponse,
    pub(crate) courses: Vec<CourseResponse>,
    pub(crate) announcements: Vec<AnnouncementResponse>,
    pub(crate) completed_modules: i64,
    pub(crate) branches: Vec<BranchResponse>,
    pub(crate) gallery_images: Vec<GalleryImageResponse>,
}
