pub(crate) mod announcements;
pub(crate) mod batches;
pub(crate) mod branches;
pub(crate) mod bulletins;
pub(crate) mod certificates;
pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod gallery;
pub(crate) mod module_views;
pub(crate) mod modules;
pub(crate) mod resources;
pub(crate) mod student_profiles;
pub(crate) mod users;
