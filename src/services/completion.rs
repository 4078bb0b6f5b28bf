use sqlx::PgPool;

use crate::db::models::ModuleView;
use crate::repositories;

/// Progress of one student through one course. Both counts are over
/// published modules only; completion is the module-level admin flag, the
/// same for every enrolled student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CourseProgress {
    pub(crate) total_count: i64,
    pub(crate) completed_count: i64,
}

impl CourseProgress {
    /// A certificate requires every published module completed, and a course
    /// with no published modules is never eligible.
    pub(crate) fn is_certificate_eligible(&self) -> bool {
        self.total_count > 0 && self.completed_count == self.total_count
    }
}

pub(crate) async fn course_progress(
    pool: &PgPool,
    course_id: &str,
) -> Result<CourseProgress, sqlx::Error> {
    let total_count = repositories::modules::count_published(pool, course_id).await?;
    let completed_count =
        repositories::modules::count_published_completed(pool, course_id).await?;

    Ok(CourseProgress { total_count, completed_count })
}

/// Side effect of a student opening a module: upsert the view receipt. The
/// receipt never feeds eligibility.
pub(crate) async fn record_module_view(
    pool: &PgPool,
    student_id: &str,
    module_id: &str,
    viewed_at: time::PrimitiveDateTime,
) -> Result<ModuleView, sqlx::Error> {
    repositories::module_views::record_view(pool, student_id, module_id, viewed_at).await
}

#[cfg(test)]
mod tests {
    use super::CourseProgress;

    #[test]
    fn full_completion_is_eligible() {
        let progress = CourseProgress { total_count: 2, completed_count: 2 };
        assert!(progress.is_certificate_eligible());
    }

    #[test]
    fn partial_completion_is_not_eligible() {
        let progress = CourseProgress { total_count: 2, completed_count: 1 };
        assert!(!progress.is_certificate_eligible());
    }

    #[test]
    fn empty_course_is_not_eligible() {
        let progress = CourseProgress { total_count: 0, completed_count: 0 };
        assert!(!progress.is_certificate_eligible());
    }
}
