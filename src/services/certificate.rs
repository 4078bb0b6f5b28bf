use sqlx::PgPool;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::config::Settings;
use crate::core::time::primitive_now_utc;
use crate::db::models::{Certificate, Course, StudentProfile};
use crate::repositories;
use crate::services::completion;
use crate::services::pdf::{self, CertificateDocument, PdfError};
use crate::services::storage::StorageService;

#[derive(Debug, Error)]
pub(crate) enum CertificateError {
    #[error("course has {completed} of {total} modules completed")]
    NotEligible { completed: i64, total: i64 },
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Render(#[from] PdfError),
    #[error("certificate upload failed: {0}")]
    Upload(String),
}

pub(crate) struct IssuedCertificate {
    pub(crate) certificate: Certificate,
    pub(crate) pdf_bytes: Vec<u8>,
    pub(crate) file_name: String,
}

pub(crate) fn certificate_number(prefix: &str, year: i32, student_number: &str) -> String {
    format!("{prefix}-{year}-{student_number}")
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}

/// Issue the certificate for an eligible (student, course) pair, creating
/// the row on first call and re-rendering the file on every call. The number
/// and issue date are fixed by the first successful generation; only the
/// stored file is replaced afterwards.
pub(crate) async fn issue_or_regenerate(
    pool: &PgPool,
    settings: &Settings,
    storage: Option<&StorageService>,
    profile: &StudentProfile,
    student_display_name: &str,
    course: &Course,
) -> Result<IssuedCertificate, CertificateError> {
    let progress = completion::course_progress(pool, &course.id).await?;
    if !progress.is_certificate_eligible() {
        return Err(CertificateError::NotEligible {
            completed: progress.completed_count,
            total: progress.total_count,
        });
    }

    let today = OffsetDateTime::now_utc().date();
    let base_number =
        certificate_number(&settings.certificate().number_prefix, today.year(), &profile.student_id);

    // The plain number collides when the same student completes a second
    // course within one year; later certificates get a numeric suffix.
    let mut certificate = None;
    let mut last_error = None;
    for attempt in 0u32..5 {
        let number = if attempt == 0 {
            base_number.clone()
        } else {
            format!("{base_number}-{}", attempt + 1)
        };

        match repositories::certificates::get_or_create(
            pool,
            repositories::certificates::CreateCertificate {
                id: &Uuid::new_v4().to_string(),
                student_id: &profile.id,
                course_id: &course.id,
                certificate_number: &number,
                issue_date: today,
                created_at: primitive_now_utc(),
            },
        )
        .await
        {
            Ok(row) => {
                certificate = Some(row);
                break;
            }
            Err(err) if is_unique_violation(&err) => {
                last_error = Some(err);
            }
            Err(err) => return Err(err.into()),
        }
    }

    let certificate = match certificate {
        Some(certificate) => certificate,
        None => {
            return Err(last_error
                .map(CertificateError::Db)
                .unwrap_or_else(|| CertificateError::Db(sqlx::Error::RowNotFound)));
        }
    };

    let pdf_bytes = render_and_store(
        pool,
        settings,
        storage,
        &certificate,
        student_display_name,
        &profile.student_id,
        &course.title,
    )
    .await?;

    metrics::counter!("certificates_generated_total").increment(1);

    let file_name = format!("certificate_{}.pdf", certificate.certificate_number);
    Ok(IssuedCertificate { certificate, pdf_bytes, file_name })
}

/// Shared rendering path for the student endpoint and the admin regenerate
/// action. Renders from the persisted number and issue date, then replaces
/// the stored object. A failed upload leaves the row intact; the next
/// generation attempt replaces the file again.
pub(crate) async fn render_and_store(
    pool: &PgPool,
    settings: &Settings,
    storage: Option<&StorageService>,
    certificate: &Certificate,
    student_display_name: &str,
    student_number: &str,
    course_title: &str,
) -> Result<Vec<u8>, CertificateError> {
    let document = CertificateDocument {
        student_name: student_display_name,
        student_number,
        course_title,
        certificate_number: &certificate.certificate_number,
        issue_date: certificate.issue_date,
        institution_name: &settings.certificate().institution_name,
        signatory_title: &settings.certificate().signatory_title,
    };

    let pdf_bytes = pdf::render_certificate(&document)?;

    if let Some(storage) = storage {
        let key = format!("certificates/certificate_{}.pdf", certificate.certificate_number);
        storage
            .upload_bytes(&key, "application/pdf", pdf_bytes.clone())
            .await
            .map_err(|err| CertificateError::Upload(err.to_string()))?;
        repositories::certificates::set_pdf_key(pool, &certificate.id, &key, primitive_now_utc())
            .await?;
    }

    Ok(pdf_bytes)
}

#[cfg(test)]
mod tests {
    use super::certificate_number;

    #[test]
    fn number_format_is_prefix_year_student() {
        assert_eq!(certificate_number("TTI", 2026, "S1"), "TTI-2026-S1");
        assert_eq!(certificate_number("NCC", 2025, "STU001"), "NCC-2025-STU001");
    }
}
