use serde::Serialize;

use crate::db::models::Certificate;

#[derive(Debug, Serialize)]
pub(crate) struct CertificateResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) certificate_number: String,
    pub(crate) issue_date: String,
    pub(crate) has_pdf: bool,
}

impl CertificateResponse {
    pub(crate) fn from_db(certificate: Certificate) -> Self {
        Self {
            id: certificate.id,
            student_id: certificate.student_id,
            course_id: certificate.course_id,
            certificate_number: certificate.certificate_number,
            issue_date: certificate.issue_date.to_string(),
            has_pdf: certificate.pdf_key.is_some(),
        }
    }
}
