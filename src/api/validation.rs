use std::path::Path;

use validator::Validate;

use crate::api::errors::ApiError;

pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("{field} is invalid")),
                }
            }
        }
        messages.sort();
        ApiError::UnprocessableEntity(messages.join("; "))
    })
}

pub(crate) fn file_extension(filename: &str) -> Result<String, ApiError> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| ApiError::BadRequest("File must have an extension".to_string()))
}

pub(crate) fn validate_image_upload(
    filename: &str,
    content_type: &str,
    allowed_extensions: &[String],
) -> Result<String, ApiError> {
    let extension = file_extension(filename)?;

    if !allowed_extensions.iter().any(|allowed| allowed == &extension) {
        return Err(ApiError::BadRequest(format!("File extension '{extension}' is not allowed")));
    }

    let mime = content_type.trim().to_ascii_lowercase();
    if image_mime_allowed_for_extension(&mime, &extension) {
        Ok(extension)
    } else {
        Err(ApiError::BadRequest(format!(
            "MIME type '{mime}' does not match extension '.{extension}'"
        )))
    }
}

pub(crate) fn validate_document_upload(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, ApiError> {
    let extension = file_extension(filename)?;

    if allowed_extensions.iter().any(|allowed| allowed == &extension) {
        Ok(extension)
    } else {
        Err(ApiError::BadRequest(format!("File extension '{extension}' is not allowed")))
    }
}

pub(crate) fn sanitized_filename(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') { ch } else { '_' })
        .collect()
}

fn image_mime_allowed_for_extension(mime: &str, extension: &str) -> bool {
    match extension {
        "jpg" | "jpeg" => matches!(mime, "image/jpeg" | "image/jpg"),
        "png" => mime == "image/png",
        "webp" => mime == "image/webp",
        "gif" => mime == "image/gif",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_upload_checks_extension_and_mime() {
        let allowed = vec!["jpg".to_string(), "png".to_string()];
        assert!(validate_image_upload("photo.png", "image/png", &allowed).is_ok());
        assert!(validate_image_upload("photo.png", "image/jpeg", &allowed).is_err());
        assert!(validate_image_upload("photo.webp", "image/webp", &allowed).is_err());
        assert!(validate_image_upload("photo", "image/png", &allowed).is_err());
    }

    #[test]
    fn document_upload_checks_extension() {
        let allowed = vec!["pdf".to_string(), "docx".to_string()];
        assert_eq!(validate_document_upload("Syllabus.PDF", &allowed).unwrap(), "pdf");
        assert!(validate_document_upload("malware.exe", &allowed).is_err());
    }

    #[test]
    fn sanitized_filename_strips_paths_and_specials() {
        assert_eq!(sanitized_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitized_filename("my syllabus (v2).pdf"), "my_syllabus__v2_.pdf");
    }
}
