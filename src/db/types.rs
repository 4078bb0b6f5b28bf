use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "resourcetype", rename_all = "lowercase")]
pub(crate) enum ResourceType {
    Pdf,
    Doc,
    Ppt,
    Other,
}

impl ResourceType {
    /// Classification used when staff upload a file without an explicit type.
    pub(crate) fn from_extension(extension: &str) -> Self {
        match extension {
            "pdf" => Self::Pdf,
            "doc" | "docx" => Self::Doc,
            "ppt" | "pptx" => Self::Ppt,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceType;

    #[test]
    fn extension_classification() {
        assert_eq!(ResourceType::from_extension("pdf"), ResourceType::Pdf);
        assert_eq!(ResourceType::from_extension("docx"), ResourceType::Doc);
        assert_eq!(ResourceType::from_extension("pptx"), ResourceType::Ppt);
        assert_eq!(ResourceType::from_extension("zip"), ResourceType::Other);
    }
}
