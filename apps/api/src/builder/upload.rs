//! File selection surface: which uploads are accepted, which one is analyzed.

use bytes::Bytes;

use crate::builder::fields::FileMetadata;
use crate::gateway::ImagePayload;

/// Extensions the picker accepts: documents, code/text and common images.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "txt", "rtf", "js", "jsx", "ts", "tsx", "py", "java", "cpp", "c", "html", "css",
    "json", "md", "png", "jpg", "jpeg", "gif", "svg", "webp",
];

/// Image types the vision model accepts. SVG is uploadable but never analyzed.
pub const ANALYZABLE_MEDIA_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// One file from a multi-file selection.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// Declared media type, if the client sent one.
    pub media_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    pub fn is_allowed(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Declared analyzable image type, else one inferred from the extension.
    pub fn image_media_type(&self) -> Option<String> {
        if let Some(declared) = self.media_type.as_deref() {
            if ANALYZABLE_MEDIA_TYPES.contains(&declared) {
                return Some(declared.to_string());
            }
        }
        let inferred = match self.extension()?.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => return None,
        };
        Some(inferred.to_string())
    }

    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            size: self.bytes.len() as u64,
        }
    }

    pub fn to_image_payload(&self) -> Option<ImagePayload> {
        self.image_media_type()
            .map(|media_type| ImagePayload::from_bytes(&self.bytes, media_type))
    }
}

/// The first image-typed file of a batch, which is the only one sent for analysis.
pub fn first_image(files: &[UploadedFile]) -> Option<&UploadedFile> {
    files.iter().find(|f| f.image_media_type().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, media_type: Option<&str>) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            media_type: media_type.map(String::from),
            bytes: Bytes::from_static(b"data"),
        }
    }

    #[test]
    fn test_extension_allow_list() {
        assert!(file("notes.MD", None).is_allowed());
        assert!(file("App.tsx", None).is_allowed());
        assert!(!file("setup.exe", None).is_allowed());
        assert!(!file("Makefile", None).is_allowed());
        assert!(!file("trailing.", None).is_allowed());
    }

    #[test]
    fn test_image_type_declared_or_inferred() {
        assert_eq!(
            file("shot.bin", Some("image/webp")).image_media_type().as_deref(),
            Some("image/webp")
        );
        assert_eq!(
            file("shot.JPG", Some("application/octet-stream"))
                .image_media_type()
                .as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(file("doc.pdf", Some("application/pdf")).image_media_type(), None);
    }

    #[test]
    fn test_first_image_wins() {
        let files = vec![
            file("readme.md", Some("text/markdown")),
            file("a.png", Some("image/png")),
            file("b.jpg", Some("image/jpeg")),
        ];
        assert_eq!(first_image(&files).unwrap().name, "a.png");
        assert!(first_image(&files[..1]).is_none());
    }

    #[test]
    fn test_svg_is_accepted_but_not_analyzed() {
        let svg = file("logo.svg", Some("image/svg+xml"));
        assert!(svg.is_allowed());
        assert_eq!(svg.image_media_type(), None);

        let files = vec![svg, file("mock.webp", None)];
        assert_eq!(first_image(&files).unwrap().name, "mock.webp");
    }

    #[test]
    fn test_metadata_keeps_name_and_size_only() {
        let meta = file("a.png", None).metadata();
        assert_eq!(meta.name, "a.png");
        assert_eq!(meta.size, 4);
    }

    #[test]
    fn test_payload_is_plain_base64() {
        let payload = file("a.png", None).to_image_payload().unwrap();
        assert_eq!(payload.data, "ZGF0YQ==");
        assert_eq!(payload.media_type, "image/png");
    }
}
