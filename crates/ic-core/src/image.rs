use serde::{Deserialize, Serialize};

/// Mime type assumed when the acquisition adapter does not report one.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Normalized image descriptor produced by the image acquisition adapter.
///
/// The engine never opens the file itself; the uri is handed through to
/// the upload adapter untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub uri: String,
    pub mime_type: String,
    pub file_name: String,
}

impl ImageDescriptor {
    pub fn new(
        uri: impl Into<String>,
        mime_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    /// Descriptor with the jpeg default mime type.
    pub fn jpeg(uri: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self::new(uri, DEFAULT_IMAGE_MIME, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_uses_default_mime() {
        let image = ImageDescriptor::jpeg("file:///tmp/a.jpg", "a.jpg");
        assert_eq!(image.mime_type, DEFAULT_IMAGE_MIME);
        assert_eq!(image.file_name, "a.jpg");
    }
}
