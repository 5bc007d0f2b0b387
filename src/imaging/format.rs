//! Content-type dispatch.
//!
//! The decoder is chosen from the origin's declared `Content-Type`, never
//! from file extensions or byte sniffing.

use image::ImageFormat;

/// Source formats the proxy can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Gif,
}

impl SourceFormat {
    /// Pick a decoder from a `Content-Type` value (case-insensitive substring match).
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();

        if content_type.contains("jpeg") || content_type.contains("jpg") {
            Some(SourceFormat::Jpeg)
        } else if content_type.contains("png") {
            Some(SourceFormat::Png)
        } else if content_type.contains("gif") {
            Some(SourceFormat::Gif)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "jpeg",
            SourceFormat::Png => "png",
            SourceFormat::Gif => "gif",
        }
    }
}

impl From<SourceFormat> for ImageFormat {
    fn from(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::Png => ImageFormat::Png,
            SourceFormat::Gif => ImageFormat::Gif,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_dispatch() {
        assert_eq!(SourceFormat::from_content_type("image/jpeg"), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_content_type("image/pjpeg"), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_content_type("IMAGE/JPG"), Some(SourceFormat::Jpeg));
        assert_eq!(
            SourceFormat::from_content_type("image/png; charset=binary"),
            Some(SourceFormat::Png)
        );
        assert_eq!(SourceFormat::from_content_type("image/gif"), Some(SourceFormat::Gif));
    }

    #[test]
    fn test_unsupported_content_types() {
        assert_eq!(SourceFormat::from_content_type(""), None);
        assert_eq!(SourceFormat::from_content_type("text/html; charset=utf-8"), None);
        assert_eq!(SourceFormat::from_content_type("image/webp"), None);
        assert_eq!(SourceFormat::from_content_type("application/octet-stream"), None);
    }
}
