//! Request types and payload helpers
//!
//! Payloads are loosely typed JSON on the wire. The types here cover the
//! shapes callers build most often; any `Serialize` value is accepted too.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Gender code used when the caller does not pick one
pub const DEFAULT_GENDER: u32 = 1;

/// Payload for `order/create` and `order/create/model`
///
/// `parent` is 0 for a model (training) order and the model's order id for a
/// generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub styles: Vec<u64>,
    pub gender: u32,
    pub parent: u64,
}

impl OrderRequest {
    /// Training order for a new model
    pub fn model(styles: Vec<u64>, gender: u32) -> Self {
        Self {
            styles,
            gender,
            parent: 0,
        }
    }

    /// Generation order on top of an already trained model
    pub fn generation(styles: Vec<u64>, gender: u32, parent: u64) -> Self {
        Self {
            styles,
            gender,
            parent,
        }
    }

    /// Whether this order trains a model rather than generating from one
    pub fn is_model(&self) -> bool {
        self.parent == 0
    }
}

/// A binary file part for multipart POST requests
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Form field name
    pub field_name: String,
    /// File name reported to the server
    pub file_name: String,
    /// MIME type of the content
    pub mime_type: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create an attachment, sniffing the MIME type from the content
    pub fn new(field_name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            mime_type: detect_image_mime_type(&bytes).to_string(),
            bytes,
        }
    }

    /// Override the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

/// Detect MIME type from image bytes
///
/// Falls back to `image/jpeg`, which is what the upload endpoint assumes for
/// selfies.
pub fn detect_image_mime_type(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        "image/png"
    } else if data.starts_with(b"RIFF") && data.get(8..12) == Some(b"WEBP") {
        "image/webp"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "image/gif"
    } else {
        "image/jpeg"
    }
}

/// Wrap image bytes in a base64 `data:` URI
pub fn encode_data_uri(data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        detect_image_mime_type(data),
        BASE64.encode(data)
    )
}

/// Fail with [`Error::ImageNotFound`] unless `path` exists
pub(crate) async fn ensure_image_exists(path: &Path) -> Result<()> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::ImageNotFound(path.to_path_buf())),
        Err(e) => Err(Error::ImageReadError(format!("{}: {}", path.display(), e))),
    }
}

/// Name to show for a style entry of the style catalog
pub fn style_display_name(style: &Value) -> &str {
    if style_gender(style) == Some("man") {
        if let Some(name) = non_empty_str(style, "name_male") {
            return name;
        }
    }
    non_empty_str(style, "name").unwrap_or("Unnamed Style")
}

/// Preview image URL for a style entry, picked by the style's gender
pub fn style_preview_image(style: &Value) -> Option<&str> {
    let gendered = match style_gender(style) {
        Some("woman") => non_empty_str(style, "image_female_v"),
        Some("man") => non_empty_str(style, "image_male_v"),
        _ => None,
    };

    gendered
        .or_else(|| non_empty_str(style, "image_v"))
        .or_else(|| non_empty_str(style, "image"))
}

fn style_gender(style: &Value) -> Option<&str> {
    style.get("gender").and_then(Value::as_str)
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_ensure_image_exists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ensure_image_exists(file.path()).await.is_ok());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("selfie.jpg");
        match ensure_image_exists(&missing).await {
            Err(Error::ImageNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected ImageNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_order_request_serialization() {
        let order = OrderRequest::model(vec![112, 5, 2572], 1);
        assert!(order.is_model());
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({"styles": [112, 5, 2572], "gender": 1, "parent": 0})
        );

        let generation = OrderRequest::generation(vec![94], 2, 4711);
        assert!(!generation.is_model());
        assert_eq!(serde_json::to_value(&generation).unwrap()["parent"], 4711);
    }

    #[test]
    fn test_detect_image_mime_type() {
        let png_bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_image_mime_type(&png_bytes), "image/png");

        let jpeg_bytes = [0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(detect_image_mime_type(&jpeg_bytes), "image/jpeg");

        let mut webp_bytes = vec![0u8; 12];
        webp_bytes[0..4].copy_from_slice(b"RIFF");
        webp_bytes[8..12].copy_from_slice(b"WEBP");
        assert_eq!(detect_image_mime_type(&webp_bytes), "image/webp");

        assert_eq!(detect_image_mime_type(b"GIF89a...."), "image/gif");
        assert_eq!(detect_image_mime_type(&[0x00, 0x01]), "image/jpeg");
    }

    #[test]
    fn test_encode_data_uri_jpeg() {
        let jpeg_bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let uri = encode_data_uri(&jpeg_bytes);
        let encoded = uri.strip_prefix("data:image/jpeg;base64,").unwrap();
        assert_eq!(BASE64.decode(encoded).unwrap(), jpeg_bytes);
    }

    #[test]
    fn test_attachment_mime_detection() {
        let attachment = Attachment::new("file", "selfie.png", vec![0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(attachment.mime_type, "image/png");

        let attachment = attachment.with_mime_type("application/octet-stream");
        assert_eq!(attachment.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_style_display_name() {
        let style = json!({"gender": "man", "name": "Knight", "name_male": "Sir Knight"});
        assert_eq!(style_display_name(&style), "Sir Knight");

        let style = json!({"gender": "man", "name": "Knight", "name_male": ""});
        assert_eq!(style_display_name(&style), "Knight");

        let style = json!({"gender": "woman", "name": "Anime", "name_male": "Ignored"});
        assert_eq!(style_display_name(&style), "Anime");

        assert_eq!(style_display_name(&json!({"id": 3})), "Unnamed Style");
    }

    #[test]
    fn test_style_preview_image() {
        let style = json!({
            "gender": "woman",
            "image_female_v": "f.jpg",
            "image_male_v": "m.jpg",
            "image_v": "v.jpg"
        });
        assert_eq!(style_preview_image(&style), Some("f.jpg"));

        let style = json!({"gender": "man", "image_male_v": "", "image_v": "v.jpg"});
        assert_eq!(style_preview_image(&style), Some("v.jpg"));

        let style = json!({"image": "plain.jpg"});
        assert_eq!(style_preview_image(&style), Some("plain.jpg"));

        assert_eq!(style_preview_image(&json!({"name": "x"})), None);
    }
}
