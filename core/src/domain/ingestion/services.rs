use std::io::Cursor;

use bytes::Bytes;
use image::ImageReader;
use tracing::{debug, instrument};

use crate::domain::{
    common::{IngestionConfig, entities::app_errors::CoreError},
    ingestion::entities::DecodedImage,
};

/// Validates and decodes an uploaded image.
///
/// Rejects with [`CoreError::InvalidInput`] when the declared content type is
/// not `image/*` or the bytes do not decode, and with
/// [`CoreError::FileTooLarge`] above the configured byte limit.
#[instrument(skip(file_bytes, config), fields(size = file_bytes.len()))]
pub fn ingest(
    file_bytes: Bytes,
    content_type: &str,
    config: &IngestionConfig,
) -> Result<DecodedImage, CoreError> {
    if !is_image_content_type(content_type) {
        return Err(CoreError::InvalidInput(
            "The uploaded file must be an image".to_string(),
        ));
    }

    if file_bytes.is_empty() {
        return Err(CoreError::InvalidInput("The uploaded file is empty".to_string()));
    }

    if file_bytes.len() > config.max_upload_bytes {
        return Err(CoreError::FileTooLarge {
            size: file_bytes.len(),
            limit: config.max_upload_bytes,
        });
    }

    let reader = ImageReader::new(Cursor::new(file_bytes.as_ref()))
        .with_guessed_format()
        .map_err(|e| CoreError::InvalidInput(format!("Failed to read image: {}", e)))?;

    let format = reader
        .format()
        .ok_or_else(|| CoreError::InvalidInput("Unsupported image format".to_string()))?;

    let decoded = reader
        .decode()
        .map_err(|e| CoreError::InvalidInput(format!("Failed to decode image: {}", e)))?;

    debug!(
        format = ?format,
        width = decoded.width(),
        height = decoded.height(),
        "Image decoded"
    );

    Ok(DecodedImage {
        data: file_bytes,
        mime_type: format.to_mime_type().to_string(),
        width: decoded.width(),
        height: decoded.height(),
    })
}

fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::test_utils::{sample_jpeg, sample_png};

    #[test]
    fn test_ingest_accepts_png() {
        let image = ingest(sample_png(), "image/png", &IngestionConfig::default()).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!((image.width, image.height), (4, 3));
    }

    #[test]
    fn test_ingest_sniffs_real_format() {
        // Client claims png, bytes are jpeg
        let image = ingest(sample_jpeg(), "image/png", &IngestionConfig::default()).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_ingest_rejects_non_image_content_type() {
        let err = ingest(sample_png(), "application/pdf", &IngestionConfig::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_ingest_rejects_corrupt_bytes() {
        let bytes = Bytes::from_static(b"\x89PNG\r\n\x1a\nnot really a png");
        let err = ingest(bytes, "image/png", &IngestionConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_ingest_rejects_unknown_format() {
        let bytes = Bytes::from_static(b"plain text pretending to be an image");
        let err = ingest(bytes, "image/jpeg", &IngestionConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_ingest_enforces_size_limit() {
        let png = sample_png();
        let config = IngestionConfig {
            max_upload_bytes: png.len() - 1,
        };
        let err = ingest(png.clone(), "image/png", &config).unwrap_err();
        assert_eq!(
            err,
            CoreError::FileTooLarge {
                size: png.len(),
                limit: png.len() - 1
            }
        );
    }

    #[test]
    fn test_ingest_rejects_empty_upload() {
        let err = ingest(Bytes::new(), "image/png", &IngestionConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
