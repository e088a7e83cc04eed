use bytes::Bytes;

/// An upload that has been checked to be a decodable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Original bytes, forwarded unchanged to inference.
    pub data: Bytes,
    /// MIME type sniffed from the bytes, not the one the client claimed.
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}
