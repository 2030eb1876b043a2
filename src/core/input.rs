//! Media input abstraction for the bytes-based scan endpoint.
//!
//! This module provides `MediaInput`, which distinguishes raw bytes from a
//! blob that carries its own MIME type, and `ScanMediaRequest`, the builder
//! that resolves the type and size actually sent on the wire.

/// Media submitted for scanning, either as raw bytes or as a blob carrying
/// its own MIME type.
///
/// # Examples
///
/// ```rust
/// use arachnid_shield::core::MediaInput;
///
/// // Raw bytes with no inherent type
/// let input = MediaInput::from_bytes(vec![0xFF, 0xD8, 0xFF]);
///
/// // A blob that knows its own type
/// let input = MediaInput::blob(vec![0xFF, 0xD8, 0xFF], "image/jpeg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    /// Raw bytes with no inherent MIME type.
    Bytes {
        /// The media data.
        data: Vec<u8>,
    },

    /// Bytes carrying their own MIME type.
    Blob {
        /// The media data.
        data: Vec<u8>,
        /// The MIME type the blob was created with.
        media_type: String,
    },
}

impl MediaInput {
    /// Creates a `MediaInput` from raw bytes.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes { data: data.into() }
    }

    /// Creates a `MediaInput` from bytes with a known MIME type.
    pub fn blob(data: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self::Blob {
            data: data.into(),
            media_type: media_type.into(),
        }
    }

    /// Returns the MIME type carried by the input, if any.
    pub fn media_type(&self) -> Option<&str> {
        match self {
            Self::Bytes { .. } => None,
            Self::Blob { media_type, .. } => Some(media_type),
        }
    }

    /// Returns the length of the media data in bytes.
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes { data } | Self::Blob { data, .. } => data.len(),
        }
    }

    /// Returns `true` if the media data is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the input, returning the media data.
    pub fn into_data(self) -> Vec<u8> {
        match self {
            Self::Bytes { data } | Self::Blob { data, .. } => data,
        }
    }
}

impl From<Vec<u8>> for MediaInput {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

impl From<&[u8]> for MediaInput {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data.to_vec())
    }
}

/// A bytes-based scan request with optional explicit MIME type and size.
///
/// The explicit MIME type always wins over a blob's own type; the size, when
/// set, is sent as `Content-Length`, and when unset the header is omitted so
/// the server infers the size itself.
///
/// # Examples
///
/// ```rust
/// use arachnid_shield::core::{MediaInput, ScanMediaRequest};
///
/// let request = ScanMediaRequest::new(MediaInput::blob(vec![1, 2, 3], "image/png"))
///     .with_mime_type("image/jpeg") // overrides the blob's type
///     .with_size_in_bytes(3);
/// assert_eq!(request.resolved_mime_type(), Some("image/jpeg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMediaRequest {
    pub(crate) input: MediaInput,
    pub(crate) mime_type: Option<String>,
    pub(crate) size_in_bytes: Option<u64>,
}

impl ScanMediaRequest {
    /// Creates a request from the given media input.
    pub fn new(input: impl Into<MediaInput>) -> Self {
        Self {
            input: input.into(),
            mime_type: None,
            size_in_bytes: None,
        }
    }

    /// Sets an explicit MIME type, overriding any type carried by the input.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Sets the media size sent as `Content-Length`.
    pub fn with_size_in_bytes(mut self, size: u64) -> Self {
        self.size_in_bytes = Some(size);
        self
    }

    /// Returns the MIME type that will be sent: the explicit type if set,
    /// else the blob's own type, else none.
    pub fn resolved_mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref().or_else(|| self.input.media_type())
    }

    /// Returns the size that will be sent as `Content-Length`, if known.
    pub fn size_in_bytes(&self) -> Option<u64> {
        self.size_in_bytes
    }
}

impl From<MediaInput> for ScanMediaRequest {
    fn from(input: MediaInput) -> Self {
        Self::new(input)
    }
}

impl From<Vec<u8>> for ScanMediaRequest {
    fn from(data: Vec<u8>) -> Self {
        Self::new(MediaInput::from_bytes(data))
    }
}

impl From<&[u8]> for ScanMediaRequest {
    fn from(data: &[u8]) -> Self {
        Self::new(MediaInput::from_bytes(data.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_input_accessors() {
        let bytes = MediaInput::from_bytes(vec![1, 2, 3]);
        assert_eq!(bytes.media_type(), None);
        assert_eq!(bytes.len(), 3);
        assert!(!bytes.is_empty());

        let blob = MediaInput::blob(vec![1, 2], "image/png");
        assert_eq!(blob.media_type(), Some("image/png"));
        assert_eq!(blob.into_data(), vec![1, 2]);
    }

    #[test]
    fn test_explicit_mime_type_overrides_blob_type() {
        let request = ScanMediaRequest::new(MediaInput::blob(vec![1], "image/png"))
            .with_mime_type("image/jpeg");
        assert_eq!(request.resolved_mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn test_blob_type_used_without_explicit_override() {
        let request = ScanMediaRequest::new(MediaInput::blob(vec![1], "video/mp4"));
        assert_eq!(request.resolved_mime_type(), Some("video/mp4"));
    }

    #[test]
    fn test_raw_bytes_have_no_mime_type_or_size() {
        let request = ScanMediaRequest::from(vec![1u8, 2, 3]);
        assert_eq!(request.resolved_mime_type(), None);
        assert_eq!(request.size_in_bytes(), None);
    }

    #[test]
    fn test_size_in_bytes_builder() {
        let request = ScanMediaRequest::from(vec![1u8]).with_size_in_bytes(42);
        assert_eq!(request.size_in_bytes(), Some(42));
    }
}
