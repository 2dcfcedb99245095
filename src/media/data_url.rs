/// Base64 data URLs (`data:<mime>;base64,<payload>`)
///
/// All images travel between the client and the backend in this form.

use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;

use crate::error::DataUrlError;

#[derive(Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encode raw bytes under the given MIME type
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        DataUrl(format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes)))
    }

    /// Encode image bytes, sniffing the MIME type from the magic bytes.
    /// `extension_hint` is used when sniffing fails.
    pub fn from_image_bytes(bytes: &[u8], extension_hint: Option<&str>) -> Option<Self> {
        let format = image::guess_format(bytes)
            .ok()
            .or_else(|| extension_hint.and_then(ImageFormat::from_extension))?;
        Some(Self::encode(format.to_mime_type(), bytes))
    }

    /// Validate an existing string. Only the header is checked here; the
    /// payload is decoded lazily by `decode`.
    pub fn parse(s: impl Into<String>) -> Result<Self, DataUrlError> {
        let s = s.into();
        let header = s
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(',').map(|(h, _)| h))
            .ok_or(DataUrlError::MissingPrefix)?;
        if !header.ends_with(";base64") {
            return Err(DataUrlError::MissingBase64Marker);
        }
        Ok(DataUrl(s))
    }

    /// MIME type from the header (e.g. "image/png")
    pub fn mime(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default()
    }

    /// Base64 payload after the comma
    pub fn payload(&self) -> &str {
        self.0.split_once(',').map(|(_, p)| p).unwrap_or_default()
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        general_purpose::STANDARD
            .decode(self.payload())
            .map_err(|e| DataUrlError::Decode(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Payloads are megabytes long; never dump them into logs
        write!(f, "data:{};base64,<{} bytes>", self.mime(), self.payload().len())
    }
}

impl std::fmt::Debug for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DataUrl({})", self)
    }
}
