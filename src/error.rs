/// Error types for the try-on client
///
/// Every error here ends up as a transient notice in the UI. None of them
/// are fatal: the user can always fix the input and try again.

use thiserror::Error;

/// Generic fallback shown when no tailored guidance applies
pub const GENERIC_FAILURE: &str = "Failed to generate virtual try-on. Please try again.";

/// Client-side validation failures. No request is ever sent for these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing person image")]
    MissingPersonImage,
    #[error("missing clothing URL")]
    MissingClothingUrl,
    #[error("missing clothing image")]
    MissingClothingImage,
    /// A request is already in flight
    #[error("a try-on request is already in progress")]
    AlreadyProcessing,
}

impl ValidationError {
    /// Field-specific (title, description) for the user, or `None` when the
    /// rejection is silent. `AlreadyProcessing` only happens on a double
    /// trigger while the generate button is already disabled.
    pub fn field_message(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ValidationError::MissingPersonImage => {
                Some(("Missing person image", "Please upload your photo first."))
            }
            ValidationError::MissingClothingUrl => {
                Some(("Missing clothing URL", "Please enter a clothing product URL."))
            }
            ValidationError::MissingClothingImage => {
                Some(("Missing clothing image", "Please upload a clothing image."))
            }
            ValidationError::AlreadyProcessing => None,
        }
    }
}

/// Malformed data URL strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    MissingPrefix,
    #[error("data URL is not base64 encoded")]
    MissingBase64Marker,
    #[error("invalid base64 payload: {0}")]
    Decode(String),
}

/// Failures while turning a picked file into a data URL
#[derive(Debug, Clone, Error)]
pub enum IngestError {
    /// File exceeds the upload limit (size in bytes)
    #[error("file is {size} bytes, larger than the 10MB limit")]
    TooLarge { size: u64 },
    #[error("failed to read image file: {0}")]
    Io(String),
    #[error("unrecognized image format")]
    UnknownFormat,
}

impl IngestError {
    pub fn title(&self) -> &'static str {
        match self {
            IngestError::TooLarge { .. } => "File too large",
            IngestError::Io(_) => "Could not read file",
            IngestError::UnknownFormat => "Unsupported file",
        }
    }

    pub fn description(&self) -> String {
        match self {
            IngestError::TooLarge { .. } => "Please upload an image smaller than 10MB.".to_string(),
            IngestError::Io(e) => e.clone(),
            IngestError::UnknownFormat => "Please choose a PNG, JPG, WEBP, GIF or BMP image.".to_string(),
        }
    }
}

/// Failures of the remote try-on call.
///
/// Clone because it travels inside iced messages; transport errors are
/// flattened to their display text for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-2xx response with the server's optional `detail` text
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
    /// 2xx response with `success: false`
    #[error("generation failed")]
    Rejected,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Map the error to user-facing guidance.
    ///
    /// Only 400 responses carry actionable detail; everything else gets the
    /// generic message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status: 400, detail } => {
                if detail.contains("clothing images found") {
                    "Could not find clothing images at this URL. Try:\n\
                     • Using a direct product page URL\n\
                     • Uploading the clothing image directly\n\
                     • Using a different retailer's website"
                        .to_string()
                } else if detail.contains("blocking") {
                    "This website is blocking our requests. Please:\n\
                     • Upload the clothing image directly instead\n\
                     • Try a different product URL"
                        .to_string()
                } else if detail.contains("Invalid") {
                    "Invalid image format. Please upload a clear JPG or PNG image.".to_string()
                } else if detail.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    detail.clone()
                }
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// Short category label for logs
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::Status { .. } => "status",
            ApiError::Rejected => "rejected",
            ApiError::InvalidResponse(_) => "invalid-response",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Invalid environment configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("backend URL must start with http:// or https://, got {0:?}")]
    InvalidBackendUrl(String),
    #[error("connect timeout must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}
