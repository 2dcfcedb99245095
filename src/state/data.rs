/// Shared data structures for the try-on workflow
///
/// These structs represent the data model that flows between
/// the workflow state machine, the API client and the UI layer.

use crate::media::DataUrl;

/// Which clothing input is active. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClothingMode {
    /// Product page URL, scraped by the backend
    #[default]
    Url,
    /// Image file uploaded from disk
    Upload,
}

/// The clothing item actually sent to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClothingReference {
    /// Trimmed, non-empty product URL
    Url(String),
    Upload(DataUrl),
}

impl ClothingReference {
    pub fn mode(&self) -> ClothingMode {
        match self {
            ClothingReference::Url(_) => ClothingMode::Url,
            ClothingReference::Upload(_) => ClothingMode::Upload,
        }
    }
}

/// A generated try-on image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnResult {
    /// PNG data URL as returned by the backend
    pub image: DataUrl,
    /// Processing time label, verbatim from the response (e.g. "3.2s")
    pub processing_time: String,
    /// Backend session the result was stored under, if reported
    pub session_id: Option<String>,
}

/// Identifies one generate action so stale responses can be dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

/// Identifies one visit to the studio. File reads started in an earlier
/// visit carry an older epoch and are discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudioEpoch(pub u64);

/// Which image input a file read is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Person,
    Clothing,
}
