/// Wire format of the `/api/virtual-tryon` endpoint

use serde::{Deserialize, Serialize};

use crate::media::DataUrl;
use crate::state::data::ClothingReference;

/// Request body. Exactly one of `clothing_url` / `clothing_image` is set;
/// the other is omitted from the JSON entirely.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TryOnRequest {
    pub person_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothing_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clothing_image: Option<String>,
}

impl TryOnRequest {
    pub fn new(person_image: &DataUrl, clothing: &ClothingReference) -> Self {
        let (clothing_url, clothing_image) = match clothing {
            ClothingReference::Url(url) => (Some(url.clone()), None),
            ClothingReference::Upload(image) => (None, Some(image.as_str().to_string())),
        };
        Self {
            person_image: person_image.as_str().to_string(),
            clothing_url,
            clothing_image,
        }
    }

    /// Short description for logs (no payloads)
    pub fn summary(&self) -> String {
        match (&self.clothing_url, &self.clothing_image) {
            (Some(url), _) => format!(
                "person={}B clothing_url={}",
                self.person_image.len(),
                url
            ),
            (None, Some(image)) => format!(
                "person={}B clothing_image={}B",
                self.person_image.len(),
                image.len()
            ),
            (None, None) => format!("person={}B no clothing", self.person_image.len()),
        }
    }
}

/// Successful (2xx) response body
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TryOnResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result_image: Option<String>,
    #[serde(default)]
    pub processing_time: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// FastAPI-style error body. `detail` is a string for HTTPException and a
/// list of objects for request validation errors, so keep it loose.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Textual detail, empty when absent or not a string
    pub fn detail_text(&self) -> String {
        self.detail.as_str().unwrap_or_default().to_string()
    }
}
