/// The try-on request workflow
///
/// Holds the studio screen's inputs and drives the
/// Idle -> Processing -> Success / Failed state machine. It performs no I/O:
/// `begin_generate` hands back the request to send and `finish` takes the
/// outcome, so the whole lifecycle is testable without a backend.

use crate::api::TryOnRequest;
use crate::error::{ApiError, ValidationError};
use crate::media::DataUrl;
use crate::notice::Notice;

use super::data::{ClothingMode, ClothingReference, RequestId, TryOnResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A request is in flight
    Processing,
    Success,
    /// Last request failed; inputs are ready for another attempt
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct TryOnWorkflow {
    person_image: Option<DataUrl>,
    clothing_mode: ClothingMode,
    /// Raw text of the URL field, kept while in upload mode
    clothing_url: String,
    clothing_image: Option<DataUrl>,
    phase: Phase,
    in_flight: Option<RequestId>,
    result: Option<TryOnResult>,
}

impl TryOnWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Inputs ==========

    pub fn person_image(&self) -> Option<&DataUrl> {
        self.person_image.as_ref()
    }

    pub fn set_person_image(&mut self, image: DataUrl) {
        self.person_image = Some(image);
    }

    pub fn clear_person_image(&mut self) {
        self.person_image = None;
    }

    pub fn clothing_mode(&self) -> ClothingMode {
        self.clothing_mode
    }

    pub fn set_clothing_mode(&mut self, mode: ClothingMode) {
        self.clothing_mode = mode;
    }

    pub fn clothing_url(&self) -> &str {
        &self.clothing_url
    }

    pub fn set_clothing_url(&mut self, url: String) {
        self.clothing_url = url;
    }

    pub fn clothing_image(&self) -> Option<&DataUrl> {
        self.clothing_image.as_ref()
    }

    pub fn set_clothing_image(&mut self, image: DataUrl) {
        self.clothing_image = Some(image);
    }

    pub fn clear_clothing_image(&mut self) {
        self.clothing_image = None;
    }

    // ========== State machine ==========

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_processing(&self) -> bool {
        self.phase == Phase::Processing
    }

    pub fn result(&self) -> Option<&TryOnResult> {
        self.result.as_ref()
    }

    /// Check the inputs and resolve the active clothing reference
    pub fn validate(&self) -> Result<(&DataUrl, ClothingReference), ValidationError> {
        let person = self
            .person_image
            .as_ref()
            .ok_or(ValidationError::MissingPersonImage)?;

        let clothing = match self.clothing_mode {
            ClothingMode::Url => {
                let url = self.clothing_url.trim();
                if url.is_empty() {
                    return Err(ValidationError::MissingClothingUrl);
                }
                ClothingReference::Url(url.to_string())
            }
            ClothingMode::Upload => {
                let image = self
                    .clothing_image
                    .as_ref()
                    .ok_or(ValidationError::MissingClothingImage)?;
                ClothingReference::Upload(image.clone())
            }
        };

        Ok((person, clothing))
    }

    /// Start a generate action.
    ///
    /// On success the workflow is `Processing`, any previous result is
    /// cleared, and the returned request must be sent exactly once. On error
    /// nothing changes.
    pub fn begin_generate(&mut self, id: RequestId) -> Result<TryOnRequest, ValidationError> {
        if self.is_processing() {
            return Err(ValidationError::AlreadyProcessing);
        }

        let (person, clothing) = self.validate()?;
        let request = TryOnRequest::new(person, &clothing);

        self.phase = Phase::Processing;
        self.in_flight = Some(id);
        self.result = None;
        tracing::info!(request_id = id.0, mode = ?clothing.mode(), "workflow: idle -> processing");

        Ok(request)
    }

    /// Apply the outcome of request `id`.
    ///
    /// Returns the notice to show, or `None` if the outcome belongs to a
    /// request this workflow is no longer waiting for.
    pub fn finish(&mut self, id: RequestId, outcome: Result<TryOnResult, ApiError>) -> Option<Notice> {
        if self.in_flight != Some(id) {
            tracing::debug!(request_id = id.0, "dropping stale try-on response");
            return None;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    request_id = id.0,
                    processing_time = %result.processing_time,
                    session_id = ?result.session_id,
                    image = %result.image,
                    "workflow: processing -> success"
                );
                let notice = Notice::success(
                    "Success!",
                    format!("Virtual try-on generated in {}", result.processing_time),
                );
                self.result = Some(result);
                self.phase = Phase::Success;
                Some(notice)
            }
            Err(e) => {
                tracing::error!(request_id = id.0, category = e.category(), error = %e, "workflow: processing -> failed");
                self.phase = Phase::Failed;
                Some(Notice::from(&e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Severity;

    fn png(payload: &str) -> DataUrl {
        DataUrl::parse(format!("data:image/png;base64,{}", payload)).unwrap()
    }

    fn ready_workflow() -> TryOnWorkflow {
        let mut wf = TryOnWorkflow::new();
        wf.set_person_image(png("UEVSU09O"));
        wf.set_clothing_url("  https://www.uniqlo.com/us/en/products/E467024-000/00  ".into());
        wf
    }

    fn mocked_success() -> TryOnResult {
        TryOnResult {
            image: png("AAAA"),
            processing_time: "3.2s".to_string(),
            session_id: None,
        }
    }

    #[test]
    fn test_missing_person_image_blocks_request() {
        let mut wf = TryOnWorkflow::new();
        wf.set_clothing_url("https://shop.example/p/1".into());

        let err = wf.begin_generate(RequestId(1)).unwrap_err();
        assert_eq!(err, ValidationError::MissingPersonImage);
        assert_eq!(Notice::for_validation(err).unwrap().title, "Missing person image");
        assert_eq!(wf.phase(), Phase::Idle);
    }

    #[test]
    fn test_blank_url_blocks_request() {
        let mut wf = TryOnWorkflow::new();
        wf.set_person_image(png("AAAA"));
        wf.set_clothing_url("   ".into());

        let err = wf.begin_generate(RequestId(1)).unwrap_err();
        assert_eq!(err, ValidationError::MissingClothingUrl);
        assert_eq!(Notice::for_validation(err).unwrap().title, "Missing clothing URL");
        assert_eq!(wf.phase(), Phase::Idle);
    }

    #[test]
    fn test_upload_mode_without_image_blocks_request() {
        let mut wf = ready_workflow();
        wf.set_clothing_mode(ClothingMode::Upload);

        let err = wf.begin_generate(RequestId(1)).unwrap_err();
        assert_eq!(err, ValidationError::MissingClothingImage);
        assert_eq!(Notice::for_validation(err).unwrap().title, "Missing clothing image");
    }

    #[test]
    fn test_only_active_mode_is_sent() {
        let mut wf = ready_workflow();
        wf.set_clothing_image(png("U0hJUlQ="));

        let request = wf.begin_generate(RequestId(1)).unwrap();
        assert_eq!(
            request.clothing_url.as_deref(),
            Some("https://www.uniqlo.com/us/en/products/E467024-000/00")
        );
        assert!(request.clothing_image.is_none());

        wf.finish(RequestId(1), Err(ApiError::Rejected));
        wf.set_clothing_mode(ClothingMode::Upload);
        let request = wf.begin_generate(RequestId(2)).unwrap();
        assert!(request.clothing_url.is_none());
        assert_eq!(request.clothing_image.as_deref(), Some("data:image/png;base64,U0hJUlQ="));
    }

    #[test]
    fn test_success_transition() {
        let mut wf = ready_workflow();
        wf.begin_generate(RequestId(7)).unwrap();
        assert_eq!(wf.phase(), Phase::Processing);

        let notice = wf.finish(RequestId(7), Ok(mocked_success())).unwrap();
        assert_eq!(wf.phase(), Phase::Success);
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.description, "Virtual try-on generated in 3.2s");

        let result = wf.result().unwrap();
        assert_eq!(result.image.as_str(), "data:image/png;base64,AAAA");
        assert_eq!(result.processing_time, "3.2s");
    }

    #[test]
    fn test_failure_returns_to_input_ready() {
        let mut wf = ready_workflow();
        wf.begin_generate(RequestId(1)).unwrap();
        let notice = wf
            .finish(
                RequestId(1),
                Err(ApiError::Status { status: 400, detail: "site is blocking us".into() }),
            )
            .unwrap();

        assert_eq!(wf.phase(), Phase::Failed);
        assert!(wf.result().is_none());
        assert!(notice.is_error());
        assert!(notice.description.contains("Upload the clothing image directly"));

        // Retry is always allowed
        assert!(wf.begin_generate(RequestId(2)).is_ok());
    }

    #[test]
    fn test_double_generate_yields_one_request() {
        let mut wf = ready_workflow();
        let requests: Vec<_> = [RequestId(1), RequestId(2)]
            .into_iter()
            .filter_map(|id| wf.begin_generate(id).ok())
            .collect();
        assert_eq!(requests.len(), 1);
        assert_eq!(wf.begin_generate(RequestId(3)), Err(ValidationError::AlreadyProcessing));
    }

    #[test]
    fn test_new_request_clears_previous_result() {
        let mut wf = ready_workflow();
        wf.begin_generate(RequestId(1)).unwrap();
        wf.finish(RequestId(1), Ok(mocked_success()));
        assert!(wf.result().is_some());

        wf.begin_generate(RequestId(2)).unwrap();
        assert!(wf.result().is_none());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut wf = ready_workflow();
        wf.begin_generate(RequestId(2)).unwrap();

        assert!(wf.finish(RequestId(1), Ok(mocked_success())).is_none());
        assert_eq!(wf.phase(), Phase::Processing);
        assert!(wf.result().is_none());
    }
}
