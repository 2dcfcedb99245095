/// HTTP client for the virtual try-on backend
///
/// One request per generate action. No retries and no overall timeout:
/// generation routinely takes tens of seconds and the UI has no abort
/// path. Only the TCP connect is bounded.

use reqwest::StatusCode;

use crate::api::types::{ErrorBody, TryOnRequest, TryOnResponse};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::media::DataUrl;
use crate::state::data::TryOnResult;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { http, api_base: config.api_base() })
    }

    /// POST the request and interpret the response
    pub async fn virtual_tryon(&self, request: TryOnRequest) -> Result<TryOnResult, ApiError> {
        let url = format!("{}/virtual-tryon", self.api_base);
        tracing::info!(%url, request = %request.summary(), "sending try-on request");

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        interpret_response(status, &body)
    }

    /// Health check against `GET /api/`
    pub async fn ping(&self) -> Result<(), ApiError> {
        let url = format!("{}/", self.api_base);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status { status: status.as_u16(), detail: String::new() })
        }
    }
}

/// Turn a raw status + body into a result or a categorized error
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<TryOnResult, ApiError> {
    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .map(|b| b.detail_text())
            .unwrap_or_default();
        return Err(ApiError::Status { status: status.as_u16(), detail });
    }

    let parsed: TryOnResponse = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    if !parsed.success {
        return Err(ApiError::Rejected);
    }

    let raw_image = parsed
        .result_image
        .ok_or_else(|| ApiError::InvalidResponse("missing result_image".to_string()))?;
    let image = DataUrl::parse(raw_image)
        .map_err(|e| ApiError::InvalidResponse(format!("result_image: {}", e)))?;
    // The payload itself must decode, not just the header
    image
        .decode()
        .map_err(|e| ApiError::InvalidResponse(format!("result_image: {}", e)))?;

    Ok(TryOnResult {
        image,
        processing_time: parsed.processing_time,
        session_id: parsed.session_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Notice;
    use crate::state::data::ClothingReference;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve canned HTTP responses, one per accepted connection, and
    /// report how many requests arrived.
    async fn mock_backend(responses: Vec<(u16, &'static str)>) -> (String, tokio::task::JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut served = 0;
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                read_request(&mut socket).await;
                let reply = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
                served += 1;
            }
            served
        });

        (origin, handle)
    }

    /// Read headers plus a content-length body
    async fn read_request(socket: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    return;
                }
            }
        }
    }

    fn client_for(origin: &str) -> ApiClient {
        let config = AppConfig {
            backend_url: origin.to_string(),
            share_url: format!("{}/tryon", origin),
            connect_timeout: Duration::from_secs(2),
        };
        ApiClient::new(&config).unwrap()
    }

    fn sample_request() -> TryOnRequest {
        let person = DataUrl::parse("data:image/jpeg;base64,/9j/").unwrap();
        TryOnRequest::new(&person, &ClothingReference::Url("https://shop.example/p/1".into()))
    }

    #[tokio::test]
    async fn test_success_response() {
        let (origin, server) = mock_backend(vec![(
            200,
            r#"{"success":true,"result_image":"data:image/png;base64,AAAA","processing_time":"3.2s","session_id":"abc"}"#,
        )])
        .await;

        let result = client_for(&origin).virtual_tryon(sample_request()).await.unwrap();
        assert_eq!(result.image.as_str(), "data:image/png;base64,AAAA");
        assert_eq!(result.processing_time, "3.2s");
        assert_eq!(result.session_id.as_deref(), Some("abc"));
        assert_eq!(server.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_blocking_detail_maps_to_upload_advice() {
        let (origin, _server) = mock_backend(vec![(
            400,
            r#"{"detail":"Failed to process clothing from URL. The website might be blocking access."}"#,
        )])
        .await;

        let err = client_for(&origin).virtual_tryon(sample_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
        assert!(err.user_message().contains("Upload the clothing image directly"));
    }

    #[tokio::test]
    async fn test_ping() {
        let (origin, _server) = mock_backend(vec![(200, r#"{"message":"Hello World"}"#)]).await;
        assert!(client_for(&origin).ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = client_for(&origin).virtual_tryon(sample_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_success_false_is_rejected() {
        let err = interpret_response(StatusCode::OK, br#"{"success":false}"#).unwrap_err();
        assert_eq!(err, ApiError::Rejected);
    }

    #[test]
    fn test_bad_result_image() {
        let err = interpret_response(StatusCode::OK, br#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));

        let err = interpret_response(
            StatusCode::OK,
            br#"{"success":true,"result_image":"https://cdn/x.png","processing_time":"1s"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_undecodable_result_image_is_invalid() {
        let err = interpret_response(
            StatusCode::OK,
            br#"{"success":true,"result_image":"data:image/png;base64,@@@","processing_time":"1s"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(Notice::from(&err).description, crate::error::GENERIC_FAILURE);
    }

    #[test]
    fn test_error_status_without_json_body() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::Status { status: 502, detail: String::new() });
    }
}
