use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::events::Language;

/// Body posted to the reply service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyRequest {
    pub message: String,
    pub language: Language,
}

/// Ways a reply request can fail outright
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The request never completed (DNS, connect, reset, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with something that is not JSON
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// Remote service that turns a user message into assistant text.
///
/// `Ok(None)` means the service answered but gave no usable text.
#[async_trait]
pub trait ReplyService: Send + Sync {
    async fn reply(&self, request: &ReplyRequest) -> Result<Option<String>, ReplyError>;
}

/// Reply service reached over HTTP with a JSON POST
#[derive(Clone)]
pub struct HttpReplyService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReplyService {
    pub fn new(endpoint: impl Into<String>) -> anyhow::Result<Self> {
        // No timeout: a hung request stays pending until the transport gives up.
        let client = reqwest::Client::builder()
            .user_agent(concat!("megachat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplyService for HttpReplyService {
    async fn reply(&self, request: &ReplyRequest) -> Result<Option<String>, ReplyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ReplyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, endpoint = %self.endpoint, "reply service returned non-success status");
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ReplyError::Body(e.to_string()))?;

        Ok(extract_reply(&body))
    }
}

/// Pull the assistant text out of a response body.
pub fn extract_reply(body: &serde_json::Value) -> Option<String> {
    body.get("response")
        .and_then(|value| value.as_str())
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::post};
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/chat", addr)
    }

    fn request(message: &str) -> ReplyRequest {
        ReplyRequest {
            message: message.to_string(),
            language: Language::En,
        }
    }

    #[test]
    fn extract_reply_reads_response_field() {
        assert_eq!(
            extract_reply(&json!({"response": "Hi there", "request_id": "x"})),
            Some("Hi there".to_string())
        );
    }

    #[test]
    fn extract_reply_rejects_other_shapes() {
        assert_eq!(extract_reply(&json!({})), None);
        assert_eq!(extract_reply(&json!({"response": ""})), None);
        assert_eq!(extract_reply(&json!({"response": 42})), None);
        assert_eq!(extract_reply(&json!({"error": "Message is required"})), None);
        assert_eq!(extract_reply(&json!(["response"])), None);
    }

    #[test]
    fn request_serializes_to_wire_shape() {
        let body = serde_json::to_value(request("Hello")).unwrap();
        assert_eq!(body, json!({"message": "Hello", "language": "en"}));
    }

    #[tokio::test]
    async fn http_service_echoes_request_fields() {
        let router = Router::new().route(
            "/chat",
            post(|Json(body): Json<Value>| async move {
                let text = format!("{}:{}", body["language"].as_str().unwrap_or(""), body["message"].as_str().unwrap_or(""));
                Json(json!({ "response": text }))
            }),
        );
        let service = HttpReplyService::new(serve(router).await).unwrap();

        let reply = service.reply(&request("Hello")).await.unwrap();
        assert_eq!(reply, Some("en:Hello".to_string()));
    }

    #[tokio::test]
    async fn http_service_treats_missing_field_as_no_text() {
        let router = Router::new().route("/chat", post(|| async { Json(json!({})) }));
        let service = HttpReplyService::new(serve(router).await).unwrap();

        assert_eq!(service.reply(&request("Hello")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn http_service_error_status_with_json_body_is_no_text() {
        let router = Router::new().route(
            "/chat",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
            }),
        );
        let service = HttpReplyService::new(serve(router).await).unwrap();

        assert_eq!(service.reply(&request("Hello")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn http_service_non_json_body_is_error() {
        let router = Router::new().route("/chat", post(|| async { "not json" }));
        let service = HttpReplyService::new(serve(router).await).unwrap();

        let err = service.reply(&request("Hello")).await.unwrap_err();
        assert!(matches!(err, ReplyError::Body(_)));
    }

    #[tokio::test]
    async fn http_service_unreachable_endpoint_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = HttpReplyService::new(format!("http://{}/chat", addr)).unwrap();
        let err = service.reply(&request("Hello")).await.unwrap_err();
        assert!(matches!(err, ReplyError::Transport(_)));
    }
}
