//! Resend transactional email API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{mask_api_key, DeliveryReceipt, Notifier, NotifyError, OutboundEmail};

pub const DEFAULT_API_URL: &str = "https://api.resend.com";

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    name: Option<String>,
}

/// Sends email through `POST {api_url}/emails`
#[derive(Clone)]
pub struct ResendNotifier {
    client: Client,
    api_url: String,
    api_key: String,
}

impl std::fmt::Debug for ResendNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendNotifier")
            .field("api_url", &self.api_url)
            .field("api_key", &mask_api_key(&self.api_key))
            .finish()
    }
}

impl ResendNotifier {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.api_url)
    }
}

/// Map a non-2xx response body to an error, preferring the API's own message
fn api_error(status: u16, body: &str) -> NotifyError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message,
            name: Some(name),
        }) => format!("{}: {}", name, message),
        Ok(ApiErrorBody { message, name: None }) => message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    NotifyError::Api { status, message }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, NotifyError> {
        tracing::debug!("Sending email to {:?} via {}", email.to, self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = api_error(status.as_u16(), &body);
            tracing::error!("Email API returned an error: {}", err);
            return Err(err);
        }

        let sent: SendEmailResponse = serde_json::from_str(&body)
            .map_err(|e| NotifyError::InvalidResponse(e.to_string()))?;

        tracing::info!("Email sent successfully with ID: {}", sent.id);
        Ok(DeliveryReceipt { id: sent.id })
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{header::AUTHORIZATION, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    type Received = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn accept(
        State(received): State<Received>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        received.lock().unwrap().push((auth, body));
        Json(json!({"id": "4ef9a417-02e9-4d39-ad75-9611e0fcc33c"}))
    }

    async fn reject() -> (StatusCode, Json<Value>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "Invalid `to` field"
            })),
        )
    }

    async fn garble() -> &'static str {
        "<html>maintenance</html>"
    }

    /// Local stand-in for the email API, one route prefix per behavior
    async fn spawn_email_api() -> (String, Received) {
        let received = Received::default();
        let app = Router::new()
            .route("/ok/emails", post(accept))
            .route("/rejected/emails", post(reject))
            .route("/garbled/emails", post(garble))
            .with_state(received.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), received)
    }

    fn sample_email() -> OutboundEmail {
        OutboundEmail {
            from: "Wadi Rum Contact <camp@example.com>".to_string(),
            to: vec!["owner@example.com".to_string()],
            subject: "New Contact Form Submission from Omar".to_string(),
            text: "Is March busy?".to_string(),
            reply_to: Some("omar@example.com".to_string()),
        }
    }

    fn notifier(base: &str, prefix: &str) -> ResendNotifier {
        ResendNotifier::new(
            format!("{}/{}", base, prefix),
            "re_secret_key_1234",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_email_with_bearer_key() {
        let (base, received) = spawn_email_api().await;

        let receipt = notifier(&base, "ok").send(&sample_email()).await.unwrap();
        assert_eq!(receipt.id, "4ef9a417-02e9-4d39-ad75-9611e0fcc33c");

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let (auth, body) = &received[0];
        assert_eq!(auth.as_deref(), Some("Bearer re_secret_key_1234"));
        assert_eq!(
            body,
            &json!({
                "from": "Wadi Rum Contact <camp@example.com>",
                "to": ["owner@example.com"],
                "subject": "New Contact Form Submission from Omar",
                "text": "Is March busy?",
                "reply_to": "omar@example.com"
            })
        );
    }

    #[tokio::test]
    async fn test_send_maps_error_status_to_api_error() {
        let (base, _) = spawn_email_api().await;

        let err = notifier(&base, "rejected")
            .send(&sample_email())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            NotifyError::Api {
                status: 422,
                message: "validation_error: Invalid `to` field".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_send_rejects_unexpected_success_body() {
        let (base, _) = spawn_email_api().await;

        let err = notifier(&base, "garbled")
            .send(&sample_email())
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::InvalidResponse(_)));
    }

    #[test]
    fn test_api_error_uses_name_and_message() {
        let err = api_error(
            422,
            r#"{"statusCode": 422, "name": "validation_error", "message": "Invalid `to` field"}"#,
        );
        assert_eq!(
            err,
            NotifyError::Api {
                status: 422,
                message: "validation_error: Invalid `to` field".to_string(),
            }
        );
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        assert_eq!(
            api_error(502, "Bad Gateway\n"),
            NotifyError::Api {
                status: 502,
                message: "Bad Gateway".to_string(),
            }
        );
        assert_eq!(
            api_error(500, ""),
            NotifyError::Api {
                status: 500,
                message: "empty response body".to_string(),
            }
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let notifier =
            ResendNotifier::new("https://api.example.com/", "re_secret_key_1234", Duration::from_secs(5))
                .unwrap();
        assert_eq!(notifier.endpoint(), "https://api.example.com/emails");
    }

    #[test]
    fn test_debug_masks_key() {
        let notifier =
            ResendNotifier::new(DEFAULT_API_URL, "re_secret_key_1234", Duration::from_secs(5)).unwrap();
        let debug = format!("{:?}", notifier);
        assert!(!debug.contains("secret_key"));
        assert!(debug.contains("re_s...1234"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let notifier =
            ResendNotifier::new("http://127.0.0.1:1", "re_secret_key_1234", Duration::from_secs(2)).unwrap();
        let email = OutboundEmail {
            from: "a@example.com".to_string(),
            to: vec!["b@example.com".to_string()],
            subject: "s".to_string(),
            text: "t".to_string(),
            reply_to: None,
        };
        let err = notifier.send(&email).await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
