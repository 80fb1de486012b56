//! Pushover delivery of alert messages.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::alerts::AlertSink;
use crate::error::AppError;

/// Production Pushover messages endpoint.
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(15);

pub struct PushoverSink {
    api_url: String,
    token: String,
    user: String,
    http: Client,
}

impl PushoverSink {
    pub fn new(token: String, user: String) -> Result<Self, AppError> {
        Self::with_api_url(PUSHOVER_API_URL.to_string(), token, user)
    }

    /// Point the sink at a different endpoint. Used by tests.
    pub fn with_api_url(api_url: String, token: String, user: String) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|err| AppError::network(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self {
            api_url,
            token,
            user,
            http,
        })
    }
}

#[async_trait]
impl AlertSink for PushoverSink {
    async fn deliver(&self, message: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(&self.api_url)
            .form(&[
                ("token", self.token.as_str()),
                ("user", self.user.as_str()),
                ("message", message),
            ])
            .send()
            .await
            .map_err(|err| AppError::network(format!("pushover request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::network(format!(
                "pushover returned HTTP {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    fn sink_name(&self) -> &str {
        "pushover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sink_for(server: &MockServer) -> PushoverSink {
        PushoverSink::with_api_url(
            format!("{}/1/messages.json", server.uri()),
            "app-token".to_string(),
            "user-key".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn deliver_posts_the_form_encoded_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .and(body_string_contains("token=app-token"))
            .and(body_string_contains("user=user-key"))
            .and(body_string_contains("message=slot+found"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let sink = sink_for(&server);
        sink.deliver("slot found").await.unwrap();
    }

    #[tokio::test]
    async fn a_rejected_delivery_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"errors":["user is invalid"]}"#),
            )
            .mount(&server)
            .await;

        let sink = sink_for(&server);
        let err = sink.deliver("slot found").await.unwrap_err();

        assert!(matches!(err, AppError::Network { .. }));
    }
}
