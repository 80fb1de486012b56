//! HTTP transport for the booking portal.
//!
//! The portal gates on a browser-looking header profile, so every request
//! carries the static profile below plus per-request-kind extras and caller
//! overrides (notably the bearer token). Responses are decoded to JSON and
//! handed back to the request kind for shape-specific decoding.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::error::AppError;

/// Hard ceiling on any single portal call. An unresponsive endpoint must
/// surface as a network error, never a hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.77 Safari/537.36";
const SEC_CH_UA_VALUE: &str =
    "\" Not;A Brand\";v=\"99\", \"Google Chrome\";v=\"91\", \"Chromium\";v=\"91\"";

/// One of the two request shapes the portal understands.
///
/// Deliberately closed: only login and appointment search exist, and the
/// trait covers exactly the two operations a request kind owes the
/// transport, building the outbound payload and decoding the response.
pub trait PortalRequest {
    type Output;

    fn method(&self) -> Method;

    /// Endpoint path, joined onto the transport base URL.
    fn path(&self) -> &'static str;

    /// Referer the portal frontend would have sent for this call.
    fn referer(&self) -> &'static str;

    /// Static headers this request kind carries on top of the base profile.
    fn extra_headers(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    fn body(&self) -> Result<Value, AppError>;

    fn decode(&self, body: Value, headers: &HeaderMap) -> Result<Self::Output, AppError>;
}

#[derive(Clone)]
pub struct PortalTransport {
    base_url: String,
    http: Client,
}

impl PortalTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::network(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and run the kind-specific decode on the result.
    ///
    /// `overrides` are applied after the base profile and the request's own
    /// extras, so a caller can always win; the only production override is
    /// the `Authorization` bearer token.
    pub async fn execute<R: PortalRequest>(
        &self,
        request: &R,
        overrides: &[(&str, &str)],
    ) -> Result<R::Output, AppError> {
        let body = request.body()?;
        let (decoded, headers) = self
            .send(
                request.method(),
                request.path(),
                request.referer(),
                request.extra_headers(),
                overrides,
                &body,
            )
            .await?;

        request.decode(decoded, &headers)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        referer: &str,
        extra_headers: &[(&str, &str)],
        overrides: &[(&str, &str)],
        body: &Value,
    ) -> Result<(Value, HeaderMap), AppError> {
        let url = format!("{}{}", self.base_url, path);

        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::decode(format!("failed to encode request body: {}", err)))?;

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .headers(browser_profile())
            .header(REFERER, referer);
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        for (name, value) in overrides {
            builder = builder.header(*name, *value);
        }

        let response = builder
            .body(payload)
            .send()
            .await
            .map_err(|err| AppError::network(format!("{} {} failed: {}", method, url, err)))?;

        let status = response.status();
        let response_headers = response.headers().clone();
        if !status.is_success() {
            return Err(AppError::network(format!(
                "portal returned HTTP {} for {}",
                status, url
            )));
        }

        let decoded = response
            .json::<Value>()
            .await
            .map_err(|err| AppError::decode(format!("portal response was not valid JSON: {}", err)))?;

        Ok((decoded, response_headers))
    }
}

/// The static browser profile shared by every portal call.
fn browser_profile() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("sec-ch-ua", HeaderValue::from_static(SEC_CH_UA_VALUE));
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers
}
