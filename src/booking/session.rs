//! Login exchange: credentials in, bearer token out.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Method;
use serde_json::Value;

use crate::booking::types::{AuthToken, Credentials, SessionMeta};
use crate::error::AppError;
use crate::services::portal::{PortalRequest, PortalTransport};

pub const LOGIN_PATH: &str = "/deas-api/v1/webLogin/webLogin";

const LOGIN_REFERER: &str = "https://onlinebusiness.icbc.com/webdeas-ui/login;type=driver";

// Login is the only call the portal frontend marks uncacheable.
const LOGIN_EXTRA_HEADERS: &[(&str, &str)] = &[
    ("pragma", "no-cache"),
    ("cache-control", "no-cache, no-store"),
    ("expires", "0"),
];

pub struct LoginRequest {
    credentials: Credentials,
}

impl LoginRequest {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl PortalRequest for LoginRequest {
    type Output = (AuthToken, SessionMeta);

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> &'static str {
        LOGIN_PATH
    }

    fn referer(&self) -> &'static str {
        LOGIN_REFERER
    }

    fn extra_headers(&self) -> &'static [(&'static str, &'static str)] {
        LOGIN_EXTRA_HEADERS
    }

    fn body(&self) -> Result<Value, AppError> {
        serde_json::to_value(&self.credentials)
            .map_err(|err| AppError::decode(format!("failed to encode login body: {}", err)))
    }

    fn decode(&self, body: Value, headers: &HeaderMap) -> Result<Self::Output, AppError> {
        let raw = headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::auth("login response carried no Authorization header"))?
            .to_str()
            .map_err(|_| AppError::auth("Authorization header held a non-text value"))?;

        let token = AuthToken::new(raw)
            .ok_or_else(|| AppError::auth("login response carried an empty Authorization header"))?;

        Ok((token, SessionMeta { raw: body }))
    }
}

/// Exchange credentials for a bearer token.
///
/// Every failure mode, transport, decode or a missing token, surfaces as
/// `Auth`: without a session there is nothing useful to query, so the
/// orchestrator aborts the run on any error from here.
pub async fn authenticate(
    transport: &PortalTransport,
    credentials: &Credentials,
) -> Result<(AuthToken, SessionMeta), AppError> {
    let request = LoginRequest::new(credentials.clone());

    transport.execute(&request, &[]).await.map_err(|err| match err {
        AppError::Auth { .. } => err,
        other => AppError::auth(other.to_string()),
    })
}
