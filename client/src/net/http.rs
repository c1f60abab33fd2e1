//! Request/response pipeline shared by every backend call.
//!
//! ARCHITECTURE
//! ============
//! `send` is the single choke point:
//! 1. attach `Content-Type` and, when storage holds one, the `access_token`
//! 2. execute through the [`Transport`]
//! 3. apply any rotated token from the response headers, whatever the status
//! 4. classify: envelope success, business failure, HTTP status failure
//!    (401 forces a logout and a login redirect), or no response at all
//!
//! Each failure is shown once through the [`Notifier`] and returned as an
//! [`ApiError`]. Nothing is retried.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, NETWORK_FAILED_MESSAGE, REQUEST_FAILED_MESSAGE, TransportError, status_message};
use super::transport::{HttpRequest, HttpResponse, Transport};
use super::types::Envelope;
use crate::router::{Location, Navigator};
use crate::state::session::Session;
use crate::util::auth::{ACCESS_TOKEN_HEADER, rotated_token};
use crate::util::notify::Notifier;

/// What a caller asks for: method, path, optional query and JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RequestSpec {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// The shared request executor.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl HttpClient {
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { transport, session, notifier, navigator }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute `req` and decode the envelope's `data` as `T`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure; the user has already been notified.
    pub async fn send<T: DeserializeOwned>(&self, req: RequestSpec) -> Result<T, ApiError> {
        let request = self.prepare(req);
        tracing::debug!(method = %request.method, path = %request.path, "sending request");

        match self.transport.execute(request).await {
            Ok(response) => self.handle_response(response),
            Err(e) => Err(self.handle_no_response(e)),
        }
    }

    fn prepare(&self, req: RequestSpec) -> HttpRequest {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.stored_token() {
            match HeaderValue::from_str(&token) {
                Ok(value) => {
                    headers.insert(ACCESS_TOKEN_HEADER, value);
                }
                Err(e) => tracing::warn!(error = %e, "stored token is not a valid header value; sending without it"),
            }
        }
        HttpRequest { method: req.method, path: req.path, query: req.query, headers, body: req.body }
    }

    fn handle_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        self.apply_token_rotation(&response.headers);

        if response.status.is_success() {
            self.handle_envelope(&response.body)
        } else {
            Err(self.handle_status_failure(response.status.as_u16()))
        }
    }

    fn apply_token_rotation(&self, headers: &HeaderMap) {
        if let Some(token) = rotated_token(headers) {
            self.session.apply_rotated_token(token);
        }
    }

    fn handle_envelope<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, ApiError> {
        let envelope: Envelope = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "response body is not a valid envelope");
                self.notifier.error(REQUEST_FAILED_MESSAGE);
                return Err(ApiError::Business { code: String::new(), message: REQUEST_FAILED_MESSAGE.to_owned() });
            }
        };

        if envelope.is_success() {
            return serde_json::from_value(envelope.data).map_err(|e| {
                tracing::warn!(error = %e, "response data has an unexpected shape");
                self.notifier.error(REQUEST_FAILED_MESSAGE);
                ApiError::Decode(e.to_string())
            });
        }

        let message = envelope.message().unwrap_or(REQUEST_FAILED_MESSAGE).to_owned();
        tracing::debug!(code = %envelope.code, %message, "business failure");
        self.notifier.error(&message);
        Err(ApiError::Business { code: envelope.code, message })
    }

    fn handle_status_failure(&self, status: u16) -> ApiError {
        let message = status_message(status);
        self.notifier.error(&message);

        if status == 401 {
            let redirect = self.navigator.current_location().full_path();
            self.session.expire();
            self.navigator.navigate(Location::login_redirect(&redirect));
            return ApiError::SessionExpired { message };
        }

        tracing::debug!(%status, "http status failure");
        ApiError::Status { status, message }
    }

    fn handle_no_response(&self, err: TransportError) -> ApiError {
        tracing::warn!(error = %err, "no response received");
        self.notifier.error(NETWORK_FAILED_MESSAGE);
        ApiError::Network { message: NETWORK_FAILED_MESSAGE.to_owned(), detail: err.to_string() }
    }
}
