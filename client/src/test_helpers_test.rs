//! Shared fakes for unit tests: a scripted transport, recording notifier and
//! navigator, and a harness wiring them to an in-memory session.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::net::error::TransportError;
use crate::net::http::HttpClient;
use crate::net::transport::{HttpRequest, HttpResponse, Transport};
use crate::router::{Location, Navigator};
use crate::state::session::Session;
use crate::util::notify::Notifier;
use crate::util::storage::{MemoryStorage, Storage, TOKEN_KEY};

// =========================================================================
// MockTransport
// =========================================================================

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request was sent")
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connect("no scripted response".into())))
    }
}

/// Build a response with a JSON body and extra headers.
pub fn response(status: u16, body: &serde_json::Value, headers: &[(&str, &str)]) -> HttpResponse {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.insert(HeaderName::from_bytes(name.as_bytes()).unwrap(), HeaderValue::from_str(value).unwrap());
    }
    HttpResponse { status: StatusCode::from_u16(status).unwrap(), headers: map, body: serde_json::to_vec(body).unwrap() }
}

/// `200 OK` carrying a success envelope around `data`.
pub fn ok_envelope(data: serde_json::Value) -> HttpResponse {
    response(200, &serde_json::json!({ "code": "200", "msg": "success", "data": data }), &[])
}

// =========================================================================
// Recorders
// =========================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

pub struct RecordingNavigator {
    current: Mutex<Location>,
    navigations: Mutex<Vec<Location>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self { current: Mutex::new(Location::parse(path)), navigations: Mutex::new(Vec::new()) }
    }

    pub fn navigations(&self) -> Vec<Location> {
        self.navigations.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_location(&self) -> Location {
        self.current.lock().unwrap().clone()
    }

    fn navigate(&self, to: Location) {
        *self.current.lock().unwrap() = to.clone();
        self.navigations.lock().unwrap().push(to);
    }
}

// =========================================================================
// Harness
// =========================================================================

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub storage: Arc<MemoryStorage>,
    pub session: Session,
    pub http: HttpClient,
}

impl Harness {
    pub fn stored_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).unwrap()
    }
}

pub fn harness() -> Harness {
    harness_at(None, "/dashboard")
}

pub fn harness_with_token(token: &str) -> Harness {
    harness_at(Some(token), "/dashboard")
}

pub fn harness_at(token: Option<&str>, current_path: &str) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    if let Some(token) = token {
        storage.set(TOKEN_KEY, token).unwrap();
    }
    let session = Session::load(storage.clone());
    let transport = Arc::new(MockTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::at(current_path));
    let http = HttpClient::new(transport.clone(), session.clone(), notifier.clone(), navigator.clone());
    Harness { transport, notifier, navigator, storage, session, http }
}
