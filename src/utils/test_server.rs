// Scripted in-process API used by the async tests
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Response, Server};

use crate::utils::config::ApiConfig;

pub const TEST_API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
pub struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: String,
}

impl Route {
    pub fn new(method: &'static str, path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self { method, path: path.into(), status, body: body.into() }
    }

    pub fn get(path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::new("GET", path, status, body)
    }

    pub fn post(path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::new("POST", path, status, body)
    }

    pub fn put(path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::new("PUT", path, status, body)
    }

    pub fn delete(path: impl Into<String>, status: u16) -> Self {
        Self::new("DELETE", path, status, "")
    }

    /// Routes with a query string match exactly, others match on the path alone
    fn matches(&self, method: &str, url: &str) -> bool {
        if self.method != method {
            return false;
        }
        if self.path.contains('?') {
            self.path == url
        } else {
            url.split('?').next() == Some(self.path.as_str())
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

pub struct FakeApi {
    server: Arc<Server>,
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApi {
    pub fn start(routes: Vec<Route>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind fake api"));
        let port = server.server_addr().to_ip().expect("ip listener").port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker = Arc::clone(&server);
        let log = Arc::clone(&requests);
        std::thread::spawn(move || {
            for mut request in worker.incoming_requests() {
                let method = request.method().to_string();
                let url = request.url().to_string();
                let header = |name: &'static str| {
                    request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv(name))
                        .map(|h| h.value.as_str().to_string())
                };
                let authorization = header("Authorization");
                let api_key = header("X-Noroff-API-Key");

                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                log.lock().unwrap().push(RecordedRequest {
                    method: method.clone(),
                    url: url.clone(),
                    authorization,
                    api_key,
                    body,
                });

                let (status, payload) = routes
                    .iter()
                    .find(|r| r.matches(&method, &url))
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, r#"{"errors":[{"message":"No route"}]}"#.to_string()));

                let response = Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            server,
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url.clone(), TEST_API_KEY)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

/// Wrap a JSON value in the `{ data, meta }` envelope
pub fn envelope(data: serde_json::Value) -> String {
    serde_json::json!({ "data": data, "meta": {} }).to_string()
}

pub fn error_body(message: &str) -> String {
    serde_json::json!({ "errors": [{ "message": message }] }).to_string()
}
