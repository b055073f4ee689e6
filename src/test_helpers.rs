//! Scripted transport for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::http::request::{ApiRequest, ApiResponse, Method};
use crate::http::transport::Transport;
use crate::session::SessionStore;

#[cfg(test)]
#[path = "test_helpers_test.rs"]
mod test_helpers_test;

#[derive(Clone, Debug)]
pub enum Reply {
    Json(u16, Value),
    /// No response at all (connection refused, timeout).
    Fail(String),
}

/// Replies queued for one `(method, path)`.
#[derive(Default)]
struct Route {
    queue: VecDeque<Reply>,
    /// The front reply has been served at least once as the repeating tail.
    served_tail: bool,
}

/// Replies are queued per `(method, path)`; the last queued reply repeats
/// until another is queued, which then replaces it. Unscripted routes
/// answer `404`.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Route>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        let mut routes = self.routes.lock().unwrap();
        let route = routes.entry((method, path.to_owned())).or_default();
        if route.served_tail {
            route.queue.clear();
            route.served_tail = false;
        }
        route.queue.push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn bearers(&self, method: Method, path: &str) -> Vec<Option<String>> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .map(|r| r.bearer.as_ref().map(|t| t.expose().to_owned()))
            .collect()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        self.log.lock().unwrap().push(request.clone());
        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&(request.method, request.path.clone())) {
                Some(route) if route.queue.len() > 1 => route.queue.pop_front(),
                Some(route) => {
                    route.served_tail = true;
                    route.queue.front().cloned()
                }
                None => None,
            }
        };
        match reply {
            Some(Reply::Json(status, body)) => Ok(ApiResponse { status, body: body.to_string() }),
            Some(Reply::Fail(reason)) => Err(ClientError::Request(reason)),
            None => Ok(ApiResponse { status: 404, body: json!({ "message": "not found" }).to_string() }),
        }
    }
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "full_name": format!("{username} tester"),
        "email": format!("{username}@example.test"),
        "role": "user",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
    })
}

pub fn login_ok(username: &str, token: &str) -> Reply {
    Reply::Json(200, json!({ "user": user_json(1, username), "accessToken": token }))
}

pub fn refresh_ok(username: &str, token: &str) -> Reply {
    Reply::Json(200, json!({ "user": user_json(1, username), "accessToken": token, "isAuthenticated": true }))
}

pub fn unauthorized() -> Reply {
    Reply::Json(401, json!({ "message": "unauthorized" }))
}

pub fn forbidden() -> Reply {
    Reply::Json(403, json!({ "message": "forbidden" }))
}

/// Store plus client sharing one mock transport.
pub fn client_with(mock: &Arc<MockTransport>) -> (SessionStore, ApiClient) {
    let transport: Arc<dyn Transport> = Arc::clone(mock) as Arc<dyn Transport>;
    let session = SessionStore::new(transport);
    let client = ApiClient::new(session.clone());
    (session, client)
}

/// Store already logged in as `alice` holding credential `token`.
pub async fn logged_in(mock: &Arc<MockTransport>, token: &str) -> (SessionStore, ApiClient) {
    mock.on(Method::Post, "/auth/login", login_ok("alice", token));
    let (session, client) = client_with(mock);
    assert!(session.login("alice", "secret").await);
    (session, client)
}
