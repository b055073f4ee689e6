//! End-to-end session flow against an in-process axum backend.
//!
//! The backend issues an HTTP-only session cookie on login and bearer
//! credentials on login and refresh. Only the reqwest cookie jar ever sees
//! the cookie.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::{Value, json};

use library_desk::api::Library;
use library_desk::http::ApiRequest;
use library_desk::session::{GuardDecision, LOGIN_PATH, RouteGuard};
use library_desk::{ApiClient, ClientConfig, HttpTransport, SessionStore};

const COOKIE_NAME: &str = "library_session";
const SESSION_ID: &str = "sess-1";

#[derive(Default)]
struct Backend {
    issued: u32,
    live_tokens: HashSet<String>,
    session_open: bool,
    refreshes: u32,
}

impl Backend {
    fn mint(&mut self) -> String {
        self.issued += 1;
        let token = format!("token-{}", self.issued);
        self.live_tokens.insert(token.clone());
        token
    }
}

type Shared = Arc<Mutex<Backend>>;

fn user() -> Value {
    json!({ "id": 1, "username": "alice", "fullName": "Alice A", "role": "admin" })
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
}

async fn login(State(backend): State<Shared>, jar: CookieJar, Json(body): Json<Value>) -> Response {
    if body["username"] != "alice" || body["password"] != "secret" {
        return unauthorized("invalid credentials");
    }
    let token = {
        let mut backend = backend.lock().unwrap();
        backend.session_open = true;
        backend.mint()
    };
    let cookie = Cookie::build((COOKIE_NAME, SESSION_ID)).path("/").http_only(true);
    (jar.add(cookie), Json(json!({ "user": user(), "accessToken": token }))).into_response()
}

async fn refresh(State(backend): State<Shared>, jar: CookieJar) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.refreshes += 1;
    let has_cookie = jar.get(COOKIE_NAME).map(Cookie::value) == Some(SESSION_ID);
    if !(backend.session_open && has_cookie) {
        return unauthorized("no session");
    }
    let token = backend.mint();
    Json(json!({ "user": user(), "accessToken": token, "isAuthenticated": true })).into_response()
}

async fn logout(State(backend): State<Shared>, jar: CookieJar) -> Response {
    {
        let mut backend = backend.lock().unwrap();
        backend.session_open = false;
        backend.live_tokens.clear();
    }
    let jar = jar.remove(Cookie::build((COOKIE_NAME, "")).path("/"));
    (jar, StatusCode::NO_CONTENT).into_response()
}

async fn dashboard(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let authorized = bearer.is_some_and(|t| backend.lock().unwrap().live_tokens.contains(t));
    if !authorized {
        return unauthorized("token expired");
    }
    Json(json!({ "totalBooks": 3, "totalCopies": 5, "totalUsers": 2, "activeLoans": 1, "overdueLoans": 0 }))
        .into_response()
}

async fn most_borrowed() -> Json<Value> {
    Json(json!([{ "title": "Dune", "author": "Herbert", "loanCount": 4 }]))
}

async fn top_borrowers() -> Json<Value> {
    Json(json!([{ "fullName": "Alice A", "username": "alice", "loanCount": 2 }]))
}

async fn spawn_backend() -> (Shared, String) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", get(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/dashboard", get(dashboard))
        .route("/api/most-borrowed-books", get(most_borrowed))
        .route("/api/users-most-loans", get(top_borrowers))
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (backend, format!("http://{addr}/api"))
}

fn desk(base_url: &str) -> (SessionStore, Library) {
    let config = ClientConfig::new(base_url).unwrap();
    let transport = HttpTransport::new(config).unwrap();
    let session = SessionStore::new(Arc::new(transport));
    let library = Library::new(ApiClient::new(session.clone()));
    (session, library)
}

#[tokio::test]
async fn boot_without_cookie_redirects_to_login() {
    let (_backend, base_url) = spawn_backend().await;
    let (session, _) = desk(&base_url);

    let err = session.check_auth().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(RouteGuard::new(session).mount().await, GuardDecision::Redirect(LOGIN_PATH));
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (_backend, base_url) = spawn_backend().await;
    let (session, _) = desk(&base_url);

    assert!(!session.login("alice", "nope").await);
    assert!(session.snapshot().user().is_none());
}

#[tokio::test]
async fn login_then_dashboard() {
    let (_backend, base_url) = spawn_backend().await;
    let (session, library) = desk(&base_url);

    assert!(session.login("alice", "secret").await);
    let report = library.dashboard().load().await.unwrap();

    assert_eq!(report.stats.total_books, 3);
    assert_eq!(report.most_borrowed[0].title, "Dune");
}

#[tokio::test]
async fn expired_bearer_is_refreshed_from_cookie_and_replayed() {
    let (backend, base_url) = spawn_backend().await;
    let (session, library) = desk(&base_url);
    assert!(session.login("alice", "secret").await);
    backend.lock().unwrap().live_tokens.clear();

    let stats: Value = library.client().fetch(ApiRequest::get("/dashboard")).await.unwrap();

    assert_eq!(stats["activeLoans"], 1);
    assert_eq!(backend.lock().unwrap().refreshes, 1);
    assert_eq!(session.credential().map(|t| t.expose().to_owned()), Some("token-2".to_owned()));
}

#[tokio::test]
async fn cookie_survives_into_a_fresh_boot_check() {
    let (_backend, base_url) = spawn_backend().await;
    let (session, _) = desk(&base_url);
    assert!(session.login("alice", "secret").await);

    session.check_auth().await.unwrap();

    assert!(session.snapshot().is_authenticated());
    assert_eq!(RouteGuard::new(session).mount().await, GuardDecision::Render);
}

#[tokio::test]
async fn logout_ends_the_server_session() {
    let (backend, base_url) = spawn_backend().await;
    let (session, library) = desk(&base_url);
    assert!(session.login("alice", "secret").await);

    session.logout().await;

    assert!(!session.snapshot().is_authenticated());
    let err = library.client().fetch::<Value>(ApiRequest::get("/dashboard")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!session.snapshot().is_authenticated());
    assert_eq!(backend.lock().unwrap().refreshes, 1);
}
