// Fake identity provider shared by the integration tests, bootstrapped once per test binary.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use identity_auth::{AuthService, ClientConfig, IdentityToolkitClient, build_service};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

pub const TEST_API_KEY: &str = "test-api-key";
pub const KNOWN_VALID_EMAIL: &str = "known.pilot@validdomain.com";
pub const KNOWN_VALID_PASSWORD: &str = "correct-horse-battery";
pub const KNOWN_DISABLED_EMAIL: &str = "grounded.pilot@validdomain.com";
pub const KNOWN_DISABLED_PASSWORD: &str = "grounded-password";

// Base URL of the fake provider, published once the server thread has bound.
static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

#[derive(Clone)]
struct Account {
    password: String,
    local_id: String,
    disabled: bool,
}

type Accounts = Arc<Mutex<HashMap<String, Account>>>;

// Ensure the fake provider is running and return its root URL.
pub fn ensure_provider() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                axum::serve(listener, provider_app())
                    .await
                    .expect("fake provider failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Service wired to the well-behaved `/v1` endpoints.
pub fn service() -> AuthService<IdentityToolkitClient> {
    service_at("/v1", Duration::from_secs(5))
}

// Service wired to one of the fake provider's path prefixes.
pub fn service_at(prefix: &str, timeout: Duration) -> AuthService<IdentityToolkitClient> {
    let config = ClientConfig::new(TEST_API_KEY)
        .with_base_url(format!("{}{}", ensure_provider(), prefix))
        .with_timeout(timeout);
    build_service(&config).expect("expected client to build")
}

pub fn service_with_key(api_key: &str) -> AuthService<IdentityToolkitClient> {
    let config = ClientConfig::new(api_key).with_base_url(format!("{}/v1", ensure_provider()));
    build_service(&config).expect("expected client to build")
}

pub fn unique_email() -> String {
    format!("{}@validdomain.com", uuid::Uuid::new_v4().simple())
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("fake provider did not become ready in time");
}

fn provider_app() -> Router {
    let accounts: Accounts = Arc::new(Mutex::new(HashMap::new()));
    {
        let mut guard = accounts.lock().expect("accounts mutex poisoned");
        guard.insert(
            KNOWN_VALID_EMAIL.to_string(),
            Account {
                password: KNOWN_VALID_PASSWORD.to_string(),
                local_id: "known-local-id".to_string(),
                disabled: false,
            },
        );
        guard.insert(
            KNOWN_DISABLED_EMAIL.to_string(),
            Account {
                password: KNOWN_DISABLED_PASSWORD.to_string(),
                local_id: "disabled-local-id".to_string(),
                disabled: true,
            },
        );
    }

    Router::new()
        .route("/v1/accounts:signUp", post(sign_up))
        .route("/v1/accounts:signInWithPassword", post(sign_in))
        .route("/slow/v1/accounts:signUp", post(slow))
        .route("/slow/v1/accounts:signInWithPassword", post(slow))
        .route("/broken/v1/accounts:signUp", post(truncated_success))
        .route("/broken/v1/accounts:signInWithPassword", post(unregistered_success))
        .route("/gateway/v1/accounts:signUp", post(bad_gateway))
        .route("/gateway/v1/accounts:signInWithPassword", post(bad_gateway))
        .with_state(accounts)
}

async fn sign_up(
    State(accounts): State<Accounts>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_request(&params, &body) {
        return res;
    }
    let email = field(&body, "email");
    let password = field(&body, "password");

    if email.is_empty() {
        return provider_error("MISSING_EMAIL");
    }
    if password.is_empty() {
        return provider_error("MISSING_PASSWORD");
    }
    if !looks_like_email(&email) {
        return provider_error("INVALID_EMAIL");
    }

    let mut guard = accounts.lock().expect("accounts mutex poisoned");
    if guard.contains_key(&email) {
        return provider_error("EMAIL_EXISTS");
    }
    if password.chars().count() < 6 {
        return provider_error("WEAK_PASSWORD : Password should be at least 6 characters");
    }

    let local_id = uuid::Uuid::new_v4().simple().to_string();
    guard.insert(
        email.clone(),
        Account {
            password,
            local_id: local_id.clone(),
            disabled: false,
        },
    );

    let res = json!({
        "kind": "identitytoolkit#SignupNewUserResponse",
        "idToken": format!("id-{local_id}"),
        "email": email,
        "refreshToken": format!("refresh-{local_id}"),
        "expiresIn": "3600",
        "localId": local_id,
    });
    (StatusCode::OK, Json(res)).into_response()
}

async fn sign_in(
    State(accounts): State<Accounts>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(res) = check_request(&params, &body) {
        return res;
    }
    let email = field(&body, "email");
    let password = field(&body, "password");

    // Sign-in reports an empty email as INVALID_EMAIL, unlike sign-up.
    if email.is_empty() || !looks_like_email(&email) {
        return provider_error("INVALID_EMAIL");
    }
    if password.is_empty() {
        return provider_error("MISSING_PASSWORD");
    }

    let account = {
        let guard = accounts.lock().expect("accounts mutex poisoned");
        guard.get(&email).cloned()
    };
    let Some(account) = account else {
        return provider_error("EMAIL_NOT_FOUND");
    };
    if account.password != password {
        return provider_error("INVALID_PASSWORD");
    }
    if account.disabled {
        return provider_error("USER_DISABLED");
    }

    let res = json!({
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "localId": account.local_id,
        "email": email,
        "displayName": "",
        "idToken": format!("id-{}", account.local_id),
        "registered": true,
        "refreshToken": format!("refresh-{}", account.local_id),
        "expiresIn": "3600",
    });
    (StatusCode::OK, Json(res)).into_response()
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    provider_error("EMAIL_NOT_FOUND")
}

async fn truncated_success() -> Response {
    (StatusCode::OK, Json(json!({ "idToken": "only-a-token" }))).into_response()
}

async fn unregistered_success() -> Response {
    let res = json!({
        "idToken": "id",
        "email": "pilot@validdomain.com",
        "refreshToken": "refresh",
        "expiresIn": "3600",
        "localId": "local",
    });
    (StatusCode::OK, Json(res)).into_response()
}

async fn bad_gateway() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [("content-type", "text/html")],
        "<html><body>502 Bad Gateway</body></html>",
    )
        .into_response()
}

// Mirror the provider's key and body checks before any account logic.
fn check_request(params: &HashMap<String, String>, body: &Value) -> Result<(), Response> {
    if params.get("key").map(String::as_str) != Some(TEST_API_KEY) {
        return Err(provider_error(
            "API key not valid. Please pass a valid API key.",
        ));
    }
    if body["returnSecureToken"] != json!(true) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "returnSecureToken must be true",
        )
            .into_response());
    }
    Ok(())
}

fn field(body: &Value, name: &str) -> String {
    body[name].as_str().unwrap_or_default().to_string()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

fn provider_error(message: &str) -> Response {
    let body = json!({
        "error": {
            "code": 400,
            "message": message,
            "errors": [
                { "message": message, "domain": "global", "reason": "invalid" }
            ]
        }
    });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
