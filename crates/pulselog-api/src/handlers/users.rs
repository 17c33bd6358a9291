//! Registration and login.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use pulselog_core::{AuditEntry, AuditRepository, NewUser, User, UserRepository};

use crate::error::ApiResult;
use crate::password;
use crate::AppState;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Strong password: at least 8 chars with lower, upper, digit, and symbol.
fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

fn validate_registration(req: &RegisterRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if req.username.trim().chars().count() < 3 {
        errors.push("Username must be at least 3 characters".to_string());
    }
    if !EMAIL_RE.is_match(req.email.trim()) {
        errors.push("Email address is invalid".to_string());
    }
    if req.first_name.trim().is_empty() {
        errors.push("First name is required".to_string());
    }
    if req.last_name.trim().is_empty() {
        errors.push("Last name is required".to_string());
    }
    if !is_strong_password(&req.password) {
        errors.push(
            "Password must be at least 8 characters with upper and lower case letters, \
             a number, and a symbol"
                .to_string(),
        );
    }
    errors
}

/// `POST /auth/register`: validated registration with duplicate checks.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Response> {
    let mut errors = validate_registration(&req);

    let username = req.username.trim().to_string();
    let email = req.email.trim().to_string();
    if state.db.users.username_exists(&username).await? {
        errors.push("Username already taken".to_string());
    }
    if state.db.users.email_exists(&email).await? {
        errors.push("Email already registered".to_string());
    }

    if !errors.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "errors": errors })),
        )
            .into_response());
    }

    let hashed_password = password::hash_password(&req.password)?;
    let user_id = state
        .db
        .users
        .insert(NewUser {
            username: username.clone(),
            email: email.clone(),
            hashed_password,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
        })
        .await?;

    info!(
        subsystem = "api",
        component = "users",
        op = "register",
        user_id,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            user_id,
            username,
            email,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
        }),
    )
        .into_response())
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": "Invalid credentials" })),
    )
        .into_response()
}

fn audit_login(addr: &SocketAddr, headers: &HeaderMap, username: &str, status: &str) -> AuditEntry {
    AuditEntry {
        username: username.to_string(),
        action: "login".to_string(),
        status: status.to_string(),
        ip: addr.ip().to_string(),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string(),
        details: None,
    }
}

/// `POST /auth/login`: credential verification with audit logging.
///
/// Unknown users and wrong passwords are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    let username = req.username.trim();

    let Some(user) = state.db.users.find_by_username(username).await? else {
        return Ok(invalid_credentials());
    };

    if !password::verify_password(&req.password, &user.hashed_password) {
        let mut entry = audit_login(&addr, &headers, username, "failure");
        entry.details = Some("Bad password".to_string());
        state.db.audit.record(entry).await;
        return Ok(invalid_credentials());
    }

    state
        .db
        .audit
        .record(audit_login(&addr, &headers, username, "success"))
        .await;

    info!(
        subsystem = "api",
        component = "users",
        op = "login",
        user_id = user.user_id,
        "Login succeeded"
    );

    Ok(Json(UserResponse::from(user)).into_response())
}
