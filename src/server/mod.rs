// SPDX-License-Identifier: MIT

//! HTTP surface for the rule-validation engine
//!
//! Owns route wiring, JSON body parsing (and its rejection trap), the static
//! informational endpoint and the catch-all 404. Every path returns a
//! response; nothing here can take the process down.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};
use std::env;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::engine::{validate, ExistencePolicy, Message};

/// Author details served by `GET /`, overridable through the environment.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub name: String,
    pub github: String,
    pub email: String,
    pub mobile: String,
    pub twitter: String,
}

impl Profile {
    fn from_env() -> Self {
        fn var_or(key: &str, default: &str) -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        }
        Self {
            name: var_or("AUTHOR_NAME", "James Holden"),
            github: var_or("AUTHOR_GITHUB", "@jholden"),
            email: var_or("AUTHOR_EMAIL", "jholden@rocinante.io"),
            mobile: var_or("AUTHOR_MOBILE", "08001234567"),
            twitter: var_or("AUTHOR_TWITTER", "@jholden"),
        }
    }
}

// Process-wide constants, read once and immutable after.
static PROFILE: Lazy<Profile> = Lazy::new(Profile::from_env);
static POLICY: Lazy<ExistencePolicy> = Lazy::new(ExistencePolicy::from_env);

pub fn router() -> Router {
    Router::new()
        .route("/", get(about))
        .route("/validate-rule", post(validate_rule))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(port: u16) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router()).await
}

async fn about() -> Json<Value> {
    Json(json!({
        "message": "My Rule-Validation API",
        "status": "success",
        "data": &*PROFILE,
    }))
}

async fn validate_rule(
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let payload = match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            log::debug!("Rejected request body: {}", rejection);
            return error_response(Message::One("Invalid JSON payload passed.".to_string()));
        }
    };

    match validate(&payload, *POLICY) {
        Ok(verdict) => {
            log::debug!(
                "Verdict for field {}: error={}",
                verdict.field,
                verdict.error
            );
            let (code, status) = if verdict.error {
                (StatusCode::BAD_REQUEST, "error")
            } else {
                (StatusCode::OK, "success")
            };
            (
                code,
                Json(json!({
                    "message": verdict.message(),
                    "status": status,
                    "data": { "validation": verdict },
                })),
            )
        }
        Err(err) => error_response(err.message()),
    }
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "route not found.",
            "status": "error",
            "data": null,
        })),
    )
}

fn error_response(message: Message) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": message,
            "status": "error",
            "data": null,
        })),
    )
}
