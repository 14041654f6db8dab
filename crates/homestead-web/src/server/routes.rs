use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use homestead_core::{Error, Request, RequestStore, status_for};
use serde::Deserialize;

use super::pages;

pub const FORM_URL: &str = "/";
pub const FORM_POST_URL: &str = "/post";
pub const STATUS_URL_PREFIX: &str = "/status/";
pub const ERROR_URL: &str = "/error";

/// Shared handler state: the store chosen at startup.
#[derive(Clone)]
struct AppState {
    store: Arc<dyn RequestStore>,
}

pub fn router(store: Arc<dyn RequestStore>) -> Router {
    Router::new()
        .route(FORM_URL, get(form_page))
        .route(FORM_POST_URL, post(submit))
        .route("/status/{id}", get(status_page))
        .route(ERROR_URL, get(rejected_page))
        .with_state(AppState { store })
}

/// Form fields posted by the signup page. Missing fields default to
/// empty and are caught by the presence check.
#[derive(Debug, Deserialize)]
struct SubmissionForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    why: String,
    #[serde(default)]
    sshpublickey: String,
}

async fn form_page() -> Html<&'static str> {
    Html(pages::SIGNUP_FORM)
}

async fn rejected_page() -> Html<&'static str> {
    Html(pages::REJECTED)
}

/// Accepts a signup submission.
///
/// A complete submission is stored as `Pending` and answered with a
/// redirect to its status URL, which is the submitter's only handle on
/// the request. An incomplete one is redirected to the rejection page
/// and never persisted. A store failure is the only server error on
/// this path; it does not take the process down.
async fn submit(State(state): State<AppState>, Form(form): Form<SubmissionForm>) -> Response {
    let request = Request::pending(form.username, form.email, form.why, form.sshpublickey);
    if !request.is_valid() {
        tracing::warn!(username = %request.username, "rejected incomplete signup");
        return Redirect::to(ERROR_URL).into_response();
    }
    match state.store.save(&request) {
        Ok(id) => {
            tracing::info!(username = %request.username, %id, "saved signup request");
            Redirect::to(&format!("{STATUS_URL_PREFIX}{id}")).into_response()
        }
        Err(err) => {
            tracing::error!(%err, "failed to save signup request");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Reports the current status of a request.
///
/// Malformed ids are rejected without touching the store; unknown ids
/// surface as the same client error.
async fn status_page(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    match status_for(state.store.as_ref(), &raw_id) {
        Ok(status) => format!("Status: {status}").into_response(),
        Err(err @ (Error::MalformedId { .. } | Error::NotFound { .. })) => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(err) => {
            tracing::error!(%err, "status lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
