//! Router and request adapters.
//!
//! Each route decodes its request (path id, precondition headers, JSON body),
//! hands it to the [`ContactHandler`], and encodes the [`Outcome`]. Requests
//! that cannot be decoded are answered with 400 here and never reach the
//! handler.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::{ETAG, IF_MATCH, IF_NONE_MATCH, LOCATION};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use contactd::outcome::{Body, Outcome};
use contactd::{ContactHandler, ContactdError};
use contactd_core::{ContactBody, ContactId, Preconditions};
use contactd_store::ContactStore;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    handler: ContactHandler<dyn ContactStore>,
}

impl AppState {
    pub fn new(handler: ContactHandler<dyn ContactStore>) -> Self {
        Self { handler }
    }
}

/// Build the contact routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorPayload,
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    code: &'static str,
    message: String,
}

/// A request that failed before or outside the handler's own outcomes.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiFailure {
    fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
        }
    }
}

impl From<ContactdError> for ApiFailure {
    fn from(err: ContactdError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal_error",
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, message = %self.message, "request failed");
        } else {
            warn!(code = self.code, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            error: ErrorPayload {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ListQuery {
    title: Option<String>,
}

fn parse_id(raw: &str) -> Result<ContactId, ApiFailure> {
    raw.parse()
        .map_err(|_| ApiFailure::bad_request("invalid_id", format!("not a contact id: {raw:?}")))
}

/// All values of a header, joined as one list. Repeated header lines are
/// equivalent to a single comma-separated line.
fn header_list(headers: &HeaderMap, name: &HeaderName) -> Result<Option<String>, ApiFailure> {
    let mut values = Vec::new();
    for value in headers.get_all(name) {
        let text = value.to_str().map_err(|_| {
            ApiFailure::bad_request("invalid_precondition", format!("{name} is not visible ASCII"))
        })?;
        values.push(text);
    }
    Ok((!values.is_empty()).then(|| values.join(", ")))
}

fn preconditions(headers: &HeaderMap) -> Result<Preconditions, ApiFailure> {
    let if_match = header_list(headers, &IF_MATCH)?;
    let if_none_match = header_list(headers, &IF_NONE_MATCH)?;
    Preconditions::from_headers(if_match.as_deref(), if_none_match.as_deref())
        .map_err(|e| ApiFailure::bad_request("invalid_precondition", e.to_string()))
}

fn json_body(body: Result<Json<ContactBody>, JsonRejection>) -> Result<ContactBody, ApiFailure> {
    body.map(|Json(body)| body)
        .map_err(|rejection| ApiFailure::bad_request("invalid_json", rejection.body_text()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

fn header_value(name: &HeaderName, value: String) -> Option<HeaderValue> {
    match HeaderValue::try_from(value) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(header = %name, "dropping unrepresentable response header");
            None
        }
    }
}

fn respond(outcome: Outcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    if let Some(value) = outcome.etag.and_then(|tag| header_value(&ETAG, tag.to_string())) {
        headers.insert(ETAG, value);
    }
    if let Some(value) = outcome
        .location
        .and_then(|location| header_value(&LOCATION, location))
    {
        headers.insert(LOCATION, value);
    }

    match outcome.body {
        Some(Body::Contact(contact)) => (status, headers, Json(contact)).into_response(),
        Some(Body::Contacts(contacts)) => (status, headers, Json(contacts)).into_response(),
        None => (status, headers).into_response(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Routes
// ─────────────────────────────────────────────────────────────────────────────

async fn list_contacts(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiFailure> {
    let Query(query) =
        query.map_err(|rejection| ApiFailure::bad_request("invalid_query", rejection.body_text()))?;
    let outcome = state.handler.list(query.title.as_deref())?;
    Ok(respond(outcome))
}

async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    let id = parse_id(&id)?;
    let preconditions = preconditions(&headers)?;
    let outcome = state.handler.get(id, &preconditions)?;
    Ok(respond(outcome))
}

async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let body = json_body(body)?;
    let outcome = state.handler.create(body)?;
    Ok(respond(outcome))
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let id = parse_id(&id)?;
    let preconditions = preconditions(&headers)?;
    let body = json_body(body)?;
    let outcome = state.handler.update(id, &preconditions, body)?;
    Ok(respond(outcome))
}

async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    let id = parse_id(&id)?;
    let preconditions = preconditions(&headers)?;
    let outcome = state.handler.delete(id, &preconditions)?;
    Ok(respond(outcome))
}
