//! Axum route handlers for the notes API.

use crate::app::NoteService;
use crate::{Note, NoteError, NoteId};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use log::{debug, error};
use serde::Deserialize;
use std::sync::Arc;

/// Failed request: status code plus a plain-text body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authorization required")
    }

    fn invalid_id() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid note ID")
    }

    fn invalid_input() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid input")
    }
}

impl From<NoteError> for ApiError {
    fn from(e: NoteError) -> Self {
        match e {
            NoteError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Note not found"),
            NoteError::Validation(e) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            NoteError::Backend(e) => {
                error!("Backend failure: {e}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

// Missing or empty fields mean "keep the stored value"
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

// The token itself is checked upstream; here it only has to be present
fn require_auth(headers: &HeaderMap) -> ApiResult<()> {
    match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => Ok(()),
        _ => {
            debug!("Rejected request without Authorization header");
            Err(ApiError::unauthorized())
        }
    }
}

fn parse_id(raw: &str) -> ApiResult<NoteId> {
    raw.parse().map_err(|_| ApiError::invalid_id())
}

fn parse_body<'a, T: Deserialize<'a>>(body: &'a [u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected request body: {e}");
        ApiError::invalid_input()
    })
}

// POST /api/v1/notes
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Note>)> {
    require_auth(&headers)?;
    let input: CreateNoteRequest = parse_body(&body)?;

    let note = service.create_note(
        input.title.unwrap_or_default(),
        input.content.unwrap_or_default(),
    )?;
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /api/v1/notes (public)
pub async fn list_notes(State(service): State<Arc<NoteService>>) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(service.get_all_notes()?))
}

// GET /api/v1/notes/:id
pub async fn get_note(
    State(service): State<Arc<NoteService>>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Note>> {
    require_auth(&headers)?;
    let id = parse_id(&raw_id)?;
    Ok(Json(service.get_note_by_id(id)?))
}

// PATCH /api/v1/notes/:id
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Note>> {
    require_auth(&headers)?;
    let id = parse_id(&raw_id)?;
    let input: UpdateNoteRequest = parse_body(&body)?;

    let note = service.update_note(
        id,
        input.title.as_deref().unwrap_or_default(),
        input.content.as_deref().unwrap_or_default(),
    )?;
    Ok(Json(note))
}

// DELETE /api/v1/notes/:id
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    require_auth(&headers)?;
    let id = parse_id(&raw_id)?;
    service.delete_note(id)?;
    Ok(StatusCode::NO_CONTENT)
}
