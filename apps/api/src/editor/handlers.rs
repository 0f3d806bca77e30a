//! Axum route handlers for editing sessions.
//!
//! Every mutation replaces one subtree of the session's CV and returns the
//! updated session, so the client can re-render from a single response.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::editor::ops::{self, NewSection};
use crate::editor::session::EditorSession;
use crate::errors::AppError;
use crate::latex::handlers::latex_response;
use crate::latex::{generate_with, RenderOptions};
use crate::models::cv::{
    CustomSection, CustomSectionField, Entry, PersonalInfo, Publication, StyleSettings,
    Technologies,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub template: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<EditorSession>), AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let session = state.sessions.create(request.template).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorSession>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/latex?escape=bool
pub async fn handle_session_latex(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(opts): Query<RenderOptions>,
) -> Result<Response, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(latex_response(generate_with(&session.cv, &opts)))
}

// ────────────────────────────────────────────────────────────────────────────
// Singleton replacements
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/personal-info
pub async fn handle_put_personal_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(info): Json<PersonalInfo>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| Ok((ops::set_personal_info(cv, info), ())))
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/style
pub async fn handle_put_style(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(style): Json<StyleSettings>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| Ok((ops::set_style(cv, style), ())))
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/publications
pub async fn handle_put_publications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(publications): Json<Vec<Publication>>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| Ok((ops::set_publications(cv, publications), ())))
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/technologies
pub async fn handle_put_technologies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(technologies): Json<Technologies>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| Ok((ops::set_technologies(cv, technologies), ())))
        .await?;
    Ok(Json(session))
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/sections
///
/// Returns the created section; its `order` comes from the session counter.
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NewSection>,
) -> Result<(StatusCode, Json<CustomSection>), AppError> {
    let (_, section) = state
        .sessions
        .apply(id, |session, cv| {
            let order = session.take_order();
            ops::add_section(cv, request, order)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// PUT /api/v1/sessions/:id/sections/:section_id
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
    Json(section): Json<CustomSection>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| {
            ops::update_section(cv, &section_id, section).map(|cv| (cv, ()))
        })
        .await?;
    Ok(Json(session))
}

/// DELETE /api/v1/sessions/:id/sections/:section_id
pub async fn handle_delete_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| {
            ops::delete_section(cv, &section_id).map(|cv| (cv, ()))
        })
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/sections/:section_id/entries
pub async fn handle_put_entries(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
    Json(entries): Json<Vec<Entry>>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| {
            ops::set_entries(cv, &section_id, entries).map(|cv| (cv, ()))
        })
        .await?;
    Ok(Json(session))
}

/// PUT /api/v1/sessions/:id/sections/:section_id/fields
pub async fn handle_put_fields(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
    Json(fields): Json<Vec<CustomSectionField>>,
) -> Result<Json<EditorSession>, AppError> {
    let (session, ()) = state
        .sessions
        .apply(id, |_, cv| {
            ops::set_custom_fields(cv, &section_id, fields).map(|cv| (cv, ()))
        })
        .await?;
    Ok(Json(session))
}
