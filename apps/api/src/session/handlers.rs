use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AnalysisReport, ResumeUpload};
use crate::session::{SessionView, Stage};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let session = state.sessions.create();
    info!(
        "Created session {} ({} active)",
        session.id,
        state.sessions.len()
    );
    (StatusCode::CREATED, Json(session.view()))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.get(id)?.view()))
}

/// POST /api/v1/sessions/:id/login
pub async fn handle_login(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.update(id, |s| {
        s.login(&state.credentials, &req.username, &req.password)?;
        Ok(s.view())
    })?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.update(id, |s| {
        s.logout()?;
        Ok(s.view())
    })?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/analyze
///
/// Multipart: one `jd_text` text field and one or more `resumes` PDF files.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    // Reject unknown or wrong-stage sessions before buffering the upload.
    state
        .sessions
        .get(id)?
        .expect_stage(Stage::Upload, "analyze")?;

    let (jd_text, resumes) = read_analysis_form(multipart).await?;
    state.sessions.get(id)?.check_analysis(&jd_text, &resumes)?;

    info!("Session {id}: analyzing {} resume(s)", resumes.len());
    let report = Arc::new(state.analyzer.run(jd_text, resumes).await?);

    state
        .sessions
        .update(id, |s| s.complete_analysis(report.clone()))?;
    Ok(Json(AnalysisReport::clone(&report)))
}

/// GET /api/v1/sessions/:id/results
pub async fn handle_get_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = state.sessions.get(id)?.report()?;
    Ok(Json(AnalysisReport::clone(&report)))
}

/// POST /api/v1/sessions/:id/back
pub async fn handle_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.update(id, |s| {
        s.back()?;
        Ok(s.view())
    })?;
    Ok(Json(view))
}

async fn read_analysis_form(
    mut multipart: Multipart,
) -> Result<(String, Vec<ResumeUpload>), AppError> {
    let bad_form = |e: axum::extract::multipart::MultipartError| {
        AppError::Validation(format!("Malformed upload: {e}"))
    };

    let mut jd_text = String::new();
    let mut resumes = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "jd_text" => jd_text = field.text().await.map_err(bad_form)?,
            "resumes" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let is_pdf = name.to_lowercase().ends_with(".pdf")
                    || field.content_type() == Some("application/pdf");
                let content = field.bytes().await.map_err(bad_form)?;

                // Browsers send an empty part when no file was picked.
                if name.is_empty() && content.is_empty() {
                    continue;
                }
                if !is_pdf {
                    return Err(AppError::Validation(format!(
                        "{name} is not a PDF; only PDF resumes are accepted"
                    )));
                }
                let name = if name.is_empty() {
                    format!("resume-{}.pdf", resumes.len() + 1)
                } else {
                    name
                };
                resumes.push(ResumeUpload { name, content });
            }
            _ => {}
        }
    }

    Ok((jd_text, resumes))
}
