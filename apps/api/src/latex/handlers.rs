//! Axum route handlers for stateless generation.
//!
//! The client posts a whole CV value and gets the document source back.
//! Copy-to-clipboard is the client's business; download is the same bytes
//! with an attachment header.

use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::latex::{generate_with, RenderOptions};
use crate::models::cv::CvData;
use crate::models::sample::{empty_cv, sample_cv};

/// File name offered for downloads.
pub const DOWNLOAD_FILENAME: &str = "cv.tex";

const TEX_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Wraps generated source as a plain-text response.
pub fn latex_response(source: String) -> Response {
    ([(header::CONTENT_TYPE, TEX_CONTENT_TYPE)], source).into_response()
}

/// Wraps generated source as a file download.
pub fn latex_download(source: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, TEX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        source,
    )
        .into_response()
}

/// GET /api/v1/cv/default
pub async fn handle_default_cv() -> Json<CvData> {
    Json(empty_cv(Utc::now().date_naive()))
}

/// GET /api/v1/cv/template
pub async fn handle_template_cv() -> Json<CvData> {
    Json(sample_cv(Utc::now().date_naive()))
}

/// POST /api/v1/cv/latex?escape=bool
///
/// Body: a CV value. Returns the document source as text.
pub async fn handle_render(Query(opts): Query<RenderOptions>, Json(cv): Json<CvData>) -> Response {
    latex_response(generate_with(&cv, &opts))
}

/// POST /api/v1/cv/latex/download?escape=bool
pub async fn handle_download(
    Query(opts): Query<RenderOptions>,
    Json(cv): Json<CvData>,
) -> Response {
    latex_download(generate_with(&cv, &opts))
}
