//! Response helpers: template rendering, redirects, and negotiated error bodies.

use crate::error::{AppError, ErrorReport};
use crate::extractors::Accept;
use crate::views::ErrorPage;
use askama::Template;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}

/// 302 to `location`.
pub fn found(location: impl AsRef<str>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.as_ref().to_string())]).into_response()
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorBody {
    pub fn new(report: &ErrorReport, path: &str) -> Self {
        ErrorBody {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: report.status.as_u16(),
            error: report.status.canonical_reason().unwrap_or("Error").to_string(),
            message: report.message.clone(),
            path: path.to_string(),
        }
    }
}

const REJECTION_BODY_LIMIT: usize = 16 * 1024;

/// Report for an error response that did not come from `AppError`, such as extractor
/// rejections or the body limit: the plain-text body, or the reason phrase when empty.
async fn report_from_body(status: StatusCode, body: Body) -> ErrorReport {
    let text = to_bytes(body, REJECTION_BODY_LIMIT)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let message = if text.is_empty() {
        status.canonical_reason().unwrap_or("Error").to_string()
    } else {
        text
    };
    tracing::debug!(status = %status, message = %message, "request rejected");
    ErrorReport { status, message }
}

/// Replaces the body of every 4xx/5xx response with the representation the client asked for:
/// an HTML page when `Accept` names `text/html`, JSON otherwise.
pub async fn render_errors(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let accept = Accept::from_headers(request.headers());
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let attached = response.extensions().get::<ErrorReport>().cloned();
    let report = match attached {
        Some(report) => report,
        None => report_from_body(status, response.into_body()).await,
    };

    let body = ErrorBody::new(&report, &path);
    if accept.accepts_html() {
        let page = ErrorPage {
            status: body.status,
            error: body.error,
            message: body.message,
            path: body.path,
        };
        match page.render() {
            Ok(html) => (report.status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "error page failed to render");
                (report.status, report.message).into_response()
            }
        }
    } else {
        (report.status, Json(body)).into_response()
    }
}
