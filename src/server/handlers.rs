// HTTP request handlers

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Form, Query, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::pages::{render_page, PageView, PanelResult};
use super::AssistantServer;
use crate::export::{export_file_name, render_interpretation, render_vowelization};
use crate::model::{Interpretation, TaskKind, TaskResult, Vowelization};
use crate::service::AssistantError;

/// Create the main application router
pub fn create_router(server: Arc<AssistantServer>) -> Router {
    Router::new()
        // Web UI
        .route("/", get(index))
        .route("/interpret", post(handle_interpret_form))
        .route("/nikud", post(handle_nikud_form))
        .route("/export/interpretation", post(export_interpretation))
        .route("/export/nikud", post(export_nikud))
        // JSON API
        .route("/api/interpret", post(api_interpret))
        .route("/api/nikud", post(api_nikud))
        // Health and metrics
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(server)
}

#[derive(Debug, Deserialize)]
pub struct TabQuery {
    #[serde(default)]
    pub tab: Option<String>,
}

impl TabQuery {
    fn task(&self) -> TaskKind {
        match self.tab.as_deref() {
            Some("nikud") => TaskKind::Nikud,
            _ => TaskKind::Interpretation,
        }
    }
}

/// Textarea submission
#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

/// Download button submission; payload is the result as JSON
#[derive(Debug, Deserialize)]
pub struct ExportForm {
    pub payload: String,
}

/// Body of the JSON API endpoints
#[derive(Debug, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub text: String,
}

/// Handle GET / - Render the empty page
async fn index(Query(query): Query<TabQuery>) -> Html<String> {
    Html(render_page(&PageView::empty(query.task())))
}

fn status_for(err: &AssistantError) -> StatusCode {
    if err.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

fn form_page(
    tab: TaskKind,
    input: String,
    outcome: Result<PanelResult, AssistantError>,
) -> Response {
    let mut view = PageView {
        tab,
        input,
        result: None,
        error: None,
    };

    let status = match outcome {
        Ok(result) => {
            view.result = Some(result);
            StatusCode::OK
        }
        Err(e) => {
            view.error = Some(e.user_message());
            status_for(&e)
        }
    };

    (status, Html(render_page(&view))).into_response()
}

/// Handle POST /interpret - Interpretation tab form
async fn handle_interpret_form(
    State(server): State<Arc<AssistantServer>>,
    Form(form): Form<TextForm>,
) -> Response {
    let outcome = server
        .service()
        .interpret(&form.text)
        .await
        .map(PanelResult::Interpretation);
    form_page(TaskKind::Interpretation, form.text, outcome)
}

/// Handle POST /nikud - Nikud tab form
async fn handle_nikud_form(
    State(server): State<Arc<AssistantServer>>,
    Form(form): Form<TextForm>,
) -> Response {
    let outcome = server
        .service()
        .vowelize(&form.text)
        .await
        .map(PanelResult::Nikud);
    form_page(TaskKind::Nikud, form.text, outcome)
}

fn text_download(task: TaskKind, body: String) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(task));
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn export_payload<T: TaskResult>(
    form: Result<Form<ExportForm>, FormRejection>,
) -> Result<T, AppError> {
    let Form(form) = form?;
    let result: T = serde_json::from_str(&form.payload)
        .map_err(|e| AppError::bad_request(format!("Invalid export payload: {}", e)))?;
    result
        .validate()
        .map_err(|e| AppError::bad_request(format!("Invalid export payload: {}", e)))?;
    Ok(result)
}

/// Handle POST /export/interpretation - Download interpretation as .txt
async fn export_interpretation(
    form: Result<Form<ExportForm>, FormRejection>,
) -> Result<Response, AppError> {
    let interp: Interpretation = export_payload(form)?;
    Ok(text_download(
        TaskKind::Interpretation,
        render_interpretation(&interp),
    ))
}

/// Handle POST /export/nikud - Download nikud result as .txt
async fn export_nikud(
    form: Result<Form<ExportForm>, FormRejection>,
) -> Result<Response, AppError> {
    let v: Vowelization = export_payload(form)?;
    Ok(text_download(TaskKind::Nikud, render_vowelization(&v)))
}

/// Handle POST /api/interpret
async fn api_interpret(
    State(server): State<Arc<AssistantServer>>,
    request: Result<Json<ApiRequest>, JsonRejection>,
) -> Result<Json<Interpretation>, AppError> {
    let Json(request) = request?;
    Ok(Json(server.service().interpret(&request.text).await?))
}

/// Handle POST /api/nikud
async fn api_nikud(
    State(server): State<Arc<AssistantServer>>,
    request: Result<Json<ApiRequest>, JsonRejection>,
) -> Result<Json<Vowelization>, AppError> {
    let Json(request) = request?;
    Ok(Json(server.service().vowelize(&request.text).await?))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub uptime_seconds: u64,
}

/// Handle GET /health - Health check endpoint
pub async fn health_check(State(server): State<Arc<AssistantServer>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        uptime_seconds: server.uptime().as_secs(),
    })
}

/// Handle GET /metrics - Prometheus metrics endpoint
pub async fn metrics_endpoint(
    State(server): State<Arc<AssistantServer>>,
) -> Result<Response, AppError> {
    let body = server.service().metrics().render()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError {
    status: StatusCode,
    error_type: &'static str,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error_type: "invalid_request_error",
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "Request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.message, "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.message,
                "type": self.error_type
            }
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        let error_type = if err.is_input_error() {
            "invalid_request_error"
        } else {
            "api_error"
        };
        Self {
            status: status_for(&err),
            error_type,
            message: err.user_message(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error_type: "api_error",
            message: err.to_string(),
        }
    }
}
