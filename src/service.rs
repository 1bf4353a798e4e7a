use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    chat,
    error::ExtractError,
    models::{AnalyzeRequest, ExtractionOutcome, OcrRequest, PatientChatRequest},
    ocr,
    pipeline::{self, ModelInvoker, TextInvoker, VisionInvoker},
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub openrouter_api_key: String,
    pub ocr_api_key: String,
}

impl AppState {
    /// Picks the invoker variant matching the request's source content.
    /// Validation of the source itself happens inside the pipeline; a
    /// request with nothing usable never gets as far as an invocation.
    fn invoker_for(&self, request: &AnalyzeRequest) -> Box<dyn ModelInvoker> {
        match request.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Box::new(VisionInvoker::new(
                self.http.clone(),
                self.openrouter_api_key.clone(),
                url.to_string(),
            )),
            _ => Box::new(TextInvoker::new(
                self.http.clone(),
                self.openrouter_api_key.clone(),
            )),
        }
    }
}

pub fn create_app() -> Router {
    build_router(create_app_state())
}

fn create_app_state() -> AppState {
    AppState {
        http: reqwest::Client::new(),
        openrouter_api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
        ocr_api_key: std::env::var("OCR_SPACE_API_KEY").unwrap_or_default(),
    }
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/checkup/analyze", post(analyze_checkup))
        .route("/ocr/analyze", post(analyze_ocr))
        .route("/chat/patient", post(patient_chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Checkup Analysis Service",
        "version": "1.0.0",
        "description": "Extracts structured medical records from checkup slips via AI vision/OCR",
        "endpoints": {
            "POST /checkup/analyze": "Extract structured fields from a checkup image or OCR text",
            "POST /ocr/analyze": "Extract plain text from a checkup image",
            "POST /chat/patient": "Answer a patient question grounded in their records",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn analyze_checkup(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Value> {
    info!(
        "Starting checkup analysis, subject: {:?}",
        request.subject.as_deref()
    );

    let invoker = state.invoker_for(&request);

    match pipeline::analyze(invoker.as_ref(), &request).await {
        Ok(ExtractionOutcome::Success(analysis)) => Ok(Json(json!({ "analysis": analysis }))),
        Ok(ExtractionOutcome::Unparseable { raw }) => {
            warn!("Model did not return valid JSON");
            Ok(Json(json!({
                "analysis": null,
                "raw": raw,
                "warning": "Model did not return valid JSON"
            })))
        }
        Err(ExtractError::MissingSource) => {
            Err(bad_request_error("Missing imageUrl or extractedText"))
        }
        Err(ExtractError::Upstream(details)) => {
            error!("AI analysis failed: {}", details);
            Err(internal_error("AI analysis failed", &details))
        }
    }
}

async fn analyze_ocr(
    State(state): State<AppState>,
    Json(request): Json<OcrRequest>,
) -> ApiResult<Value> {
    let image_url = match request.image_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(bad_request_error("Missing imageUrl")),
    };

    match ocr::extract_text_from_image(&state.http, &state.ocr_api_key, &image_url).await {
        Ok(text) => {
            if text.trim().is_empty() {
                warn!("OCR returned empty text for {}", image_url);
            }
            Ok(Json(json!({ "text": text })))
        }
        Err(e) => {
            error!("OCR request failed: {}", e);
            Err(internal_error("OCR failed", &e.to_string()))
        }
    }
}

async fn patient_chat(
    State(state): State<AppState>,
    Json(request): Json<PatientChatRequest>,
) -> ApiResult<Value> {
    let message = match request.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => return Err(bad_request_error("Invalid message")),
    };

    info!(
        "Patient chat question over {} record(s)",
        request.records.len()
    );

    match chat::answer_patient_question(&state.openrouter_api_key, &message, &request.records).await
    {
        Ok(reply) => Ok(Json(json!({ "reply": reply }))),
        Err(e) => {
            error!("Chat failed: {}", e);
            Err(internal_error("Chat failed", &e.to_string()))
        }
    }
}
