use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod cache;
mod config;
mod metrics;
mod retry;

use cache::TranscriptCache;
use config::AppConfig;
use metrics::{Metrics, TimedOperation};
use retry::RetryPolicy;

#[derive(Clone)]
struct AppState {
    config: AppConfig,
    speech: transcribe::SpeechClient,
    extractor: Arc<extract::Extractor>,
    cache: Arc<TranscriptCache>,
    metrics: Arc<Metrics>,
}

#[derive(Serialize)]
struct HealthResponse {
    speech_service: String,
}

#[derive(Deserialize)]
struct TranscribeRequest {
    path: String,
}

#[derive(Serialize)]
struct TranscribeResponse {
    transcript: String,
    cached: bool,
}

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
}

#[derive(Serialize)]
struct ExtractResponse {
    records: Vec<extract::Record>,
    count: usize,
}

#[derive(Deserialize)]
struct ProcessRequest {
    path: String,
    /// When set, records are appended to the sheet in this folder.
    folder: Option<String>,
}

#[derive(Serialize)]
struct ProcessResponse {
    session_id: String,
    transcript: String,
    records: Vec<extract::Record>,
    rows_saved: usize,
}

#[derive(Deserialize)]
struct SaveRequest {
    records: Vec<extract::Record>,
    folder: String,
}

#[derive(Serialize)]
struct SaveResponse {
    rows_appended: usize,
    output_file: String,
}

#[derive(Serialize)]
struct StatsResponse {
    metrics: metrics::MetricsSnapshot,
    cache: cache::TranscriptCacheStats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::default();

    let speech = transcribe::SpeechClient::new(
        config.speech.base_url.clone(),
        config.speech.model.clone(),
    );

    let extractor = extract::Extractor::with_default_lexicon()
        .expect("Failed to compile extraction pattern");

    let state = Arc::new(AppState {
        cache: Arc::new(TranscriptCache::new(config.cache.max_entries)),
        metrics: Metrics::new(),
        config,
        speech,
        extractor: Arc::new(extractor),
    });

    let app = app(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind port 3000");

    tracing::info!("Family record service listening on http://localhost:3000");

    axum::serve(listener, app).await.expect("Server error");
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/transcribe", post(transcribe_audio))
        .route("/extract", post(extract_records))
        .route("/process", post(process_audio))
        .route("/save", post(save_records))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "family-record-extractor",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let speech_status = match reqwest::get(state.speech.base_url()).await {
        Ok(resp) if resp.status().is_success() => "ok".to_string(),
        Ok(resp) => format!("error: status {}", resp.status()),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        speech_service: speech_status,
    }))
}

async fn transcribe_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscribeRequest>,
) -> Result<Json<TranscribeResponse>, StatusCode> {
    let (transcript, cached) = run_transcription(&state, &req.path).await?;
    state.metrics.record_request(true);

    Ok(Json(TranscribeResponse { transcript, cached }))
}

async fn extract_records(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, StatusCode> {
    let timer = TimedOperation::start();
    let records = state.extractor.extract(&req.text);
    state.metrics.record_extract(timer.elapsed(), records.len());
    state.metrics.record_request(true);

    Ok(Json(ExtractResponse {
        count: records.len(),
        records,
    }))
}

/// Full pipeline: transcribe an audio file, extract records, optionally
/// append them to a sheet. What the original operator did with three
/// buttons, one request.
async fn process_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, StatusCode> {
    let session_id = uuid::Uuid::new_v4().to_string();

    let (transcript, cached) = run_transcription(&state, &req.path).await?;

    let timer = TimedOperation::start();
    let records = state.extractor.extract(&transcript);
    state.metrics.record_extract(timer.elapsed(), records.len());

    tracing::info!(
        session_id = %session_id,
        path = %req.path,
        cached = cached,
        records = records.len(),
        "Processed recording"
    );

    let mut rows_saved = 0;
    if let Some(folder) = &req.folder {
        if records.is_empty() {
            tracing::warn!(session_id = %session_id, "No data to save");
        } else {
            rows_saved = append_to_sheet(&state, folder, &records).await?;
        }
    }

    state.metrics.record_request(true);

    Ok(Json(ProcessResponse {
        session_id,
        transcript,
        records,
        rows_saved,
    }))
}

async fn save_records(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, StatusCode> {
    if req.records.is_empty() {
        tracing::warn!("Rejected save request with no records");
        return Err(StatusCode::BAD_REQUEST);
    }

    let rows_appended = append_to_sheet(&state, &req.folder, &req.records).await?;
    state.metrics.record_request(true);

    let writer = sheet::SheetWriter::new(req.folder);
    Ok(Json(SaveResponse {
        rows_appended,
        output_file: writer.output_path().to_string_lossy().to_string(),
    }))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        metrics: state.metrics.snapshot(),
        cache: state.cache.stats(),
    })
}

/// Transcribe one audio file with cache, retry, and an overall timeout.
/// Returns the transcript and whether it came from the cache.
async fn run_transcription(
    state: &AppState,
    path: &str,
) -> Result<(String, bool), StatusCode> {
    let audio_path = PathBuf::from(path);
    if !audio_path.exists() {
        return Err(StatusCode::NOT_FOUND);
    }

    if state.config.cache.enabled {
        if let Some(transcript) = state.cache.get(path) {
            return Ok((transcript, true));
        }
    }

    let timer = TimedOperation::start();
    let policy = RetryPolicy::from_config(&state.config.retry);
    let deadline = Duration::from_secs(state.config.speech.request_timeout_secs);

    let attempt = tokio::time::timeout(
        deadline,
        policy.run("transcribe", || {
            transcribe::transcribe_file(&state.speech, &audio_path)
        }),
    )
    .await;

    let transcript = match attempt {
        Ok(Ok(transcript)) => transcript,
        Ok(Err(e)) => {
            tracing::error!(path = path, error = %e, "Transcription failed");
            state.metrics.record_request(false);
            return Err(StatusCode::BAD_GATEWAY);
        }
        Err(_) => {
            tracing::error!(path = path, "Transcription timed out");
            state.metrics.record_request(false);
            return Err(StatusCode::GATEWAY_TIMEOUT);
        }
    };

    state.metrics.record_transcribe(timer.elapsed());

    if state.config.cache.enabled {
        state.cache.set(path, transcript.clone());
    }

    Ok((transcript, false))
}

async fn append_to_sheet(
    state: &AppState,
    folder: &str,
    records: &[extract::Record],
) -> Result<usize, StatusCode> {
    let timer = TimedOperation::start();
    let writer = sheet::SheetWriter::new(folder);

    let rows = writer.append_records(records).await.map_err(|e| {
        tracing::error!(folder = folder, error = %e, "Failed to append to sheet");
        state.metrics.record_request(false);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    state.metrics.record_save(timer.elapsed(), rows);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let config = AppConfig::default();
        let speech = transcribe::SpeechClient::new(
            config.speech.base_url.clone(),
            config.speech.model.clone(),
        );
        let extractor = extract::Extractor::with_default_lexicon().unwrap();
        Arc::new(AppState {
            cache: Arc::new(TranscriptCache::new(config.cache.max_entries)),
            metrics: Metrics::new(),
            config,
            speech,
            extractor: Arc::new(extractor),
        })
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_rejects_empty_batch() {
        let app = app(test_state());
        let request = post_json(
            "/save",
            serde_json::json!({ "records": [], "folder": "/tmp/family-out" }),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_endpoint_returns_records() {
        let app = app(test_state());
        let request = post_json("/extract", serde_json::json!({ "text": "गीता देवी सिंह" }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["records"][0]["given_name"], "गीता देवी");
        assert_eq!(parsed["records"][0]["surname"], "सिंह");
    }
}
