//! Axum-based API Gateway: HTTP entry point for the legal-assistance service.
//! Config-driven via CoreConfig; the knowledge pack is loaded once at startup.

use axum::http::{Method, StatusCode};
use axum::{
    extract::{Json, Path, State},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Router,
};
use nyaya_core::{
    CoreConfig, Goal, KnowledgeBase, Language, Orchestrator, SessionContext, SkillRegistry,
};
use nyaya_skills::{ExpertAdvisor, LocalSummary, SummaryMode, SummaryRouter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::field::Visit;
use tracing_subscriber::layer::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shortest pasted document the summarizer will accept. Anything shorter is
/// almost always a question, which belongs on /api/v1/ask instead.
const MIN_DOCUMENT_TEXT_LEN: usize = 40;

/// Captures the "message" field from a tracing event.
struct MessageCollector<'a>(&'a mut String);

impl Visit for MessageCollector<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            *self.0 = value.to_string();
        }
    }
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

/// Sends each tracing event as a line to a broadcast channel for SSE log streaming.
#[derive(Clone)]
struct LogBroadcastLayer {
    tx: broadcast::Sender<String>,
}

impl LogBroadcastLayer {
    fn new(tx: broadcast::Sender<String>) -> Self {
        Self { tx }
    }
}

impl<S> tracing_subscriber::Layer<S> for LogBroadcastLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageCollector(&mut message));
        let line = format!(
            "{} [{}] {}",
            event.metadata().level(),
            event.metadata().target(),
            message
        );
        let _ = self.tx.send(line);
    }
}

/// Pre-flight check: verify the knowledge pack loads and the port is free.
fn run_verify() -> Result<(), String> {
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;

    print!("Checking knowledge pack... ");
    let knowledge = KnowledgeBase::load(config.knowledge_path.as_deref())
        .map_err(|e| format!("Knowledge pack rejected: {}", e))?;
    let statuses = knowledge.status();
    for status in &statuses {
        // The responder is total; an empty answer here means a broken pack.
        let probe = knowledge.expert_response("aadhaar", &status.code);
        if probe.content.trim().is_empty() {
            return Err(format!("{} pack returned an empty answer", status.code));
        }
    }
    let counts: Vec<String> = statuses
        .iter()
        .map(|s| format!("{} {} topics", s.code, s.topic_count))
        .collect();
    println!("OK ({})", counts.join(", "));

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\n✅ SUCCESS: All systems GO. Ready to start gateway.");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!(
            "[nyaya-gateway] .env not loaded: {} (using system environment)",
            e
        );
    }

    // Handle --verify flag for pre-flight check
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("❌ PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    let (log_tx, _) = broadcast::channel(1000);
    let log_layer = LogBroadcastLayer::new(log_tx.clone());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(log_layer)
        .init();

    let config = Arc::new(CoreConfig::load().expect("load CoreConfig"));
    let knowledge = Arc::new(
        KnowledgeBase::load(config.knowledge_path.as_deref()).expect("load knowledge pack"),
    );
    for status in knowledge.status() {
        tracing::info!(
            target: "nyaya::knowledge",
            lang = %status.code,
            topics = status.topic_count,
            "Knowledge pack ready"
        );
    }

    let summary_mode = SummaryMode::from_tag(&config.summary_mode);
    let mut registry = SkillRegistry::new();
    registry.register(Arc::new(ExpertAdvisor::new(Arc::clone(&knowledge))));
    registry.register(Arc::new(LocalSummary::new()));
    registry.register(Arc::new(SummaryRouter::with_mode(summary_mode)));
    let orchestrator = Arc::new(Orchestrator::new(Arc::new(registry)));

    let app = build_app(AppState {
        config: Arc::clone(&config),
        orchestrator,
        knowledge,
        log_tx,
    });

    let port = config.port;
    let app_name = config.app_name.clone();
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("{} listening on {}", app_name, addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

fn build_app(state: AppState) -> Router {
    // CORS: allow Backend/API (8001-8099) and Frontend/UI (3001-3099) port ranges.
    // NOTE: SSE streaming often triggers additional browser-managed headers
    // (e.g., Accept, Cache-Control, Pragma). If we only allow CONTENT_TYPE,
    // fetch() may fail before the request reaches the handler.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &axum::http::HeaderValue, _| {
                let s = origin.to_str().unwrap_or("");
                let port = s
                    .split(':')
                    .last()
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or(0);
                (3001..=3099).contains(&port) || (8001..=8099).contains(&port)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers(tower_http::cors::Any)
        .expose_headers(tower_http::cors::Any);

    Router::new()
        .route("/v1/status", get(status))
        .route("/v1/execute", post(execute))
        .route("/api/v1/health", get(health))
        .route("/api/v1/logs", get(logs_stream))
        .route("/api/v1/knowledge-status", get(knowledge_status))
        .route("/api/v1/topics/:lang", get(topics))
        .route("/api/v1/ask", post(ask))
        .route("/api/v1/summarize", post(summarize))
        .with_state(state)
        .layer(cors)
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) orchestrator: Arc<Orchestrator>,
    pub(crate) knowledge: Arc<KnowledgeBase>,
    pub(crate) log_tx: broadcast::Sender<String>,
}

/// Session context for the browser-facing routes. Correlation ids let the
/// SSE log stream be matched to a request.
fn web_ctx(session_id: Option<String>, lang: Option<String>, default_lang: &str) -> SessionContext {
    SessionContext {
        session_id: session_id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "web".to_string()),
        correlation_id: Some(uuid::Uuid::new_v4().to_string()),
        lang: lang
            .filter(|s| !s.is_empty())
            .or_else(|| Some(default_lang.to_string())),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "status": "error", "message": message })),
    )
        .into_response()
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/v1/knowledge-status – per-language topic pack status.
async fn knowledge_status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let statuses = state.knowledge.status();
    let total_topics: usize = statuses.iter().map(|s| s.topic_count).sum();
    axum::Json(serde_json::json!({
        "status": "ok",
        "total_topics": total_topics,
        "languages": statuses
    }))
}

/// GET /api/v1/logs – Server-Sent Events stream of gateway logs (tracing output).
async fn logs_stream(
    State(state): State<AppState>,
) -> Sse<impl futures_util::Stream<Item = Result<Event, std::convert::Infallible>> + Send + 'static>
{
    use async_stream::stream;
    let mut rx = state.log_tx.subscribe();
    let stream = stream! {
        loop {
            tokio::select! {
                r = rx.recv() => match r {
                    Ok(line) => yield Ok(Event::default().data(line)),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        yield Ok(Event::default().data(format!("... {} log lines dropped", n)));
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = tokio::time::sleep(Duration::from_secs(15)) => {
                    yield Ok(Event::default().comment("keepalive"));
                }
            }
        }
    };
    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    )
}

/// GET /v1/status – app identity, configured modes, and pack sizes.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let languages: Vec<serde_json::Value> = state
        .knowledge
        .status()
        .iter()
        .map(|s| serde_json::json!({ "code": s.code, "topics": s.topic_count }))
        .collect();
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "summary_mode": state.config.summary_mode,
        "default_lang": state.config.default_lang,
        "skills": state.orchestrator.skill_names(),
        "languages": languages,
    }))
}

/// GET /api/v1/topics/:lang – topic directory for one language.
async fn topics(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> axum::Json<serde_json::Value> {
    let lang = Language::from_tag(&lang);
    let pack = state.knowledge.pack(lang);
    let topics: Vec<serde_json::Value> = pack
        .topics
        .iter()
        .map(|t| {
            serde_json::json!({
                "id": t.id,
                "title": t.title,
                "keywords": t.keywords
            })
        })
        .collect();
    axum::Json(serde_json::json!({
        "lang": lang.code(),
        "count": topics.len(),
        "topics": topics
    }))
}

#[derive(serde::Deserialize)]
struct AskRequest {
    query: String,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

/// POST /api/v1/ask – expert answer for a free-text question. The responder
/// is total (every query gets a topic or the language fallback), so a
/// non-200 here means the skill registry itself is broken.
async fn ask(State(state): State<AppState>, Json(req): Json<AskRequest>) -> Response {
    let ctx = web_ctx(req.session_id, req.lang.clone(), &state.config.default_lang);
    let goal = Goal::AskExpert {
        query: req.query,
        lang: req.lang,
    };
    match state.orchestrator.dispatch(&ctx, goal).await {
        Ok(result) => axum::Json(result).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

/// Request shape mirrors the remote analysis wire format, so browser clients
/// can reuse one payload for either path.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummarizeRequest {
    #[serde(default)]
    document_type: Option<String>,
    #[serde(default)]
    document_text: Option<String>,
    #[serde(default)]
    image_base64: Option<String>,
    #[serde(default)]
    image_mime_type: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

/// POST /api/v1/summarize – analyze pasted text or an uploaded document photo.
/// PDFs are rejected up front; image payloads are routed to the SummaryRouter
/// skill, plain text goes through the SummarizeDocument goal. A failing skill
/// surfaces as 502 with the failure message; there is no retry.
async fn summarize(State(state): State<AppState>, Json(req): Json<SummarizeRequest>) -> Response {
    if let Some(mime) = req.image_mime_type.as_deref() {
        if mime == "application/pdf" {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "PDF text extraction is not supported; paste the document text instead",
            );
        }
        if !mime.starts_with("image/") {
            return error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                &format!(
                    "unsupported file type: {}; upload a document photo or paste text",
                    mime
                ),
            );
        }
    }

    let has_image = req
        .image_base64
        .as_deref()
        .map(|s| !s.is_empty())
        .unwrap_or(false)
        && req.image_mime_type.is_some();
    let text_len = req
        .document_text
        .as_deref()
        .map(|s| s.trim().chars().count())
        .unwrap_or(0);

    if !has_image && text_len == 0 {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "nothing to analyze; paste the document text or attach a document photo",
        );
    }
    if !has_image && text_len < MIN_DOCUMENT_TEXT_LEN {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            &format!(
                "document text is too short to analyze; paste at least {} characters",
                MIN_DOCUMENT_TEXT_LEN
            ),
        );
    }

    let ctx = web_ctx(req.session_id, req.lang.clone(), &state.config.default_lang);
    let goal = if has_image {
        Goal::ExecuteSkill {
            name: "SummaryRouter".to_string(),
            payload: Some(serde_json::json!({
                "document_type": req.document_type,
                "document_text": req.document_text,
                "image_base64": req.image_base64,
                "image_mime_type": req.image_mime_type,
                "lang": req.lang,
            })),
        }
    } else {
        Goal::SummarizeDocument {
            document_text: req.document_text.unwrap_or_default(),
            lang: req.lang,
        }
    };

    match state.orchestrator.dispatch(&ctx, goal).await {
        Ok(result) => axum::Json(result).into_response(),
        Err(e) => error_response(StatusCode::BAD_GATEWAY, &e.to_string()),
    }
}

#[derive(serde::Deserialize)]
struct ExecuteRequest {
    session_id: String,
    correlation_id: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    goal: Goal,
}

/// POST /v1/execute – raw goal dispatch for scripts and integrations.
async fn execute(
    State(state): State<AppState>,
    Json(req): Json<ExecuteRequest>,
) -> axum::Json<serde_json::Value> {
    tracing::info!("Skill execution started");
    let ctx = SessionContext {
        session_id: req.session_id,
        correlation_id: req.correlation_id,
        lang: req.lang,
    };
    match state.orchestrator.dispatch(&ctx, req.goal).await {
        Ok(result) => axum::Json(result),
        Err(e) => axum::Json(serde_json::json!({
            "error": e.to_string(),
            "status": "error"
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_log_tx() -> broadcast::Sender<String> {
        let (tx, _) = broadcast::channel(1);
        tx
    }

    fn test_config() -> CoreConfig {
        CoreConfig {
            app_name: "Test Gateway".to_string(),
            port: 8001,
            knowledge_path: None,
            summary_mode: "local".to_string(),
            default_lang: "en".to_string(),
        }
    }

    fn test_state() -> AppState {
        let knowledge = Arc::new(KnowledgeBase::builtin().unwrap());
        let mut registry = SkillRegistry::new();
        registry.register(Arc::new(ExpertAdvisor::new(Arc::clone(&knowledge))));
        registry.register(Arc::new(LocalSummary::new()));
        registry.register(Arc::new(SummaryRouter::with_mode(SummaryMode::Local)));
        AppState {
            config: Arc::new(test_config()),
            orchestrator: Arc::new(Orchestrator::new(Arc::new(registry))),
            knowledge,
            log_tx: test_log_tx(),
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json(build_app(test_state()), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_reports_identity_and_packs() {
        let (status, json) = get_json(build_app(test_state()), "/v1/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["app_name"], "Test Gateway");
        assert_eq!(json["port"], 8001);
        assert_eq!(json["summary_mode"], "local");
        assert_eq!(json["default_lang"], "en");
        assert_eq!(json["languages"].as_array().unwrap().len(), 2);
        let skills: Vec<&str> = json["skills"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(skills.contains(&"ExpertAdvisor"));
        assert!(skills.contains(&"SummaryRouter"));
    }

    #[tokio::test]
    async fn test_knowledge_status_counts_both_packs() {
        let (status, json) = get_json(build_app(test_state()), "/api/v1/knowledge-status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        let languages = json["languages"].as_array().unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0]["code"], "en");
        assert_eq!(languages[1]["code"], "hi");
        let total: u64 = json["total_topics"].as_u64().unwrap();
        assert_eq!(
            total,
            languages
                .iter()
                .map(|l| l["topic_count"].as_u64().unwrap())
                .sum::<u64>()
        );
    }

    #[tokio::test]
    async fn test_topics_directory_resolves_full_language_tags() {
        let (status, json) = get_json(build_app(test_state()), "/api/v1/topics/hi-IN").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["lang"], "hi");
        assert!(json["count"].as_u64().unwrap() >= 10);
        assert_eq!(json["topics"][0]["id"], "aadhaar-lost");
        assert!(json["topics"][0]["keywords"].as_array().unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_ask_matches_lost_aadhaar() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/ask",
            serde_json::json!({ "query": "I lost my aadhaar card" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["matched"], true);
        assert_eq!(json["topic"]["id"], "aadhaar-lost");
        assert_eq!(json["lang"], "en");
    }

    #[tokio::test]
    async fn test_ask_unmatched_query_still_succeeds_with_fallback() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/ask",
            serde_json::json!({ "query": "what is the weather today" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["matched"], false);
        assert_eq!(json["topic"]["id"], "fallback");
        assert!(!json["topic"]["content"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ask_hindi_tag_selects_hindi_pack() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/ask",
            serde_json::json!({ "query": "मेरा आधार खो गया", "lang": "hi-IN" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["lang"], "hi");
        assert_eq!(json["topic"]["id"], "aadhaar-lost");
        assert!(json["topic"]["content"].as_str().unwrap().contains("आधार"));
    }

    #[tokio::test]
    async fn test_summarize_sale_deed_text() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/summarize",
            serde_json::json!({
                "documentText": "SALE DEED executed on 12 March 2024 for the agricultural land in village Rampur, khasra number 142",
                "lang": "en"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["mode"], "local");
        let summary = json["data"]["summary"].as_str().unwrap();
        assert!(summary.starts_with("This document appears to be a sale deed"));
        assert!(json["data"]["keyPoints"].as_array().unwrap().len() >= 3);
    }

    #[tokio::test]
    async fn test_summarize_rejects_pdf_uploads() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/summarize",
            serde_json::json!({
                "imageBase64": "JVBERi0xLjQ=",
                "imageMimeType": "application/pdf"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["status"], "error");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("paste the document text"));
    }

    #[tokio::test]
    async fn test_summarize_rejects_non_image_files() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/summarize",
            serde_json::json!({
                "imageBase64": "aGVsbG8=",
                "imageMimeType": "text/plain"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(json["message"].as_str().unwrap().contains("text/plain"));
    }

    #[tokio::test]
    async fn test_summarize_rejects_short_text() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/summarize",
            serde_json::json!({ "documentText": "too short" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["message"].as_str().unwrap().contains("too short"));
    }

    #[tokio::test]
    async fn test_summarize_rejects_empty_requests() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/summarize",
            serde_json::json!({}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["message"].as_str().unwrap().contains("nothing to analyze"));
    }

    #[tokio::test]
    async fn test_summarize_image_without_remote_service_is_bad_gateway() {
        // Local mode cannot read images; the skill failure surfaces as 502
        // with its message, and the request is not retried.
        let (status, json) = post_json(
            build_app(test_state()),
            "/api/v1/summarize",
            serde_json::json!({
                "imageBase64": "aGVsbG8=",
                "imageMimeType": "image/png"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["status"], "error");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("paste the document text"));
    }

    #[tokio::test]
    async fn test_execute_expert_advisor_by_name() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/v1/execute",
            serde_json::json!({
                "session_id": "test-session",
                "goal": {
                    "ExecuteSkill": {
                        "name": "ExpertAdvisor",
                        "payload": { "query": "where do I get a pan card" }
                    }
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["skill"], "ExpertAdvisor");
        assert_eq!(json["topic"]["id"], "pan-card");
    }

    #[tokio::test]
    async fn test_execute_summarize_document_goal() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/v1/execute",
            serde_json::json!({
                "session_id": "test-session",
                "goal": {
                    "SummarizeDocument": {
                        "document_text": "court summons issued for the hearing",
                        "lang": "en"
                    }
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["mode"], "local");
        assert!(json["data"]["summary"]
            .as_str()
            .unwrap()
            .starts_with("This document appears to be a court order"));
    }

    #[tokio::test]
    async fn test_execute_unknown_skill_returns_error_envelope() {
        let (status, json) = post_json(
            build_app(test_state()),
            "/v1/execute",
            serde_json::json!({
                "session_id": "test-session",
                "goal": { "ExecuteSkill": { "name": "NoSuchSkill", "payload": null } }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "error");
        assert!(json["error"].as_str().unwrap().contains("NoSuchSkill"));
    }
}
