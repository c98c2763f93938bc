//! In-memory stand-in for the WebDevPack `/v0/` API.
//!
//! Speaks the same envelope as the hosted service:
//! `{"status":"ok","result":{...}}` on success and
//! `{"status":"error","code":"<kind>:<detail>","message":"..."}` on failure.
//! Uploaded and generated files live in a map keyed by fresh UUIDs.

mod handlers;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, warn};

/// Uploads larger than this are rejected by the extractors.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Server settings.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// When set, every request must carry a matching `WDP-API-Key` header.
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Read `WDP_API_KEY` from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("WDP_API_KEY").ok().filter(|key| !key.is_empty()),
        }
    }
}

pub struct AppState {
    config: ServerConfig,
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl AppState {
    async fn store(&self, contents: Vec<u8>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        debug!(%id, bytes = contents.len(), "stored file");
        self.files.write().await.insert(id.clone(), contents);
        id
    }

    async fn load(&self, id: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(id).cloned()
    }
}

pub type SharedState = Arc<AppState>;

/// Router without API-key enforcement.
pub fn app() -> Router {
    app_with_config(ServerConfig::default())
}

pub fn app_with_config(config: ServerConfig) -> Router {
    let state: SharedState = Arc::new(AppState {
        config,
        files: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/v0/upload", post(handlers::upload))
        .route("/v0/download/{id}", get(handlers::download))
        .route("/v0/text-transform", post(handlers::text_transform))
        .route("/v0/base64-encode-decode", post(handlers::base64_codec))
        .route("/v0/text-hash", post(handlers::text_hash))
        .route("/v0/url-encode-decode", post(handlers::url_codec))
        .route("/v0/json-encode-decode", post(handlers::json_codec))
        .route("/v0/domain-whois", post(handlers::domain_whois))
        .route("/v0/image-optimize", post(handlers::image_optimize))
        .route("/v0/image-convert", post(handlers::image_convert))
        .route("/v0/text-from-image", post(handlers::text_from_image))
        .route("/v0/qrcode", post(handlers::qrcode))
        .route("/v0/barcode", post(handlers::barcode))
        .route("/v0/js-minify-text", post(handlers::minify_text))
        .route("/v0/css-minify-text", post(handlers::minify_text))
        .route("/v0/js-minify-file", post(handlers::minify_file))
        .route("/v0/css-minify-file", post(handlers::minify_file))
        .route("/v0/html-to-pdf", post(handlers::html_to_pdf))
        .route("/v0/html-file-to-pdf", post(handlers::html_file_to_pdf))
        .route("/v0/password", post(handlers::password))
        .route("/v0/keypair", post(handlers::keypair))
        .fallback(unknown_endpoint)
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_config(config)).await
}

async fn require_api_key(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    if let Some(expected) = &state.config.api_key {
        let given = request
            .headers()
            .get("wdp-api-key")
            .and_then(|value| value.to_str().ok());
        if given != Some(expected.as_str()) {
            warn!(path = %request.uri().path(), "rejected request with bad API key");
            return error("invalidApiKey", "Invalid API key").into_response();
        }
    }
    next.run(request).await
}

async fn unknown_endpoint() -> Json<Value> {
    error("notFound", "Unknown endpoint")
}

/// Handler outcome; both arms are envelopes.
pub(crate) type Reply = Result<Json<Value>, Json<Value>>;

pub(crate) fn ok(result: Value) -> Reply {
    Ok(Json(json!({"status": "ok", "result": result})))
}

pub(crate) fn error(code: &str, message: &str) -> Json<Value> {
    Json(json!({"status": "error", "code": code, "message": message}))
}

pub(crate) fn missing(name: &str) -> Json<Value> {
    Json(json!({"status": "error", "code": format!("missingArgument:{name}")}))
}

pub(crate) fn invalid(name: &str) -> Json<Value> {
    Json(json!({"status": "error", "code": format!("invalidArgument:{name}")}))
}

/// Typed access to the fields of a JSON request body.
pub(crate) struct Fields(pub Map<String, Value>);

impl Fields {
    pub fn str(&self, name: &str) -> Result<&str, Json<Value>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(missing(name)),
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(invalid(name)),
        }
    }

    pub fn uint(&self, name: &str) -> Result<u64, Json<Value>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(missing(name)),
            Some(value) => value.as_u64().ok_or_else(|| invalid(name)),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, Json<Value>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(missing(name)),
            Some(value) => value.as_bool().ok_or_else(|| invalid(name)),
        }
    }
}
