//! Request building, transport and envelope handling for the WebDevPack API.
//!
//! # Design
//! `WebDevPackClient` holds an immutable `ClientConfig` and a `Transport`.
//! Each call is split the same way: `build_request` produces a plain-data
//! `HttpRequest`, the transport executes it, and the response is either
//! returned raw (GET downloads) or classified through the envelope. No state
//! survives between calls, so a client can be shared freely when its
//! transport can.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::config::ClientConfig;
use crate::envelope::{self, Envelope};
use crate::error::{ApiError, Result};
use crate::files;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestPayload};
use crate::multipart::Form;
use crate::transport::{Transport, UreqTransport};
use crate::types::FileReference;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "WDP-API-Key";

pub(crate) const UPLOAD_PATH: &str = "/v0/upload";
pub(crate) const DOWNLOAD_PATH: &str = "/v0/download/";

/// Outcome of `send_request`.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A POST answered with an `ok` envelope.
    Envelope(Envelope),
    /// A GET, returned verbatim.
    Raw(HttpResponse),
}

/// Synchronous client for the WebDevPack API.
#[derive(Debug, Clone)]
pub struct WebDevPackClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl WebDevPackClient {
    /// Client over the default blocking HTTP transport.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { config, transport }
    }
}

impl Default for WebDevPackClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> WebDevPackClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe the HTTP request for `path` without sending it.
    pub fn build_request(
        &self,
        path: &str,
        payload: RequestPayload,
        method: HttpMethod,
    ) -> Result<HttpRequest> {
        let mut headers = Vec::with_capacity(2);
        if let Some(api_key) = &self.config.api_key {
            headers.push((API_KEY_HEADER.to_string(), api_key.clone()));
        }

        let body = match payload {
            RequestPayload::Empty => None,
            RequestPayload::Json(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(serde_json::to_vec(&value)?)
            }
            RequestPayload::Multipart(form) => {
                let (content_type, body) = form.into_body();
                headers.push(("Content-Type".to_string(), content_type));
                Some(body)
            }
        };

        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.config.normalized_base_url()),
            headers,
            body,
        })
    }

    /// Execute one request. GET responses come back raw; everything else is
    /// classified through the response envelope.
    pub fn send_request(
        &self,
        path: &str,
        payload: RequestPayload,
        method: HttpMethod,
    ) -> Result<Reply> {
        let request = self.build_request(path, payload, method)?;
        trace!(method = method.as_str(), path, "sending request");

        let response = self.transport.execute(&request).map_err(|err| {
            trace!(path, error = %err, "transport failed");
            ApiError::from(err)
        })?;
        trace!(path, status = response.status, bytes = response.body.len(), "response received");

        if method == HttpMethod::Get {
            return Ok(Reply::Raw(response));
        }

        envelope::classify(response)
            .map(Reply::Envelope)
            .inspect_err(|err| trace!(path, kind = ?err.kind(), "request rejected"))
    }

    /// POST `payload` as JSON and return the `ok` envelope.
    pub fn post_json<P: Serialize + ?Sized>(&self, path: &str, payload: &P) -> Result<Envelope> {
        let payload = RequestPayload::Json(serde_json::to_value(payload)?);
        expect_envelope(self.send_request(path, payload, HttpMethod::Post)?)
    }

    /// GET `path` and return the body untouched.
    pub fn get_raw(&self, path: &str) -> Result<Vec<u8>> {
        match self.send_request(path, RequestPayload::Empty, HttpMethod::Get)? {
            Reply::Raw(response) => Ok(response.body),
            Reply::Envelope(envelope) => Err(ApiError::unknown(envelope.response())),
        }
    }

    /// Upload a local file and return the server's reference to it.
    pub fn upload_file(&self, source: impl AsRef<Path>) -> Result<FileReference> {
        let source = source.as_ref();
        files::check_source(source)?;
        self.upload_source(source)
    }

    /// Download `reference` into `target`, creating parent directories.
    ///
    /// An empty body is an error and leaves `target` untouched.
    pub fn download_file(&self, reference: &FileReference, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        files::check_target(target)?;
        self.download_into(reference, target)
    }

    /// Upload without the source checks; the caller has already run them.
    pub(crate) fn upload_source(&self, source: &Path) -> Result<FileReference> {
        let contents = files::read_source(source)?;
        let filename = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let form = Form::new().file("file", filename, contents);
        let reply = self.send_request(UPLOAD_PATH, RequestPayload::Multipart(form), HttpMethod::Post)?;
        let envelope = expect_envelope(reply)?;

        // The reference normally sits in `result`, older deployments put it
        // at the top level.
        envelope
            .result_value()
            .and_then(|result| result.get("file"))
            .or_else(|| envelope.fields().get("file"))
            .and_then(Value::as_str)
            .map(FileReference::new)
            .ok_or_else(|| ApiError::unknown(envelope.response()))
    }

    /// Download without the target checks; the caller has already run them.
    pub(crate) fn download_into(&self, reference: &FileReference, target: &Path) -> Result<()> {
        let body = self.get_raw(&format!("{DOWNLOAD_PATH}{reference}"))?;
        if body.is_empty() {
            return Err(ApiError::Download {
                reference: reference.to_string(),
            });
        }
        files::write_target(target, &body)
    }
}

fn expect_envelope(reply: Reply) -> Result<Envelope> {
    match reply {
        Reply::Envelope(envelope) => Ok(envelope),
        Reply::Raw(response) => Err(ApiError::unknown(&response)),
    }
}
