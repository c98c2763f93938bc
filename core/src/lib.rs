//! Synchronous client for the WebDevPack API.
//!
//! # Overview
//! WebDevPack hosts a set of small utilities (image optimization and
//! conversion, OCR, QR codes and barcodes, text transforms and hashing,
//! JS/CSS minification, HTML to PDF, password and key pair generation,
//! whois). All of the work happens server-side; this crate builds requests,
//! uploads and downloads files, and turns the response envelope into typed
//! results and errors.
//!
//! # Design
//! - `WebDevPackClient` holds only an immutable `ClientConfig` and a
//!   `Transport`; every operation is independent.
//! - Requests are built as plain `HttpRequest` data and executed by the
//!   transport (`UreqTransport` by default), so tests can swap in canned
//!   responses.
//! - The envelope is classified in one place (`envelope::classify`); the
//!   error code is parsed once into an `ErrorCode`.
//! - Local paths are validated before any network call.
//!
//! ```no_run
//! use webdevpack_core::{ClientConfig, TextTransform, WebDevPackClient};
//!
//! let client = WebDevPackClient::new(ClientConfig::new().with_api_key("my-key"));
//! let shout = client.transform_text("abc", TextTransform::Uppercase)?;
//! assert_eq!(shout, "ABC");
//! client.optimize_image("photo.png", "out/photo.png", 80)?;
//! # Ok::<(), webdevpack_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod files;
pub mod http;
pub mod multipart;
pub mod operations;
pub mod transport;
pub mod types;

pub use client::{Reply, WebDevPackClient, API_KEY_HEADER};
pub use config::ClientConfig;
pub use envelope::{Envelope, ErrorCode};
pub use error::{ApiError, ArgumentErrorKind, ErrorKind, LocalFileReason, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestPayload};
pub use operations::DEFAULT_OCR_LANGUAGE;
pub use transport::{Transport, UreqTransport};
pub use types::{FileReference, HashAlgorithm, KeyPair, PasswordOptions, TextTransform};
