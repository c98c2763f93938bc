//! Request payloads and result shapes for the `/v0/` endpoints.
//!
//! Request structs borrow their inputs and serialize straight to the flat
//! JSON objects the API expects. Result structs deserialize only the fields
//! each endpoint is documented to return.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an uploaded or generated file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileReference(String);

impl FileReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case transform applied by `/v0/text-transform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    Uppercase,
    Lowercase,
}

/// Digest algorithms accepted by `/v0/text-hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "crc32")]
    Crc32,
    #[serde(rename = "sha-1")]
    Sha1,
    #[serde(rename = "sha-256")]
    Sha256,
    #[serde(rename = "sha-512")]
    Sha512,
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-512")]
    Sha3_512,
}

/// Direction for the encode/decode endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Codec {
    Encode,
    Decode,
}

/// Character classes for `/v0/password`. Lowercase letters are always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordOptions {
    pub length: u32,
    #[serde(rename = "uppercase")]
    pub include_uppercase: bool,
    #[serde(rename = "symbols")]
    pub include_symbols: bool,
    #[serde(rename = "numbers")]
    pub include_numbers: bool,
}

impl PasswordOptions {
    /// All character classes enabled.
    pub fn new(length: u32) -> Self {
        Self {
            length,
            include_uppercase: true,
            include_symbols: true,
            include_numbers: true,
        }
    }
}

/// PEM-encoded key pair returned by `/v0/keypair`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub private_key: String,
    pub public_key: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextRequest<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Codec>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransformRequest<'a> {
    pub text: &'a str,
    pub transform: TextTransform,
}

#[derive(Debug, Serialize)]
pub(crate) struct HashRequest<'a> {
    pub text: &'a str,
    pub algorithm: HashAlgorithm,
}

#[derive(Debug, Serialize)]
pub(crate) struct WhoisRequest<'a> {
    pub domain: &'a str,
}

/// Processing request for a previously uploaded file.
#[derive(Debug, Serialize)]
pub(crate) struct FileRequest<'a> {
    pub file: &'a FileReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
}

impl<'a> FileRequest<'a> {
    pub fn new(file: &'a FileReference) -> Self {
        Self {
            file,
            format: None,
            quality: None,
            language: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QrCodeRequest<'a> {
    pub text: &'a str,
    pub size: u32,
    pub format: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct BarcodeRequest<'a> {
    pub text: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct HtmlRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeyPairRequest {
    pub bits: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextResult {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileResult {
    pub file: FileReference,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WhoisResult {
    pub raw: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PasswordResult {
    pub password: String,
}
