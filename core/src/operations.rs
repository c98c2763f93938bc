//! The endpoint catalog.
//!
//! Every operation is a short composition of `post_json`, an upload and a
//! download against one fixed `/v0/` path. Paths are checked locally
//! before the first round trip: source first, then target.

use std::path::Path;

use serde::Serialize;

use crate::client::WebDevPackClient;
use crate::error::Result;
use crate::files;
use crate::transport::Transport;
use crate::types::{
    BarcodeRequest, Codec, FileRequest, FileResult, HashAlgorithm, HashRequest, HtmlRequest, KeyPair,
    KeyPairRequest, PasswordOptions, PasswordResult, QrCodeRequest, TextRequest, TextResult,
    TextTransform, TransformRequest, WhoisRequest, WhoisResult,
};

/// OCR language used when the caller has no preference.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

impl<T: Transport> WebDevPackClient<T> {
    /// Apply an upper- or lowercase transform to `text`.
    pub fn transform_text(&self, text: &str, transform: TextTransform) -> Result<String> {
        self.text_result("/v0/text-transform", &TransformRequest { text, transform })
    }

    pub fn base64_encode(&self, text: &str) -> Result<String> {
        self.codec("/v0/base64-encode-decode", text, Codec::Encode)
    }

    pub fn base64_decode(&self, text: &str) -> Result<String> {
        self.codec("/v0/base64-encode-decode", text, Codec::Decode)
    }

    /// Hex digest of `text`.
    pub fn hash_text(&self, text: &str, algorithm: HashAlgorithm) -> Result<String> {
        self.text_result("/v0/text-hash", &HashRequest { text, algorithm })
    }

    pub fn encode_url(&self, url: &str) -> Result<String> {
        self.codec("/v0/url-encode-decode", url, Codec::Encode)
    }

    pub fn decode_url(&self, url: &str) -> Result<String> {
        self.codec("/v0/url-encode-decode", url, Codec::Decode)
    }

    /// Raw whois record for `domain`.
    pub fn domain_whois(&self, domain: &str) -> Result<String> {
        let result: WhoisResult = self.post_json("/v0/domain-whois", &WhoisRequest { domain })?.result()?;
        Ok(result.raw)
    }

    /// Recompress an image. `quality` is a percentage, 100 keeps it lossless.
    pub fn optimize_image(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        quality: u8,
    ) -> Result<()> {
        self.process_file(source.as_ref(), target.as_ref(), "/v0/image-optimize", None, Some(quality))
    }

    /// Convert an image to `format` (`png`, `jpg`, `webp`, ...).
    pub fn convert_image(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        format: &str,
        quality: u8,
    ) -> Result<()> {
        self.process_file(source.as_ref(), target.as_ref(), "/v0/image-convert", Some(format), Some(quality))
    }

    /// Run OCR on an image. `language` is a Tesseract code such as `eng`,
    /// `deu` or `chi_sim`; see `DEFAULT_OCR_LANGUAGE`.
    pub fn text_from_image(&self, source: impl AsRef<Path>, language: &str) -> Result<String> {
        let file = self.upload_file(source)?;
        let request = FileRequest {
            language: Some(language),
            ..FileRequest::new(&file)
        };
        self.text_result("/v0/text-from-image", &request)
    }

    pub fn generate_qr_code(
        &self,
        text: &str,
        target: impl AsRef<Path>,
        size: u32,
        format: &str,
    ) -> Result<()> {
        self.render_file(target.as_ref(), "/v0/qrcode", &QrCodeRequest { text, size, format })
    }

    pub fn generate_barcode(
        &self,
        text: &str,
        target: impl AsRef<Path>,
        width: u32,
        height: u32,
        format: &str,
    ) -> Result<()> {
        let request = BarcodeRequest {
            text,
            width,
            height,
            format,
        };
        self.render_file(target.as_ref(), "/v0/barcode", &request)
    }

    pub fn minify_javascript(&self, code: &str) -> Result<String> {
        self.text_result("/v0/js-minify-text", &TextRequest { text: code, transform: None })
    }

    pub fn minify_javascript_file(&self, source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<()> {
        self.process_file(source.as_ref(), target.as_ref(), "/v0/js-minify-file", None, None)
    }

    pub fn minify_css(&self, code: &str) -> Result<String> {
        self.text_result("/v0/css-minify-text", &TextRequest { text: code, transform: None })
    }

    pub fn minify_css_file(&self, source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<()> {
        self.process_file(source.as_ref(), target.as_ref(), "/v0/css-minify-file", None, None)
    }

    /// Encode `text` as a JSON string literal.
    pub fn encode_json(&self, text: &str) -> Result<String> {
        self.codec("/v0/json-encode-decode", text, Codec::Encode)
    }

    /// Decode a JSON string literal back to text.
    pub fn decode_json(&self, text: &str) -> Result<String> {
        self.codec("/v0/json-encode-decode", text, Codec::Decode)
    }

    pub fn generate_password(&self, options: &PasswordOptions) -> Result<String> {
        let result: PasswordResult = self.post_json("/v0/password", options)?.result()?;
        Ok(result.password)
    }

    /// Generate an RSA key pair of `bits` length.
    pub fn generate_key_pair(&self, bits: u32) -> Result<KeyPair> {
        self.post_json("/v0/keypair", &KeyPairRequest { bits })?.result()
    }

    pub fn convert_html_to_pdf(&self, html: &str, target: impl AsRef<Path>) -> Result<()> {
        self.render_file(target.as_ref(), "/v0/html-to-pdf", &HtmlRequest { text: html })
    }

    pub fn convert_html_file_to_pdf(&self, source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<()> {
        self.process_file(source.as_ref(), target.as_ref(), "/v0/html-file-to-pdf", None, None)
    }

    fn text_result<P: Serialize>(&self, path: &str, payload: &P) -> Result<String> {
        let result: TextResult = self.post_json(path, payload)?.result()?;
        Ok(result.text)
    }

    fn codec(&self, path: &str, text: &str, direction: Codec) -> Result<String> {
        let request = TextRequest {
            text,
            transform: Some(direction),
        };
        self.text_result(path, &request)
    }

    /// Text in, file out: POST, then download `result.file` into `target`.
    fn render_file<P: Serialize>(&self, target: &Path, path: &str, payload: &P) -> Result<()> {
        files::check_target(target)?;
        let result: FileResult = self.post_json(path, payload)?.result()?;
        self.download_into(&result.file, target)
    }

    /// File in, file out: upload `source`, process it, download the output.
    fn process_file(
        &self,
        source: &Path,
        target: &Path,
        path: &str,
        format: Option<&str>,
        quality: Option<u8>,
    ) -> Result<()> {
        files::check_source(source)?;
        files::check_target(target)?;
        let file = self.upload_source(source)?;
        let request = FileRequest {
            format,
            quality,
            ..FileRequest::new(&file)
        };
        let result: FileResult = self.post_json(path, &request)?.result()?;
        self.download_into(&result.file, target)
    }
}
