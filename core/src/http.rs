//! HTTP request and response types described as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and classifies `HttpResponse`
//! values; a `Transport` sits between the two and performs the actual round
//! trip. Keeping the wire shapes as owned data means tests can inspect every
//! request the client produces and feed it canned responses without a
//! network.

use crate::multipart::Form;

/// HTTP method for a request. The WebDevPack API only uses two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Body of an outgoing call, before it is encoded onto the wire.
///
/// `Json` carries a flat mapping of field names to scalar values.
/// `Multipart` is used exclusively for file uploads.
#[derive(Debug, Clone)]
pub enum RequestPayload {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// The body is kept as raw bytes because downloads are binary.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Render the status line and headers the way they appeared on the wire.
    pub fn header_text(&self) -> String {
        let mut text = format!("HTTP/1.1 {}\r\n", self.status);
        for (name, value) in &self.headers {
            text.push_str(name);
            text.push_str(": ");
            text.push_str(value);
            text.push_str("\r\n");
        }
        text
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            url: "https://api.webdevpack.com/v0/qrcode".to_string(),
            headers: vec![("WDP-API-Key".to_string(), "secret".to_string())],
            body: None,
        };
        assert_eq!(req.header("wdp-api-key"), Some("secret"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn header_text_includes_status_and_headers() {
        let response = HttpResponse {
            status: 502,
            headers: vec![
                ("content-type".to_string(), "text/html".to_string()),
                ("server".to_string(), "nginx".to_string()),
            ],
            body: b"<html>Bad Gateway</html>".to_vec(),
        };
        assert_eq!(
            response.header_text(),
            "HTTP/1.1 502\r\ncontent-type: text/html\r\nserver: nginx\r\n"
        );
        assert_eq!(response.body_text(), "<html>Bad Gateway</html>");
    }
}
