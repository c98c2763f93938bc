//! Multipart form encoding for file uploads.
//!
//! The upload endpoint accepts a single `file` part.

use uuid::Uuid;

/// A single part in a multipart form.
#[derive(Debug, Clone)]
struct Part {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Part {
    /// Create a file part. The content type is guessed from the extension.
    fn file(name: impl Into<String>, filename: impl Into<String>, data: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename);
        Self {
            name: name.into(),
            filename: Some(filename),
            content_type: Some(content_type.to_string()),
            data,
        }
    }
}

fn guess_content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// A multipart/form-data body under construction.
#[derive(Debug, Clone)]
pub struct Form {
    parts: Vec<Part>,
    boundary: String,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Create an empty form with a random boundary.
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            boundary: format!("webdevpack-{}", Uuid::new_v4().simple()),
        }
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, filename: impl Into<String>, data: Vec<u8>) -> Self {
        self.parts.push(Part::file(name, filename, data));
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the `Content-Type` header of this form.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode the form into `(content type, body bytes)`.
    pub fn into_body(self) -> (String, Vec<u8>) {
        let content_type = self.content_type();
        let body = self.encode();
        (content_type, body)
    }

    fn encode(&self) -> Vec<u8> {
        let payload: usize = self.parts.iter().map(|part| part.data.len() + 128).sum();
        let mut buf = Vec::with_capacity(payload + self.boundary.len() + 8);

        for part in &self.parts {
            buf.extend_from_slice(b"--");
            buf.extend_from_slice(self.boundary.as_bytes());
            buf.extend_from_slice(b"\r\n");

            buf.extend_from_slice(b"Content-Disposition: form-data; name=\"");
            buf.extend_from_slice(escape_quoted(&part.name).as_bytes());
            buf.extend_from_slice(b"\"");
            if let Some(filename) = &part.filename {
                buf.extend_from_slice(b"; filename=\"");
                buf.extend_from_slice(escape_quoted(filename).as_bytes());
                buf.extend_from_slice(b"\"");
            }
            buf.extend_from_slice(b"\r\n");

            if let Some(content_type) = &part.content_type {
                buf.extend_from_slice(b"Content-Type: ");
                buf.extend_from_slice(content_type.as_bytes());
                buf.extend_from_slice(b"\r\n");
            }

            buf.extend_from_slice(b"\r\n");
            buf.extend_from_slice(&part.data);
            buf.extend_from_slice(b"\r\n");
        }

        buf.extend_from_slice(b"--");
        buf.extend_from_slice(self.boundary.as_bytes());
        buf.extend_from_slice(b"--\r\n");
        buf
    }
}

/// Quote-safe form of a header parameter value.
fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_part_guesses_content_type() {
        let part = Part::file("file", "Photo.JPG", vec![1, 2, 3]);
        assert_eq!(part.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(part.filename.as_deref(), Some("Photo.JPG"));

        let part = Part::file("file", "archive", Vec::new());
        assert_eq!(part.content_type.as_deref(), Some("application/octet-stream"));
    }

    #[test]
    fn boundaries_are_unique() {
        assert_ne!(Form::new().boundary(), Form::new().boundary());
    }

    #[test]
    fn encodes_file_part() {
        let form = Form::new().file("file", "app.js", b"let a = 1;".to_vec());
        let boundary = form.boundary().to_string();
        let (content_type, body) = form.into_body();

        assert_eq!(content_type, format!("multipart/form-data; boundary={boundary}"));
        let expected = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"app.js\"\r\n\
             Content-Type: application/javascript\r\n\
             \r\n\
             let a = 1;\r\n\
             --{boundary}--\r\n"
        );
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }

    #[test]
    fn quotes_in_filenames_are_escaped() {
        let form = Form::new().file("file", "a\"b.txt", Vec::new());
        let (_, body) = form.into_body();
        let body = String::from_utf8(body).unwrap();
        assert!(body.contains("filename=\"a\\\"b.txt\""));
    }
}
