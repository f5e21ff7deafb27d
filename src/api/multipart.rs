//! `multipart/form-data` bodies, in the exact shape the CAB API has always
//! been sent.
//!
//! Each part is laid out as:
//!
//! ```text
//! --<boundary>\n
//! Content-Disposition: form-data; name="<field>"; filename="<field>"\r\n
//! Content-Type: <type>\r\n
//! \r\n
//! <value>\r\n
//! ```
//!
//! and the body ends with `--<boundary>--`. The bare `\n` after each
//! delimiter line is what the provider has always received; use
//! [`LineEndings::Crlf`] for a strictly RFC 7578 body instead.

use serde_json::Value;

/// The boundary used unless another one is given.
pub const DEFAULT_BOUNDARY: &str = "1234cabapiclientboundary1234";

/// How delimiter lines are terminated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEndings {
    /// A bare `\n` after each `--<boundary>` line, `\r\n` everywhere else.
    #[default]
    Compatible,
    /// `\r\n` everywhere.
    Crlf,
}

/// The contents of one named part.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Sent as compact JSON with `application/json`.
    Json(Value),
    /// Sent verbatim. Without an explicit type, one is guessed from the
    /// field name's extension.
    Bytes {
        content: Vec<u8>,
        content_type: Option<String>,
    },
}

impl Part {
    pub fn bytes(content: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            content: content.into(),
            content_type: None,
        }
    }

    /// The `Content-Type` for this part when sent under `name`.
    pub fn content_type(&self, name: &str) -> String {
        match self {
            Self::Json(_) => "application/json".to_string(),
            Self::Bytes {
                content_type: Some(content_type),
                ..
            } => content_type.clone(),
            Self::Bytes { .. } => mime_guess::from_path(name)
                .first_or_octet_stream()
                .to_string(),
        }
    }
}

/// An ordered set of named parts.
///
/// Names are unique: setting an existing name replaces that part where it
/// stands, so the order of first insertion is kept.
///
/// Each name is written as both the part's `name` and its `filename`,
/// unchanged, with one exception: `"`, CR and LF are percent-encoded
/// (`%22`, `%0D`, `%0A`) so a name can't end the quoted parameter early.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartForm {
    boundary: String,
    line_endings: LineEndings,
    parts: Vec<(String, Part)>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: DEFAULT_BOUNDARY.to_string(),
            line_endings: LineEndings::default(),
            parts: Vec::new(),
        }
    }

    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = boundary.into();
        self
    }

    pub fn with_line_endings(mut self, line_endings: LineEndings) -> Self {
        self.line_endings = line_endings;
        self
    }

    pub fn json(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, Part::Json(value));
        self
    }

    pub fn bytes(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.set(name, Part::bytes(content));
        self
    }

    pub fn bytes_with_type(
        mut self,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
    ) -> Self {
        self.set(
            name,
            Part::Bytes {
                content: content.into(),
                content_type: Some(content_type.into()),
            },
        );
        self
    }

    pub fn set(&mut self, name: impl Into<String>, part: Part) {
        let name = name.into();
        match self.parts.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = part,
            None => self.parts.push((name, part)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, part)| part)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The value of the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn encode(&self) -> Vec<u8> {
        let delimiter_end: &[u8] = match self.line_endings {
            LineEndings::Compatible => b"\n",
            LineEndings::Crlf => b"\r\n",
        };

        let mut body = Vec::new();
        for (name, part) in &self.parts {
            let name = escape_name(name);
            body.extend_from_slice(b"--");
            body.extend_from_slice(self.boundary.as_bytes());
            body.extend_from_slice(delimiter_end);
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}\"\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(
                format!("Content-Type: {}\r\n\r\n", part.content_type(&name)).as_bytes(),
            );
            match part {
                Part::Json(value) => body.extend_from_slice(value.to_string().as_bytes()),
                Part::Bytes { content, .. } => body.extend_from_slice(content),
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(b"--");
        body.extend_from_slice(self.boundary.as_bytes());
        body.extend_from_slice(b"--");
        body
    }
}

/// Field names go inside a quoted header parameter; keep them from breaking out.
fn escape_name(name: &str) -> String {
    name.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
