//! `multipart/form-data` encoding and upload path helpers.
//!
//! The video upload endpoint takes a browser-style form rather than JSON.
//! `FormData` collects text fields and file parts and encodes them with a
//! random boundary.

use uuid::Uuid;

use crate::types::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// An ordered set of form fields, encoded as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct FormData {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for FormData {
    fn default() -> Self {
        Self::new()
    }
}

impl FormData {
    pub fn new() -> Self {
        Self::with_boundary(format!("socionet-{}", Uuid::new_v4().simple()))
    }

    /// Use a fixed boundary. The boundary must not occur inside any part.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match part {
                Part::Text { name, value } => {
                    out.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", escape(name))
                            .as_bytes(),
                    );
                    out.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                            escape(name),
                            escape(file_name)
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
                    out.extend_from_slice(bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        out
    }
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}

/// Metadata sent alongside an uploaded video file.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub title: String,
    pub description: String,
    pub required_role: Role,
    pub is_published: bool,
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl VideoUpload {
    /// Build the form the admin video uploader submits.
    pub fn into_form(self, file: UploadFile) -> FormData {
        FormData::new()
            .file("file", file.file_name, file.content_type, file.bytes)
            .text("title", self.title)
            .text("description", self.description)
            .text("requiredRole", self.required_role.as_str())
            .text("isPublished", self.is_published.to_string())
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `-`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Storage path for an image embedded in a post.
pub fn post_image_path(uploaded_at_millis: i64, file_name: &str) -> String {
    format!("posts/{uploaded_at_millis}-{}", sanitize_file_name(file_name))
}
