//! Multipart bodies.
//!
//! Part names and file names are written verbatim inside double quotes
//! (`name="foo"`, `filename="a.txt"`); the remote API rejects unquoted or
//! percent-encoded parameter names. String parts keep their order. Only the
//! first file part is sent.

use crate::error::WireError;
use crate::types::MultipartPart;
use crate::utils::mime::guess_mime;
use reqwest::multipart::{Form, Part};

/// One encoded segment of a multipart body.
#[derive(Debug)]
pub enum MultipartSegment {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        body: reqwest::Body,
    },
}

/// Multipart body ready to be bound to a transport request.
#[derive(Debug, Default)]
pub struct MultipartBody {
    pub segments: Vec<MultipartSegment>,
    /// File parts present in the descriptor but not sent.
    pub dropped_files: usize,
}

impl MultipartBody {
    pub fn text_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                MultipartSegment::Text { name, .. } => Some(name.as_str()),
                MultipartSegment::File { .. } => None,
            })
            .collect()
    }

    /// `(name, file_name)` of the file segment, if any.
    pub fn file(&self) -> Option<(&str, &str)> {
        self.segments.iter().find_map(|s| match s {
            MultipartSegment::File {
                name, file_name, ..
            } => Some((name.as_str(), file_name.as_str())),
            MultipartSegment::Text { .. } => None,
        })
    }

    pub fn into_form(self) -> Result<Form, WireError> {
        let mut form = Form::new().percent_encode_noop();
        for segment in self.segments {
            form = match segment {
                MultipartSegment::Text { name, value } => form.text(name, value),
                MultipartSegment::File {
                    name,
                    file_name,
                    content_type,
                    body,
                } => {
                    let part = Part::stream(body)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|e| {
                            WireError::InvalidRequest(format!(
                                "Invalid content type '{content_type}' for part '{name}': {e}"
                            ))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

pub(super) async fn build_multipart_body(
    parts: &[MultipartPart],
) -> Result<MultipartBody, WireError> {
    if parts.is_empty() {
        return Err(WireError::InvalidRequest(
            "multipart request has no parts".to_string(),
        ));
    }

    let mut body = MultipartBody::default();
    let mut file_sent = false;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => body.segments.push(MultipartSegment::Text {
                name: name.clone(),
                value: value.clone(),
            }),
            MultipartPart::File(_) if file_sent => body.dropped_files += 1,
            MultipartPart::File(file) => {
                let content_type = file.content_type.clone().unwrap_or_else(|| {
                    guess_mime(
                        &file.file_name,
                        file.source.as_bytes().map(|b| b.as_ref()),
                    )
                });
                body.segments.push(MultipartSegment::File {
                    name: file.name.clone(),
                    file_name: file.file_name.clone(),
                    content_type,
                    body: file.source.open().await?,
                });
                file_sent = true;
            }
        }
    }

    if body.dropped_files > 0 {
        tracing::warn!(target: "apiwire::http", dropped = body.dropped_files, "multipart request carries more than one file part; only the first is sent");
    }
    Ok(body)
}
