//! Uploaded resume intake: type and size checks, then raw text decoding.
//!
//! No document parsing happens here. Bytes are decoded as UTF-8 (lossily), so
//! binary formats come through as whatever text they contain; callers that need
//! clean text convert documents client-side first.

use bytes::Bytes;
use serde::Serialize;

use crate::budget::BudgetManager;
use crate::errors::AppError;

pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "text/plain",
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
];

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub text: String,
    pub size_bytes: usize,
    pub size_label: String,
    pub estimated_tokens: usize,
}

/// Human-readable size: "0 Bytes", "512 Bytes", "1.5 KB", "1 MB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Checks the declared content type against the allow-list. Parameters such as
/// `; charset=utf-8` are ignored.
pub fn validate_file_type(content_type: Option<&str>) -> Result<(), AppError> {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|m| m.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_CONTENT_TYPES.contains(&mime.as_str()) {
        Ok(())
    } else {
        Err(AppError::UnsupportedFileType(format!(
            "Unsupported file type '{}'. Please upload a TXT, PDF, DOC or DOCX file.",
            if mime.is_empty() { "unknown" } else { mime.as_str() }
        )))
    }
}

/// Limit label without the unit gap: "1MB", "512KB".
fn compact_size_label(bytes: u64) -> String {
    format_file_size(bytes).replace(' ', "")
}

pub fn validate_file_size(size: usize, max_bytes: usize) -> Result<(), AppError> {
    if size > max_bytes {
        return Err(AppError::FileTooLarge(format!(
            "File size ({}) exceeds the {} limit. Please use a smaller file.",
            format_file_size(size as u64),
            compact_size_label(max_bytes as u64)
        )));
    }
    Ok(())
}

/// Validates an upload and returns its text with a token estimate.
pub fn extract_text(
    file: UploadedFile,
    max_bytes: usize,
    budget: &BudgetManager,
) -> Result<ExtractedText, AppError> {
    validate_file_type(file.content_type.as_deref())?;
    validate_file_size(file.data.len(), max_bytes)?;

    let text = String::from_utf8_lossy(&file.data).into_owned();
    if text.trim().is_empty() {
        return Err(AppError::Validation("Uploaded file contains no text".to_string()));
    }

    Ok(ExtractedText {
        file_name: file.file_name,
        estimated_tokens: budget.estimate_size(&text),
        size_bytes: file.data.len(),
        size_label: format_file_size(file.data.len() as u64),
        text,
    })
}
