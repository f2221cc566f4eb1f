//! Text extraction for uploaded documents.
//!
//! Turns raw upload bytes into plain text before anything reaches the matcher.
//! PDF goes through `pdf-extract`, DOCX through the `docx` reader (zip + quick-xml);
//! everything else is decoded as text (UTF-16 with BOM, otherwise UTF-8 with
//! invalid bytes dropped).
//! CPU-bound: callers run it inside `tokio::task::spawn_blocking`.

mod docx;

#[cfg(test)]
pub(crate) use docx::test_support::build_docx;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not extract text from DOCX '{filename}': {details}")]
    Docx { filename: String, details: String },

    #[error("Could not extract text from PDF '{filename}': {details}")]
    Pdf { filename: String, details: String },
}

/// Document kinds recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("docx") => DocumentKind::Docx,
            _ => DocumentKind::PlainText,
        }
    }
}

/// Best-effort plain text for an uploaded file.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    match DocumentKind::from_filename(filename) {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf {
                filename: filename.to_string(),
                details: e.to_string(),
            })
        }
        DocumentKind::Docx => {
            docx::extract_docx_text(bytes).map_err(|details| ExtractionError::Docx {
                filename: filename.to_string(),
                details,
            })
        }
        DocumentKind::PlainText => Ok(decode_text(bytes)),
    }
}

/// Decodes text bytes, tolerating invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8_lossy(rest),
        _ => decode_utf8_lossy(bytes),
    }
}

/// Keeps every valid sequence, drops only the invalid bytes.
fn decode_utf8_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units).filter_map(Result::ok).collect()
}
