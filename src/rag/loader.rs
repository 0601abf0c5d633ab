use crate::types::{AppError, Result};
use std::path::Path;

/// Extract the plain text of a document.
///
/// PDFs go through `pdf-extract`; `.txt` and `.md` files are read as-is so
/// reports that were already converted can be used directly.
pub fn load_document_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AppError::Retrieval(format!(
            "Document not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        // pdf-extract panics on some malformed files instead of returning an error
        "pdf" => std::panic::catch_unwind(|| pdf_extract::extract_text(path))
            .map_err(|_| {
                AppError::Retrieval(format!("Malformed PDF: {}", path.display()))
            })?
            .map_err(|e| {
                AppError::Retrieval(format!(
                    "Failed to extract text from {}: {}",
                    path.display(),
                    e
                ))
            })?,
        "txt" | "md" => std::fs::read_to_string(path).map_err(|e| {
            AppError::Retrieval(format!("Failed to read {}: {}", path.display(), e))
        })?,
        other => {
            return Err(AppError::Retrieval(format!(
                "Unsupported document type '{}' for {}",
                other,
                path.display()
            )))
        }
    };

    tracing::debug!(
        path = %path.display(),
        characters = text.chars().count(),
        "Loaded document text"
    );

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_document() {
        let err = load_document_text(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, AppError::Retrieval(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_plain_text_document() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Roof: shingles damaged, needs replacement.").unwrap();

        let text = load_document_text(file.path()).unwrap();
        assert!(text.contains("shingles damaged"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let err = load_document_text(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported document type"));
    }
}
