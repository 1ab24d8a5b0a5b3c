use std::path::Path;
use tokio::io::AsyncReadExt;
use crate::errors::{SpecBoardError, SpecBoardResult};

const STDIN_MARKER: &str = "-";

/// Loads specification text from disk (or stdin for `-`). The content is
/// passed on untouched; no format checks happen here.
pub struct SpecReader;

impl SpecReader {
    /// `None` means nothing was selected and yields no text.
    pub async fn read(path: Option<&Path>) -> SpecBoardResult<Option<String>> {
        let Some(path) = path else {
            return Ok(None);
        };

        if path.as_os_str() == STDIN_MARKER {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .map_err(|e| SpecBoardError::file_error("<stdin>", "read", &e.to_string()))?;
            return Ok(Some(content));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SpecBoardError::file_error(&path.display().to_string(), "read", &e.to_string()))?;

        Ok(Some(content))
    }

    /// "`n` BYTES" for non-empty input, "EMPTY" otherwise.
    pub fn size_label(text: &str) -> String {
        if text.is_empty() {
            "EMPTY".to_string()
        } else {
            format!("{} BYTES", text.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_file_content_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "openapi: 3.0.0\ninfo:\n  title: Widgets\n").unwrap();

        let text = SpecReader::read(Some(file.path())).await.unwrap();

        assert_eq!(text.as_deref(), Some("openapi: 3.0.0\ninfo:\n  title: Widgets\n"));
    }

    #[tokio::test]
    async fn no_selection_yields_nothing() {
        assert_eq!(SpecReader::read(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_file_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");

        let err = SpecReader::read(Some(&missing)).await.unwrap_err();

        assert!(matches!(err, SpecBoardError::FileOperationError { .. }));
    }

    #[test]
    fn size_label_matches_board_header() {
        assert_eq!(SpecReader::size_label(""), "EMPTY");
        assert_eq!(SpecReader::size_label("abc"), "3 BYTES");
    }
}
