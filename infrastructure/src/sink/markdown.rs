//! Markdown transcript files on the local filesystem

use court_application::ports::transcript_sink::{SinkError, TranscriptSink};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes transcripts as `.md` files into one directory
///
/// The directory is created on first write. An existing file with the same
/// name is overwritten.
pub struct MarkdownFileSink {
    dir: PathBuf,
}

impl MarkdownFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TranscriptSink for MarkdownFileSink {
    fn persist(&self, file_name: &str, document: &str) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.dir).map_err(|source| SinkError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(file_name);
        fs::write(&path, document).map_err(|source| SinkError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Transcript saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persist_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("debates").join("nested");
        let sink = MarkdownFileSink::new(&dir);

        let path = sink
            .persist("2026-01-02_justice.md", "# Debate: Justice\n")
            .unwrap();

        assert_eq!(path, dir.join("2026-01-02_justice.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Debate: Justice\n");
    }

    #[test]
    fn test_persist_overwrites() {
        let temp = TempDir::new().unwrap();
        let sink = MarkdownFileSink::new(temp.path());

        sink.persist("a.md", "first").unwrap();
        let path = sink.persist("a.md", "second").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn test_persist_into_file_path_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = MarkdownFileSink::new(&blocker)
            .persist("a.md", "doc")
            .unwrap_err();
        assert!(matches!(err, SinkError::CreateDir { .. }));
    }
}
