//! Filesystem notification model for watch mode.
//!
//! The CLI adapts `notify` events into [`FileEvent`]s; this module decides
//! which of them trigger processing.

use std::path::{Path, PathBuf};

/// Kind of change reported for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    Created,
    Modified,
}

/// A create or modify notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub is_dir: bool,
    pub kind: FileEventKind,
}

impl FileEvent {
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
            kind: FileEventKind::Created,
        }
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
            kind: FileEventKind::Modified,
        }
    }
}

/// Whether `path` names a PDF report (extension compared case-insensitively).
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// True for non-directory events on `.pdf` paths.
pub fn should_process(event: &FileEvent) -> bool {
    !event.is_dir && is_pdf(&event.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_files_are_processed() {
        assert!(should_process(&FileEvent::created("input/report.pdf")));
        assert!(should_process(&FileEvent::modified("input/REPORT.PDF")));
    }

    #[test]
    fn test_other_files_are_ignored() {
        assert!(!should_process(&FileEvent::created("input/report.pdf.part")));
        assert!(!should_process(&FileEvent::created("input/notes.txt")));
        assert!(!should_process(&FileEvent::created("input/pdf")));
    }

    #[test]
    fn test_directories_are_ignored() {
        let event = FileEvent {
            path: PathBuf::from("input/archive.pdf"),
            is_dir: true,
            kind: FileEventKind::Created,
        };
        assert!(!should_process(&event));
    }
}
