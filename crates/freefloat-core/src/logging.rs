//! Per-document error logs.
//!
//! [`ErrorLog`] is a `tracing` sink that is attached to one document at a
//! time. Warnings and errors emitted while a scope is open are appended to
//! `<output_dir>/<name>.errors.log`; the file is created on the first such
//! message only. Closing an unmarked scope removes the file again, so a log
//! survives only for documents that actually had an anomaly.
//!
//! The sink is composed with the console output as a separate layer:
//!
//! ```no_run
//! use freefloat_core::ErrorLog;
//! use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};
//!
//! let error_log = ErrorLog::new();
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(error_log.layer())
//!     .init();
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::error::LogError;

/// Suffix appended to the document stem.
pub const ERROR_LOG_SUFFIX: &str = ".errors.log";

/// Shared handle to the scoped error log sink.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    state: Arc<Mutex<Option<ActiveScope>>>,
    installed: Arc<AtomicBool>,
}

#[derive(Debug)]
struct ActiveScope {
    name: String,
    path: PathBuf,
    file: Option<File>,
    marked: bool,
}

impl ErrorLog {
    /// Create a detached error log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer writing WARN and above to the currently attached file.
    pub fn layer<S>(&self) -> impl Layer<S> + Send + Sync + use<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    {
        self.installed.store(true, Ordering::Release);
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(self.clone())
            .with_filter(LevelFilter::WARN)
    }

    /// Attach the sink to `<dir>/<name>.errors.log`.
    ///
    /// Only one scope may be open at a time.
    pub fn open(&self, dir: &Path, name: &str) -> Result<ErrorScope, LogError> {
        let path = dir.join(format!("{}{}", name, ERROR_LOG_SUFFIX));

        let mut state = self.lock();
        if let Some(active) = state.as_ref() {
            return Err(LogError::ScopeBusy(active.name.clone()));
        }
        *state = Some(ActiveScope {
            name: name.to_string(),
            path: path.clone(),
            file: None,
            marked: false,
        });
        drop(state);

        debug!("Attached error log {}", path.display());
        Ok(ErrorScope {
            log: self.clone(),
            path,
            closed: false,
        })
    }

    /// Whether [`layer`](Self::layer) was handed to a subscriber.
    ///
    /// Without it scopes still open and close but no file is ever written.
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    /// Whether a scope is currently attached.
    pub fn is_attached(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ActiveScope>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<'a> MakeWriter<'a> for ErrorLog {
    type Writer = ScopeWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        ScopeWriter { log: self }
    }
}

/// Writer handed to the formatter for one event.
///
/// Messages emitted while no scope is attached are discarded.
pub struct ScopeWriter<'a> {
    log: &'a ErrorLog,
}

impl Write for ScopeWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.log.lock();
        let Some(active) = state.as_mut() else {
            return Ok(buf.len());
        };

        if active.file.is_none() {
            active.file = Some(File::create(&active.path)?);
        }
        match active.file.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.log.lock().as_mut().and_then(|a| a.file.as_mut()) {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// An attached error log for one document.
///
/// Dropping the scope closes it.
#[derive(Debug)]
pub struct ErrorScope {
    log: ErrorLog,
    path: PathBuf,
    closed: bool,
}

impl ErrorScope {
    /// Path of the log file (which may not exist yet).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record that the document had an anomaly; the log will be kept.
    pub fn mark_error(&self) {
        if let Some(active) = self.log.lock().as_mut() {
            active.marked = true;
        }
    }

    /// Whether [`mark_error`](Self::mark_error) was called.
    pub fn is_marked(&self) -> bool {
        self.log.lock().as_ref().is_some_and(|a| a.marked)
    }

    /// Detach the sink.
    ///
    /// Returns the log path if it was marked and the file exists; otherwise
    /// the file is removed and `None` is returned.
    pub fn close(mut self) -> Option<PathBuf> {
        self.finish()
    }

    fn finish(&mut self) -> Option<PathBuf> {
        if self.closed {
            return None;
        }
        self.closed = true;

        // Release the lock before logging: the layer writes through it.
        let active = self.log.lock().take()?;
        let marked = active.marked;
        drop(active.file);

        if marked {
            return self.path.exists().then(|| self.path.clone());
        }

        if self.path.exists() {
            match fs::remove_file(&self.path) {
                Ok(()) => debug!("No errors encountered - removed {}", self.path.display()),
                Err(e) => warn!("Failed to remove empty error log {}: {}", self.path.display(), e),
            }
        }
        None
    }
}

impl Drop for ErrorScope {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{error, info};
    use tracing_subscriber::layer::SubscriberExt;

    fn with_log<T>(log: &ErrorLog, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(log.layer());
        tracing::subscriber::with_default(subscriber, f)
    }

    #[test]
    fn test_file_is_created_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new();

        with_log(&log, || {
            let scope = log.open(dir.path(), "report").unwrap();
            info!("informational messages are not captured");
            assert!(!scope.path().exists());

            warn!("Skipping row due to unexpected format: foo");
            assert!(scope.path().exists());
            scope.mark_error();
            scope.close()
        });

        let content = fs::read_to_string(dir.path().join("report.errors.log")).unwrap();
        assert!(content.contains("WARN"));
        assert!(content.contains("Skipping row due to unexpected format: foo"));
        assert!(!content.contains("informational"));
    }

    #[test]
    fn test_marked_scope_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new();

        let kept = with_log(&log, || {
            let scope = log.open(dir.path(), "doc").unwrap();
            error!("decode failed");
            scope.mark_error();
            assert!(scope.is_marked());
            scope.close()
        });

        assert_eq!(kept, Some(dir.path().join("doc.errors.log")));
        assert!(!log.is_attached());
    }

    #[test]
    fn test_unmarked_scope_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new();

        let kept = with_log(&log, || {
            let scope = log.open(dir.path(), "doc").unwrap();
            warn!("a warning that is not an anomaly");
            scope.close()
        });

        assert_eq!(kept, None);
        assert!(!dir.path().join("doc.errors.log").exists());
    }

    #[test]
    fn test_unmarked_scope_removes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("doc.errors.log");
        fs::write(&stale, "old run").unwrap();

        let log = ErrorLog::new();
        let scope = log.open(dir.path(), "doc").unwrap();
        assert_eq!(scope.close(), None);
        assert!(!stale.exists());
    }

    #[test]
    fn test_layer_marks_log_installed() {
        let log = ErrorLog::new();
        assert!(!log.is_installed());

        let copy = log.clone();
        with_log(&log, || {});
        assert!(copy.is_installed());
    }

    #[test]
    fn test_scope_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new();

        let first = log.open(dir.path(), "a").unwrap();
        assert!(matches!(log.open(dir.path(), "b"), Err(LogError::ScopeBusy(name)) if name == "a"));

        drop(first);
        assert!(!log.is_attached());
        assert!(log.open(dir.path(), "b").is_ok());
    }

    #[test]
    fn test_messages_outside_scope_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new();

        with_log(&log, || {
            warn!("nobody is listening");
        });

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
