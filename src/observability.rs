//! Observer hooks for table, section and backend activity.
//!
//! Nothing in the crate logs directly. Components that accept an observer report
//! [`ViewEvent`]s to it; [`StdErrObserver`] and [`FileObserver`] turn them into log lines and
//! [`CompositeObserver`] fans them out.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Severity classification of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Routine activity.
    Info,
    /// A user action was ignored or clamped.
    Warning,
    /// A backend/CDN call failed.
    Error,
}

/// Events emitted by tables, the section manager and loaders.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The pipeline ran for a table.
    ViewComputed {
        total_count: usize,
        visible_rows: usize,
        elapsed: Duration,
    },
    /// A memoized view was reused.
    CacheHit,
    PageChanged { page: usize, total_pages: usize },
    SortChanged { field: String, descending: bool },
    /// A click on a column that is not sortable.
    HeaderIgnored { field: String },
    /// The section list was rewritten and handed to the listener.
    SectionsChanged { active: usize, available: usize },
    /// A backend/CDN request completed successfully.
    RequestSucceeded { operation: String },
    /// A backend/CDN request failed; the message is what the user sees.
    RequestFailed { operation: String, message: String },
}

impl ViewEvent {
    pub fn severity(&self) -> Severity {
        match self {
            ViewEvent::RequestFailed { .. } => Severity::Error,
            ViewEvent::HeaderIgnored { .. } => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

/// Observer interface for view events.
pub trait ViewObserver: Send + Sync {
    fn on_event(&self, event: &ViewEvent);
}

/// Forward `event` to `observer` if one is set.
pub(crate) fn emit(observer: Option<&Arc<dyn ViewObserver>>, event: ViewEvent) {
    if let Some(o) = observer {
        o.on_event(&event);
    }
}

/// An observer that fans out events to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ViewObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ViewObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ViewObserver for CompositeObserver {
    fn on_event(&self, event: &ViewEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}

/// Logs events at or above a severity to stderr.
#[derive(Debug)]
pub struct StdErrObserver {
    pub min_severity: Severity,
}

impl Default for StdErrObserver {
    fn default() -> Self {
        Self {
            min_severity: Severity::Info,
        }
    }
}

impl ViewObserver for StdErrObserver {
    fn on_event(&self, event: &ViewEvent) {
        let severity = event.severity();
        if severity >= self.min_severity {
            eprintln!("[view][{severity:?}] {event:?}");
        }
    }
}

/// Appends events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ViewObserver for FileObserver {
    fn on_event(&self, event: &ViewEvent) {
        self.append_line(&format!(
            "{} {:?} {:?}",
            unix_ts(),
            event.severity(),
            event
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
