//! Loading flag, last good data and error banner for one backend call site.

use std::fmt;
use std::sync::Arc;

use crate::error::ErrorMessage;
use crate::observability::{emit, ViewEvent, ViewObserver};

/// UI state around a fallible request.
///
/// A failure keeps the previously loaded data and only sets the error message; there is no
/// retry.
pub struct LoadState<T> {
    loading: bool,
    data: Option<T>,
    error: Option<String>,
    observer: Option<Arc<dyn ViewObserver>>,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
            observer: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LoadState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadState")
            .field("loading", &self.loading)
            .field("data", &self.data)
            .field("error", &self.error)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl<T> LoadState<T> {
    /// Create an idle state with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer for request outcomes.
    pub fn with_observer(mut self, observer: Arc<dyn ViewObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Message for the error toast, if the last call failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Close the error toast.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Run `request` and record its outcome. Returns `true` on success.
    pub fn run<F>(&mut self, operation: &str, request: F) -> bool
    where
        F: FnOnce() -> Result<T, ErrorMessage>,
    {
        self.loading = true;
        self.error = None;
        let result = request();
        self.loading = false;

        match result {
            Ok(data) => {
                self.data = Some(data);
                emit(
                    self.observer.as_ref(),
                    ViewEvent::RequestSucceeded {
                        operation: operation.to_string(),
                    },
                );
                true
            }
            Err(err) => {
                emit(
                    self.observer.as_ref(),
                    ViewEvent::RequestFailed {
                        operation: operation.to_string(),
                        message: err.message.clone(),
                    },
                );
                self.error = Some(err.message);
                false
            }
        }
    }
}
