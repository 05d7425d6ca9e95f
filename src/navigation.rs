use parking_lot::Mutex;
use std::sync::Arc;

/// Navigator
///
/// The navigation collaborator: knows the current location (full path including any
/// query string) and can move to another one.
pub trait Navigator: Send + Sync {
    fn current(&self) -> String;

    fn push(&self, location: &str);
}

/// Shared handle to the navigator.
pub type NavigatorState = Arc<dyn Navigator>;

/// HistoryNavigator
///
/// In-process navigator that records every committed location. Used by the CLI and
/// by tests to observe redirects.
pub struct HistoryNavigator {
    inner: Mutex<History>,
}

struct History {
    current: String,
    visited: Vec<String>,
}

impl HistoryNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            inner: Mutex::new(History {
                current: start.to_string(),
                visited: Vec::new(),
            }),
        }
    }

    /// Every location pushed since construction, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.inner.lock().visited.clone()
    }

    /// Number of pushes that targeted `location`.
    pub fn visits_to(&self, location: &str) -> usize {
        self.inner
            .lock()
            .visited
            .iter()
            .filter(|visited| visited.as_str() == location)
            .count()
    }
}

impl Navigator for HistoryNavigator {
    fn current(&self) -> String {
        self.inner.lock().current.clone()
    }

    fn push(&self, location: &str) {
        let mut history = self.inner.lock();
        tracing::debug!(from = %history.current, to = %location, "navigating");
        history.current = location.to_string();
        history.visited.push(location.to_string());
    }
}
