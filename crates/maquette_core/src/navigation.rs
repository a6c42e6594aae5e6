//! Navigation hook into the surrounding UI shell.
//!
//! The store only emits instructions; routing itself lives in the shell.

use std::sync::Mutex;

/// Fire-and-forget navigation instruction sink.
pub trait Navigator: Send + Sync {
    /// Requests navigation to the route made of `segments`.
    fn navigate_to(&self, segments: &[String]);
}

/// Navigator that ignores every instruction.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate_to(&self, _segments: &[String]) {}
}

/// Navigator that remembers every requested route, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Vec<String>> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }

    pub fn last_route(&self) -> Option<Vec<String>> {
        self.routes().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, segments: &[String]) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(segments.to_vec());
        }
    }
}
