//! Page navigation seam.

/// Performs hard page navigations on behalf of the session and wallet code.
pub trait Navigator: Send + Sync {
    /// Leaves the current page for `target`.
    fn navigate(&self, target: &str);

    /// Reloads the current page.
    fn reload(&self);
}

#[cfg(any(test, feature = "mocks"))]
pub use recording::RecordingNavigator;

#[cfg(any(test, feature = "mocks"))]
mod recording {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use super::Navigator;

    /// Records navigations instead of performing them.
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub navigations: Mutex<Vec<String>>,
        pub reloads: Mutex<usize>,
    }

    impl RecordingNavigator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn navigations(&self) -> Vec<String> {
            self.navigations.lock().unwrap().clone()
        }

        pub fn last_navigation(&self) -> Option<String> {
            self.navigations.lock().unwrap().last().cloned()
        }

        pub fn reload_count(&self) -> usize {
            *self.reloads.lock().unwrap()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, target: &str) {
            self.navigations.lock().unwrap().push(target.to_owned());
        }

        fn reload(&self) {
            *self.reloads.lock().unwrap() += 1;
        }
    }
}
