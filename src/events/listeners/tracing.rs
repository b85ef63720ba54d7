use crate::events::{Listener, SiteEvent};

/// Emits site events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
pub struct TracingListener;

impl Listener for TracingListener {
    fn handle(&self, event: &SiteEvent) {
        tracing::info!(
            target: "nolyx::events",
            event_name = event.name(),
            ?event,
            "site event"
        );
    }
}
