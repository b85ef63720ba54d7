use super::SiteEvent;

/// Receives every dispatched [`SiteEvent`].
///
/// Handlers run inline on the dispatching call, so keep them short. Match on
/// the variant to pick the events you care about.
pub trait Listener: Send + Sync + 'static {
    fn handle(&self, event: &SiteEvent);
}
