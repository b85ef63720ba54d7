use std::sync::OnceLock;

use super::{EventArea, Listener, SiteEvent};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

struct Subscription {
    /// `None` receives every area.
    area: Option<EventArea>,
    listener: Box<dyn Listener>,
}

/// The site's listeners, fixed once at startup.
///
/// Listeners either see every event ([`listen`](Self::listen)) or only one
/// part of the site ([`listen_to`](Self::listen_to)), e.g. a wallet analytics
/// hook that should not be woken by every session check.
pub struct EventRegistry {
    subscriptions: Vec<Subscription>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Receive every event. Listeners run in registration order.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.subscribe(None, listener)
    }

    /// Receive only events from `area`.
    pub fn listen_to(&mut self, area: EventArea, listener: impl Listener) -> &mut Self {
        self.subscribe(Some(area), listener)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    fn subscribe(&mut self, area: Option<EventArea>, listener: impl Listener) -> &mut Self {
        self.subscriptions.push(Subscription {
            area,
            listener: Box::new(listener),
        });
        self
    }

    fn dispatch(&self, event: &SiteEvent) {
        let area = event.area();
        self.subscriptions
            .iter()
            .filter(|sub| sub.area.is_none_or(|wanted| wanted == area))
            .for_each(|sub| sub.listener.handle(event));
    }
}

/// Installs the site's listeners. Call once while the host boots.
///
/// Events dispatched before this call, or when it is never made, are
/// dropped. Later calls are ignored with a warning; the first registry stays.
///
/// ```rust,ignore
/// use nolyx::events::{listeners::LoggingListener, EventArea};
///
/// nolyx::register_event_listeners(|registry| {
///     registry
///         .listen(LoggingListener::new())
///         .listen_to(EventArea::Wallet, WalletAnalytics::default());
/// });
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);

    let count = registry.len();
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "nolyx",
            "msg=\"event listeners already registered, ignoring\""
        );
        return;
    }

    log::debug!(target: "nolyx", "msg=\"event listeners registered\", count={count}");
}

/// Hands `event` to the matching listeners, inline on the caller.
pub fn dispatch(event: SiteEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event);
    }
}
