//! Event hooks for site actions.
//!
//! Session, wallet and blog operations fire a [`SiteEvent`] after they
//! complete. If no listeners are registered, events are dropped.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use nolyx::register_event_listeners;
//! use nolyx::events::listeners::LoggingListener;
//!
//! fn main() {
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```
//!
//! # Custom Listeners
//!
//! ```rust,ignore
//! use nolyx::events::{Listener, SiteEvent};
//!
//! struct ExpiryCounter;
//!
//! impl Listener for ExpiryCounter {
//!     fn handle(&self, event: &SiteEvent) {
//!         if let SiteEvent::SessionExpired { .. } = event {
//!             // bump a counter
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::{EventArea, SiteEvent};
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners, EventRegistry};
