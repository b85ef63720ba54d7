//! Background session maintenance.
//!
//! [`SessionMonitor::start`] spawns three tasks on the current tokio runtime:
//!
//! | Task | Trigger | Action |
//! |------|---------|--------|
//! | check | every `check_interval` | `is_valid()`, redirect on failure if configured |
//! | refresh | every `refresh_interval` | `extend_session` while visible and valid |
//! | visibility | tab becomes visible | `require_verification()` |
//!
//! The tasks live exactly as long as the returned [`MonitorHandle`].

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::MonitorConfig;
use crate::storage::KeyValueStore;

use super::SessionManager;

/// Shared "is the tab visible" signal.
///
/// The host flips it from its visibility-change handler; the monitor
/// watches it. Clones observe and drive the same signal.
#[derive(Clone, Debug)]
pub struct PageVisibility {
    sender: Arc<watch::Sender<bool>>,
}

impl PageVisibility {
    pub fn new(visible: bool) -> Self {
        let (sender, _) = watch::channel(visible);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Updates visibility. Watchers are only woken on an actual change.
    pub fn set_visible(&self, visible: bool) {
        self.sender.send_if_modified(|current| {
            if *current == visible {
                return false;
            }
            *current = visible;
            true
        });
    }

    pub fn is_visible(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

impl Default for PageVisibility {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Owns the monitoring tasks. Dropping it stops them.
#[derive(Debug)]
pub struct MonitorHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Stops every monitoring task.
    pub fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// True while at least one task is still alive.
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct SessionMonitor;

impl SessionMonitor {
    /// Starts monitoring `manager`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<D, V>(
        manager: Arc<SessionManager<D, V>>,
        visibility: PageVisibility,
        config: MonitorConfig,
    ) -> MonitorHandle
    where
        D: KeyValueStore + 'static,
        V: KeyValueStore + 'static,
    {
        let check_interval = usable_period("check_interval", config.check_interval);
        let refresh_interval = usable_period("refresh_interval", config.refresh_interval);

        // subscribed before spawning so a hide/show in between is not missed
        let receiver = visibility.subscribe();

        let mut tasks = Vec::with_capacity(3);

        tasks.push(tokio::spawn(check_loop(
            manager.clone(),
            check_interval,
            config.redirect_on_expiry,
        )));

        if config.auto_refresh {
            tasks.push(tokio::spawn(refresh_loop(
                manager.clone(),
                visibility.clone(),
                refresh_interval,
                config.refresh_hours,
            )));
        }

        tasks.push(tokio::spawn(visibility_loop(manager, receiver)));

        log::debug!(
            target: "nolyx",
            "msg=\"session monitor started\", check_ms={}, refresh_ms={}",
            check_interval.as_millis(),
            refresh_interval.as_millis()
        );

        MonitorHandle { tasks }
    }
}

/// Timer periods must be non-zero; zero is raised to the shortest period.
const MIN_PERIOD: std::time::Duration = std::time::Duration::from_millis(1);

fn usable_period(name: &str, period: std::time::Duration) -> std::time::Duration {
    if period < MIN_PERIOD {
        log::warn!(
            target: "nolyx",
            "msg=\"monitor period is zero, using minimum\", setting={name}, period_ms={}",
            MIN_PERIOD.as_millis()
        );
        return MIN_PERIOD;
    }
    period
}

fn ticker(period: std::time::Duration) -> tokio::time::Interval {
    // first tick one period out, not immediately
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn check_loop<D, V>(
    manager: Arc<SessionManager<D, V>>,
    period: std::time::Duration,
    redirect_on_expiry: bool,
) where
    D: KeyValueStore,
    V: KeyValueStore,
{
    let mut interval = ticker(period);
    loop {
        interval.tick().await;
        if !manager.is_valid() && redirect_on_expiry {
            manager.require_verification(None);
        }
    }
}

async fn refresh_loop<D, V>(
    manager: Arc<SessionManager<D, V>>,
    visibility: PageVisibility,
    period: std::time::Duration,
    hours: i64,
) where
    D: KeyValueStore,
    V: KeyValueStore,
{
    let mut interval = ticker(period);
    loop {
        interval.tick().await;
        if visibility.is_visible() && manager.is_valid() {
            manager.extend_session(Some(hours));
        }
    }
}

async fn visibility_loop<D, V>(
    manager: Arc<SessionManager<D, V>>,
    mut visibility: watch::Receiver<bool>,
) where
    D: KeyValueStore,
    V: KeyValueStore,
{
    // only actual changes are published, so a wake-up that ends visible means
    // the tab went hidden -> visible at least once, even if the two coalesced
    while visibility.changed().await.is_ok() {
        if *visibility.borrow_and_update() {
            manager.require_verification(None);
        }
    }
}
