// src/scheduler.rs
use log::{debug, info};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::announce::Announcer;
use crate::models::status::Endpoint;
use crate::query::StatusQuery;
use crate::render::MessageRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Armed,
    Ticking,
}

/// Ordered endpoint list plus the index of the next endpoint to poll.
/// The cursor advances only on successful polls and wraps modulo the
/// list length; replacing the list resets it.
#[derive(Debug, Default)]
pub struct Rotation {
    endpoints: Vec<Endpoint>,
    cursor: usize,
}

impl Rotation {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self {
            endpoints,
            cursor: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn replace(&mut self, endpoints: Vec<Endpoint>) {
        self.endpoints = endpoints;
        self.cursor = 0;
    }

    /// Selects the endpoint under the cursor. A cursor left beyond the end
    /// by a shrinking reconfiguration is clamped back to 0 first.
    pub fn current(&mut self) -> Option<Endpoint> {
        if self.endpoints.is_empty() {
            return None;
        }
        if self.cursor >= self.endpoints.len() {
            self.cursor = 0;
        }
        Some(self.endpoints[self.cursor])
    }

    pub fn advance(&mut self) {
        if !self.endpoints.is_empty() {
            self.cursor = (self.cursor + 1) % self.endpoints.len();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to poll; no dispatch, no cursor step.
    Skipped,
    /// Status message dispatched, cursor advanced.
    Online,
    /// Offline notice dispatched, cursor deliberately left in place.
    Offline,
}

/// Executes one poll episode: select the endpoint under the cursor, query
/// it, dispatch the rendered message.
pub struct Poller {
    rotation: Rotation,
    query: Arc<dyn StatusQuery>,
    renderer: MessageRenderer,
    announcer: Arc<dyn Announcer>,
}

impl Poller {
    pub fn new(
        rotation: Rotation,
        query: Arc<dyn StatusQuery>,
        renderer: MessageRenderer,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        Self {
            rotation,
            query,
            renderer,
            announcer,
        }
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut Rotation {
        &mut self.rotation
    }

    pub async fn tick(&mut self) -> TickOutcome {
        let endpoint = match self.rotation.current() {
            Some(endpoint) => endpoint,
            None => return TickOutcome::Skipped,
        };
        let label = endpoint.label();

        match self.query.query(&endpoint).await {
            Ok(record) => {
                let message = self.renderer.render_status(&record, &label);
                self.announcer.announce(&message).await;
                self.rotation.advance();
                TickOutcome::Online
            }
            Err(err) => {
                debug!("query to {} failed: {}", label, err);
                let message = self.renderer.render_offline(&label);
                self.announcer.announce(&message).await;
                // The cursor stays put so the endpoint is retried next tick.
                TickOutcome::Offline
            }
        }
    }
}

/// Owns the recurring poll timer. One tick runs at a time; the timer is
/// re-armed after every tick, success or failure, until `disable` cancels
/// it. Cancellation is cooperative: an in-flight tick finishes, then the
/// loop checks the flag before re-arming.
pub struct PollScheduler {
    poller: Arc<Mutex<Poller>>,
    state: Arc<RwLock<SchedulerState>>,
    interval: Duration,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl PollScheduler {
    pub fn new(poller: Poller, interval: Duration) -> Self {
        Self {
            poller: Arc::new(Mutex::new(poller)),
            state: Arc::new(RwLock::new(SchedulerState::Idle)),
            interval,
            shutdown: None,
            task: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.read()
    }

    /// Arms the timer when endpoints are configured, resetting the cursor.
    /// No-op when already armed or when the endpoint list is empty.
    pub async fn enable(&mut self) {
        if self.task.is_some() {
            return;
        }
        {
            let mut poller = self.poller.lock().await;
            poller.rotation_mut().reset();
            if poller.rotation().is_empty() {
                info!("no servers configured, scheduler stays idle");
                return;
            }
        }

        let (tx, mut rx) = watch::channel(false);
        let poller = Arc::clone(&self.poller);
        let state = Arc::clone(&self.state);
        let interval = self.interval;

        *self.state.write() = SchedulerState::Armed;
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = rx.changed() => break,
                }
                *state.write() = SchedulerState::Ticking;
                let outcome = {
                    let mut poller = poller.lock().await;
                    poller.tick().await
                };
                debug!("tick finished: {:?}", outcome);
                // Never re-arm once disable has been requested.
                if *rx.borrow() {
                    break;
                }
                *state.write() = SchedulerState::Armed;
            }
            *state.write() = SchedulerState::Idle;
        });

        self.shutdown = Some(tx);
        self.task = Some(task);
    }

    /// Cancels a pending timer and waits for any in-flight tick to finish.
    /// No dispatch happens after this returns.
    pub async fn disable(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(true);
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        *self.state.write() = SchedulerState::Idle;
    }

    /// Swaps in a freshly parsed endpoint list and resets the rotation.
    /// The poller lock serializes this against an in-flight tick; when the
    /// scheduler is idle and the new list is non-empty, it is armed.
    pub async fn reconfigure(&mut self, endpoints: Vec<Endpoint>) {
        let non_empty = !endpoints.is_empty();
        {
            let mut poller = self.poller.lock().await;
            poller.rotation_mut().replace(endpoints);
        }
        if self.task.is_none() && non_empty {
            self.enable().await;
        }
    }
}
