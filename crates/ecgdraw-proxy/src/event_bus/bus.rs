//! Change bus implementation.
//!
//! Each drawing proxy owns its own bus so several proxies (multi-pane views)
//! never see each other's events.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{ChangeCause, ChangeEvent};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only changes caused by specific interactions
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events caused by any of these interactions.
    Causes(Vec<ChangeCause>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Causes(causes) => causes.contains(&event.sender),
        }
    }
}

type EventHandler = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Configuration for the change bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Channel capacity for broadcast.
    pub channel_capacity: usize,
    /// Whether to keep event history.
    pub enable_history: bool,
    /// Maximum number of events to retain in history.
    pub max_history_size: usize,
    /// How long to retain events in history.
    pub history_retention: Duration,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            enable_history: false,
            max_history_size: 256,
            history_retention: Duration::from_secs(300),
        }
    }
}

impl From<&ecgdraw_settings::EventSettings> for EventBusConfig {
    fn from(settings: &ecgdraw_settings::EventSettings) -> Self {
        Self {
            channel_capacity: settings.channel_capacity.max(1),
            enable_history: settings.enable_history,
            max_history_size: settings.history_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct TimestampedEvent {
    event: ChangeEvent,
    timestamp: Instant,
}

/// Error types for change bus operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventBusError {
    /// No handlers and no async receivers are listening
    #[error("No active subscribers")]
    NoSubscribers,
}

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: EventHandler,
}

/// Ordered, synchronous change-event distribution
pub struct ChangeBus {
    sender: broadcast::Sender<ChangeEvent>,
    /// Handlers in registration order
    handlers: RwLock<Vec<Subscription>>,
    history: RwLock<VecDeque<TimestampedEvent>>,
    config: EventBusConfig,
}

impl ChangeBus {
    /// Create a new bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            handlers: RwLock::new(Vec::new()),
            history: RwLock::new(VecDeque::new()),
            config,
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Handlers run on the calling thread in registration order. A handler
    /// that panics is logged and skipped. Returns the number of handlers and
    /// async receivers that got the event.
    pub fn publish(&self, event: ChangeEvent) -> Result<usize, EventBusError> {
        if self.config.enable_history {
            self.add_to_history(&event);
        }

        // Snapshot so handlers may (un)subscribe without deadlocking.
        let handlers: Vec<(SubscriptionId, EventHandler)> = self
            .handlers
            .read()
            .iter()
            .filter(|s| s.filter.matches(&event))
            .map(|s| (s.id, Arc::clone(&s.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in &handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::warn!("Subscription {} panicked while handling {}", id, event),
            }
        }

        let receivers = self.sender.send(event).unwrap_or(0);
        if handlers.is_empty() && receivers == 0 && self.subscriber_count() == 0 {
            return Err(EventBusError::NoSubscribers);
        }
        Ok(delivered + receivers)
    }

    /// Subscribe with a synchronous handler
    ///
    /// The handler is called on the publishing thread, so it should return
    /// quickly to avoid delaying the interaction that triggered it.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().push(Subscription {
            id,
            filter,
            handler: Arc::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Get a receiver for async event polling
    pub fn receiver(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe; returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|s| s.id != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of synchronous subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Get recent event history (if enabled)
    ///
    /// Returns events since the given instant, or all history if None.
    pub fn history(&self, since: Option<Instant>) -> Vec<ChangeEvent> {
        if !self.config.enable_history {
            return Vec::new();
        }

        let history = self.history.read();
        match since {
            Some(since) => history
                .iter()
                .filter(|e| e.timestamp >= since)
                .map(|e| e.event.clone())
                .collect(),
            None => history.iter().map(|e| e.event.clone()).collect(),
        }
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn add_to_history(&self, event: &ChangeEvent) {
        let mut history = self.history.write();
        let now = Instant::now();

        history.push_back(TimestampedEvent {
            event: event.clone(),
            timestamp: now,
        });

        let retention = self.config.history_retention;
        while history
            .front()
            .is_some_and(|e| now.duration_since(e.timestamp) > retention)
        {
            history.pop_front();
        }

        while history.len() > self.config.max_history_size {
            history.pop_front();
        }
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
