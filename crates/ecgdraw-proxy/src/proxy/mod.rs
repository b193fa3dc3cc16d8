//! Drawing proxy: owns the object collection and the viewport state.

mod build;
mod interaction;

use ecgdraw_core::{PrepareError, Rectangle};
use ecgdraw_settings::ProxyConfig;

use crate::client::{DrawingClient, RenderMode};
use crate::event_bus::{
    ChangeBus, ChangeCause, ChangeEvent, EventBusConfig, EventFilter, PointerEvent, SubscriptionId,
};
use crate::object::DrawingObject;
use crate::retention::{RetentionPolicy, WindowRetention};
use crate::state::ProxyState;

/// Orchestrates building, culling and change emission for one drawing surface.
///
/// A proxy starts uninitialised; [`DrawingProxy::init`] binds it to a screen
/// rectangle. Every build or interaction call on an uninitialised proxy is
/// logged and ignored.
#[derive(Debug)]
pub struct DrawingProxy {
    config: ProxyConfig,
    screen: Option<Rectangle>,
    state: Option<ProxyState>,
    objects: Vec<DrawingObject>,
    overlay: Vec<DrawingObject>,
    clients: Vec<DrawingClient>,
    bus: ChangeBus,
    last_pointer: Option<PointerEvent>,
}

impl DrawingProxy {
    /// Creates an uninitialised proxy.
    ///
    /// A configuration that fails validation is replaced by the defaults.
    pub fn new(config: ProxyConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                tracing::warn!("Invalid proxy config ({}), using defaults", err);
                ProxyConfig::default()
            }
        };
        let bus = ChangeBus::with_config(EventBusConfig::from(&config.events));
        Self {
            config,
            screen: None,
            state: None,
            objects: Vec::new(),
            overlay: Vec::new(),
            clients: Vec::new(),
            bus,
            last_pointer: None,
        }
    }

    /// Binds the proxy to `screen` and starts from an empty collection.
    pub fn init(&mut self, screen: Rectangle) {
        self.screen = Some(screen);
        self.reset();
    }

    /// Drops every object and recomputes the state for the bound screen.
    ///
    /// Attached clients stay attached.
    pub fn reset(&mut self) {
        self.objects = Vec::new();
        self.overlay = Vec::new();
        self.last_pointer = None;
        self.state = self
            .screen
            .map(|screen| ProxyState::new(&self.config, screen));

        match &self.state {
            Some(state) => tracing::info!("Drawing proxy reset: {}", state),
            None => tracing::debug!("Reset ignored: {}", PrepareError::NotInitialized),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&ProxyState> {
        self.state.as_ref()
    }

    /// World-anchored objects in build order.
    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    /// Viewport-anchored objects.
    pub fn overlay(&self) -> &[DrawingObject] {
        &self.overlay
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clients(&self) -> &[DrawingClient] {
        &self.clients
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Registers a render callback and returns the client handle objects are
    /// built for.
    pub fn attach_client<F>(&mut self, mode: RenderMode, handler: F) -> DrawingClient
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let subscription = self.bus.subscribe(EventFilter::All, handler);
        let client = DrawingClient::new(mode, subscription);
        tracing::info!("Client {} attached ({:?})", client.id(), mode);
        self.clients.push(client);
        client
    }

    /// Unsubscribes the client's callback. Objects it owns are kept.
    pub fn detach_client(&mut self, client: &DrawingClient) -> bool {
        let before = self.clients.len();
        self.clients.retain(|c| c.id() != client.id());
        let removed = self.bus.unsubscribe(client.subscription());
        if removed {
            tracing::info!("Client {} detached", client.id());
        }
        removed || self.clients.len() != before
    }

    /// Subscribes an observer that is not a render client.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(filter, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Culls the collection against the visible window.
    ///
    /// Retains an object iff its container's horizontal extent touches
    /// `[min_px, max_px]`. Returns `None` before [`DrawingProxy::init`].
    pub fn collect_changes(
        &self,
        sender: ChangeCause,
        pointer: Option<PointerEvent>,
    ) -> Option<ChangeEvent> {
        let state = self.state.as_ref()?;
        let (min_px, max_px) = (state.min_px(), state.max_px());

        let objects: Vec<DrawingObject> = self
            .objects
            .iter()
            .filter(|o| o.is_visible_in(min_px, max_px))
            .cloned()
            .collect();

        tracing::trace!(
            "{}: {} of {} objects in [{:.1}, {:.1}]",
            sender,
            objects.len(),
            self.objects.len(),
            min_px,
            max_px
        );

        Some(ChangeEvent {
            sender,
            state: state.clone(),
            objects,
            overlay: self.overlay.clone(),
            clients: Vec::new(),
            pointer,
        })
    }

    /// Evicts objects far outside the visible window.
    ///
    /// Uses [`WindowRetention`] with the configured margin.
    pub fn gc(&mut self) -> usize {
        let policy = WindowRetention::new(self.config.retention.margin_px);
        self.gc_with(&policy)
    }

    /// Evicts every object `policy` does not retain.
    pub fn gc_with<P>(&mut self, policy: &P) -> usize
    where
        P: RetentionPolicy + ?Sized,
    {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!("GC ignored: {}", PrepareError::NotInitialized);
            return 0;
        };

        let before = self.objects.len();
        self.objects.retain(|o| policy.retain(o, state));
        let evicted = before - self.objects.len();
        tracing::info!("GC evicted {} of {} objects", evicted, before);
        evicted
    }

    /// Culls and delivers one change event.
    fn emit(&self, sender: ChangeCause, pointer: Option<PointerEvent>) {
        let Some(event) = self.collect_changes(sender, pointer) else {
            return;
        };
        match self.bus.publish(event) {
            Ok(delivered) => tracing::trace!("{} delivered to {} subscribers", sender, delivered),
            Err(err) => tracing::debug!("{} not delivered: {}", sender, err),
        }
    }
}

impl Default for DrawingProxy {
    fn default() -> Self {
        Self::new(ProxyConfig::default())
    }
}
