//! Rendering clients observing a proxy.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event_bus::SubscriptionId;

/// Identifies the client that owns a drawing object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client({})", &self.0.to_string()[..8])
    }
}

/// Paint technology used by a back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Canvas,
    Svg,
    Mix,
}

/// Consumer descriptor handed back by [`crate::DrawingProxy::attach_client`].
///
/// The render callback itself lives on the proxy's change bus; this handle
/// only carries what drawing objects need to reference their owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingClient {
    id: ClientId,
    mode: RenderMode,
    subscription: SubscriptionId,
}

impl DrawingClient {
    pub(crate) fn new(mode: RenderMode, subscription: SubscriptionId) -> Self {
        Self {
            id: ClientId::new(),
            mode,
            subscription,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}
