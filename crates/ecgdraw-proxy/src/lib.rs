//! # ecgdraw Proxy
//!
//! The drawing proxy sits between the ECG domain model and interchangeable
//! rendering back-ends (canvas, SVG or mixed). It:
//!
//! - builds a flat collection of positioned drawing objects from records
//! - keeps the viewport state (scroll, scale, visible column window, grid cells)
//! - culls the collection on every interaction and emits a bounded change set
//! - repositions the floating overlay pinned to the pointer
//!
//! ## Architecture
//!
//! ```text
//! EcgRecord ──prepare_*──► DrawingObject ──┐
//!                                          ├─► DrawingProxy ──cull──► ChangeEvent ──► ChangeBus ──► clients
//! ProxyConfig ──► ProxyState ──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ecgdraw_proxy::{DrawingProxy, RenderMode};
//!
//! let mut proxy = DrawingProxy::new(config);
//! proxy.init(Rectangle::new(0.0, 0.0, 1200.0, 800.0));
//! let client = proxy.attach_client(RenderMode::Canvas, |event| paint(event));
//! proxy.build_signal(&records, &client);
//! proxy.scroll(250.0);
//! ```

pub mod client;
pub mod event_bus;
pub mod object;
pub mod prepare;
pub mod proxy;
pub mod retention;
pub mod state;

pub use client::{ClientId, DrawingClient, RenderMode};
pub use event_bus::{
    ChangeBus, ChangeCause, ChangeEvent, DragEvent, EventBusConfig, EventBusError, EventFilter,
    PointerEvent, SubscriptionId,
};
pub use object::{DrawingGeometry, DrawingObject, DrawingObjectType, Trace};
pub use proxy::DrawingProxy;
pub use retention::{RetentionPolicy, WindowRetention};
pub use state::{DrawingCell, ProxyState};
