//! # Change Event Bus
//!
//! Delivers the proxy's change sets to rendering clients and host observers.
//!
//! ## Overview
//!
//! - Delivery is synchronous and follows registration order
//! - Each handler runs in isolation: a panicking handler is logged and the
//!   remaining handlers still receive the event
//! - Handlers may filter by the interaction that caused the change
//! - An async broadcast receiver is available for tokio consumers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ecgdraw_proxy::event_bus::{ChangeBus, ChangeCause, EventFilter};
//!
//! let bus = ChangeBus::new();
//! let id = bus.subscribe(EventFilter::Causes(vec![ChangeCause::MouseMove]), |event| {
//!     println!("{} objects visible", event.objects.len());
//! });
//! bus.unsubscribe(id);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
