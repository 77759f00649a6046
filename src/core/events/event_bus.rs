//=========================================================================
// Event Bus
//=========================================================================
//
// Type-safe multicast for scene lifecycle notifications.
//
// Architecture:
//   subscribe<E>(handler) → HashMap<TypeId, Vec<Handler<E>>>
//                                   ↓
//   publish<E>(&event)    → every handler of E, in subscription order
//
// Delivery is synchronous, on the publishing tick. Nothing is queued.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::handler_list::{Handler, HandlerList};

//=== Public API ==========================================================

/// Marker trait for types that can be published on the [`EventBus`].
///
/// Automatically implemented for all types that are Send + Sync + 'static.
pub trait Event: Send + Sync + 'static {}

// Blanket implementation
impl<T: Send + Sync + 'static> Event for T {}

//=========================================================================

/// In-process typed publish/subscribe hub.
///
/// Keeps one handler list per event type. Subscribing a handler that is
/// already present moves it to the end of the list instead of adding a
/// second delivery.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<TypeId, Box<dyn HandlerList>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Adds `handler` as a subscriber of `E`.
    ///
    /// A handler already subscribed is removed first, so each handler is
    /// delivered at most once per publish.
    pub fn subscribe<E: Event>(&mut self, handler: &Handler<E>) {
        let list = self.list_mut::<E>();
        list.retain(|h| !h.same_as(handler));
        list.push(handler.clone());
    }

    /// Convenience wrapper: wraps `callback` and subscribes it.
    ///
    /// Returns the handle needed to unsubscribe later.
    pub fn on<E, F>(&mut self, callback: F) -> Handler<E>
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let handler = Handler::new(callback);
        self.subscribe(&handler);
        handler
    }

    /// Removes `handler`. Returns true if it was subscribed.
    pub fn unsubscribe<E: Event>(&mut self, handler: &Handler<E>) -> bool {
        let Some(list) = self.list::<E>() else {
            return false;
        };
        if !list.iter().any(|h| h.same_as(handler)) {
            return false;
        }

        self.list_mut::<E>().retain(|h| !h.same_as(handler));
        true
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers `event` to every subscriber of `E`.
    pub fn publish<E: Event>(&self, event: &E) {
        if let Some(list) = self.list::<E>() {
            for handler in list {
                handler.call(event);
            }
        }
    }

    //--- Query API --------------------------------------------------------

    /// Number of handlers subscribed to `E`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.list::<E>().map(Vec::len).unwrap_or(0)
    }

    /// Returns true if `handler` is subscribed to `E`.
    pub fn is_subscribed<E: Event>(&self, handler: &Handler<E>) -> bool {
        self.list::<E>()
            .map(|list| list.iter().any(|h| h.same_as(handler)))
            .unwrap_or(false)
    }

    /// Subscribers across every event type.
    pub fn total_subscribers(&self) -> usize {
        self.handlers.values().map(|list| list.len()).sum()
    }

    /// True when no event type has a subscriber.
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(|list| list.is_empty())
    }

    //--- Cleanup ----------------------------------------------------------

    /// Drops every subscriber of `E`.
    pub fn clear<E: Event>(&mut self) {
        if let Some(list) = self.handlers.get_mut(&TypeId::of::<E>()) {
            list.clear_handlers();
        }
    }

    /// Drops every subscriber of every event type.
    pub fn clear_all(&mut self) {
        for list in self.handlers.values_mut() {
            list.clear_handlers();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn list<E: Event>(&self) -> Option<&Vec<Handler<E>>> {
        self.handlers
            .get(&TypeId::of::<E>())
            .and_then(|list| list.as_any().downcast_ref::<Vec<Handler<E>>>())
    }

    fn list_mut<E: Event>(&mut self) -> &mut Vec<Handler<E>> {
        self.handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<Handler<E>>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<Handler<E>>>()
            .expect("handler list stored under the wrong TypeId")
    }
}

//=========================================================================
// Tests
//=========================================================================
