//=========================================================================
// Handler List
//=========================================================================
//
// Type-erased storage for the subscribers of one event type, so the bus
// can keep every list in a single HashMap.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::Event;

//=== Handler =============================================================

/// Shared event callback.
///
/// Identity is the shared allocation: clones of one `Handler` are the
/// same subscriber, two `Handler::new` calls are different subscribers
/// even when they wrap identical closures.
pub struct Handler<E: Event> {
    callback: Arc<dyn Fn(&E) + Send + Sync>,
}

impl<E: Event> Handler<E> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// True when both handles refer to the same subscriber.
    pub fn same_as(&self, other: &Handler<E>) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }

    pub(super) fn call(&self, event: &E) {
        (self.callback)(event)
    }
}

impl<E: Event> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<E: Event> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("event", &std::any::type_name::<E>())
            .finish()
    }
}

//=== HandlerList =========================================================

/// Type-erased view of a `Vec<Handler<E>>`.
pub(super) trait HandlerList: Send + Sync {
    /// Drops every subscriber.
    fn clear_handlers(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> HandlerList for Vec<Handler<E>> {
    fn clear_handlers(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Ping;

    #[test]
    fn clones_share_identity() {
        let a = Handler::<Ping>::new(|_| {});
        let b = a.clone();
        let c = Handler::<Ping>::new(|_| {});

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn erased_list_reports_length_and_clears() {
        let mut list: Vec<Handler<Ping>> = vec![Handler::new(|_| {}), Handler::new(|_| {})];

        {
            let erased: &mut dyn HandlerList = &mut list;
            assert_eq!(erased.len(), 2);
            erased.clear_handlers();
            assert!(erased.is_empty());
        }

        assert!(list.is_empty());
    }

    #[test]
    fn erased_list_downcasts_to_concrete_type() {
        let mut list: Vec<Handler<Ping>> = Vec::new();
        let erased: &mut dyn HandlerList = &mut list;

        let concrete = erased.as_any_mut().downcast_mut::<Vec<Handler<Ping>>>();
        assert!(concrete.is_some());
        concrete.unwrap().push(Handler::new(|_| {}));

        assert!(erased.as_any().downcast_ref::<Vec<Handler<Ping>>>().is_some());
        assert_eq!(list.len(), 1);
    }
}
