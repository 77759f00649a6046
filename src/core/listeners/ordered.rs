//=========================================================================
// Ordered Listeners
//=========================================================================
//
// Pairs each discovered listener with its order and sorts them.
//
// Sorting is stable: listeners sharing an order keep discovery order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::{ListenerError, PhaseListener};

//=== OrderedListener =====================================================

/// A listener and the order it reported when it was discovered.
pub struct OrderedListener<T: ?Sized> {
    pub order: i32,
    pub listener: Arc<T>,
}

impl<T: ?Sized + PhaseListener> OrderedListener<T> {
    pub fn new(listener: Arc<T>) -> Self {
        Self {
            order: listener.phase_order(),
            listener,
        }
    }

    /// Invokes the listener's callback for its phase.
    pub fn dispatch(&self) -> Result<(), ListenerError> {
        self.listener.dispatch()
    }
}

impl<T: ?Sized> Clone for OrderedListener<T> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            listener: Arc::clone(&self.listener),
        }
    }
}

impl<T: ?Sized> fmt::Debug for OrderedListener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedListener")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

//=== order_listeners() ===================================================

/// Sorts listeners ascending by order, ties kept in input order.
///
/// Orders are read once, here; a listener changing its order later does
/// not affect an already sorted list.
pub fn order_listeners<T>(listeners: Vec<Arc<T>>) -> Vec<OrderedListener<T>>
where
    T: ?Sized + PhaseListener,
{
    let mut ordered: Vec<OrderedListener<T>> =
        listeners.into_iter().map(OrderedListener::new).collect();

    // `sort_by_key` is stable.
    ordered.sort_by_key(|entry| entry.order);
    ordered
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listeners::MultiSceneAwake;
    use std::sync::Mutex;

    struct Tagged {
        tag: &'static str,
        order: i32,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl MultiSceneAwake for Tagged {
        fn on_multi_scene_awake(&self) -> Result<(), ListenerError> {
            self.seen.lock().unwrap().push(self.tag);
            Ok(())
        }

        fn awake_order(&self) -> i32 {
            self.order
        }
    }

    struct Unordered(&'static str);

    impl MultiSceneAwake for Unordered {
        fn on_multi_scene_awake(&self) -> Result<(), ListenerError> {
            Err(ListenerError::new(self.0))
        }
    }

    fn tagged(tag: &'static str, order: i32) -> Arc<dyn MultiSceneAwake> {
        Arc::new(Tagged {
            tag,
            order,
            seen: Arc::default(),
        })
    }

    fn orders(list: &[OrderedListener<dyn MultiSceneAwake>]) -> Vec<i32> {
        list.iter().map(|e| e.order).collect()
    }

    #[test]
    fn sorts_ascending_and_keeps_ties_in_discovery_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let make = |tag, order| -> Arc<dyn MultiSceneAwake> {
            Arc::new(Tagged {
                tag,
                order,
                seen: Arc::clone(&seen),
            })
        };

        // Discovery order: C, A, B, D
        let ordered = order_listeners(vec![make("C", 0), make("A", -1), make("B", 0), make("D", 5)]);
        for entry in &ordered {
            entry.dispatch().unwrap();
        }

        assert_eq!(*seen.lock().unwrap(), vec!["A", "C", "B", "D"]);
        assert_eq!(orders(&ordered), vec![-1, 0, 0, 5]);
    }

    #[test]
    fn mixed_orders_sort_numerically() {
        let ordered = order_listeners(vec![
            tagged("a", 3),
            tagged("b", -1),
            tagged("c", 0),
            tagged("d", 0),
            tagged("e", 5),
        ]);

        assert_eq!(orders(&ordered), vec![-1, 0, 0, 3, 5]);
    }

    #[test]
    fn listener_without_order_sorts_as_zero() {
        let ordered = order_listeners(vec![
            tagged("late", 1),
            Arc::new(Unordered("plain")) as Arc<dyn MultiSceneAwake>,
            tagged("early", -1),
        ]);

        assert_eq!(orders(&ordered), vec![-1, 0, 1]);
        assert_eq!(ordered[1].dispatch().unwrap_err().message(), "plain");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let ordered = order_listeners(Vec::<Arc<dyn MultiSceneAwake>>::new());
        assert!(ordered.is_empty());
    }

    #[test]
    fn extreme_orders_are_accepted() {
        let ordered = order_listeners(vec![tagged("max", i32::MAX), tagged("min", i32::MIN)]);
        assert_eq!(orders(&ordered), vec![i32::MIN, i32::MAX]);
    }
}
