//=========================================================================
// Host Event Collector
//=========================================================================
//
// Drains host notifications once per tick with a bounded budget.
//
// Architecture:
//   Receiver<HostEvent> → collect_tick() → Vec<HostEvent> → scene manager
//
// Bounded draining keeps one tick from stalling on a notification flood.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::HostEvent;

//=== HostEventCollector ==================================================

/// Collects pending host events for the current tick.
pub(crate) struct HostEventCollector {
    receiver: Receiver<HostEvent>,
    connected: bool,
}

impl HostEventCollector {
    /// Most events handled in one tick; the rest wait for the next one.
    pub(crate) const MAX_EVENTS_PER_TICK: usize = 256;

    pub(crate) fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            connected: true,
        }
    }

    /// Takes up to [`Self::MAX_EVENTS_PER_TICK`] pending events.
    pub(crate) fn collect_tick(&mut self) -> Vec<HostEvent> {
        let mut events = Vec::new();

        while events.len() < Self::MAX_EVENTS_PER_TICK {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.connected {
                        warn!("Scene host event channel disconnected");
                        self.connected = false;
                    }
                    break;
                }
            }
        }

        if events.len() >= Self::MAX_EVENTS_PER_TICK {
            warn!("Host event backlog: drained {} events this tick", events.len());
        }

        events
    }

    /// Discards everything pending. Returns how many events were dropped.
    pub(crate) fn discard_pending(&mut self) -> usize {
        self.receiver.try_iter().count()
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connected
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn loaded(name: &str) -> HostEvent {
        HostEvent::SceneLoaded {
            name: name.to_string(),
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<HostEvent>();
        let mut collector = HostEventCollector::new(rx);

        assert!(collector.collect_tick().is_empty());
        assert!(collector.is_connected());
    }

    #[test]
    fn collect_preserves_arrival_order() {
        let (tx, rx) = unbounded();
        let mut collector = HostEventCollector::new(rx);

        tx.send(loaded("HUD")).unwrap();
        tx.send(loaded("Main")).unwrap();

        assert_eq!(collector.collect_tick(), vec![loaded("HUD"), loaded("Main")]);
        assert!(collector.collect_tick().is_empty());
    }

    #[test]
    fn collect_is_bounded_per_tick() {
        let (tx, rx) = unbounded();
        let mut collector = HostEventCollector::new(rx);

        for i in 0..HostEventCollector::MAX_EVENTS_PER_TICK + 3 {
            tx.send(loaded(&format!("Scene{i}"))).unwrap();
        }

        assert_eq!(collector.collect_tick().len(), HostEventCollector::MAX_EVENTS_PER_TICK);
        assert_eq!(collector.collect_tick().len(), 3);
    }

    #[test]
    fn collect_marks_disconnect() {
        let (tx, rx) = unbounded::<HostEvent>();
        let mut collector = HostEventCollector::new(rx);

        tx.send(loaded("Main")).unwrap();
        drop(tx);

        assert_eq!(collector.collect_tick().len(), 1);
        assert!(!collector.is_connected());
    }

    #[test]
    fn discard_pending_drops_stale_events() {
        let (tx, rx) = unbounded();
        let mut collector = HostEventCollector::new(rx);

        tx.send(loaded("Old")).unwrap();
        tx.send(loaded("Older")).unwrap();

        assert_eq!(collector.discard_pending(), 2);
        assert!(collector.collect_tick().is_empty());
    }
}
