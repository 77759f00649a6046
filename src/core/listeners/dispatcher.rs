//=========================================================================
// Phase Dispatcher
//=========================================================================
//
// Runs the Awake, Enable and Start phases over ordered listeners,
// spread across host frames.
//
// Each `resume()` call is one frame's worth of work:
//
//   resume() ──> invoke up to `listener_frequency` callbacks
//            ──> Yielded(Throttled)     budget spent, more to do
//            ──> Yielded(PhaseBoundary) phase done, next phase next frame
//            ──> Complete               Start phase done
//
// Nothing is skipped or called twice across yields, and a phase never
// starts before the previous one has invoked every listener.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{
    order_listeners, ListenerError, ListenerSource, MultiSceneAwake, MultiSceneEnable,
    MultiSceneStart, OrderedListener, Phase, PhaseListener,
};
use crate::core::events::{EventBus, ListenerFaulted};

//=== DispatchStep ========================================================

/// Why [`PhaseDispatcher::resume`] handed control back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldReason {
    /// `listener_frequency` callbacks ran during this frame.
    Throttled { phase: Phase },

    /// A phase finished; the next one begins on the following frame.
    PhaseBoundary { finished: Phase },
}

/// Result of one [`PhaseDispatcher::resume`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStep {
    /// More work remains. Resume on a later frame.
    Yielded(YieldReason),

    /// Every phase has run.
    Complete,
}

//=== PhaseDispatcher =====================================================

/// Frame-throttled, strictly sequential three-phase dispatch.
pub struct PhaseDispatcher {
    listener_frequency: usize,
    awake: Vec<OrderedListener<dyn MultiSceneAwake>>,
    enable: Vec<OrderedListener<dyn MultiSceneEnable>>,
    start: Vec<OrderedListener<dyn MultiSceneStart>>,
    phase: Option<Phase>,
    cursor: usize,
    invoked: usize,
    faults: usize,
}

impl PhaseDispatcher {
    //--- Construction -----------------------------------------------------

    /// Creates a dispatcher over already ordered listener sets.
    ///
    /// # Panics
    ///
    /// Panics if `listener_frequency == 0`.
    pub fn new(
        listener_frequency: usize,
        awake: Vec<OrderedListener<dyn MultiSceneAwake>>,
        enable: Vec<OrderedListener<dyn MultiSceneEnable>>,
        start: Vec<OrderedListener<dyn MultiSceneStart>>,
    ) -> Self {
        assert!(listener_frequency > 0, "Listener frequency must be at least 1");

        Self {
            listener_frequency,
            awake,
            enable,
            start,
            phase: Some(Phase::Awake),
            cursor: 0,
            invoked: 0,
            faults: 0,
        }
    }

    /// Discovers and orders listeners of the given scenes.
    ///
    /// # Panics
    ///
    /// Panics if `listener_frequency == 0`, like [`PhaseDispatcher::new`].
    /// Frequencies coming from [`MultiSceneSettings`](crate::core::settings::MultiSceneSettings)
    /// are already validated to be at least 1.
    pub fn discover<L>(source: &L, active_scenes: &[String], listener_frequency: usize) -> Self
    where
        L: ListenerSource + ?Sized,
    {
        let awake = order_listeners(source.find_awake(active_scenes));
        let enable = order_listeners(source.find_enable(active_scenes));
        let start = order_listeners(source.find_start(active_scenes));

        debug!(
            "Discovered listeners (awake: {}, enable: {}, start: {})",
            awake.len(),
            enable.len(),
            start.len()
        );

        Self::new(listener_frequency, awake, enable, start)
    }

    //--- Execution --------------------------------------------------------

    /// Runs one frame of dispatch.
    ///
    /// Listener errors are logged and published as [`ListenerFaulted`];
    /// the remaining listeners still run.
    pub fn resume(&mut self, events: &EventBus) -> DispatchStep {
        let Some(phase) = self.phase else {
            return DispatchStep::Complete;
        };

        let mut budget = self.listener_frequency;
        while self.cursor < self.phase_len(phase) {
            if let Some((order, Err(err))) = self.invoke(phase, self.cursor) {
                self.report_fault(phase, order, &err, events);
            }
            self.cursor += 1;
            self.invoked += 1;

            budget -= 1;
            if budget == 0 {
                return DispatchStep::Yielded(YieldReason::Throttled { phase });
            }
        }

        debug!("{} phase finished ({} listeners)", phase, self.phase_len(phase));
        self.cursor = 0;
        self.phase = phase.next();

        match self.phase {
            Some(_) => DispatchStep::Yielded(YieldReason::PhaseBoundary { finished: phase }),
            None => DispatchStep::Complete,
        }
    }

    /// Resumes until every phase has run. Returns the number of yields.
    pub fn run_to_completion(&mut self, events: &EventBus) -> usize {
        let mut yields = 0;
        while let DispatchStep::Yielded(_) = self.resume(events) {
            yields += 1;
        }
        yields
    }

    //--- Queries ----------------------------------------------------------

    /// Phase currently running, `None` once complete.
    pub fn current_phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_none()
    }

    /// Callbacks invoked so far, across all phases.
    pub fn invoked(&self) -> usize {
        self.invoked
    }

    /// Callbacks that returned an error so far.
    pub fn faults(&self) -> usize {
        self.faults
    }

    pub fn listener_count(&self, phase: Phase) -> usize {
        self.phase_len(phase)
    }

    //--- Internal Helpers -------------------------------------------------

    fn phase_len(&self, phase: Phase) -> usize {
        match phase {
            Phase::Awake => self.awake.len(),
            Phase::Enable => self.enable.len(),
            Phase::Start => self.start.len(),
        }
    }

    fn invoke(&self, phase: Phase, index: usize) -> Option<(i32, Result<(), ListenerError>)> {
        match phase {
            Phase::Awake => Self::invoke_at(&self.awake, index),
            Phase::Enable => Self::invoke_at(&self.enable, index),
            Phase::Start => Self::invoke_at(&self.start, index),
        }
    }

    fn invoke_at<T>(
        listeners: &[OrderedListener<T>],
        index: usize,
    ) -> Option<(i32, Result<(), ListenerError>)>
    where
        T: ?Sized + PhaseListener,
    {
        listeners.get(index).map(|entry| (entry.order, entry.dispatch()))
    }

    fn report_fault(&mut self, phase: Phase, order: i32, err: &ListenerError, events: &EventBus) {
        self.faults += 1;
        warn!(
            "Listener (order {}) failed in {}: {}",
            order,
            phase.callback_name(),
            err
        );
        events.publish(&ListenerFaulted {
            phase,
            order,
            message: err.to_string(),
        });
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listeners::ListenerRegistry;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: String,
        order: i32,
        fail: bool,
        log: Log,
    }

    impl Recorder {
        fn new(name: &str, order: i32, log: &Log) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                order,
                fail: false,
                log: Arc::clone(log),
            })
        }

        fn failing(name: &str, log: &Log) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                order: 0,
                fail: true,
                log: Arc::clone(log),
            })
        }

        fn record(&self, phase: &str) -> Result<(), ListenerError> {
            self.log.lock().unwrap().push(format!("{phase}:{}", self.name));
            if self.fail {
                Err(ListenerError::new(format!("{} broke", self.name)))
            } else {
                Ok(())
            }
        }
    }

    impl MultiSceneAwake for Recorder {
        fn on_multi_scene_awake(&self) -> Result<(), ListenerError> {
            self.record("awake")
        }

        fn awake_order(&self) -> i32 {
            self.order
        }
    }

    impl MultiSceneEnable for Recorder {
        fn on_multi_scene_enable(&self) -> Result<(), ListenerError> {
            self.record("enable")
        }
    }

    impl MultiSceneStart for Recorder {
        fn on_multi_scene_start(&self) -> Result<(), ListenerError> {
            self.record("start")
        }
    }

    fn awake_only(count: usize, log: &Log) -> ListenerRegistry {
        let mut registry = ListenerRegistry::new();
        for i in 1..=count {
            registry.add_awake("Main", Recorder::new(&format!("L{i}"), 0, log));
        }
        registry
    }

    fn active() -> Vec<String> {
        vec!["Main".to_string()]
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    #[should_panic(expected = "Listener frequency must be at least 1")]
    fn zero_frequency_panics() {
        PhaseDispatcher::new(0, Vec::new(), Vec::new(), Vec::new());
    }

    #[test]
    #[should_panic(expected = "Listener frequency must be at least 1")]
    fn discover_with_zero_frequency_panics() {
        PhaseDispatcher::discover(&ListenerRegistry::new(), &active(), 0);
    }

    #[test]
    fn throttles_every_listener_frequency_invocations() {
        let log = Log::default();
        let registry = awake_only(5, &log);
        let bus = EventBus::new();
        let mut dispatcher = PhaseDispatcher::discover(&registry, &active(), 2);

        assert_eq!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::Throttled { phase: Phase::Awake })
        );
        assert_eq!(entries(&log), vec!["awake:L1", "awake:L2"]);

        assert_eq!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::Throttled { phase: Phase::Awake })
        );
        assert_eq!(dispatcher.invoked(), 4);

        assert_eq!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::PhaseBoundary { finished: Phase::Awake })
        );
        assert_eq!(
            entries(&log),
            vec!["awake:L1", "awake:L2", "awake:L3", "awake:L4", "awake:L5"]
        );
    }

    #[test]
    fn five_listeners_at_frequency_two_yield_twice_for_throttling() {
        let log = Log::default();
        let registry = awake_only(5, &log);
        let bus = EventBus::new();
        let mut dispatcher = PhaseDispatcher::discover(&registry, &active(), 2);

        let mut throttled = 0;
        loop {
            match dispatcher.resume(&bus) {
                DispatchStep::Yielded(YieldReason::Throttled { .. }) => throttled += 1,
                DispatchStep::Yielded(YieldReason::PhaseBoundary { .. }) => {}
                DispatchStep::Complete => break,
            }
        }

        assert_eq!(throttled, 2);
        assert_eq!(dispatcher.invoked(), 5);
        assert_eq!(entries(&log).len(), 5);
    }

    #[test]
    fn phases_never_interleave() {
        let log = Log::default();
        let mut registry = ListenerRegistry::new();
        for name in ["A", "B", "C"] {
            let listener = Recorder::new(name, 0, &log);
            registry.add_awake("Main", listener.clone());
            registry.add_enable("Main", listener.clone());
            registry.add_start("Main", listener);
        }
        let bus = EventBus::new();
        let mut dispatcher = PhaseDispatcher::discover(&registry, &active(), 2);

        dispatcher.run_to_completion(&bus);

        assert_eq!(
            entries(&log),
            vec![
                "awake:A", "awake:B", "awake:C", "enable:A", "enable:B", "enable:C", "start:A",
                "start:B", "start:C",
            ]
        );
        assert!(dispatcher.is_complete());
    }

    #[test]
    fn awake_phase_follows_order() {
        let log = Log::default();
        let mut registry = ListenerRegistry::new();
        registry.add_awake("Main", Recorder::new("C", 0, &log));
        registry.add_awake("Main", Recorder::new("A", -1, &log));
        registry.add_awake("Main", Recorder::new("B", 0, &log));
        registry.add_awake("Main", Recorder::new("D", 5, &log));
        let bus = EventBus::new();

        PhaseDispatcher::discover(&registry, &active(), 10).run_to_completion(&bus);

        assert_eq!(entries(&log), vec!["awake:A", "awake:C", "awake:B", "awake:D"]);
    }

    #[test]
    fn empty_dispatch_completes_after_phase_boundaries() {
        let bus = EventBus::new();
        let mut dispatcher = PhaseDispatcher::new(3, Vec::new(), Vec::new(), Vec::new());

        assert_eq!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::PhaseBoundary { finished: Phase::Awake })
        );
        assert_eq!(dispatcher.current_phase(), Some(Phase::Enable));
        assert_eq!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::PhaseBoundary { finished: Phase::Enable })
        );
        assert_eq!(dispatcher.resume(&bus), DispatchStep::Complete);
        assert_eq!(dispatcher.resume(&bus), DispatchStep::Complete);
    }

    #[test]
    fn failing_listener_is_isolated_and_reported() {
        let log = Log::default();
        let mut registry = ListenerRegistry::new();
        registry.add_awake("Main", Recorder::new("first", 0, &log));
        registry.add_awake("Main", Recorder::failing("broken", &log));
        registry.add_awake("Main", Recorder::new("last", 0, &log));

        let faults = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&faults);
        let mut bus = EventBus::new();
        bus.on(move |e: &ListenerFaulted| sink.lock().unwrap().push(e.clone()));

        let mut dispatcher = PhaseDispatcher::discover(&registry, &active(), 5);
        dispatcher.run_to_completion(&bus);

        assert_eq!(entries(&log), vec!["awake:first", "awake:broken", "awake:last"]);
        assert_eq!(dispatcher.faults(), 1);
        assert_eq!(
            *faults.lock().unwrap(),
            vec![ListenerFaulted {
                phase: Phase::Awake,
                order: 0,
                message: "broken broke".to_string(),
            }]
        );
    }

    #[test]
    fn exact_multiple_yields_before_phase_boundary() {
        let log = Log::default();
        let registry = awake_only(4, &log);
        let bus = EventBus::new();
        let mut dispatcher = PhaseDispatcher::discover(&registry, &active(), 2);

        assert!(matches!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::Throttled { .. })
        ));
        assert!(matches!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::Throttled { .. })
        ));
        assert_eq!(
            dispatcher.resume(&bus),
            DispatchStep::Yielded(YieldReason::PhaseBoundary { finished: Phase::Awake })
        );
        assert_eq!(dispatcher.invoked(), 4);
    }
}
