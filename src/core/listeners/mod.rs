//=========================================================================
// Listener System
//=========================================================================
//
// Ordered, three-phase callbacks fired once a scene group finished
// loading.
//
// Architecture:
//   ListenerSource ──find_*()──> Vec<Arc<dyn Capability>>
//          │                          │
//          │                    order_listeners()
//          │                          ↓
//          └────────────> PhaseDispatcher: Awake → Enable → Start
//                          (yields every `listener_frequency` calls)
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatcher;
mod ordered;
mod registry;

//=== External Dependencies ===============================================

use std::fmt;

use thiserror::Error;

//=== Public API ==========================================================

pub use dispatcher::{DispatchStep, PhaseDispatcher, YieldReason};
pub use ordered::{order_listeners, OrderedListener};
pub use registry::{ListenerRegistry, ListenerSource};

//=== Phase ===============================================================

/// The three dispatch phases, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Awake,
    Enable,
    Start,
}

impl Phase {
    /// All phases in the order they run.
    pub const ALL: [Phase; 3] = [Phase::Awake, Phase::Enable, Phase::Start];

    /// The phase that runs after this one.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Awake => Some(Phase::Enable),
            Phase::Enable => Some(Phase::Start),
            Phase::Start => None,
        }
    }

    /// Name of the callback this phase invokes.
    pub fn callback_name(self) -> &'static str {
        match self {
            Phase::Awake => "on_multi_scene_awake",
            Phase::Enable => "on_multi_scene_enable",
            Phase::Start => "on_multi_scene_start",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Awake => "Awake",
            Phase::Enable => "Enable",
            Phase::Start => "Start",
        };
        f.write_str(name)
    }
}

//=== ListenerError =======================================================

/// Failure reported by a listener callback.
///
/// Dispatch logs it, publishes a
/// [`ListenerFaulted`](crate::core::events::ListenerFaulted) notice and
/// moves on to the next listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

//=== Capability Traits ===================================================

/// Called first, once every scene of the group is loaded.
///
/// # Minimal Implementation
///
/// ```rust
/// # use multiscene::prelude::*;
/// struct Spawner;
///
/// impl MultiSceneAwake for Spawner {
///     fn on_multi_scene_awake(&self) -> Result<(), ListenerError> {
///         Ok(())
///     }
///
///     fn awake_order(&self) -> i32 {
///         -10
///     }
/// }
/// ```
pub trait MultiSceneAwake: Send + Sync {
    fn on_multi_scene_awake(&self) -> Result<(), ListenerError>;

    /// Position within the phase; lower runs earlier. Ties keep discovery order.
    fn awake_order(&self) -> i32 {
        0
    }
}

/// Called after every Awake callback returned.
pub trait MultiSceneEnable: Send + Sync {
    fn on_multi_scene_enable(&self) -> Result<(), ListenerError>;

    fn enable_order(&self) -> i32 {
        0
    }
}

/// Called after every Enable callback returned.
pub trait MultiSceneStart: Send + Sync {
    fn on_multi_scene_start(&self) -> Result<(), ListenerError>;

    fn start_order(&self) -> i32 {
        0
    }
}

//=== PhaseListener =======================================================

/// Common view of the three capabilities used for ordering and dispatch.
pub trait PhaseListener {
    const PHASE: Phase;

    fn phase_order(&self) -> i32;

    fn dispatch(&self) -> Result<(), ListenerError>;
}

impl<'a> PhaseListener for dyn MultiSceneAwake + 'a {
    const PHASE: Phase = Phase::Awake;

    fn phase_order(&self) -> i32 {
        self.awake_order()
    }

    fn dispatch(&self) -> Result<(), ListenerError> {
        self.on_multi_scene_awake()
    }
}

impl<'a> PhaseListener for dyn MultiSceneEnable + 'a {
    const PHASE: Phase = Phase::Enable;

    fn phase_order(&self) -> i32 {
        self.enable_order()
    }

    fn dispatch(&self) -> Result<(), ListenerError> {
        self.on_multi_scene_enable()
    }
}

impl<'a> PhaseListener for dyn MultiSceneStart + 'a {
    const PHASE: Phase = Phase::Start;

    fn phase_order(&self) -> i32 {
        self.start_order()
    }

    fn dispatch(&self) -> Result<(), ListenerError> {
        self.on_multi_scene_start()
    }
}

//=========================================================================
// Tests
//=========================================================================
