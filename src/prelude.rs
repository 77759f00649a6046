//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use multiscene::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Manager
pub use crate::builder::MultiSceneBuilder;
pub use crate::core::scene::{LoadPhase, MultiSceneManager};

// Scene groups
pub use crate::core::scene::{GroupDisplay, SceneEntry, SceneGroup};

// Listeners
pub use crate::core::listeners::{
    ListenerError, ListenerRegistry, ListenerSource, MultiSceneAwake, MultiSceneEnable,
    MultiSceneStart,
};

// Events
pub use crate::core::events::{
    BeforeScenesLoaded, EventBus, Handler, PostScenesLoaded, SceneGroupLoaded,
    SceneGroupLoadedWithGroup, SceneLoaded, SceneUnloaded,
};

// Host
pub use crate::core::host::{HeadlessSceneHost, HostEvent, SceneHost};

// Settings and errors
pub use crate::core::error::MultiSceneError;
pub use crate::core::settings::{LoadMode, MultiSceneSettings};
