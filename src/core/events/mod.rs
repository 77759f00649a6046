//=========================================================================
// Event System
//=========================================================================
//
// Typed, synchronous pub/sub decoupling the scene manager from whoever
// listens to it.
//
// Components:
// - `event_bus`: subscription map and delivery
// - `handler_list`: shared callbacks and their type-erased storage
// - `types`: every event the scene manager publishes
//
//=========================================================================

//=== Module Declarations =================================================

mod event_bus;
mod handler_list;
mod types;

//=== Public API ==========================================================

pub use event_bus::{Event, EventBus};
pub use handler_list::Handler;
pub use types::{
    BeforeScenesLoaded, InvalidGroupNotice, ListenerFaulted, PostScenesLoaded, SceneGroupLoaded,
    SceneGroupLoadedWithGroup, SceneLoaded, SceneUnloaded, UnresolvedPathNotice,
};
