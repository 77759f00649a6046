//=========================================================================
// Scene Host Bridge
//=========================================================================
//
// Bridges the scene manager with the engine (or stand-in) that really
// loads scenes. Host backends can be swapped without touching the
// orchestration logic.
//
// Components:
// - `interface`: `SceneHost` trait, host events and errors (the contract)
// - `event_collector`: manager-side, per-tick draining of host events
// - `headless`: in-memory host for servers, tools and tests
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
mod headless;
mod interface;

//=== Public API ==========================================================

pub use headless::{HeadlessSceneHost, HostRequest, LoadKind};
pub use interface::{HostError, HostEvent, SceneHost};

//=== Internal API ========================================================

pub(crate) use event_collector::HostEventCollector;
