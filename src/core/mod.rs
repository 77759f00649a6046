//=========================================================================
// Core Systems
//
// Everything the scene group orchestrator is made of.
//
// Subsystems:
// - `scene`: scene groups, active state and the `MultiSceneManager`
// - `listeners`: ordered Awake / Enable / Start dispatch
// - `events`: typed, in-process notification bus
// - `host`: the boundary to whatever actually loads scenes
// - `settings`: JSON-backed configuration
// - `error`: crate error types
//
// Notes:
// Nothing here spawns threads. The manager is advanced by its owner
// calling `tick()` once per host frame; host completions arrive over a
// channel drained during that call.
//
//=========================================================================

pub mod error;
pub mod events;
pub mod host;
pub mod listeners;
pub mod scene;
pub mod settings;

//=== Re-exports ==========================================================

pub use error::{GroupInvalidReason, MultiSceneError};
pub use scene::{LoadPhase, MultiSceneManager, SceneEntry, SceneGroup};
pub use settings::{LoadMode, MultiSceneSettings};
