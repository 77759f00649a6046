//=========================================================================
// Multi Scene Library Root
//
// Scene group orchestration: load a declared group of scenes as one unit
// (a primary scene plus additive ones), then run ordered Awake, Enable and
// Start callbacks across frames once the group is in.
//
// Responsibilities:
// - Expose the manager facade (`MultiSceneBuilder` → `MultiSceneManager`)
// - Define the host and listener boundaries engines plug into
// - Keep the state machine independent of any particular engine
//
// Typical usage:
// ```no_run
// use multiscene::prelude::*;
//
// let mut manager = MultiSceneBuilder::new()
//     .build(HeadlessSceneHost::new(), ListenerRegistry::new());
//
// manager.load_group(SceneGroup::from_paths("Game", ["Main.unity"]), true)?;
// loop {
//     manager.tick();
// }
// # Ok::<(), MultiSceneError>(())
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene manager, listener dispatch, event bus, host
// boundary and settings. Most code only needs the `prelude`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `builder` defines the construction entry point.
//
mod builder;

//--- Public Exports ------------------------------------------------------

pub use builder::MultiSceneBuilder;
