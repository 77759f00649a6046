//=========================================================================
// Scene System
//=========================================================================
//
// Scene groups and the manager that loads them.
//
// Architecture:
//   MultiSceneManager<H, L>
//     ├─ host: H (SceneHost)             load / unload requests
//     ├─ listeners: L (ListenerSource)   Awake / Enable / Start discovery
//     ├─ active: ActiveGroupState        active group, cached scene names
//     └─ events: EventBus                load notifications
//
// Flow:
//   load_group() → unload active → request loads → tick() … → dispatch
//
//=========================================================================

//=== Module Declarations =================================================

mod active_group;
mod category;
mod manager;
mod scene_group;

//=== Public API ==========================================================

pub use active_group::ActiveGroupState;
pub use category::{default_categories, GroupCategory, DEFAULT_CATEGORIES};
pub use manager::{LoadPhase, MultiSceneManager, PLACEHOLDER_SCENE};
pub use scene_group::{scene_name_from_path, Color, GroupDisplay, SceneEntry, SceneGroup};
