//=========================================================================
// Scene Events
//=========================================================================
//
// Payloads published by the scene manager.
//
// Load lifecycle (in publish order):
//   BeforeScenesLoaded → SceneUnloaded* → SceneLoaded*
//     → PostScenesLoaded → SceneGroupLoaded → SceneGroupLoadedWithGroup
//
// Notices:
//   InvalidGroupNotice, UnresolvedPathNotice, ListenerFaulted
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::GroupInvalidReason;
use crate::core::listeners::Phase;
use crate::core::scene::SceneGroup;

//=== Lifecycle Events ====================================================

/// A valid group was accepted and teardown is about to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeforeScenesLoaded;

/// Every listener phase finished for the group just loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostScenesLoaded;

/// A load was requested for this scene. Fires at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLoaded {
    pub name: String,
}

/// An unload was requested for this scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneUnloaded {
    pub name: String,
}

/// A group finished loading and dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneGroupLoaded;

/// Same as [`SceneGroupLoaded`], carrying the group.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGroupLoadedWithGroup {
    pub group: SceneGroup,
}

//=== Notices =============================================================

/// A load was refused because the group failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGroupNotice {
    pub group: String,
    pub reason: GroupInvalidReason,
}

/// A load was refused because an entry had no path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedPathNotice {
    pub group: String,
    pub index: usize,
    pub name: String,
}

/// A listener callback returned an error. Dispatch continued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFaulted {
    pub phase: Phase,
    pub order: i32,
    pub message: String,
}
