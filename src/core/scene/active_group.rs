//=========================================================================
// Active Group State
//=========================================================================
//
// What the scene manager believes is loaded.
//
// Contains:
// - active_group: the group most recently requested (or set)
// - a cached set of active scene names, invalidated on every host change
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::SceneGroup;

//=== ActiveGroupState ====================================================

/// Scene-level state owned by one [`MultiSceneManager`](super::MultiSceneManager).
///
/// Only the manager mutates it; everything else reads through the
/// manager's accessors.
#[derive(Debug, Default)]
pub struct ActiveGroupState {
    active_group: Option<SceneGroup>,
    active_names: HashSet<String>,
    has_cached_names: bool,
}

impl ActiveGroupState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Active Group -----------------------------------------------------

    pub fn active_group(&self) -> Option<&SceneGroup> {
        self.active_group.as_ref()
    }

    pub(crate) fn set_active_group(&mut self, group: SceneGroup) {
        self.active_group = Some(group);
    }

    /// Whether the active group declares a scene called `name`.
    pub fn is_scene_in_group(&self, name: &str) -> bool {
        self.active_group
            .as_ref()
            .is_some_and(|group| group.contains_scene(name))
    }

    //--- Name Cache -------------------------------------------------------

    /// Replaces the cached names with a fresh snapshot from the host.
    pub(crate) fn refresh<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.active_names = names.into_iter().collect();
        self.has_cached_names = true;
    }

    pub(crate) fn invalidate(&mut self) {
        self.has_cached_names = false;
    }

    pub fn has_cached_names(&self) -> bool {
        self.has_cached_names
    }

    /// Cached membership test; `None` while the cache is stale.
    pub fn cached_contains(&self, name: &str) -> Option<bool> {
        self.has_cached_names
            .then(|| self.active_names.contains(name))
    }
}

//=========================================================================
// Tests
//=========================================================================
