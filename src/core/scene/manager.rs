//=========================================================================
// Multi Scene Manager
//=========================================================================
//
// Loads and unloads scene groups through a `SceneHost`, then dispatches
// the ordered listener phases once the group is in.
//
// State machine (advanced by `tick()`, once per host frame):
//
//   Idle ──load_group()──> Unloading ──> Loading ──> AwaitingLastScene
//    ↑                                                     │
//    │                              last entry's SceneLoaded event
//    │                                                     ↓
//    └──── PostScenesLoaded / SceneGroupLoaded ──── Dispatching
//                                            (Awake → Enable → Start)
//
// Unloading and Loading complete inside `load_group()`; the manager only
// suspends while waiting on the host and between listener batches.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{ActiveGroupState, SceneGroup};
use crate::core::error::MultiSceneError;
use crate::core::events::{
    BeforeScenesLoaded, EventBus, InvalidGroupNotice, PostScenesLoaded, SceneGroupLoaded,
    SceneGroupLoadedWithGroup, SceneLoaded, SceneUnloaded, UnresolvedPathNotice,
};
use crate::core::host::{HostEvent, HostEventCollector, SceneHost};
use crate::core::listeners::{DispatchStep, ListenerSource, PhaseDispatcher};
use crate::core::settings::{LoadMode, MultiSceneSettings};

//=== Constants ===========================================================

/// Name of the empty scene kept active while a group is torn down.
pub const PLACEHOLDER_SCENE: &str = "Multi Scene Placeholder Scene";

//=== LoadPhase ===========================================================

/// Externally visible state of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing in flight; every operation is accepted.
    Idle,

    /// Active scenes are being unloaded.
    Unloading,

    /// Load requests for the group's entries are being issued.
    Loading,

    /// Waiting for the host to finish loading the last requested scene.
    AwaitingLastScene,

    /// Listener phases are running.
    Dispatching,
}

//=== LoadState ===========================================================

enum LoadState {
    Idle,
    Unloading,
    Loading,
    AwaitingLastScene { last: String },
    Dispatching(PhaseDispatcher),
}

impl LoadState {
    fn phase(&self) -> LoadPhase {
        match self {
            LoadState::Idle => LoadPhase::Idle,
            LoadState::Unloading => LoadPhase::Unloading,
            LoadState::Loading => LoadPhase::Loading,
            LoadState::AwaitingLastScene { .. } => LoadPhase::AwaitingLastScene,
            LoadState::Dispatching(_) => LoadPhase::Dispatching,
        }
    }
}

//=== MultiSceneManager ===================================================

/// Scene group orchestrator.
///
/// Create through [`MultiSceneBuilder`](crate::MultiSceneBuilder), then
/// call [`tick`](Self::tick) once per host frame.
///
/// ```rust
/// # use multiscene::prelude::*;
/// let mut manager = MultiSceneBuilder::new()
///     .build(HeadlessSceneHost::new(), ListenerRegistry::new());
///
/// let group = SceneGroup::from_paths("Game", ["Scenes/Main.unity", "Scenes/HUD.unity"]);
/// manager.load_group(group, true).unwrap();
/// assert_eq!(manager.phase(), LoadPhase::AwaitingLastScene);
///
/// manager.host_mut().complete_all();
/// while manager.tick() != LoadPhase::Idle {}
///
/// assert!(manager.is_scene_loaded("HUD"));
/// ```
pub struct MultiSceneManager<H: SceneHost, L: ListenerSource> {
    host: H,
    listeners: L,
    settings: MultiSceneSettings,
    events: EventBus,
    active: ActiveGroupState,
    collector: HostEventCollector,
    state: LoadState,
}

impl<H: SceneHost, L: ListenerSource> MultiSceneManager<H, L> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(host: H, listeners: L, settings: MultiSceneSettings) -> Self {
        let collector = HostEventCollector::new(host.events());
        Self {
            host,
            listeners,
            settings,
            events: EventBus::new(),
            active: ActiveGroupState::new(),
            collector,
            state: LoadState::Idle,
        }
    }

    //--- Group Loading ----------------------------------------------------

    /// Tears down the active scenes and loads `group`.
    ///
    /// Entry 0 is requested as the primary scene, the rest as additive.
    /// With `reload_duplicates == false` and the group's primary scene
    /// already active, scenes of the group that are already active stay
    /// loaded and are not requested again.
    ///
    /// Returns once every request is issued. Listener dispatch follows
    /// on later ticks, after the host reports the last requested scene.
    ///
    /// # Errors
    ///
    /// - [`MultiSceneError::Busy`] unless the manager is idle
    /// - [`MultiSceneError::InvalidGroup`] and
    ///   [`MultiSceneError::UnresolvedScenePath`] before anything is touched
    /// - [`MultiSceneError::Host`] if the host refuses a request
    pub fn load_group(
        &mut self,
        group: SceneGroup,
        reload_duplicates: bool,
    ) -> Result<(), MultiSceneError> {
        self.ensure_idle()?;
        self.check_loadable(&group)?;

        info!("Loading scene group '{}' ({} scenes)", group.label(), group.len());

        let keep = if reload_duplicates {
            HashSet::new()
        } else {
            self.already_active_entries(&group)
        };

        self.active.set_active_group(group.clone());
        self.events.publish(&BeforeScenesLoaded);

        //--- Unloading ---
        self.set_state(LoadState::Unloading);
        if let Err(err) = self.teardown(&group, &keep) {
            self.abort(&err);
            return Err(err);
        }

        // Unload notifications are not what the last-scene wait is for.
        let stale = self.collector.discard_pending();
        if stale > 0 {
            debug!("Discarded {} host events from teardown", stale);
        }

        //--- Loading ---
        self.set_state(LoadState::Loading);
        let last = match self.request_loads(&group, &keep) {
            Ok(last) => last,
            Err(err) => {
                self.abort(&err);
                return Err(err);
            }
        };

        match last {
            Some(last) => {
                debug!("Waiting for '{}' to finish loading", last);
                self.set_state(LoadState::AwaitingLastScene { last });
            }
            None => {
                debug!("Every scene of '{}' was already active", group.label());
                self.begin_dispatch();
            }
        }

        Ok(())
    }

    /// Loads the configured start group.
    pub fn load_start_group(&mut self, reload_duplicates: bool) -> Result<(), MultiSceneError> {
        let group = self
            .settings
            .start_group
            .clone()
            .ok_or(MultiSceneError::NoGroupConfigured { mode: LoadMode::Default })?;
        self.load_group(group, reload_duplicates)
    }

    /// Loads whatever the configured load mode selects at start-up.
    ///
    /// [`LoadMode::None`] loads nothing.
    pub fn initialise(&mut self) -> Result<(), MultiSceneError> {
        let mode = self.settings.load_mode;
        if mode == LoadMode::None {
            debug!("Load mode is None, nothing loaded at start-up");
            return Ok(());
        }

        let group = self
            .settings
            .initial_group()
            .cloned()
            .ok_or(MultiSceneError::NoGroupConfigured { mode })?;
        self.load_group(group, true)
    }

    /// Unloads everything and loads the active group again.
    pub fn reload_current(&mut self) -> Result<(), MultiSceneError> {
        self.ensure_idle()?;
        let group = self
            .active
            .active_group()
            .cloned()
            .ok_or(MultiSceneError::NoActiveGroup)?;

        self.unload_all_active()?;
        self.load_group(group, true)
    }

    /// Records `group` as active without loading anything.
    ///
    /// For scenes that were loaded outside the manager, e.g. by the host
    /// at boot.
    pub fn set_group(&mut self, group: SceneGroup) -> Result<(), MultiSceneError> {
        self.ensure_idle()?;
        debug!("Active scene group set to '{}'", group.label());
        self.active.set_active_group(group);
        self.active.refresh(self.host.active_scene_names());
        Ok(())
    }

    //--- Unloading --------------------------------------------------------

    /// Unloads every active scene, leaving only the placeholder scene.
    pub fn unload_all_active(&mut self) -> Result<(), MultiSceneError> {
        self.ensure_idle()?;
        self.set_state(LoadState::Unloading);

        let result = self.unload_all_but_placeholder();
        self.set_state(LoadState::Idle);
        result
    }

    /// Unloads every active scene except the host's primary one.
    pub fn unload_all_additive(&mut self) -> Result<(), MultiSceneError> {
        self.ensure_idle()?;
        self.set_state(LoadState::Unloading);

        let primary = self.host.active_scene();
        for name in self.host.active_scene_names().into_iter().rev() {
            if primary.as_deref() != Some(name.as_str()) {
                self.request_unload(&name);
            }
        }
        self.release_unused_if_enabled();
        self.active.invalidate();

        self.set_state(LoadState::Idle);
        Ok(())
    }

    //--- Frame Update -----------------------------------------------------

    /// Advances the manager by one host frame.
    ///
    /// Drains host notifications, detects the last-scene signal and runs
    /// one batch of listener callbacks. Returns the phase after the tick.
    pub fn tick(&mut self) -> LoadPhase {
        let host_events = self.collector.collect_tick();
        if !host_events.is_empty() {
            self.active.invalidate();
        }

        match std::mem::replace(&mut self.state, LoadState::Idle) {
            LoadState::AwaitingLastScene { last } => {
                let arrived = host_events
                    .iter()
                    .any(|event| matches!(event, HostEvent::SceneLoaded { name } if *name == last));

                if arrived {
                    debug!("Last scene '{}' loaded", last);
                    self.begin_dispatch();
                    self.resume_dispatch();
                } else {
                    self.state = LoadState::AwaitingLastScene { last };
                }
            }
            LoadState::Dispatching(dispatcher) => {
                self.state = LoadState::Dispatching(dispatcher);
                self.resume_dispatch();
            }
            other => self.state = other,
        }

        self.phase()
    }

    //--- Queries ----------------------------------------------------------

    pub fn phase(&self) -> LoadPhase {
        self.state.phase()
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == LoadPhase::Idle
    }

    /// False once the host's event channel has closed; a pending
    /// last-scene wait can then never finish.
    pub fn host_connected(&self) -> bool {
        self.collector.is_connected()
    }

    pub fn active_group(&self) -> Option<&SceneGroup> {
        self.active.active_group()
    }

    /// Whether the active group declares a scene called `name`.
    pub fn is_scene_in_group(&self, name: &str) -> bool {
        self.active.is_scene_in_group(name)
    }

    /// Whether a scene called `name` is active on the host.
    ///
    /// Refreshes the cached name set first if a load or unload made it stale.
    pub fn is_scene_loaded(&mut self, name: &str) -> bool {
        if !self.active.has_cached_names() {
            self.active.refresh(self.host.active_scene_names());
        }
        self.active.cached_contains(name).unwrap_or(false)
    }

    //--- Accessors --------------------------------------------------------

    pub fn settings(&self) -> &MultiSceneSettings {
        &self.settings
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Event bus for subscribing to load notifications.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn listeners(&self) -> &L {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut L {
        &mut self.listeners
    }

    //--- Internal Helpers -------------------------------------------------

    fn set_state(&mut self, state: LoadState) {
        debug!("Scene manager: {:?} -> {:?}", self.state.phase(), state.phase());
        self.state = state;
    }

    fn ensure_idle(&self) -> Result<(), MultiSceneError> {
        match self.phase() {
            LoadPhase::Idle => Ok(()),
            phase => {
                warn!("Scene manager busy ({:?}), request rejected", phase);
                Err(MultiSceneError::Busy { phase })
            }
        }
    }

    fn check_loadable(&self, group: &SceneGroup) -> Result<(), MultiSceneError> {
        if let Err(reason) = group.validate() {
            warn!("Scene group '{}' is invalid: {}", group.label(), reason);
            self.events.publish(&InvalidGroupNotice {
                group: group.name.clone(),
                reason,
            });
            return Err(MultiSceneError::InvalidGroup {
                group: group.name.clone(),
                reason,
            });
        }

        if let Some((index, entry)) = group.entries.iter().enumerate().find(|(_, e)| !e.has_path()) {
            warn!(
                "Scene '{}' (index {}) in group '{}' has no path",
                entry.name,
                index,
                group.label()
            );
            self.events.publish(&UnresolvedPathNotice {
                group: group.name.clone(),
                index,
                name: entry.name.clone(),
            });
            return Err(MultiSceneError::UnresolvedScenePath {
                group: group.name.clone(),
                index,
                name: entry.name.clone(),
            });
        }

        for entry in group.entries.iter().filter(|e| !e.in_build_set) {
            warn!("Scene '{}' is not part of the host build set", entry.name);
        }

        Ok(())
    }

    /// Group scenes that can stay loaded across the load.
    ///
    /// Empty unless the primary scene itself is active, since a primary
    /// load replaces everything.
    fn already_active_entries(&self, group: &SceneGroup) -> HashSet<String> {
        let active: HashSet<String> = self.host.active_scene_names().into_iter().collect();
        if !active.contains(group.base_scene()) {
            return HashSet::new();
        }

        group
            .entries
            .iter()
            .filter(|entry| active.contains(&entry.name))
            .map(|entry| entry.name.clone())
            .collect()
    }

    fn teardown(&mut self, group: &SceneGroup, keep: &HashSet<String>) -> Result<(), MultiSceneError> {
        if keep.is_empty() {
            return self.unload_all_but_placeholder();
        }

        self.host.set_active_scene(group.base_scene())?;
        for name in self.host.active_scene_names().into_iter().rev() {
            if !keep.contains(&name) {
                self.request_unload(&name);
            }
        }
        self.release_unused_if_enabled();
        self.active.invalidate();
        Ok(())
    }

    fn unload_all_but_placeholder(&mut self) -> Result<(), MultiSceneError> {
        self.host.create_placeholder(PLACEHOLDER_SCENE);
        self.host.set_active_scene(PLACEHOLDER_SCENE)?;

        for name in self.host.active_scene_names().into_iter().rev() {
            if name != PLACEHOLDER_SCENE {
                self.request_unload(&name);
            }
        }
        self.release_unused_if_enabled();
        self.active.invalidate();
        Ok(())
    }

    fn request_unload(&mut self, name: &str) {
        match self.host.unload(name) {
            Ok(()) => {
                debug!("Unload requested: {}", name);
                self.events.publish(&SceneUnloaded {
                    name: name.to_string(),
                });
            }
            Err(err) => error!("Failed to unload scene '{}': {}", name, err),
        }
    }

    fn release_unused_if_enabled(&mut self) {
        if self.settings.use_unload_resources {
            debug!("Releasing unused host resources");
            self.host.release_unused_resources();
        }
    }

    /// Issues every load request. Returns the last scene requested.
    fn request_loads(
        &mut self,
        group: &SceneGroup,
        keep: &HashSet<String>,
    ) -> Result<Option<String>, MultiSceneError> {
        let mut last = None;

        for (index, entry) in group.entries.iter().enumerate() {
            if keep.contains(&entry.name) {
                debug!("Scene '{}' already active, not reloading", entry.name);
                continue;
            }

            let request = if index == 0 {
                self.host.load_primary(&entry.path)
            } else {
                self.host.load_additive(&entry.path)
            };

            if let Err(err) = request {
                error!("Host refused to load '{}': {}", entry.path, err);
                return Err(err.into());
            }

            debug!(
                "{} load requested: {}",
                if index == 0 { "Primary" } else { "Additive" },
                entry.name
            );
            self.events.publish(&SceneLoaded {
                name: entry.name.clone(),
            });
            last = Some(entry.name.clone());
        }

        Ok(last)
    }

    fn abort(&mut self, err: &MultiSceneError) {
        warn!("Scene group load aborted: {}", err);
        self.active.invalidate();
        self.set_state(LoadState::Idle);
    }

    fn begin_dispatch(&mut self) {
        let active_scenes = self.host.active_scene_names();
        self.active.refresh(active_scenes.iter().cloned());

        let dispatcher = PhaseDispatcher::discover(
            &self.listeners,
            &active_scenes,
            self.settings.listener_frequency,
        );
        self.set_state(LoadState::Dispatching(dispatcher));
    }

    fn resume_dispatch(&mut self) {
        let LoadState::Dispatching(dispatcher) = &mut self.state else {
            return;
        };

        match dispatcher.resume(&self.events) {
            DispatchStep::Yielded(reason) => debug!("Listener dispatch yielded: {:?}", reason),
            DispatchStep::Complete => self.finish_load(),
        }
    }

    fn finish_load(&mut self) {
        self.set_state(LoadState::Idle);

        if self.host.active_scene_names().iter().any(|n| n == PLACEHOLDER_SCENE) {
            if let Err(err) = self.host.unload(PLACEHOLDER_SCENE) {
                warn!("Failed to unload placeholder scene: {}", err);
            }
        }
        self.active.refresh(self.host.active_scene_names());

        let Some(group) = self.active.active_group().cloned() else {
            return;
        };

        info!("Scene group '{}' loaded", group.label());
        self.settings.last_group = Some(group.clone());

        self.events.publish(&PostScenesLoaded);
        self.events.publish(&SceneGroupLoaded);
        self.events.publish(&SceneGroupLoadedWithGroup { group });
    }
}

//=========================================================================
// Tests
//=========================================================================
