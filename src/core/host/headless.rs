//=========================================================================
// Headless Scene Host
//=========================================================================
//
// In-memory `SceneHost` with no engine behind it.
//
// Loads are held as pending until the owner completes them, which lets
// callers decide completion order explicitly:
//
//   load_primary("Scenes/Main.unity")  → pending: [Main]
//   complete("Main")                   → active: [Main], SceneLoaded sent
//
// A primary load replaces the scenes that were active when it was
// requested. Like most engine hosts it refuses to unload its last
// active scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{HostError, HostEvent, SceneHost};
use crate::core::scene::scene_name_from_path;

//=== HostRequest =========================================================

/// Every call the headless host received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    LoadPrimary(String),
    LoadAdditive(String),
    Unload(String),
    CreatePlaceholder(String),
    SetActive(String),
    ReleaseUnused,
}

//=== LoadKind ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Primary,
    Additive,
}

#[derive(Debug, Clone)]
struct PendingLoad {
    name: String,
    kind: LoadKind,
    replaces: Vec<String>,
}

//=== HeadlessSceneHost ===================================================

/// Scene host that keeps its active set in memory.
pub struct HeadlessSceneHost {
    active: Vec<String>,
    active_scene: Option<String>,
    pending: Vec<PendingLoad>,
    requests: Vec<HostRequest>,
    unavailable: HashSet<String>,
    sender: Sender<HostEvent>,
    receiver: Receiver<HostEvent>,
}

impl HeadlessSceneHost {
    //--- Construction -----------------------------------------------------

    /// Creates a host with no active scenes.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            active: Vec::new(),
            active_scene: None,
            pending: Vec::new(),
            requests: Vec::new(),
            unavailable: HashSet::new(),
            sender,
            receiver,
        }
    }

    /// Creates a host whose given scenes are already active.
    ///
    /// The first name becomes the active scene.
    pub fn with_active<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut host = Self::new();
        host.active = names.into_iter().map(Into::into).collect();
        host.active_scene = host.active.first().cloned();
        host
    }

    /// Makes every later load of `path` fail with [`HostError::Unavailable`].
    pub fn mark_unavailable(&mut self, path: impl Into<String>) {
        self.unavailable.insert(path.into());
    }

    //--- Completion -------------------------------------------------------

    /// Finishes the pending load of `name`.
    ///
    /// A primary load replaces the scenes active when it was requested; an
    /// additive one joins them. Sends [`HostEvent::SceneLoaded`] either way.
    pub fn complete(&mut self, name: &str) -> Result<(), HostError> {
        let Some(pos) = self.pending.iter().position(|p| p.name == name) else {
            return Err(HostError::NoPendingLoad(name.to_string()));
        };
        let load = self.pending.remove(pos);

        match load.kind {
            LoadKind::Primary => {
                for replaced in &load.replaces {
                    if let Some(pos) = self.active.iter().position(|n| n == replaced) {
                        let name = self.active.remove(pos);
                        self.notify(HostEvent::SceneUnloaded { name });
                    }
                }
                if !self.active.contains(&load.name) {
                    self.active.push(load.name.clone());
                }
                self.active_scene = Some(load.name.clone());
            }
            LoadKind::Additive => {
                if !self.active.contains(&load.name) {
                    self.active.push(load.name.clone());
                }
                if self.active_scene.is_none() {
                    self.active_scene = Some(load.name.clone());
                }
            }
        }

        debug!("Headless host finished loading {:?} ({:?})", load.name, load.kind);
        self.notify(HostEvent::SceneLoaded { name: load.name });
        Ok(())
    }

    /// Finishes the oldest pending load. Returns its scene name.
    pub fn complete_next(&mut self) -> Option<String> {
        let name = self.pending.first()?.name.clone();
        self.complete(&name).ok()?;
        Some(name)
    }

    /// Finishes every pending load in request order.
    pub fn complete_all(&mut self) -> Vec<String> {
        let mut completed = Vec::with_capacity(self.pending.len());
        while let Some(name) = self.complete_next() {
            completed.push(name);
        }
        completed
    }

    //--- Inspection -------------------------------------------------------

    /// Names of loads requested but not yet completed, in request order.
    pub fn pending_loads(&self) -> Vec<&str> {
        self.pending.iter().map(|p| p.name.as_str()).collect()
    }

    /// Every request received so far.
    pub fn requests(&self) -> &[HostRequest] {
        &self.requests
    }

    pub fn clear_requests(&mut self) {
        self.requests.clear();
    }

    /// Load requests only, in issue order.
    pub fn load_requests(&self) -> Vec<&HostRequest> {
        self.requests
            .iter()
            .filter(|r| matches!(r, HostRequest::LoadPrimary(_) | HostRequest::LoadAdditive(_)))
            .collect()
    }

    //--- Internal Helpers -------------------------------------------------

    fn request_load(&mut self, path: &str, kind: LoadKind) -> Result<(), HostError> {
        if path.is_empty() {
            return Err(HostError::EmptyPath);
        }
        if self.unavailable.contains(path) {
            return Err(HostError::Unavailable(path.to_string()));
        }

        let name = scene_name_from_path(path);
        let replaces = match kind {
            LoadKind::Primary => self.active.clone(),
            LoadKind::Additive => Vec::new(),
        };
        self.requests.push(match kind {
            LoadKind::Primary => HostRequest::LoadPrimary(path.to_string()),
            LoadKind::Additive => HostRequest::LoadAdditive(path.to_string()),
        });
        self.pending.push(PendingLoad { name, kind, replaces });
        Ok(())
    }

    fn notify(&self, event: HostEvent) {
        // The host holds its own receiver, so the channel never disconnects.
        if self.sender.send(event).is_err() {
            warn!("Headless host event channel closed");
        }
    }
}

impl Default for HeadlessSceneHost {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneHost ===========================================================

impl SceneHost for HeadlessSceneHost {
    fn load_primary(&mut self, path: &str) -> Result<(), HostError> {
        self.request_load(path, LoadKind::Primary)
    }

    fn load_additive(&mut self, path: &str) -> Result<(), HostError> {
        self.request_load(path, LoadKind::Additive)
    }

    fn unload(&mut self, name: &str) -> Result<(), HostError> {
        let Some(pos) = self.active.iter().position(|n| n == name) else {
            return Err(HostError::NotLoaded(name.to_string()));
        };
        if self.active.len() == 1 {
            return Err(HostError::LastActiveScene(name.to_string()));
        }

        self.requests.push(HostRequest::Unload(name.to_string()));
        let removed = self.active.remove(pos);

        if self.active_scene.as_deref() == Some(name) {
            self.active_scene = self.active.first().cloned();
        }

        self.notify(HostEvent::SceneUnloaded { name: removed });
        Ok(())
    }

    fn active_scene_names(&self) -> Vec<String> {
        self.active.clone()
    }

    fn active_scene(&self) -> Option<String> {
        self.active_scene.clone()
    }

    fn create_placeholder(&mut self, name: &str) {
        self.requests.push(HostRequest::CreatePlaceholder(name.to_string()));
        if !self.active.iter().any(|n| n == name) {
            self.active.push(name.to_string());
        }
        if self.active_scene.is_none() {
            self.active_scene = Some(name.to_string());
        }
    }

    fn set_active_scene(&mut self, name: &str) -> Result<(), HostError> {
        if !self.active.iter().any(|n| n == name) {
            return Err(HostError::NotLoaded(name.to_string()));
        }
        self.requests.push(HostRequest::SetActive(name.to_string()));
        self.active_scene = Some(name.to_string());
        Ok(())
    }

    fn release_unused_resources(&mut self) {
        self.requests.push(HostRequest::ReleaseUnused);
    }

    fn events(&self) -> Receiver<HostEvent> {
        self.receiver.clone()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
