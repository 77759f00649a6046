//=========================================================================
// Scene Host Interface
//=========================================================================
//
// Contract between the scene manager and whatever actually loads scenes
// (an engine runtime, a headless server, a test double).
//
// Requests flow down through `SceneHost`; completions flow back as
// `HostEvent`s over a channel the manager drains once per tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use thiserror::Error;

//=== HostEvent ===========================================================

/// Notifications sent from the host to the scene manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A requested load finished and the scene is now active.
    SceneLoaded { name: String },

    /// A scene stopped being active.
    SceneUnloaded { name: String },
}

//=== HostError ===========================================================

/// Requests a host refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Load requested with an empty path.
    #[error("cannot load a scene from an empty path")]
    EmptyPath,

    /// The host has no scene at this path.
    #[error("no scene available at '{0}'")]
    Unavailable(String),

    /// The named scene is not active.
    #[error("scene '{0}' is not loaded")]
    NotLoaded(String),

    /// Unloading would leave the host with no active scene.
    #[error("scene '{0}' is the last active scene and cannot be unloaded")]
    LastActiveScene(String),

    /// Completion reported for a scene with no outstanding load.
    #[error("no pending load for scene '{0}'")]
    NoPendingLoad(String),
}

//=== SceneHost ===========================================================

/// Scene loading capability the manager drives.
///
/// Loads are asynchronous: `load_*` only issues the request, and the host
/// later reports completion with [`HostEvent::SceneLoaded`] on the
/// receiver returned by [`SceneHost::events`]. Completion order of
/// additive loads is up to the host.
pub trait SceneHost {
    /// Requests an exclusive load that replaces every active scene.
    fn load_primary(&mut self, path: &str) -> Result<(), HostError>;

    /// Requests a load alongside the scenes already active.
    fn load_additive(&mut self, path: &str) -> Result<(), HostError>;

    /// Requests that an active scene be unloaded.
    fn unload(&mut self, name: &str) -> Result<(), HostError>;

    /// Names of every active scene.
    fn active_scene_names(&self) -> Vec<String>;

    /// The scene currently marked as the active (primary) one.
    fn active_scene(&self) -> Option<String>;

    /// Creates an empty scene that keeps the active set non-empty.
    fn create_placeholder(&mut self, name: &str);

    /// Marks an active scene as the primary one.
    fn set_active_scene(&mut self, name: &str) -> Result<(), HostError>;

    /// Frees cached resources no longer referenced by an active scene.
    ///
    /// Hosts without such a cache can keep the default no-op.
    fn release_unused_resources(&mut self) {}

    /// Receiver for this host's completion notifications.
    fn events(&self) -> Receiver<HostEvent>;
}
