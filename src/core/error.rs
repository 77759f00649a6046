//=========================================================================
// Errors
//=========================================================================
//
// Error types surfaced by the scene group orchestrator.
//
//   MultiSceneError      ← every fallible public operation
//     ├─ GroupInvalidReason (why a group failed validation)
//     └─ HostError          (a scene host refused a request)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::host::HostError;
use crate::core::scene::LoadPhase;
use crate::core::settings::LoadMode;

//=== GroupInvalidReason ==================================================

/// Reason a [`SceneGroup`](crate::core::scene::SceneGroup) failed its
/// validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GroupInvalidReason {
    /// The group declares no scenes.
    #[error("group has no scenes")]
    Empty,

    /// The primary scene (index 0) has no name.
    #[error("base scene has no name")]
    EmptyBaseScene,

    /// A scene entry has no name.
    #[error("scene at index {index} has no name")]
    EmptySceneName { index: usize },

    /// A scene entry is identical to an earlier one.
    #[error("scene at index {index} duplicates an earlier entry")]
    DuplicateEntry { index: usize },
}

//=== MultiSceneError =====================================================

/// Errors returned by [`MultiSceneManager`](crate::core::scene::MultiSceneManager)
/// and the settings loader.
#[derive(Debug, Error)]
pub enum MultiSceneError {
    /// Load refused before any scene was touched.
    #[error("scene group '{group}' is invalid: {reason}")]
    InvalidGroup {
        group: String,
        reason: GroupInvalidReason,
    },

    /// A scene entry has no path the host could load.
    #[error("scene '{name}' (index {index}) in group '{group}' has no resolved path")]
    UnresolvedScenePath {
        group: String,
        index: usize,
        name: String,
    },

    /// Another load or unload is still in flight.
    #[error("scene manager is busy ({phase:?})")]
    Busy { phase: LoadPhase },

    /// An operation needed an active group and there is none.
    #[error("no scene group is active")]
    NoActiveGroup,

    /// The configured load mode points at a group that is not set.
    #[error("no scene group configured for load mode {mode:?}")]
    NoGroupConfigured { mode: LoadMode },

    /// The scene host refused a request.
    #[error("scene host rejected request: {0}")]
    Host(#[from] HostError),

    #[error("failed to read settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_group_message_names_group_and_reason() {
        let err = MultiSceneError::InvalidGroup {
            group: "Gameplay".to_string(),
            reason: GroupInvalidReason::DuplicateEntry { index: 2 },
        };

        assert_eq!(
            err.to_string(),
            "scene group 'Gameplay' is invalid: scene at index 2 duplicates an earlier entry"
        );
    }

    #[test]
    fn host_error_converts_into_multi_scene_error() {
        let err: MultiSceneError = HostError::NotLoaded("HUD".to_string()).into();
        assert!(matches!(err, MultiSceneError::Host(HostError::NotLoaded(ref n)) if n == "HUD"));
    }

    #[test]
    fn unresolved_path_message_identifies_entry() {
        let err = MultiSceneError::UnresolvedScenePath {
            group: "Menu".to_string(),
            index: 1,
            name: "Overlay".to_string(),
        };

        let text = err.to_string();
        assert!(text.contains("Overlay"));
        assert!(text.contains("index 1"));
        assert!(text.contains("Menu"));
    }
}
