//=========================================================================
// Settings
//=========================================================================
//
// Runtime configuration read by the scene manager.
//
// Sources:
//   MultiSceneSettings::load(path)   ← JSON settings file
//   MultiSceneSettings::from_json()  ← JSON text
//   MultiSceneBuilder::with_*()      ← programmatic overrides
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::error::MultiSceneError;
use crate::core::scene::{default_categories, GroupCategory, SceneGroup};

//=== LoadMode ============================================================

/// Which group [`MultiSceneManager::initialise`](crate::core::scene::MultiSceneManager::initialise)
/// loads at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Load the configured start group.
    #[default]
    Default,

    /// Load whichever group finished loading most recently.
    LastLoaded,

    /// Load nothing.
    None,
}

//=== MultiSceneSettings ==================================================

/// Configuration consumed by the scene manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSceneSettings {
    /// Listener callbacks invoked per frame before dispatch yields.
    #[serde(default = "MultiSceneSettings::default_listener_frequency")]
    pub listener_frequency: usize,

    /// Ask the host to release unused cached resources after unloading.
    #[serde(default)]
    pub use_unload_resources: bool,

    #[serde(default)]
    pub load_mode: LoadMode,

    #[serde(default)]
    pub start_group: Option<SceneGroup>,

    /// Updated by the manager every time a group finishes loading.
    #[serde(default)]
    pub last_group: Option<SceneGroup>,

    #[serde(default)]
    pub user_categories: Vec<GroupCategory>,
}

impl MultiSceneSettings {
    const fn default_listener_frequency() -> usize {
        5
    }

    //--- Loading ----------------------------------------------------------

    /// Reads and validates a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MultiSceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MultiSceneError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parses and validates settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self, MultiSceneError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, MultiSceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), MultiSceneError> {
        if self.listener_frequency == 0 {
            return Err(MultiSceneError::InvalidSettings(
                "listener_frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    /// Built-in categories followed by user categories.
    pub fn categories(&self) -> Vec<GroupCategory> {
        let mut all = default_categories();
        all.extend(self.user_categories.iter().cloned());
        all
    }

    /// The group `load_mode` points at, if any.
    pub fn initial_group(&self) -> Option<&SceneGroup> {
        match self.load_mode {
            LoadMode::Default => self.start_group.as_ref(),
            LoadMode::LastLoaded => self.last_group.as_ref(),
            LoadMode::None => None,
        }
    }
}

impl Default for MultiSceneSettings {
    fn default() -> Self {
        Self {
            listener_frequency: Self::default_listener_frequency(),
            use_unload_resources: false,
            load_mode: LoadMode::default(),
            start_group: None,
            last_group: None,
            user_categories: Vec::new(),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
