//=========================================================================
// Scene Group
//=========================================================================
//
// Declarative, ordered list of scenes that load and unload as a unit.
//
// Layout:
//   entries[0]   → primary scene (replaces every active scene)
//   entries[1..] → additive scenes (loaded alongside the primary)
//
// Position is the only thing that decides primary vs additive.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::error::GroupInvalidReason;

//=== Scene Name Helper ===================================================

/// Derives a scene name from a host path (`Assets/Scenes/Main.unity` → `Main`).
///
/// Returns an empty string when the path has no file stem.
pub fn scene_name_from_path(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

//=== SceneEntry ==========================================================

/// One scene participating in a [`SceneGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SceneEntry {
    /// Logical scene name, as the host reports it once loaded.
    pub name: String,

    /// Path the host loader understands. Empty when unresolved.
    #[serde(default)]
    pub path: String,

    /// Whether the host's deployable build contains this scene.
    #[serde(default)]
    pub in_build_set: bool,
}

impl SceneEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, in_build_set: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            in_build_set,
        }
    }

    /// Builds an entry whose name is the file stem of `path`.
    pub fn from_path(path: impl Into<String>, in_build_set: bool) -> Self {
        let path = path.into();
        Self {
            name: scene_name_from_path(&path),
            path,
            in_build_set,
        }
    }

    /// True when the host has something to load for this entry.
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}

//=== Display Metadata ====================================================

/// RGBA colour used by authoring tools to tint a group's button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Authoring metadata carried with a group.
///
/// Never consulted by load logic; kept so groups round-trip through
/// settings files without losing what the authoring surface wrote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDisplay {
    pub category: String,
    pub category_index: usize,
    pub button_index: usize,
    pub button_label: String,
    pub button_color: Color,
}

//=== SceneGroup ==========================================================

/// Ordered collection of [`SceneEntry`] values loaded together.
///
/// Read-only to the scene manager; `clear` exists for authoring tools.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneGroup {
    /// Group name, used in diagnostics.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub entries: Vec<SceneEntry>,

    #[serde(default)]
    pub display: GroupDisplay,
}

impl SceneGroup {
    //--- Construction -----------------------------------------------------

    pub fn new(name: impl Into<String>, entries: Vec<SceneEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            display: GroupDisplay::default(),
        }
    }

    /// Builds a group from host paths, deriving each scene's name.
    ///
    /// ```rust
    /// # use multiscene::prelude::*;
    /// let group = SceneGroup::from_paths("Gameplay", ["Scenes/Main.unity", "Scenes/HUD.unity"]);
    /// assert_eq!(group.base_scene(), "Main");
    /// assert_eq!(group.additive_scenes(), vec!["HUD".to_string()]);
    /// ```
    pub fn from_paths<I, P>(name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let entries = paths
            .into_iter()
            .map(|path| SceneEntry::from_path(path, true))
            .collect();
        Self::new(name, entries)
    }

    pub fn with_display(mut self, display: GroupDisplay) -> Self {
        self.display = display;
        self
    }

    //--- Validation -------------------------------------------------------

    /// Checks the group can be loaded.
    ///
    /// A group is valid when it has at least one entry, every entry is
    /// named and no two entries are identical.
    pub fn validate(&self) -> Result<(), GroupInvalidReason> {
        let Some(base) = self.entries.first() else {
            return Err(GroupInvalidReason::Empty);
        };

        if base.name.is_empty() {
            return Err(GroupInvalidReason::EmptyBaseScene);
        }

        if let Some(index) = self.entries.iter().position(|e| e.name.is_empty()) {
            return Err(GroupInvalidReason::EmptySceneName { index });
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            if !seen.insert(entry) {
                return Err(GroupInvalidReason::DuplicateEntry { index });
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    //--- Queries ----------------------------------------------------------

    /// Name of the primary scene, or empty when the group has no entries.
    pub fn base_scene(&self) -> &str {
        self.entries.first().map(|e| e.name.as_str()).unwrap_or_default()
    }

    /// Names of every additive scene, skipping any that repeat the base name.
    pub fn additive_scenes(&self) -> Vec<String> {
        let base = self.base_scene();
        self.entries
            .iter()
            .skip(1)
            .filter(|e| e.name != base)
            .map(|e| e.name.clone())
            .collect()
    }

    /// The last declared entry; its load completion triggers listener dispatch.
    pub fn last_scene(&self) -> Option<&SceneEntry> {
        self.entries.last()
    }

    pub fn contains_scene(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label for diagnostics: the group name, or the base scene when unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.base_scene()
        } else {
            &self.name
        }
    }

    //--- Authoring --------------------------------------------------------

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

//=========================================================================
// Tests
//=========================================================================
