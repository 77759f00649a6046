//=========================================================================
// Multi Scene Builder
//
// Entry point for configuring and constructing a scene manager.
//
// Architecture:
// ```text
//     MultiSceneBuilder  ──build(host, listeners)──>  MultiSceneManager
//         │                                               │
//         ├─ with_settings()                              └─ tick() per frame
//         ├─ with_listener_frequency()
//         └─ with_load_mode() ...
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::host::SceneHost;
use crate::core::listeners::ListenerSource;
use crate::core::scene::{MultiSceneManager, SceneGroup};
use crate::core::settings::{LoadMode, MultiSceneSettings};

//=== MultiSceneBuilder ===================================================

/// Builder for configuring and constructing a [`MultiSceneManager`].
///
/// # Default Values
///
/// - **Listener frequency**: 5 callbacks per frame
/// - **Unload resources**: off
/// - **Load mode**: [`LoadMode::Default`]
///
/// # Examples
///
/// Defaults:
/// ```rust
/// use multiscene::prelude::*;
///
/// let manager = MultiSceneBuilder::new()
///     .build(HeadlessSceneHost::new(), ListenerRegistry::new());
/// assert!(manager.is_idle());
/// ```
///
/// From a settings file:
/// ```no_run
/// # use multiscene::prelude::*;
/// let settings = MultiSceneSettings::load("multiscene.json")?;
///
/// let mut manager = MultiSceneBuilder::new()
///     .with_settings(settings)
///     .with_listener_frequency(10)
///     .build(HeadlessSceneHost::new(), ListenerRegistry::new());
/// manager.initialise()?;
/// # Ok::<(), MultiSceneError>(())
/// ```
pub struct MultiSceneBuilder {
    settings: MultiSceneSettings,
}

impl MultiSceneBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: MultiSceneSettings::default(),
        }
    }

    /// Replaces every setting at once.
    ///
    /// Later `with_*` calls override individual fields.
    ///
    /// # Panics
    ///
    /// Panics if `settings.listener_frequency == 0`.
    pub fn with_settings(mut self, settings: MultiSceneSettings) -> Self {
        assert!(
            settings.listener_frequency > 0,
            "Listener frequency must be positive"
        );
        self.settings = settings;
        self
    }

    /// Sets how many listener callbacks run per frame before dispatch
    /// yields. Lower values spread a large listener set over more frames.
    ///
    /// Default: 5
    ///
    /// # Panics
    ///
    /// Panics if `frequency == 0`.
    pub fn with_listener_frequency(mut self, frequency: usize) -> Self {
        assert!(frequency > 0, "Listener frequency must be positive");
        self.settings.listener_frequency = frequency;
        self
    }

    /// Asks the host to release unused resources after every unload.
    ///
    /// Default: false
    pub fn with_unload_resources(mut self, enabled: bool) -> Self {
        self.settings.use_unload_resources = enabled;
        self
    }

    /// Selects what [`MultiSceneManager::initialise`] loads.
    pub fn with_load_mode(mut self, mode: LoadMode) -> Self {
        self.settings.load_mode = mode;
        self
    }

    pub fn with_start_group(mut self, group: SceneGroup) -> Self {
        self.settings.start_group = Some(group);
        self
    }

    pub fn with_last_group(mut self, group: SceneGroup) -> Self {
        self.settings.last_group = Some(group);
        self
    }

    /// Builds the manager around a host and a listener source.
    pub fn build<H, L>(self, host: H, listeners: L) -> MultiSceneManager<H, L>
    where
        H: SceneHost,
        L: ListenerSource,
    {
        info!(
            "Building scene manager (listener frequency: {}, load mode: {:?})",
            self.settings.listener_frequency, self.settings.load_mode
        );

        MultiSceneManager::new(host, listeners, self.settings)
    }
}

impl Default for MultiSceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::HeadlessSceneHost;
    use crate::core::listeners::ListenerRegistry;
    use crate::core::scene::LoadPhase;

    #[test]
    fn builder_defaults() {
        let builder = MultiSceneBuilder::new();
        assert_eq!(builder.settings.listener_frequency, 5);
        assert!(!builder.settings.use_unload_resources);
        assert_eq!(builder.settings.load_mode, LoadMode::Default);
    }

    #[test]
    fn builder_with_listener_frequency() {
        let builder = MultiSceneBuilder::new().with_listener_frequency(12);
        assert_eq!(builder.settings.listener_frequency, 12);
    }

    #[test]
    #[should_panic(expected = "Listener frequency must be positive")]
    fn builder_with_listener_frequency_panics_on_zero() {
        MultiSceneBuilder::new().with_listener_frequency(0);
    }

    #[test]
    #[should_panic(expected = "Listener frequency must be positive")]
    fn builder_with_settings_panics_on_zero_frequency() {
        let settings = MultiSceneSettings {
            listener_frequency: 0,
            ..MultiSceneSettings::default()
        };
        MultiSceneBuilder::new().with_settings(settings);
    }

    #[test]
    fn overrides_apply_after_settings() {
        let settings = MultiSceneSettings {
            listener_frequency: 3,
            ..MultiSceneSettings::default()
        };
        let builder = MultiSceneBuilder::new()
            .with_settings(settings)
            .with_unload_resources(true)
            .with_load_mode(LoadMode::LastLoaded);

        assert_eq!(builder.settings.listener_frequency, 3);
        assert!(builder.settings.use_unload_resources);
        assert_eq!(builder.settings.load_mode, LoadMode::LastLoaded);
    }

    #[test]
    fn build_creates_idle_manager_with_settings() {
        let group = SceneGroup::from_paths("Menu", ["Scenes/Menu.unity"]);
        let manager = MultiSceneBuilder::new()
            .with_start_group(group.clone())
            .with_last_group(group.clone())
            .build(HeadlessSceneHost::new(), ListenerRegistry::new());

        assert_eq!(manager.phase(), LoadPhase::Idle);
        assert_eq!(manager.settings().start_group, Some(group.clone()));
        assert_eq!(manager.settings().last_group, Some(group));
        assert!(manager.active_group().is_none());
    }

    #[test]
    fn built_manager_loads_start_group_on_initialise() {
        let mut manager = MultiSceneBuilder::new()
            .with_start_group(SceneGroup::from_paths("Menu", ["Scenes/Menu.unity"]))
            .build(HeadlessSceneHost::new(), ListenerRegistry::new());

        manager.initialise().unwrap();

        assert_eq!(manager.host().pending_loads(), vec!["Menu"]);
    }
}
