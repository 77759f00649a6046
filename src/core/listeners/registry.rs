//=========================================================================
// Listener Registry
//=========================================================================
//
// Where the scene manager discovers listeners from.
//
// Discovery runs fresh at every dispatch cycle and is scoped to the
// scenes active at that moment, so listeners from scenes torn down by
// an earlier load are never called.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{MultiSceneAwake, MultiSceneEnable, MultiSceneStart};

//=== ListenerSource ======================================================

/// Finds every live listener implementing a capability.
///
/// `active_scenes` lists the scenes active when dispatch begins, in the
/// host's order. Returned order is the discovery order used to break
/// ties between equal listener orders.
pub trait ListenerSource {
    fn find_awake(&self, active_scenes: &[String]) -> Vec<Arc<dyn MultiSceneAwake>>;

    fn find_enable(&self, active_scenes: &[String]) -> Vec<Arc<dyn MultiSceneEnable>>;

    fn find_start(&self, active_scenes: &[String]) -> Vec<Arc<dyn MultiSceneStart>>;
}

//=== SceneListeners ======================================================

#[derive(Default)]
struct SceneListeners {
    awake: Vec<Arc<dyn MultiSceneAwake>>,
    enable: Vec<Arc<dyn MultiSceneEnable>>,
    start: Vec<Arc<dyn MultiSceneStart>>,
}

impl SceneListeners {
    fn is_empty(&self) -> bool {
        self.awake.is_empty() && self.enable.is_empty() && self.start.is_empty()
    }
}

//=== ListenerRegistry ====================================================

/// [`ListenerSource`] backed by per-scene registration.
///
/// Listeners are registered against the scene that owns them. Persistent
/// listeners belong to no scene and are discovered after every scene's
/// listeners, whatever is active.
///
/// ```rust
/// # use std::sync::Arc;
/// # use multiscene::prelude::*;
/// struct Music;
///
/// impl MultiSceneStart for Music {
///     fn on_multi_scene_start(&self) -> Result<(), ListenerError> {
///         Ok(())
///     }
/// }
///
/// let mut registry = ListenerRegistry::new();
/// registry.add_start("Audio", Arc::new(Music));
///
/// assert_eq!(registry.find_start(&["Audio".to_string()]).len(), 1);
/// assert!(registry.find_start(&["Main".to_string()]).is_empty());
/// ```
#[derive(Default)]
pub struct ListenerRegistry {
    scenes: HashMap<String, SceneListeners>,
    persistent: SceneListeners,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Scene Registration -----------------------------------------------

    pub fn add_awake(&mut self, scene: &str, listener: Arc<dyn MultiSceneAwake>) {
        self.scene_mut(scene).awake.push(listener);
    }

    pub fn add_enable(&mut self, scene: &str, listener: Arc<dyn MultiSceneEnable>) {
        self.scene_mut(scene).enable.push(listener);
    }

    pub fn add_start(&mut self, scene: &str, listener: Arc<dyn MultiSceneStart>) {
        self.scene_mut(scene).start.push(listener);
    }

    /// Drops every listener registered against `scene`.
    pub fn remove_scene(&mut self, scene: &str) -> bool {
        let removed = self.scenes.remove(scene).is_some();
        if removed {
            debug!("Removed listeners of scene {:?}", scene);
        }
        removed
    }

    //--- Persistent Registration ------------------------------------------

    pub fn add_persistent_awake(&mut self, listener: Arc<dyn MultiSceneAwake>) {
        self.persistent.awake.push(listener);
    }

    pub fn add_persistent_enable(&mut self, listener: Arc<dyn MultiSceneEnable>) {
        self.persistent.enable.push(listener);
    }

    pub fn add_persistent_start(&mut self, listener: Arc<dyn MultiSceneStart>) {
        self.persistent.start.push(listener);
    }

    //--- Queries ----------------------------------------------------------

    /// Scenes with at least one registered listener.
    pub fn scene_count(&self) -> usize {
        self.scenes.values().filter(|s| !s.is_empty()).count()
    }

    //--- Internal Helpers -------------------------------------------------

    fn scene_mut(&mut self, scene: &str) -> &mut SceneListeners {
        self.scenes.entry(scene.to_string()).or_default()
    }

    fn collect<T, F>(&self, active_scenes: &[String], select: F) -> Vec<Arc<T>>
    where
        T: ?Sized,
        F: Fn(&SceneListeners) -> &Vec<Arc<T>>,
    {
        let mut found = Vec::new();
        for scene in active_scenes {
            if let Some(listeners) = self.scenes.get(scene) {
                found.extend(select(listeners).iter().cloned());
            }
        }
        found.extend(select(&self.persistent).iter().cloned());
        found
    }
}

impl ListenerSource for ListenerRegistry {
    fn find_awake(&self, active_scenes: &[String]) -> Vec<Arc<dyn MultiSceneAwake>> {
        self.collect(active_scenes, |s| &s.awake)
    }

    fn find_enable(&self, active_scenes: &[String]) -> Vec<Arc<dyn MultiSceneEnable>> {
        self.collect(active_scenes, |s| &s.enable)
    }

    fn find_start(&self, active_scenes: &[String]) -> Vec<Arc<dyn MultiSceneStart>> {
        self.collect(active_scenes, |s| &s.start)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listeners::ListenerError;
    use std::sync::Mutex;

    struct Probe {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl MultiSceneAwake for Probe {
        fn on_multi_scene_awake(&self) -> Result<(), ListenerError> {
            self.log.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    impl MultiSceneEnable for Probe {
        fn on_multi_scene_enable(&self) -> Result<(), ListenerError> {
            Ok(())
        }
    }

    fn probe(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<Probe> {
        Arc::new(Probe {
            name,
            log: Arc::clone(log),
        })
    }

    fn scenes(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn run_awake(listeners: &[Arc<dyn MultiSceneAwake>]) {
        for listener in listeners {
            listener.on_multi_scene_awake().unwrap();
        }
    }

    #[test]
    fn only_active_scenes_are_discovered() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.add_awake("Main", probe("main", &log));
        registry.add_awake("Menu", probe("menu", &log));

        run_awake(&registry.find_awake(&scenes(&["Main"])));

        assert_eq!(*log.lock().unwrap(), vec!["main"]);
    }

    #[test]
    fn discovery_follows_active_scene_order_then_persistent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.add_persistent_awake(probe("persistent", &log));
        registry.add_awake("HUD", probe("hud", &log));
        registry.add_awake("Main", probe("main-1", &log));
        registry.add_awake("Main", probe("main-2", &log));

        run_awake(&registry.find_awake(&scenes(&["Main", "HUD"])));

        assert_eq!(*log.lock().unwrap(), vec!["main-1", "main-2", "hud", "persistent"]);
    }

    #[test]
    fn one_listener_can_hold_several_capabilities() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let both = probe("both", &log);
        let mut registry = ListenerRegistry::new();
        registry.add_awake("Main", both.clone());
        registry.add_enable("Main", both);

        let active = scenes(&["Main"]);
        assert_eq!(registry.find_awake(&active).len(), 1);
        assert_eq!(registry.find_enable(&active).len(), 1);
        assert!(registry.find_start(&active).is_empty());
    }

    #[test]
    fn removed_scene_is_not_discovered() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.add_awake("Level1", probe("level", &log));

        assert!(registry.remove_scene("Level1"));
        assert!(!registry.remove_scene("Level1"));
        assert!(registry.find_awake(&scenes(&["Level1"])).is_empty());
        assert_eq!(registry.scene_count(), 0);
    }
}
