//=========================================================================
// Group Categories
//=========================================================================
//
// Named buckets authoring tools sort scene groups into. The load logic
// never reads them.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Built-in Categories =================================================

/// Categories every project starts with. The unnamed entry is "uncategorised".
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "",
    "Menu",
    "Game",
    "Levels",
    "Player",
    "Enemies",
    "World",
    "UI",
];

//=== GroupCategory =======================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCategory {
    pub name: String,

    #[serde(default)]
    pub index: usize,

    /// Whether authoring tools list groups of this category.
    #[serde(default = "GroupCategory::default_visible")]
    pub visible: bool,
}

impl GroupCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: 0,
            visible: Self::default_visible(),
        }
    }

    const fn default_visible() -> bool {
        true
    }
}

/// Built-in categories, indexed in declaration order.
pub fn default_categories() -> Vec<GroupCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .enumerate()
        .map(|(index, name)| GroupCategory {
            index,
            ..GroupCategory::new(*name)
        })
        .collect()
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_categories_are_indexed_and_visible() {
        let categories = default_categories();

        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(categories[1].name, "Menu");
        assert_eq!(categories[7].index, 7);
        assert!(categories.iter().all(|c| c.visible));
    }

    #[test]
    fn category_visible_defaults_to_true_when_missing() {
        let category: GroupCategory = serde_json::from_str(r#"{ "name": "Bosses" }"#).unwrap();
        assert!(category.visible);
        assert_eq!(category.index, 0);
    }
}
