//! Identity and policy enums shared by prototypes and live menus.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Stable identity of a menu type
///
/// Used as the key of the registry and of the live-instance arena, so at most
/// one live menu exists per id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(Cow<'static, str>);

impl MenuId {
    /// Creates an id from a static string (usable in `const` items)
    pub const fn from_static(name: &'static str) -> Self {
        MenuId(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        MenuId(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MenuId {
    fn from(name: &str) -> Self {
        MenuId::new(name)
    }
}

impl From<String> for MenuId {
    fn from(name: String) -> Self {
        MenuId::new(name)
    }
}

/// What happens to a menu when it stops being the active top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CloseType {
    /// The menu is destroyed when closed or superseded
    #[default]
    Destroy,
    /// The menu is hidden when closed or superseded
    Hide,
    /// The menu stays visible but is not interactive while superseded
    Disabled,
}

impl fmt::Display for CloseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CloseType::Destroy => "Destroy",
            CloseType::Hide => "Hide",
            CloseType::Disabled => "Disabled",
        };
        f.write_str(name)
    }
}

/// Semantic tag of a menu, drives the default back-press policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MenuCategory {
    #[default]
    Generic,
    Main,
    Options,
    Pause,
    Inventory,
    Dialogue,
    Interaction,
    GameOver,
    Welcome,
}

impl MenuCategory {
    /// Returns true for categories that must never be closed by a back press
    pub fn refuses_back(&self) -> bool {
        matches!(
            self,
            MenuCategory::Main | MenuCategory::GameOver | MenuCategory::Welcome
        )
    }
}

/// What a back press does to the menu that receives it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackPolicy {
    /// Request a close of the menu
    Close,
    /// Ignore the press (with a warning)
    Refuse,
    /// Toggle the application's paused state instead of closing
    TogglePause,
}

impl BackPolicy {
    /// Default policy for a category
    pub fn for_category(category: MenuCategory) -> Self {
        if category.refuses_back() {
            BackPolicy::Refuse
        } else if category == MenuCategory::Pause {
            BackPolicy::TogglePause
        } else {
            BackPolicy::Close
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_policy_per_category() {
        assert_eq!(BackPolicy::for_category(MenuCategory::Main), BackPolicy::Refuse);
        assert_eq!(BackPolicy::for_category(MenuCategory::GameOver), BackPolicy::Refuse);
        assert_eq!(BackPolicy::for_category(MenuCategory::Welcome), BackPolicy::Refuse);
        assert_eq!(BackPolicy::for_category(MenuCategory::Pause), BackPolicy::TogglePause);
        assert_eq!(BackPolicy::for_category(MenuCategory::Options), BackPolicy::Close);
        assert_eq!(BackPolicy::for_category(MenuCategory::Generic), BackPolicy::Close);
    }

    #[test]
    fn test_menu_id_static_and_owned_are_equal() {
        const MAIN: MenuId = MenuId::from_static("main");
        assert_eq!(MAIN, MenuId::new("main"));
        assert_eq!(MAIN.to_string(), "main");
    }

    #[test]
    fn test_close_type_serde_names() {
        let json = serde_json::to_string(&CloseType::Disabled).unwrap();
        assert_eq!(json, "\"Disabled\"");
        let parsed: MenuCategory = serde_json::from_str("\"GameOver\"").unwrap();
        assert_eq!(parsed, MenuCategory::GameOver);
    }
}
