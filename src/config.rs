//! Menu configuration
//!
//! Describes a set of menus as data so an application can define its menu
//! flow without code. The format is JSON:
//!
//! ```json
//! {
//!   "initial_menu": "title",
//!   "menus": [
//!     {
//!       "id": "title",
//!       "close_type": "Destroy",
//!       "category": "Welcome",
//!       "buttons": [
//!         { "button": "StartButton", "commands": [{ "Show": "lobby" }] }
//!       ]
//!     },
//!     {
//!       "id": "lobby",
//!       "close_type": "Hide",
//!       "category": "Main",
//!       "buttons": [
//!         { "button": "PlayButton", "commands": [{ "Hide": "lobby" }, "StartGame"] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A button runs its commands in order and stops at the first one that fails,
//! so `[Hide(lobby), StartGame]` only starts the game if the lobby closed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

use crate::context::MenuContext;
use crate::initialiser::MenuInitialiser;
use crate::manager::MenuManager;
use crate::menu::{
    Action, BackPolicy, CloseType, MenuCategory, MenuError, MenuId, MenuPrototype, BACK_BUTTON,
};
use crate::screen::{headless_screens, ScreenBuilder};

/// Errors from loading a menu configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid menu configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("menu '{0}' is defined more than once")]
    DuplicateMenu(MenuId),

    #[error("initial menu '{0}' is not defined")]
    UnknownInitialMenu(MenuId),

    #[error("menu '{menu}' refers to undefined menu '{target}'")]
    UnknownMenuReference { menu: MenuId, target: MenuId },
}

/// Something a button (or a back press) can do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCommand {
    Show(MenuId),
    Hide(MenuId),
    Back,
    StartGame,
    ReturnToMenu,
    TogglePause,
    SaveSettings,
    Quit,
}

impl MenuCommand {
    /// Runs the command; returns false if it had no effect
    pub fn execute(&self, ctx: &mut MenuContext) -> bool {
        match self {
            MenuCommand::Show(id) => ctx.show(id),
            MenuCommand::Hide(id) => ctx.hide(id),
            MenuCommand::Back => ctx.go_back(),
            MenuCommand::TogglePause => ctx.toggle_pause(),
            MenuCommand::StartGame => {
                ctx.start_game();
                true
            }
            MenuCommand::ReturnToMenu => {
                ctx.return_to_menu();
                true
            }
            MenuCommand::SaveSettings => {
                ctx.save_settings();
                true
            }
            MenuCommand::Quit => {
                ctx.request_quit();
                true
            }
        }
    }

    /// Menu this command refers to, if any
    pub fn target(&self) -> Option<&MenuId> {
        match self {
            MenuCommand::Show(id) | MenuCommand::Hide(id) => Some(id),
            _ => None,
        }
    }
}

/// Runs `commands` in order, stopping at the first that fails
pub fn run_commands(commands: &[MenuCommand], ctx: &mut MenuContext) -> bool {
    for command in commands {
        if !command.execute(ctx) {
            debug!(?command, "command had no effect, skipping the rest");
            return false;
        }
    }
    true
}

/// A button and the commands it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBinding {
    pub button: String,
    pub commands: Vec<MenuCommand>,
}

/// One menu definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: MenuId,
    #[serde(default)]
    pub close_type: CloseType,
    #[serde(default)]
    pub category: MenuCategory,
    #[serde(default)]
    pub order: i32,
    /// Overrides the category's back policy
    #[serde(default)]
    pub back_policy: Option<BackPolicy>,
    /// Commands run after the back policy on every back press
    #[serde(default)]
    pub on_back: Vec<MenuCommand>,
    #[serde(default)]
    pub buttons: Vec<ButtonBinding>,
}

impl MenuEntry {
    /// Screen buttons this menu needs, back button included
    pub fn button_names(&self) -> Vec<String> {
        let mut names = vec![BACK_BUTTON.to_string()];
        names.extend(self.buttons.iter().map(|binding| binding.button.clone()));
        names
    }

    fn commands(&self) -> impl Iterator<Item = &MenuCommand> {
        self.buttons
            .iter()
            .flat_map(|binding| binding.commands.iter())
            .chain(self.on_back.iter())
    }
}

/// A whole menu flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    pub initial_menu: MenuId,
    pub menus: Vec<MenuEntry>,
}

impl MenuConfig {
    /// Reads and validates a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Parses and validates a configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MenuConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ids are unique and every referenced menu is defined
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        for entry in &self.menus {
            if !ids.insert(&entry.id) {
                return Err(ConfigError::DuplicateMenu(entry.id.clone()));
            }
        }

        if !ids.contains(&self.initial_menu) {
            return Err(ConfigError::UnknownInitialMenu(self.initial_menu.clone()));
        }

        for entry in &self.menus {
            for target in entry.commands().filter_map(MenuCommand::target) {
                if !ids.contains(target) {
                    return Err(ConfigError::UnknownMenuReference {
                        menu: entry.id.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Initialiser registering every menu of a [`MenuConfig`]
#[derive(Clone)]
pub struct ConfigInitialiser {
    config: MenuConfig,
    screens: ScreenBuilder,
}

impl ConfigInitialiser {
    /// Menus on headless screens exposing exactly the configured buttons
    pub fn new(config: MenuConfig) -> Self {
        Self::with_screens(config, headless_screens())
    }

    pub fn with_screens(config: MenuConfig, screens: ScreenBuilder) -> Self {
        ConfigInitialiser { config, screens }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    fn prototype(&self, entry: &MenuEntry) -> MenuPrototype {
        let screens = self.screens.clone();
        let buttons = entry.button_names();

        let mut prototype = MenuPrototype::new(entry.id.clone(), move |id| {
            let names: Vec<&str> = buttons.iter().map(String::as_str).collect();
            (*screens)(id, &names)
        })
        .with_close_type(entry.close_type)
        .with_category(entry.category)
        .with_base_order(entry.order);

        if let Some(policy) = entry.back_policy {
            prototype = prototype.with_back_policy(policy);
        }

        if !entry.on_back.is_empty() {
            let commands = entry.on_back.clone();
            prototype = prototype.on_back(move |ctx| {
                run_commands(&commands, ctx);
            });
        }

        for binding in &entry.buttons {
            let commands = binding.commands.clone();
            prototype = prototype.bind(binding.button.clone(), move |ctx| {
                run_commands(&commands, ctx);
            });
        }

        prototype
    }
}

impl MenuInitialiser for ConfigInitialiser {
    fn register_menus(&self, menus: &mut MenuManager) -> Result<(), MenuError> {
        for entry in &self.config.menus {
            menus.register_prototype(self.prototype(entry))?;
        }
        Ok(())
    }

    fn initial_menu(&self) -> MenuId {
        self.config.initial_menu.clone()
    }
}

/// Wraps a command list as a single [`Action`]
pub fn commands_action(commands: Vec<MenuCommand>) -> Action {
    Rc::new(move |ctx: &mut MenuContext| {
        run_commands(&commands, ctx);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Deferred;
    use crate::session::GameSession;
    use crate::settings::MemorySettings;

    const CONFIG: &str = r#"{
        "initial_menu": "title",
        "menus": [
            {
                "id": "title",
                "close_type": "Destroy",
                "category": "Welcome",
                "buttons": [
                    { "button": "StartButton", "commands": [{ "Show": "lobby" }] }
                ]
            },
            {
                "id": "lobby",
                "close_type": "Hide",
                "category": "Main",
                "buttons": [
                    { "button": "PlayButton", "commands": [{ "Hide": "lobby" }, "StartGame"] },
                    { "button": "SettingsButton", "commands": [{ "Show": "settings" }] }
                ]
            },
            {
                "id": "settings",
                "close_type": "Hide",
                "category": "Options",
                "order": 10,
                "on_back": ["SaveSettings"]
            },
            {
                "id": "paused",
                "close_type": "Hide",
                "category": "Pause"
            }
        ]
    }"#;

    fn context(config: MenuConfig) -> MenuContext {
        let mut ctx = MenuContext::new(
            GameSession::new(MenuId::from_static("paused")),
            MemorySettings::new(),
        );
        ctx.bootstrap(&ConfigInitialiser::new(config)).unwrap();
        ctx.run_pending();
        ctx
    }

    #[test]
    fn test_parse_config() {
        let config = MenuConfig::from_json(CONFIG).unwrap();
        assert_eq!(config.menus.len(), 4);
        assert_eq!(config.menus[2].order, 10);
        assert!(config.menus[3].buttons.is_empty());
        assert_eq!(
            config.menus[1].buttons[0].commands,
            vec![MenuCommand::Hide(MenuId::new("lobby")), MenuCommand::StartGame]
        );
    }

    #[test]
    fn test_configured_flow() {
        let mut ctx = context(MenuConfig::from_json(CONFIG).unwrap());
        assert_eq!(ctx.menus().stack(), &[MenuId::new("title")]);

        ctx.press_top("StartButton").unwrap();
        assert_eq!(ctx.menus().stack(), &[MenuId::new("lobby")]);

        ctx.press_top("SettingsButton").unwrap();
        assert_eq!(ctx.menus().top_id(), Some(&MenuId::new("settings")));
        assert_eq!(ctx.menus().render_order(&MenuId::new("settings")), Some(1));

        ctx.player_settings_mut().sfx_volume = 0.3;
        ctx.go_back();
        assert_eq!(ctx.menus().stack(), &[MenuId::new("lobby")]);
        assert_eq!(ctx.settings().load("SFXVolume", 0.5), 0.3);

        ctx.press_top("PlayButton").unwrap();
        assert!(ctx.in_game());
        assert!(ctx.menus().is_empty());
    }

    #[test]
    fn test_failed_command_stops_sequence() {
        let mut ctx = context(MenuConfig::from_json(CONFIG).unwrap());
        let commands = vec![MenuCommand::Hide(MenuId::new("lobby")), MenuCommand::StartGame];

        // Lobby is not live yet, so the hide fails and the game never starts
        assert!(!run_commands(&commands, &mut ctx));
        assert!(!ctx.in_game());

        ctx.defer(Deferred::Run(commands_action(vec![MenuCommand::Quit])));
        ctx.run_pending();
        assert!(ctx.quit_requested());
    }

    #[test]
    fn test_duplicate_menu_rejected() {
        let json = r#"{
            "initial_menu": "a",
            "menus": [ { "id": "a" }, { "id": "a" } ]
        }"#;
        assert!(matches!(
            MenuConfig::from_json(json),
            Err(ConfigError::DuplicateMenu(id)) if id.as_str() == "a"
        ));
    }

    #[test]
    fn test_unknown_initial_menu_rejected() {
        let json = r#"{ "initial_menu": "missing", "menus": [ { "id": "a" } ] }"#;
        assert!(matches!(
            MenuConfig::from_json(json),
            Err(ConfigError::UnknownInitialMenu(_))
        ));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let json = r#"{
            "initial_menu": "a",
            "menus": [
                { "id": "a", "buttons": [ { "button": "Go", "commands": [{ "Show": "b" }] } ] }
            ]
        }"#;
        assert!(matches!(
            MenuConfig::from_json(json),
            Err(ConfigError::UnknownMenuReference { .. })
        ));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let json = r#"{ "initial_menu": "a", "menus": [ { "id": "a" } ] }"#;
        let config = MenuConfig::from_json(json).unwrap();
        let entry = &config.menus[0];

        assert_eq!(entry.close_type, CloseType::Destroy);
        assert_eq!(entry.category, MenuCategory::Generic);
        assert_eq!(entry.back_policy, None);
        assert_eq!(entry.button_names(), vec![BACK_BUTTON.to_string()]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menus.json");
        fs::write(&path, CONFIG).unwrap();

        let config = MenuConfig::load(&path).unwrap();
        assert_eq!(config.initial_menu, MenuId::new("title"));

        let missing = MenuConfig::load(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
