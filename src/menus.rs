//! Stock menus
//!
//! Four menus covering a typical game front end:
//!
//! - [`WELCOME`]: first screen; Enter opens the main menu, Exit quits
//! - [`MAIN`]: Play starts the game, Options opens the options menu
//! - [`OPTIONS`]: Save writes the player settings; going back saves too
//! - [`PAUSE`]: shown while the game is paused; Exit returns to the menus
//!
//! [`SampleMenus`] registers all four and starts on the welcome menu.

use std::rc::Rc;

use crate::context::MenuContext;
use crate::initialiser::MenuInitialiser;
use crate::manager::MenuManager;
use crate::menu::{CloseType, MenuCategory, MenuError, MenuId, MenuPrototype, BACK_BUTTON};
use crate::screen::{headless_screens, Screen, ScreenBuilder};

pub const WELCOME: MenuId = MenuId::from_static("welcome");
pub const MAIN: MenuId = MenuId::from_static("main");
pub const OPTIONS: MenuId = MenuId::from_static("options");
pub const PAUSE: MenuId = MenuId::from_static("pause");

/// Initialiser for the stock menus
#[derive(Clone)]
pub struct SampleMenus {
    screens: ScreenBuilder,
}

impl SampleMenus {
    /// Stock menus on headless screens
    pub fn new() -> Self {
        SampleMenus {
            screens: headless_screens(),
        }
    }

    /// Stock menus on screens supplied by the rendering layer
    pub fn with_screens<F>(screens: F) -> Self
    where
        F: Fn(&MenuId, &[&str]) -> Box<dyn Screen> + 'static,
    {
        SampleMenus {
            screens: Rc::new(screens),
        }
    }

    fn prototype(&self, id: MenuId, buttons: &'static [&'static str]) -> MenuPrototype {
        let screens = self.screens.clone();
        MenuPrototype::new(id, move |id| (*screens)(id, buttons))
    }

    fn welcome(&self) -> MenuPrototype {
        self.prototype(WELCOME, &[BACK_BUTTON, "EnterButton", "ExitButton"])
            .with_close_type(CloseType::Destroy)
            .with_category(MenuCategory::Welcome)
            .bind("EnterButton", |ctx| {
                ctx.show(&MAIN);
            })
            .bind("ExitButton", |ctx| ctx.request_quit())
    }

    fn main(&self) -> MenuPrototype {
        self.prototype(MAIN, &[BACK_BUTTON, "PlayButton", "OptionsButton"])
            .with_close_type(CloseType::Hide)
            .with_category(MenuCategory::Main)
            .bind("OptionsButton", open_options)
            .bind("PlayButton", |ctx| {
                if ctx.hide(&MAIN) {
                    ctx.start_game();
                }
            })
    }

    fn options(&self) -> MenuPrototype {
        self.prototype(OPTIONS, &[BACK_BUTTON, "SaveButton"])
            .with_close_type(CloseType::Hide)
            .with_category(MenuCategory::Options)
            .bind("SaveButton", |ctx| ctx.save_settings())
            .on_back(|ctx| ctx.save_settings())
    }

    fn pause(&self) -> MenuPrototype {
        self.prototype(PAUSE, &[BACK_BUTTON, "OptionsButton", "ExitButton"])
            .with_close_type(CloseType::Hide)
            .with_category(MenuCategory::Pause)
            .bind("OptionsButton", open_options)
            .bind("ExitButton", |ctx| {
                if ctx.hide(&PAUSE) {
                    ctx.return_to_menu();
                }
            })
    }
}

/// Shows the options menu with the stored values, dropping unsaved edits
fn open_options(ctx: &mut MenuContext) {
    if ctx.show(&OPTIONS) {
        ctx.reload_settings();
    }
}

impl Default for SampleMenus {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuInitialiser for SampleMenus {
    fn register_menus(&self, menus: &mut MenuManager) -> Result<(), MenuError> {
        menus.register_prototype(self.welcome())?;
        menus.register_prototype(self.main())?;
        menus.register_prototype(self.options())?;
        menus.register_prototype(self.pause())?;
        Ok(())
    }

    fn initial_menu(&self) -> MenuId {
        WELCOME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{BackRoute, InputRouter, InputSignal};
    use crate::session::GameSession;
    use crate::settings::MemorySettings;

    fn context() -> MenuContext {
        let mut ctx = MenuContext::new(GameSession::new(PAUSE), MemorySettings::new());
        ctx.bootstrap(&SampleMenus::new()).unwrap();
        ctx.run_pending();
        ctx
    }

    #[test]
    fn test_starts_on_welcome() {
        let ctx = context();
        assert_eq!(ctx.menus().stack(), &[WELCOME]);
        assert_eq!(ctx.menus().registry().len(), 4);
    }

    #[test]
    fn test_enter_replaces_welcome() {
        let mut ctx = context();
        ctx.press(&WELCOME, "EnterButton").unwrap();

        assert_eq!(ctx.menus().stack(), &[MAIN]);
        assert!(!ctx.menus().is_live(&WELCOME));
    }

    #[test]
    fn test_play_starts_game() {
        let mut ctx = context();
        ctx.press(&WELCOME, "EnterButton").unwrap();
        ctx.press(&MAIN, "PlayButton").unwrap();

        assert!(ctx.in_game());
        assert!(ctx.menus().is_empty());
    }

    #[test]
    fn test_exit_on_welcome_requests_quit() {
        let mut ctx = context();
        ctx.press_top("ExitButton").unwrap();
        assert!(ctx.quit_requested());
    }

    #[test]
    fn test_pause_exit_returns_to_welcome() {
        let mut ctx = context();
        ctx.press(&WELCOME, "EnterButton").unwrap();
        ctx.press(&MAIN, "PlayButton").unwrap();
        ctx.toggle_pause();
        assert_eq!(ctx.menus().stack(), &[PAUSE]);

        ctx.press(&PAUSE, "ExitButton").unwrap();
        assert!(!ctx.in_game());
        assert!(!ctx.is_paused());

        ctx.run_pending();
        assert_eq!(ctx.menus().stack(), &[WELCOME]);
    }

    #[test]
    fn test_options_save_button() {
        let mut ctx = context();
        ctx.press(&WELCOME, "EnterButton").unwrap();
        ctx.press(&MAIN, "OptionsButton").unwrap();
        ctx.player_settings_mut().graphics_quality = 5;

        ctx.press(&OPTIONS, "SaveButton").unwrap();
        assert_eq!(ctx.settings().load("GraphicsQuality", 2.0), 5.0);
        assert_eq!(ctx.menus().stack(), &[MAIN, OPTIONS]);
    }

    #[test]
    fn test_options_reloads_stored_values_when_opened() {
        let router = InputRouter::new();
        let mut ctx = context();
        ctx.press(&WELCOME, "EnterButton").unwrap();
        ctx.press(&MAIN, "PlayButton").unwrap();
        ctx.toggle_pause();
        ctx.press(&PAUSE, "OptionsButton").unwrap();

        // Edited but never saved, then closed without the back handler
        ctx.player_settings_mut().music_volume = 0.9;
        assert_eq!(
            router.handle(&mut ctx, InputSignal::Cancel),
            BackRoute::CloseMenu(OPTIONS)
        );

        ctx.press(&PAUSE, "OptionsButton").unwrap();
        assert_eq!(ctx.menus().top_id(), Some(&OPTIONS));
        assert_eq!(ctx.player_settings().music_volume, 0.5);
        assert_eq!(ctx.settings().load("MusicVolume", 0.5), 0.5);
    }
}
