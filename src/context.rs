// MenuContext
//
// The explicit context every caller goes through: it owns the menu stack
// engine, the application state, the settings store and the queue of
// deferred tasks. Button actions receive `&mut MenuContext`, so there is no
// global lookup anywhere.

use std::collections::VecDeque;
use tracing::{debug, error, info, warn};

use crate::initialiser::MenuInitialiser;
use crate::manager::MenuManager;
use crate::menu::{Action, BackPolicy, MenuError, MenuId, BACK_BUTTON};
use crate::session::AppState;
use crate::settings::{PlayerSettings, SettingsService};

/// Work queued for the next step of the event loop
pub enum Deferred {
    ShowMenu(MenuId),
    Run(Action),
}

/// Owner of all menu state for one application
pub struct MenuContext {
    menus: MenuManager,
    app: Box<dyn AppState>,
    settings: Box<dyn SettingsService>,
    player_settings: PlayerSettings,
    initial_menu: Option<MenuId>,
    pending: VecDeque<Deferred>,
    quit_requested: bool,
}

impl MenuContext {
    /// Creates a context with an empty registry
    ///
    /// Player settings are read from `settings` once, here.
    pub fn new<A, S>(app: A, settings: S) -> Self
    where
        A: AppState + 'static,
        S: SettingsService + 'static,
    {
        let player_settings = PlayerSettings::load(&settings);

        MenuContext {
            menus: MenuManager::new(),
            app: Box::new(app),
            settings: Box::new(settings),
            player_settings,
            initial_menu: None,
            pending: VecDeque::new(),
            quit_requested: false,
        }
    }

    pub fn menus(&self) -> &MenuManager {
        &self.menus
    }

    pub fn menus_mut(&mut self) -> &mut MenuManager {
        &mut self.menus
    }

    pub fn app(&self) -> &dyn AppState {
        self.app.as_ref()
    }

    pub fn settings(&self) -> &dyn SettingsService {
        self.settings.as_ref()
    }

    pub fn player_settings(&self) -> &PlayerSettings {
        &self.player_settings
    }

    pub fn player_settings_mut(&mut self) -> &mut PlayerSettings {
        &mut self.player_settings
    }

    pub fn initial_menu(&self) -> Option<&MenuId> {
        self.initial_menu.as_ref()
    }

    // ======================================================================
    // Startup
    // ======================================================================

    /// Registers every menu of `initialiser` and queues the initial show
    ///
    /// The initial menu is shown on the next [`run_pending`](Self::run_pending),
    /// never before registration has completed.
    pub fn bootstrap(&mut self, initialiser: &dyn MenuInitialiser) -> Result<(), MenuError> {
        initialiser.register_menus(&mut self.menus)?;

        let initial = initialiser.initial_menu();
        info!(
            menus = self.menus.registry().len(),
            initial = %initial,
            "menus registered"
        );

        self.initial_menu = Some(initial.clone());
        self.defer(Deferred::ShowMenu(initial));
        Ok(())
    }

    /// Queues a task for the next step
    pub fn defer(&mut self, task: Deferred) {
        self.pending.push_back(task);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Runs the tasks queued before this call
    ///
    /// Tasks queued while running wait for the next call. Returns how many
    /// tasks ran.
    pub fn run_pending(&mut self) -> usize {
        let tasks = std::mem::take(&mut self.pending);
        let count = tasks.len();

        for task in tasks {
            match task {
                Deferred::ShowMenu(id) => {
                    self.menus.show(&id);
                }
                Deferred::Run(action) => (*action)(self),
            }
        }

        count
    }

    // ======================================================================
    // Menu entry points
    // ======================================================================

    pub fn show(&mut self, id: &MenuId) -> bool {
        self.menus.show(id)
    }

    pub fn hide(&mut self, id: &MenuId) -> bool {
        self.menus.hide(id)
    }

    /// Presses `button` on menu `id`
    ///
    /// Only the visible top of the stack accepts presses. The back button runs
    /// the menu's back handler; every other button runs its bound action.
    pub fn press(&mut self, id: &MenuId, button: &str) -> Result<(), MenuError> {
        let menu = self
            .menus
            .menu(id)
            .ok_or_else(|| MenuError::NotLive(id.clone()))?;

        if self.menus.top_id() != Some(id) || !menu.is_visible() {
            return Err(MenuError::NotInteractive(id.clone()));
        }

        if button == BACK_BUTTON && menu.has_back_button() {
            self.back_pressed(id);
            return Ok(());
        }

        let action = menu
            .action(button)
            .cloned()
            .ok_or_else(|| MenuError::UnknownButton {
                menu: id.clone(),
                button: button.to_string(),
            })?;

        debug!(menu = %id, button, "button pressed");
        (*action)(self);
        Ok(())
    }

    /// Presses `button` on whatever is on top of the stack
    pub fn press_top(&mut self, button: &str) -> Result<(), MenuError> {
        let id = self.menus.top_id().cloned().ok_or(MenuError::EmptyStack)?;
        self.press(&id, button)
    }

    /// Runs the back handler of the top menu
    ///
    /// Returns false, doing nothing, when the stack is empty.
    pub fn go_back(&mut self) -> bool {
        let Some(id) = self.menus.top_id().cloned() else {
            return false;
        };

        self.back_pressed(&id)
    }

    /// Runs the back handler of a specific menu
    pub fn back_pressed(&mut self, id: &MenuId) -> bool {
        let Some(menu) = self.menus.menu(id) else {
            warn!(menu = %id, "back pressed on a menu with no live instance");
            return false;
        };

        let policy = menu.back_policy();
        let category = menu.category();
        let hook = menu.back_hook().cloned();

        match policy {
            BackPolicy::Refuse => {
                warn!(
                    menu = %id,
                    ?category,
                    "attempted to close menu via back button; this is not allowed while it is on top of the stack"
                );
            }
            BackPolicy::Close => {
                self.menus.hide(id);
            }
            BackPolicy::TogglePause => {
                self.app.toggle_pause(&mut self.menus);
            }
        }

        if let Some(hook) = hook {
            (*hook)(self);
        }

        true
    }

    // ======================================================================
    // Application state
    // ======================================================================

    pub fn in_game(&self) -> bool {
        self.app.in_game()
    }

    pub fn is_paused(&self) -> bool {
        self.app.is_paused()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.app.toggle_pause(&mut self.menus)
    }

    pub fn start_game(&mut self) {
        self.app.start_game();
    }

    /// Leaves gameplay and queues the initial menu to be shown again
    pub fn return_to_menu(&mut self) {
        self.app.return_to_menu();

        if let Some(initial) = self.initial_menu.clone() {
            self.defer(Deferred::ShowMenu(initial));
        }
    }

    pub fn request_quit(&mut self) {
        info!("quit requested");
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    // ======================================================================
    // Settings
    // ======================================================================

    /// Writes the player settings to the store and flushes it
    pub fn save_settings(&mut self) {
        self.player_settings.save(self.settings.as_mut());

        if let Err(err) = self.settings.flush() {
            error!(%err, "failed to save settings");
        }
    }

    /// Re-reads the player settings from the store
    pub fn reload_settings(&mut self) {
        self.player_settings = PlayerSettings::load(self.settings.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{CloseType, MenuCategory, MenuPrototype};
    use crate::screen::HeadlessScreen;
    use crate::session::GameSession;
    use crate::settings::MemorySettings;
    use std::cell::Cell;
    use std::rc::Rc;

    const MAIN: MenuId = MenuId::from_static("main");
    const OPTIONS: MenuId = MenuId::from_static("options");
    const PAUSE: MenuId = MenuId::from_static("pause");

    fn screen(id: &MenuId) -> Box<dyn crate::screen::Screen> {
        Box::new(HeadlessScreen::new(
            id.as_str(),
            ["BackButton", "OptionsButton", "SaveButton"],
        ))
    }

    fn context() -> MenuContext {
        let mut ctx = MenuContext::new(GameSession::new(PAUSE), MemorySettings::new());
        let menus = ctx.menus_mut();
        menus
            .register_prototype(
                MenuPrototype::new(MAIN, screen)
                    .with_close_type(CloseType::Hide)
                    .with_category(MenuCategory::Main)
                    .bind("OptionsButton", |ctx| {
                        ctx.show(&OPTIONS);
                    }),
            )
            .unwrap();
        menus
            .register_prototype(
                MenuPrototype::new(OPTIONS, screen)
                    .with_close_type(CloseType::Hide)
                    .with_category(MenuCategory::Options)
                    .bind("SaveButton", |ctx| ctx.save_settings())
                    .on_back(|ctx| ctx.save_settings()),
            )
            .unwrap();
        menus
            .register_prototype(
                MenuPrototype::new(PAUSE, screen)
                    .with_close_type(CloseType::Hide)
                    .with_category(MenuCategory::Pause),
            )
            .unwrap();
        ctx
    }

    #[test]
    fn test_go_back_on_empty_stack() {
        let mut ctx = context();
        assert!(!ctx.go_back());
        assert!(ctx.menus().is_empty());
    }

    #[test]
    fn test_back_refused_on_main() {
        let mut ctx = context();
        ctx.show(&MAIN);

        assert!(ctx.go_back());
        assert_eq!(ctx.menus().stack(), &[MAIN]);
        assert!(ctx.menus().is_visible(&MAIN));
    }

    #[test]
    fn test_back_closes_options_and_saves() {
        let mut ctx = context();
        ctx.show(&MAIN);
        ctx.press(&MAIN, "OptionsButton").unwrap();
        assert_eq!(ctx.menus().stack(), &[MAIN, OPTIONS]);

        ctx.player_settings_mut().music_volume = 0.9;
        assert!(ctx.go_back());

        assert_eq!(ctx.menus().stack(), &[MAIN]);
        assert_eq!(ctx.settings().load("MusicVolume", 0.5), 0.9);
    }

    #[test]
    fn test_back_button_press_runs_back_handler() {
        let mut ctx = context();
        ctx.show(&MAIN);
        ctx.show(&OPTIONS);

        ctx.press(&OPTIONS, BACK_BUTTON).unwrap();
        assert_eq!(ctx.menus().stack(), &[MAIN]);
    }

    #[test]
    fn test_back_on_pause_toggles_pause() {
        let mut ctx = context();
        ctx.start_game();
        assert!(ctx.toggle_pause());
        assert!(ctx.is_paused());

        assert!(ctx.go_back());
        assert!(!ctx.is_paused());
        assert!(ctx.menus().is_empty());
    }

    #[test]
    fn test_press_requires_top() {
        let mut ctx = context();
        ctx.show(&MAIN);
        ctx.show(&OPTIONS);

        assert_eq!(
            ctx.press(&MAIN, "OptionsButton"),
            Err(MenuError::NotInteractive(MAIN))
        );
        assert_eq!(
            ctx.press(&PAUSE, "OptionsButton"),
            Err(MenuError::NotLive(PAUSE))
        );
        assert!(matches!(
            ctx.press(&OPTIONS, "PlayButton"),
            Err(MenuError::UnknownButton { .. })
        ));
    }

    #[test]
    fn test_deferred_tasks_run_one_step_later() {
        let mut ctx = context();
        let ran = Rc::new(Cell::new(0));
        let counter = ran.clone();

        ctx.defer(Deferred::Run(Rc::new(move |ctx: &mut MenuContext| {
            counter.set(counter.get() + 1);
            ctx.defer(Deferred::ShowMenu(MAIN));
        })));
        assert!(ctx.menus().is_empty());

        assert_eq!(ctx.run_pending(), 1);
        assert_eq!(ran.get(), 1);
        // The show queued by the task waits for the next step
        assert!(ctx.menus().is_empty());
        assert!(ctx.has_pending());

        assert_eq!(ctx.run_pending(), 1);
        assert_eq!(ctx.menus().stack(), &[MAIN]);
    }

    #[test]
    fn test_return_to_menu_requeues_initial_menu() {
        let mut ctx = context();
        ctx.initial_menu = Some(MAIN);
        ctx.start_game();

        ctx.return_to_menu();
        assert!(!ctx.in_game());
        ctx.run_pending();
        assert_eq!(ctx.menus().stack(), &[MAIN]);
    }
}
