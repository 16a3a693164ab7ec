// Application state collaborator
//
// The menu core does not own the in-game/paused state. It only asks the
// application through the AppState trait, and GameSession is the stock
// implementation used by the demo and the tests.

use tracing::{debug, info};

use crate::manager::MenuManager;
use crate::menu::MenuId;

/// Application state the input router and back-press policies consult
pub trait AppState {
    /// True while gameplay is running (paused or not), false in the menus
    fn in_game(&self) -> bool;

    fn is_paused(&self) -> bool;

    /// Flips the paused state, showing or hiding the pause menu
    ///
    /// Returns true if the state changed.
    fn toggle_pause(&mut self, menus: &mut MenuManager) -> bool;

    /// Leaves the menus and enters gameplay, unpaused
    fn start_game(&mut self);

    /// Leaves gameplay and goes back to the menus
    fn return_to_menu(&mut self);
}

/// In-game and paused flags of a running game
#[derive(Debug, Clone)]
pub struct GameSession {
    pause_menu: MenuId,
    in_game: bool,
    paused: bool,
}

impl GameSession {
    /// Creates a session that starts in the menus
    ///
    /// `pause_menu` is the menu shown while the game is paused.
    pub fn new(pause_menu: MenuId) -> Self {
        GameSession {
            pause_menu,
            in_game: false,
            paused: false,
        }
    }

    pub fn pause_menu(&self) -> &MenuId {
        &self.pause_menu
    }
}

impl AppState for GameSession {
    fn in_game(&self) -> bool {
        self.in_game
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn toggle_pause(&mut self, menus: &mut MenuManager) -> bool {
        // Only flip the flag when the pause menu actually changed
        if !self.paused {
            if menus.show(&self.pause_menu) {
                self.paused = true;
                debug!("game paused");
                return true;
            }
        } else if menus.hide(&self.pause_menu) {
            self.paused = false;
            debug!("game resumed");
            return true;
        }

        false
    }

    fn start_game(&mut self) {
        info!("starting game");
        self.in_game = true;
        self.paused = false;
    }

    fn return_to_menu(&mut self) {
        info!("returning to menu");
        self.in_game = false;
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{CloseType, MenuCategory, MenuPrototype};
    use crate::screen::HeadlessScreen;

    const PAUSE: MenuId = MenuId::from_static("pause");
    const OPTIONS: MenuId = MenuId::from_static("options");

    fn menus() -> MenuManager {
        let mut menus = MenuManager::new();
        for (id, category) in [(PAUSE, MenuCategory::Pause), (OPTIONS, MenuCategory::Options)] {
            menus
                .register_prototype(
                    MenuPrototype::new(id, |id| {
                        Box::new(HeadlessScreen::new(id.as_str(), ["BackButton"]))
                    })
                    .with_close_type(CloseType::Hide)
                    .with_category(category),
                )
                .unwrap();
        }
        menus
    }

    #[test]
    fn test_session_starts_in_menu() {
        let session = GameSession::new(PAUSE);
        assert!(!session.in_game());
        assert!(!session.is_paused());
    }

    #[test]
    fn test_toggle_pause_shows_and_hides_menu() {
        let mut menus = menus();
        let mut session = GameSession::new(PAUSE);
        session.start_game();

        assert!(session.toggle_pause(&mut menus));
        assert!(session.is_paused());
        assert_eq!(menus.top_id(), Some(&PAUSE));

        assert!(session.toggle_pause(&mut menus));
        assert!(!session.is_paused());
        assert!(menus.is_empty());
    }

    #[test]
    fn test_unpause_fails_when_pause_menu_is_covered() {
        let mut menus = menus();
        let mut session = GameSession::new(PAUSE);
        session.start_game();
        session.toggle_pause(&mut menus);
        menus.show(&OPTIONS);

        assert!(!session.toggle_pause(&mut menus));
        assert!(session.is_paused());
        assert_eq!(menus.stack(), &[PAUSE, OPTIONS]);
    }

    #[test]
    fn test_return_to_menu_clears_flags() {
        let mut menus = menus();
        let mut session = GameSession::new(PAUSE);
        session.start_game();
        session.toggle_pause(&mut menus);

        session.return_to_menu();
        assert!(!session.in_game());
        assert!(!session.is_paused());
    }
}
