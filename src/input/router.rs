use tracing::{debug, warn};

use crate::context::MenuContext;
use crate::menu::{MenuCategory, MenuId};

/// Platform-independent input the menu system reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    /// Cancel/back (Escape, gamepad B, Android back)
    Cancel,
    /// The platform asked the application to close
    Quit,
}

/// What the router did with a signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackRoute {
    /// In game with nothing (or the pause menu) on top: pause state flipped
    TogglePause,
    /// In game with another menu on top: that menu was asked to close
    CloseMenu(MenuId),
    /// In the menus: the top menu's back handler ran
    GoBack,
    /// Quit was requested
    Quit,
    /// UI actions are disabled
    Ignored,
}

/// Routes input signals to stack operations
///
/// The decision depends on the application mode:
///
/// 1. In game, stack empty or pause menu on top → toggle pause
/// 2. In game, some other menu on top → close that menu (only the top may close)
/// 3. In the menus → let the top menu handle back
#[derive(Debug)]
pub struct InputRouter {
    ui_actions_enabled: bool,
}

impl InputRouter {
    /// Creates a router with UI actions enabled
    pub fn new() -> Self {
        InputRouter {
            ui_actions_enabled: true,
        }
    }

    pub fn enable_ui_actions(&mut self) {
        self.ui_actions_enabled = true;
    }

    /// Cancel signals are ignored until UI actions are enabled again
    pub fn disable_ui_actions(&mut self) {
        self.ui_actions_enabled = false;
    }

    pub fn ui_actions_enabled(&self) -> bool {
        self.ui_actions_enabled
    }

    /// Decides what `signal` should do without doing it
    pub fn route(&self, ctx: &MenuContext, signal: InputSignal) -> BackRoute {
        match signal {
            InputSignal::Quit => BackRoute::Quit,
            InputSignal::Cancel if !self.ui_actions_enabled => BackRoute::Ignored,
            InputSignal::Cancel => {
                if !ctx.in_game() {
                    return BackRoute::GoBack;
                }

                match ctx.menus().top() {
                    None => BackRoute::TogglePause,
                    Some(top) if top.category() == MenuCategory::Pause => BackRoute::TogglePause,
                    Some(top) => BackRoute::CloseMenu(top.id().clone()),
                }
            }
        }
    }

    /// Routes `signal` and applies the result to `ctx`
    pub fn handle(&self, ctx: &mut MenuContext, signal: InputSignal) -> BackRoute {
        let route = self.route(ctx, signal);
        debug!(?signal, ?route, "routing input");

        match &route {
            BackRoute::TogglePause => {
                ctx.toggle_pause();
            }
            BackRoute::CloseMenu(id) => {
                if let Err(err) = ctx.menus_mut().close(id) {
                    warn!(%err, "cancel could not close the top menu");
                }
            }
            BackRoute::GoBack => {
                ctx.go_back();
            }
            BackRoute::Quit => ctx.request_quit(),
            BackRoute::Ignored => {}
        }

        route
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}
