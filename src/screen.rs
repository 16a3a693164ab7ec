//! Screen binding
//!
//! The engine never manipulates visuals directly. Every live menu owns a
//! [`Screen`] supplied by the rendering layer, and the engine only calls the
//! four operations below on it.
//!
//! [`HeadlessScreen`] is a rendering-free implementation that records what it
//! was told to do. It backs the console demo, menus loaded from configuration,
//! and the tests.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::trace;

use crate::menu::MenuId;

/// Display surface of one live menu
pub trait Screen {
    /// Show or hide the screen
    fn set_visible(&mut self, visible: bool);

    /// Release the screen's resources; called once, right before the menu is dropped
    fn destroy(&mut self);

    /// Set the draw order; higher draws above lower
    fn set_render_order(&mut self, order: i32);

    /// Returns true if the screen has a button with this name that can be bound
    fn has_button(&self, button: &str) -> bool;
}

/// Builds the screen for a menu given the buttons it needs
pub type ScreenBuilder = Rc<dyn Fn(&MenuId, &[&str]) -> Box<dyn Screen>>;

/// Builder producing a [`HeadlessScreen`] per menu
pub fn headless_screens() -> ScreenBuilder {
    Rc::new(|id: &MenuId, buttons: &[&str]| -> Box<dyn Screen> {
        Box::new(HeadlessScreen::new(id.as_str(), buttons.iter().copied()))
    })
}

/// Something a [`HeadlessScreen`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    Visible { screen: String, visible: bool },
    Order { screen: String, order: i32 },
    Destroyed { screen: String },
}

/// Shared, append-only record of screen events
#[derive(Debug, Clone, Default)]
pub struct ScreenLog(Rc<RefCell<Vec<ScreenEvent>>>);

impl ScreenLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ScreenEvent) {
        self.0.borrow_mut().push(event);
    }

    /// Returns a copy of all events recorded so far
    pub fn events(&self) -> Vec<ScreenEvent> {
        self.0.borrow().clone()
    }

    /// Returns true if a screen with this name was destroyed
    pub fn was_destroyed(&self, screen: &str) -> bool {
        self.0.borrow().iter().any(|event| {
            matches!(event, ScreenEvent::Destroyed { screen: name } if name == screen)
        })
    }
}

/// A screen with no rendering behind it
#[derive(Debug)]
pub struct HeadlessScreen {
    name: String,
    buttons: HashSet<String>,
    visible: bool,
    render_order: i32,
    destroyed: bool,
    log: Option<ScreenLog>,
}

impl HeadlessScreen {
    /// Creates a screen exposing the given buttons
    pub fn new<I, S>(name: impl Into<String>, buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HeadlessScreen {
            name: name.into(),
            buttons: buttons.into_iter().map(Into::into).collect(),
            visible: false,
            render_order: 0,
            destroyed: false,
            log: None,
        }
    }

    /// Records every call into `log`
    pub fn with_log(mut self, log: ScreenLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn render_order(&self) -> i32 {
        self.render_order
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn record(&self, event: ScreenEvent) {
        if let Some(log) = &self.log {
            log.push(event);
        }
    }
}

impl Screen for HeadlessScreen {
    fn set_visible(&mut self, visible: bool) {
        trace!(screen = %self.name, visible, "set visible");
        self.visible = visible;
        self.record(ScreenEvent::Visible {
            screen: self.name.clone(),
            visible,
        });
    }

    fn destroy(&mut self) {
        trace!(screen = %self.name, "destroy");
        self.destroyed = true;
        self.visible = false;
        self.record(ScreenEvent::Destroyed {
            screen: self.name.clone(),
        });
    }

    fn set_render_order(&mut self, order: i32) {
        self.render_order = order;
        self.record(ScreenEvent::Order {
            screen: self.name.clone(),
            order,
        });
    }

    fn has_button(&self, button: &str) -> bool {
        self.buttons.contains(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_screen_records_calls() {
        let log = ScreenLog::new();
        let mut screen = HeadlessScreen::new("pause", ["BackButton"]).with_log(log.clone());

        screen.set_visible(true);
        screen.set_render_order(3);
        screen.destroy();

        assert!(screen.is_destroyed());
        assert!(!screen.is_visible());
        assert_eq!(screen.render_order(), 3);
        assert!(log.was_destroyed("pause"));
        assert_eq!(log.events().len(), 3);
    }

    #[test]
    fn test_headless_screen_buttons() {
        let screen = HeadlessScreen::new("main", ["PlayButton", "OptionsButton"]);
        assert!(screen.has_button("PlayButton"));
        assert!(!screen.has_button("BackButton"));
    }
}
