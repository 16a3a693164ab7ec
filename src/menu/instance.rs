//! Live menu
//!
//! A [`Menu`] is one live instance of a registered prototype. It owns its
//! [`Screen`] and forwards every visibility and ordering change to it.

use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use super::prototype::Action;
use super::{BackPolicy, CloseType, MenuCategory, MenuId, MenuPrototype};
use crate::screen::Screen;

/// Button every menu binds to its own back handler
pub const BACK_BUTTON: &str = "BackButton";

/// A live menu instance
///
/// Menus are only created through the registry and only mutated by the
/// [`MenuManager`](crate::manager::MenuManager), which keeps at most one live
/// menu per id.
pub struct Menu {
    id: MenuId,
    close_type: CloseType,
    category: MenuCategory,
    back_policy: BackPolicy,
    back_hook: Option<Action>,
    bindings: HashMap<String, Action>,
    back_bound: bool,
    visible: bool,
    render_order: i32,
    screen: Box<dyn Screen>,
}

impl Menu {
    /// Instantiates a menu and binds its buttons
    ///
    /// Bindings whose button does not exist on the screen are dropped with a
    /// warning, the same as a missing back button.
    pub(crate) fn from_prototype(prototype: &MenuPrototype) -> Self {
        let mut screen = (prototype.screen_factory)(&prototype.id);
        screen.set_render_order(prototype.base_order);

        let back_bound = screen.has_button(BACK_BUTTON);
        if !back_bound {
            warn!(menu = %prototype.id, "menu has no {}. Was this intended?", BACK_BUTTON);
        }

        let mut bindings = HashMap::new();
        for (button, action) in &prototype.bindings {
            if screen.has_button(button) {
                bindings.insert(button.clone(), action.clone());
            } else {
                warn!(menu = %prototype.id, "menu has no {}. Was this intended?", button);
            }
        }

        Menu {
            id: prototype.id.clone(),
            close_type: prototype.close_type,
            category: prototype.category,
            back_policy: prototype.effective_back_policy(),
            back_hook: prototype.back_hook.clone(),
            bindings,
            back_bound,
            visible: false,
            render_order: prototype.base_order,
            screen,
        }
    }

    pub fn id(&self) -> &MenuId {
        &self.id
    }

    pub fn close_type(&self) -> CloseType {
        self.close_type
    }

    pub fn category(&self) -> MenuCategory {
        self.category
    }

    pub fn back_policy(&self) -> BackPolicy {
        self.back_policy
    }

    pub fn back_hook(&self) -> Option<&Action> {
        self.back_hook.as_ref()
    }

    /// Action bound to `button`, if the button exists and was bound
    pub fn action(&self, button: &str) -> Option<&Action> {
        self.bindings.get(button)
    }

    /// Returns true if the screen has a back button wired to the back handler
    pub fn has_back_button(&self) -> bool {
        self.back_bound
    }

    /// Names of all bound buttons, sorted
    pub fn buttons(&self) -> Vec<&str> {
        let mut buttons: Vec<_> = self.bindings.keys().map(String::as_str).collect();
        if self.back_bound {
            buttons.push(BACK_BUTTON);
        }
        buttons.sort_unstable();
        buttons
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn render_order(&self) -> i32 {
        self.render_order
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.screen.set_visible(visible);
    }

    pub(crate) fn set_render_order(&mut self, order: i32) {
        self.render_order = order;
        self.screen.set_render_order(order);
    }

    /// Tears the screen down; the menu is gone afterwards
    pub(crate) fn destroy(mut self) {
        self.visible = false;
        self.screen.destroy();
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("close_type", &self.close_type)
            .field("category", &self.category)
            .field("back_policy", &self.back_policy)
            .field("buttons", &self.buttons())
            .field("visible", &self.visible)
            .field("render_order", &self.render_order)
            .finish()
    }
}
