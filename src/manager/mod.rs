//! Menu stack engine
//!
//! [`MenuManager`] owns the registry, the arena of live menus (at most one per
//! [`MenuId`]) and the stack of menu ids. Every push/pop and every visibility or
//! render-order change goes through it.
//!
//! # Rules
//!
//! Opening a menu looks at the current top:
//! - `Destroy`: the top is popped and destroyed, the new menu takes its place
//! - `Hide`: the top is hidden but stays on the stack
//! - `Disabled`: the top stays visible; the screen binding gates its input
//!
//! The pushed menu always draws one above the menu directly below it. Closing
//! only ever pops the top and re-shows whatever is below it.

pub mod report;

use std::collections::HashMap;
use tracing::{debug, error, warn};

use crate::menu::{CloseType, Menu, MenuError, MenuId, MenuPrototype, MenuRegistry};

pub use report::{ReportEntry, StackReport};

/// The menu stack and everything it needs to instantiate menus
#[derive(Debug, Default)]
pub struct MenuManager {
    registry: MenuRegistry,
    live: HashMap<MenuId, Menu>,
    stack: Vec<MenuId>,
}

impl MenuManager {
    /// Creates a manager with an empty registry
    pub fn new() -> Self {
        Self::with_registry(MenuRegistry::new())
    }

    /// Creates a manager around an already populated registry
    pub fn with_registry(registry: MenuRegistry) -> Self {
        MenuManager {
            registry,
            live: HashMap::new(),
            stack: Vec::new(),
        }
    }

    // ======================================================================
    // Registry
    // ======================================================================

    pub fn register_prototype(&mut self, prototype: MenuPrototype) -> Result<(), MenuError> {
        self.registry.register(prototype)
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    /// Instantiates the singleton for `id` without opening it
    pub fn create_instance(&mut self, id: &MenuId) -> Result<(), MenuError> {
        if self.live.contains_key(id) {
            return Err(MenuError::AlreadyLive(id.clone()));
        }

        let menu = self.registry.instantiate(id)?;
        debug!(menu = %id, "created menu instance");
        self.live.insert(id.clone(), menu);
        Ok(())
    }

    // ======================================================================
    // Stack operations
    // ======================================================================

    /// Pushes a live menu on top of the stack
    pub fn open(&mut self, id: &MenuId) -> Result<(), MenuError> {
        if !self.live.contains_key(id) {
            return Err(MenuError::NotLive(id.clone()));
        }
        if self.top_id() == Some(id) {
            return Err(MenuError::AlreadyActive(id.clone()));
        }
        if self.stack.contains(id) {
            return Err(MenuError::AlreadyStacked(id.clone()));
        }

        // The neighbor after the push is the menu below the top when the top
        // gets replaced, the top otherwise
        let top_close_type = self
            .stack
            .last()
            .and_then(|top| self.live.get(top))
            .map(Menu::close_type);
        let neighbor_depth = match top_close_type {
            Some(CloseType::Destroy) => 2,
            _ => 1,
        };
        let neighbor_order = self
            .stack
            .len()
            .checked_sub(neighbor_depth)
            .and_then(|index| self.live.get(&self.stack[index]))
            .map(Menu::render_order);
        let order = match neighbor_order {
            Some(order) => Some(
                order
                    .checked_add(1)
                    .ok_or_else(|| MenuError::RenderOrderOverflow(id.clone()))?,
            ),
            None => None,
        };

        if let Some(top_id) = self.stack.last().cloned() {
            match top_close_type {
                Some(CloseType::Destroy) => {
                    self.stack.pop();
                    if let Some(top) = self.live.remove(&top_id) {
                        top.destroy();
                    }
                    debug!(menu = %top_id, replaced_by = %id, "destroyed superseded menu");
                }
                Some(CloseType::Hide) => {
                    if let Some(top) = self.live.get_mut(&top_id) {
                        top.set_visible(false);
                    }
                }
                Some(CloseType::Disabled) | None => {}
            }
        }

        let menu = self
            .live
            .get_mut(id)
            .ok_or_else(|| MenuError::NotLive(id.clone()))?;
        if let Some(order) = order {
            menu.set_render_order(order);
        }
        menu.set_visible(true);
        self.stack.push(id.clone());

        debug!(menu = %id, depth = self.stack.len(), "opened menu");
        Ok(())
    }

    /// Closes `id`, which must be the top of the stack
    ///
    /// Rejected requests are logged and leave the stack untouched.
    pub fn close(&mut self, id: &MenuId) -> Result<(), MenuError> {
        let Some(top) = self.stack.last() else {
            warn!(menu = %id, "menu cannot be closed because the menu stack is empty");
            return Err(MenuError::EmptyStack);
        };

        if top != id {
            warn!(menu = %id, top = %top, "menu cannot be closed because it is not on top of the stack");
            return Err(MenuError::InvalidCloseTarget {
                requested: id.clone(),
                top: top.clone(),
            });
        }

        self.close_top()
    }

    /// Pops the top of the stack unconditionally and re-shows the menu below it
    pub fn close_top(&mut self) -> Result<(), MenuError> {
        let id = self.stack.pop().ok_or(MenuError::EmptyStack)?;

        match self.live.get(&id).map(Menu::close_type) {
            Some(CloseType::Destroy) => {
                if let Some(menu) = self.live.remove(&id) {
                    menu.destroy();
                }
                debug!(menu = %id, "menu destroyed (closed)");
            }
            Some(CloseType::Hide | CloseType::Disabled) => {
                if let Some(menu) = self.live.get_mut(&id) {
                    menu.set_visible(false);
                }
                debug!(menu = %id, "menu deactivated (closed)");
            }
            None => {}
        }

        if let Some(next) = self.stack.last() {
            if let Some(menu) = self.live.get_mut(next) {
                menu.set_visible(true);
            }
        }

        Ok(())
    }

    // ======================================================================
    // Public show/hide entry points
    // ======================================================================

    /// Shows the singleton for `id`, creating it on first use
    ///
    /// Returns false without touching the stack if the menu is already the
    /// visible top, is stacked further down, or has no prototype.
    pub fn show(&mut self, id: &MenuId) -> bool {
        match self.try_show(id) {
            Ok(()) => true,
            Err(MenuError::AlreadyActive(_)) => {
                debug!(menu = %id, "menu is already active");
                false
            }
            Err(err @ MenuError::MissingPrototype(_)) => {
                error!(%err, "cannot show menu");
                false
            }
            Err(err) => {
                warn!(%err, "cannot show menu");
                false
            }
        }
    }

    /// Like [`show`](Self::show), but reports why nothing happened
    pub fn try_show(&mut self, id: &MenuId) -> Result<(), MenuError> {
        if !self.live.contains_key(id) {
            self.create_instance(id)?;
        }
        self.open(id)
    }

    /// Closes the singleton for `id` if it is the top of the stack
    pub fn hide(&mut self, id: &MenuId) -> bool {
        if !self.live.contains_key(id) {
            warn!(menu = %id, "attempted to close menu but it has no live instance");
            return false;
        }

        self.close(id).is_ok()
    }

    /// Closes whatever is on top, as long as `id` has a live instance
    pub fn force_hide(&mut self, id: &MenuId) -> bool {
        if !self.live.contains_key(id) {
            warn!(menu = %id, "attempted to close menu but it has no live instance");
            return false;
        }

        self.close_top().is_ok()
    }

    /// Destroys every live menu and empties the stack
    pub fn shutdown(&mut self) {
        self.stack.clear();
        for (id, menu) in self.live.drain() {
            debug!(menu = %id, "menu destroyed (shutdown)");
            menu.destroy();
        }
    }

    // ======================================================================
    // Queries
    // ======================================================================

    pub fn top(&self) -> Option<&Menu> {
        self.stack.last().and_then(|id| self.live.get(id))
    }

    pub fn top_id(&self) -> Option<&MenuId> {
        self.stack.last()
    }

    /// Stacked ids, bottom first
    pub fn stack(&self) -> &[MenuId] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn menu(&self, id: &MenuId) -> Option<&Menu> {
        self.live.get(id)
    }

    /// Returns true if a live instance exists, stacked or not
    pub fn is_live(&self, id: &MenuId) -> bool {
        self.live.contains_key(id)
    }

    pub fn is_visible(&self, id: &MenuId) -> bool {
        self.live.get(id).is_some_and(Menu::is_visible)
    }

    pub fn render_order(&self, id: &MenuId) -> Option<i32> {
        self.live.get(id).map(Menu::render_order)
    }

    /// Snapshot of the stack for debug overlays, top first
    pub fn report(&self) -> StackReport {
        let entries = self
            .stack
            .iter()
            .rev()
            .filter_map(|id| self.live.get(id))
            .map(|menu| ReportEntry {
                id: menu.id().clone(),
                active: menu.is_visible(),
                close_type: menu.close_type(),
            })
            .collect();

        StackReport { entries }
    }
}

impl Drop for MenuManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
