use std::collections::HashMap;
use tracing::debug;

use super::error::MenuError;
use super::instance::Menu;
use super::{MenuId, MenuPrototype};

/// Central registry of all menu prototypes
///
/// This is the single source of truth for which menus can be shown. It is
/// populated once at startup by an initialiser; entries may be added later but
/// are never removed.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    prototypes: HashMap<MenuId, MenuPrototype>,
}

impl MenuRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        MenuRegistry {
            prototypes: HashMap::new(),
        }
    }

    /// Registers a new prototype
    ///
    /// Returns an error if a prototype with this id already exists.
    pub fn register(&mut self, prototype: MenuPrototype) -> Result<(), MenuError> {
        if self.prototypes.contains_key(&prototype.id) {
            return Err(MenuError::DuplicatePrototype(prototype.id.clone()));
        }

        debug!(menu = %prototype.id, "registering menu prototype");
        self.prototypes.insert(prototype.id.clone(), prototype);
        Ok(())
    }

    /// Gets a prototype by id
    pub fn get(&self, id: &MenuId) -> Option<&MenuPrototype> {
        self.prototypes.get(id)
    }

    /// Returns true if a prototype with this id exists
    pub fn contains(&self, id: &MenuId) -> bool {
        self.prototypes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Returns all registered ids, sorted
    pub fn ids(&self) -> Vec<&MenuId> {
        let mut ids: Vec<_> = self.prototypes.keys().collect();
        ids.sort();
        ids
    }

    /// Builds a new menu, with its buttons bound, from the prototype registered for `id`
    pub fn instantiate(&self, id: &MenuId) -> Result<Menu, MenuError> {
        let prototype = self
            .get(id)
            .ok_or_else(|| MenuError::MissingPrototype(id.clone()))?;

        Ok(Menu::from_prototype(prototype))
    }
}
