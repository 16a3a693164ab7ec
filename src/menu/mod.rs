//! Menu data model
//!
//! This module provides the pieces the menu stack is made of:
//! - [`MenuId`], [`CloseType`], [`MenuCategory`] and [`BackPolicy`]
//! - [`MenuPrototype`], the template a menu is instantiated from
//! - [`MenuRegistry`], the id → prototype map populated at startup
//! - [`Menu`], a live instance owning its screen
//!
//! # Example Usage
//!
//! ```ignore
//! use menu_stack::menu::{MenuId, MenuPrototype, MenuRegistry, CloseType};
//!
//! const OPTIONS: MenuId = MenuId::from_static("options");
//!
//! let mut registry = MenuRegistry::new();
//! registry.register(
//!     MenuPrototype::new(OPTIONS, |_| Box::new(HeadlessScreen::new("options", ["BackButton"])))
//!         .with_close_type(CloseType::Hide),
//! )?;
//!
//! let menu = registry.instantiate(&OPTIONS)?;
//! ```

pub mod error;
pub mod instance;
pub mod prototype;
pub mod registry;
pub mod types;

pub use error::MenuError;
pub use instance::{Menu, BACK_BUTTON};
pub use prototype::{Action, MenuPrototype, ScreenFactory};
pub use registry::MenuRegistry;
pub use types::{BackPolicy, CloseType, MenuCategory, MenuId};
