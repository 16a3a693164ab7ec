use super::MenuId;
use thiserror::Error;

/// Errors that can occur during menu stack operations
///
/// None of these are fatal: the stack is left in its last consistent state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// No prototype registered for this id
    #[error("no prototype registered for menu '{0}'")]
    MissingPrototype(MenuId),

    /// A prototype with this id already exists in the registry
    #[error("menu '{0}' is already registered")]
    DuplicatePrototype(MenuId),

    /// Tried to close a menu that is not on top of the stack
    #[error("menu '{requested}' cannot be closed because '{top}' is on top of the stack")]
    InvalidCloseTarget { requested: MenuId, top: MenuId },

    /// Tried to close something while the stack is empty
    #[error("the menu stack is empty")]
    EmptyStack,

    /// Menu is already the visible top
    #[error("menu '{0}' is already active")]
    AlreadyActive(MenuId),

    /// Menu is live and stacked below the top
    #[error("menu '{0}' is already on the stack below the top")]
    AlreadyStacked(MenuId),

    /// A live instance already exists for this id
    #[error("menu '{0}' already has a live instance")]
    AlreadyLive(MenuId),

    /// No live instance exists for this id
    #[error("menu '{0}' has no live instance")]
    NotLive(MenuId),

    /// Only the top of the stack accepts button presses
    #[error("menu '{0}' is not interactive")]
    NotInteractive(MenuId),

    /// The menu below already draws at the highest possible order
    #[error("menu '{0}' cannot be drawn above the menu below it")]
    RenderOrderOverflow(MenuId),

    /// No action bound to this button
    #[error("menu '{menu}' has no action bound to '{button}'")]
    UnknownButton { menu: MenuId, button: String },
}

impl From<MenuError> for String {
    fn from(error: MenuError) -> Self {
        error.to_string()
    }
}
