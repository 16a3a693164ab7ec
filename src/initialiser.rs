// Menu initialiser
//
// An initialiser knows every menu an application can show. The context calls
// `register_menus` once at startup and then shows `initial_menu` one step
// later (see `MenuContext::bootstrap`).

use crate::manager::MenuManager;
use crate::menu::{MenuError, MenuId};

/// Registers the known menu prototypes and names the first menu to show
pub trait MenuInitialiser {
    /// Registers every prototype; any failure aborts the bootstrap
    fn register_menus(&self, menus: &mut MenuManager) -> Result<(), MenuError>;

    /// Menu shown once registration has completed
    fn initial_menu(&self) -> MenuId;
}
