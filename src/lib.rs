//! Stack-based menu system
//!
//! Opening a menu pushes it above the current top, closing pops it, and the
//! menu below resumes. What happens to a superseded or closed menu depends on
//! its [`CloseType`]: destroyed, hidden, or left visible but disabled.
//!
//! # Architecture
//!
//! - [`menu`]: menu ids, close types, categories, prototypes and the registry
//! - [`manager`]: [`MenuManager`], the stack engine
//! - [`context`]: [`MenuContext`], which owns the engine and everything button
//!   actions need (application state, settings, deferred tasks)
//! - [`input`]: [`InputRouter`], turning cancel/back into stack operations
//! - [`session`]: the in-game/paused application state
//! - [`settings`]: key/float settings stores and [`PlayerSettings`]
//! - [`config`]: menu flows described as JSON
//! - [`menus`]: the stock welcome/main/options/pause menus
//! - [`screen`]: the rendering-layer boundary
//!
//! # Example Usage
//!
//! ```ignore
//! use menu_stack::{GameSession, InputRouter, InputSignal, MemorySettings, MenuContext};
//! use menu_stack::menus::{SampleMenus, PAUSE};
//!
//! let mut ctx = MenuContext::new(GameSession::new(PAUSE), MemorySettings::new());
//! ctx.bootstrap(&SampleMenus::new())?;
//!
//! // Next frame: the welcome menu appears
//! ctx.run_pending();
//!
//! let router = InputRouter::new();
//! router.handle(&mut ctx, InputSignal::Cancel);
//! ```

pub mod config;
pub mod context;
pub mod initialiser;
pub mod input;
pub mod manager;
pub mod menu;
pub mod menus;
pub mod screen;
pub mod session;
pub mod settings;

pub use config::{ConfigError, ConfigInitialiser, MenuCommand, MenuConfig};
pub use context::{Deferred, MenuContext};
pub use initialiser::MenuInitialiser;
pub use input::{BackRoute, InputRouter, InputSignal};
pub use manager::{MenuManager, StackReport};
pub use menu::{
    Action, BackPolicy, CloseType, Menu, MenuCategory, MenuError, MenuId, MenuPrototype,
    MenuRegistry,
};
pub use screen::{HeadlessScreen, Screen};
pub use session::{AppState, GameSession};
pub use settings::{JsonSettingsStore, MemorySettings, PlayerSettings, SettingsService};
