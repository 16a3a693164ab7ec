//! Input routing
//!
//! Input devices are polled by the platform layer. This module only sees the
//! resulting [`InputSignal`]s and turns a cancel/back signal into a stack
//! operation through [`InputRouter`].
//!
//! With the `sdl` feature, [`sdl`] translates SDL2 events into signals.

pub mod router;
#[cfg(feature = "sdl")]
pub mod sdl;

pub use router::{BackRoute, InputRouter, InputSignal};
