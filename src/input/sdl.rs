//! SDL2 event translation
//!
//! Maps raw SDL2 events to [`InputSignal`]s so an SDL game loop can feed the
//! [`InputRouter`](super::InputRouter) directly.

use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use super::InputSignal;

/// Translates one SDL2 event; events the menus do not care about map to `None`
pub fn translate_event(event: &Event) -> Option<InputSignal> {
    match event {
        Event::Quit { .. } => Some(InputSignal::Quit),
        Event::KeyDown {
            keycode: Some(key),
            repeat: false,
            ..
        } => translate_key(*key),
        _ => None,
    }
}

/// Keys bound to menu signals
pub fn translate_key(key: Keycode) -> Option<InputSignal> {
    match key {
        Keycode::Escape => Some(InputSignal::Cancel),
        _ => None,
    }
}

/// Drains the event pump and returns the signals in order
pub fn poll_signals(event_pump: &mut EventPump) -> Vec<InputSignal> {
    event_pump
        .poll_iter()
        .filter_map(|event| translate_event(&event))
        .collect()
}
