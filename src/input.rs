//! Input events and the router that turns them into state changes.

use crate::types::AppState;
use crate::widgets::Label;

/// Keyboard key, reduced to what the screen cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One discrete input event, in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    KeyPressed(Key),
    KeyReleased(Key),
    MouseMoved { x: i32, y: i32 },
    MousePressed { button: MouseButton, x: i32, y: i32 },
    MouseReleased { button: MouseButton, x: i32, y: i32 },
    MouseWheel { dx: f32, dy: f32 },
}

impl Event {
    /// Mouse events other than wheel scrolling.
    pub fn is_mouse_event_no_wheel(&self) -> bool {
        matches!(
            self,
            Event::MouseMoved { .. } | Event::MousePressed { .. } | Event::MouseReleased { .. }
        )
    }
}

/// Text shown by the cursor readout.
pub fn coords_text(x: i32, y: i32) -> String {
    format!("x: {x}  y: {y}")
}

/// Apply `event` to the app state. Returns true when the event was consumed.
///
/// Escape requests termination, pointer moves update the readout. Everything
/// else goes to `fallback`; non-wheel mouse events are consumed either way so
/// clicks never fall through the background.
pub fn route<F>(event: &Event, state: &mut AppState, readout: &mut Label, fallback: F) -> bool
where
    F: FnOnce(&Event) -> bool,
{
    match *event {
        Event::KeyPressed(Key::Escape) => {
            state.termination_requested = true;
            true
        }
        Event::MouseMoved { x, y } => {
            state.last_cursor = (x, y);
            readout.set_text(coords_text(x, y));
            true
        }
        _ => fallback(event) || event.is_mouse_event_no_wheel(),
    }
}
