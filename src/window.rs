// Window + input polling on top of minifb.
// minifb reports *state* (which keys are down, where the mouse is); the screen
// wants *events*. `EventPump` diffs successive snapshots to produce them.

use minifb::{KeyRepeat, MouseMode, Window, WindowOptions};

use crate::config::WindowConfig;
use crate::error::Error;
use crate::input::{Event, Key, MouseButton};
use crate::types::FrameBuffer;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Open the window. It shows nothing until the first `present`.
    pub fn new(config: &WindowConfig) -> Result<Self, Error> {
        let options = WindowOptions { resize: config.resizable, ..WindowOptions::default() };
        let window = Window::new(&config.title, config.width, config.height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Cap the frame rate; `present` sleeps as needed to hold it.
    pub fn set_target_fps(&mut self, fps: usize) {
        self.window.set_target_fps(fps);
    }

    /// Push the pixels for this frame to the screen and process OS messages.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process OS messages without a new frame.
    pub fn idle(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Current client area size in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Everything the pump needs from this frame's input state.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            mouse: self.window.get_mouse_pos(MouseMode::Discard),
            buttons: [
                self.window.get_mouse_down(minifb::MouseButton::Left),
                self.window.get_mouse_down(minifb::MouseButton::Right),
                self.window.get_mouse_down(minifb::MouseButton::Middle),
            ],
            wheel: self.window.get_scroll_wheel(),
            pressed: self.window.get_keys_pressed(KeyRepeat::No).into_iter().map(map_key).collect(),
            released: self.window.get_keys_released().into_iter().map(map_key).collect(),
        }
    }
}

/// minifb key -> our key. Letters and digits become `Key::Char`.
fn map_key(key: minifb::Key) -> Key {
    match key {
        minifb::Key::Escape => Key::Escape,
        minifb::Key::Enter | minifb::Key::NumPadEnter => Key::Enter,
        minifb::Key::Space => Key::Space,
        other => {
            // Debug names are "A".."Z" and "Key0".."Key9"
            let name = format!("{other:?}");
            let name = name.strip_prefix("Key").unwrap_or(&name);
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Key::Char(c.to_ascii_lowercase()),
                _ => Key::Other,
            }
        }
    }
}

/// Raw input state for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// None while the cursor is outside the window.
    pub mouse: Option<(f32, f32)>,
    /// Left, right, middle.
    pub buttons: [bool; 3],
    pub wheel: Option<(f32, f32)>,
    pub pressed: Vec<Key>,
    pub released: Vec<Key>,
}

const BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

#[derive(Debug, Default)]
pub struct EventPump {
    last_mouse: Option<(i32, i32)>,
    buttons: [bool; 3],
}

impl EventPump {
    /// Read this frame's input from the window and turn it into events.
    pub fn poll(&mut self, drawer: &Drawer) -> Vec<Event> {
        self.translate(drawer.snapshot())
    }

    /// Diff `snap` against the previous frame.
    pub fn translate(&mut self, snap: InputSnapshot) -> Vec<Event> {
        let mut events: Vec<Event> = snap.pressed.into_iter().map(Event::KeyPressed).collect();
        events.extend(snap.released.into_iter().map(Event::KeyReleased));

        let mouse = snap.mouse.map(|(x, y)| (x as i32, y as i32));
        if let Some((x, y)) = mouse {
            if self.last_mouse != mouse {
                events.push(Event::MouseMoved { x, y });
            }
            for (i, &down) in snap.buttons.iter().enumerate() {
                let button = BUTTONS[i];
                match (self.buttons[i], down) {
                    (false, true) => events.push(Event::MousePressed { button, x, y }),
                    (true, false) => events.push(Event::MouseReleased { button, x, y }),
                    _ => {}
                }
            }
            self.last_mouse = mouse;
        }
        self.buttons = snap.buttons;

        if let Some((dx, dy)) = snap.wheel {
            if dx != 0.0 || dy != 0.0 {
                events.push(Event::MouseWheel { dx, dy });
            }
        }
        events
    }
}
