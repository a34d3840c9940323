// Generic driver for one root container: owns the animation clock, notices
// size changes, hands over the theme once it has loaded, and forwards events.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use tracing::debug;

use crate::error::Error;
use crate::input::Event;
use crate::render::SoftwareBackend;
use crate::theme::Theme;
use crate::types::{AppState, FrameBuffer, Rect};

/// What the driver needs from the thing it drives.
pub trait Container {
    /// Place children inside `inner`. Must depend on `inner` only.
    fn layout(&mut self, inner: Rect);

    /// True when content changed size since the last layout.
    fn needs_layout(&self) -> bool;

    fn apply_theme(&mut self, theme: &Theme);

    fn paint(&mut self, backend: &mut SoftwareBackend<'_>, time_ms: u64) -> Result<(), Error>;

    /// Returns true when the event was consumed.
    fn handle_event(&mut self, event: &Event) -> bool;
}

/// Milliseconds since the driver was created. Never goes backwards.
pub struct AnimationClock {
    start: Instant,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Loop condition, checked once per frame.
pub fn keep_running(window_open: bool, state: &AppState) -> bool {
    window_open && !state.termination_requested
}

pub struct Gui<C: Container> {
    root: C,
    clock: AnimationClock,
    size: Option<(usize, usize)>,
    theme_rx: Option<Receiver<Theme>>,
}

impl<C: Container> Gui<C> {
    pub fn new(root: C, theme_rx: Option<Receiver<Theme>>) -> Self {
        Self { root, clock: AnimationClock::new(), size: None, theme_rx }
    }

    pub fn root(&self) -> &C {
        &self.root
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.root.handle_event(event)
    }

    /// Update and paint one frame at the current clock time.
    pub fn update(&mut self, fb: &mut FrameBuffer) -> Result<(), Error> {
        let now = self.clock.now_ms();
        self.update_at(fb, now)
    }

    pub fn update_at(&mut self, fb: &mut FrameBuffer, time_ms: u64) -> Result<(), Error> {
        self.poll_theme();

        let size = (fb.width, fb.height);
        if self.size != Some(size) || self.root.needs_layout() {
            debug!(width = size.0, height = size.1, "layout");
            self.root.layout(Rect::new(0, 0, size.0 as i32, size.1 as i32));
            self.size = Some(size);
        }

        let mut backend = SoftwareBackend::new(fb);
        self.root.paint(&mut backend, time_ms)
    }

    fn poll_theme(&mut self) {
        let Some(rx) = &self.theme_rx else { return };
        match rx.try_recv() {
            Ok(theme) => {
                self.root.apply_theme(&theme);
                self.theme_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.theme_rx = None,
        }
    }
}
