// The one screen of the app: animated grid background, FPS readout in the
// bottom-right corner, cursor readout bottom-left, text panel in the middle.

use std::path::Path;

use tracing::{info, warn};

use crate::compositor::Compositor;
use crate::config::Config;
use crate::error::Error;
use crate::gui::Container;
use crate::input::{self, Event};
use crate::layout;
use crate::render::SoftwareBackend;
use crate::theme::{Theme, GRID_BASE, GRID_MASK};
use crate::types::{AppState, Image, Rect};
use crate::widgets::{FpsCounter, Label, TextPanel};

/// Read the informational text shown in the centre panel.
pub fn load_text(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::TextLoad { path: path.to_path_buf(), source })
}

pub struct Screen {
    state: AppState,
    compositor: Compositor,
    fps: FpsCounter,
    coords: Label,
    // None when the text file could not be read
    text: Option<TextPanel>,
    grid_base: Option<Image>,
    grid_mask: Option<Image>,
    inner: Rect,
    relayout: bool,
}

impl Screen {
    pub fn new(compositor: Compositor, text: Option<String>) -> Self {
        Self {
            state: AppState::default(),
            compositor,
            fps: FpsCounter::new(),
            coords: Label::new(""),
            text: text.map(TextPanel::new),
            grid_base: None,
            grid_mask: None,
            inner: Rect::default(),
            relayout: true,
        }
    }

    /// Build the screen from config. A missing text file only drops the panel.
    pub fn from_config(config: &Config) -> Self {
        let compositor = Compositor::new(config.overlay.height, config.overlay.cycle_ms);
        let text = match load_text(&config.text_file) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("{e}; text panel disabled");
                None
            }
        };
        Self::new(compositor, text)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn coords(&self) -> &Label {
        &self.coords
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn text_panel(&self) -> Option<&TextPanel> {
        self.text.as_ref()
    }
}

impl Container for Screen {
    fn layout(&mut self, inner: Rect) {
        self.inner = inner;
        let l = layout::compute(inner, self.fps.label().preferred_size(), self.coords.preferred_size());
        self.fps.label_mut().set_rect(l.corner);
        self.coords.set_rect(l.secondary);
        if let Some(text) = &mut self.text {
            text.set_rect(l.panel);
        }
        self.relayout = false;
    }

    fn needs_layout(&self) -> bool {
        self.relayout
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.grid_base = theme.image(GRID_BASE).cloned();
        self.grid_mask = theme.image(GRID_MASK).cloned();
        for (name, img) in [(GRID_BASE, &self.grid_base), (GRID_MASK, &self.grid_mask)] {
            if img.is_none() {
                warn!("theme has no '{name}' image; background stays blank");
            }
        }
        info!("theme applied");
    }

    fn paint(&mut self, backend: &mut SoftwareBackend<'_>, time_ms: u64) -> Result<(), Error> {
        self.compositor.paint_frame(
            backend,
            time_ms,
            self.inner,
            self.grid_base.as_ref(),
            self.grid_mask.as_ref(),
        )?;

        if self.fps.tick(time_ms) {
            self.relayout = true;
        }

        let fb = backend.frame();
        if let Some(text) = &self.text {
            text.paint(fb);
        }
        self.fps.label().paint(fb);
        self.coords.paint(fb);
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        let before = self.coords.preferred_size();
        let consumed = input::route(event, &mut self.state, &mut self.coords, |_| false);
        if self.coords.preferred_size() != before {
            self.relayout = true;
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::{keep_running, Gui};
    use crate::input::Key;
    use crate::types::FrameBuffer;

    fn opaque(w: usize, h: usize, argb: u32) -> Image {
        Image { width: w, height: h, pixels: vec![argb; w * h] }
    }

    #[test]
    fn escape_ends_the_frame_loop() {
        let mut gui = Gui::new(Screen::new(Compositor::default(), None), None);
        let mut fb = FrameBuffer::new(800, 600);
        gui.update_at(&mut fb, 0).unwrap();
        assert!(keep_running(true, gui.root().state()));

        assert!(gui.handle_event(&Event::KeyPressed(Key::Escape)));
        assert!(!keep_running(true, gui.root().state()));
    }

    #[test]
    fn pointer_move_updates_readout_and_relayouts() {
        let mut gui = Gui::new(Screen::new(Compositor::default(), None), None);
        let mut fb = FrameBuffer::new(800, 600);
        gui.update_at(&mut fb, 0).unwrap();

        assert!(gui.handle_event(&Event::MouseMoved { x: 12, y: 34 }));
        assert_eq!(gui.root().state().last_cursor, (12, 34));
        assert_eq!(gui.root().coords().text(), "x: 12  y: 34");
        assert!(gui.root().needs_layout());

        gui.update_at(&mut fb, 16).unwrap();
        let rect = gui.root().coords().rect();
        assert_eq!(rect.width, 12 * crate::draw::ADVANCE);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 600 - gui.root().fps().label().rect().height);
    }

    #[test]
    fn layout_places_panel_and_readouts() {
        let mut screen = Screen::new(Compositor::default(), Some("hello".into()));
        screen.layout(Rect::new(0, 0, 800, 600));
        let panel = screen.text_panel().unwrap().rect();
        assert_eq!(panel, Rect::new(50, 50, 700, 500));

        let fps = screen.fps().label().rect();
        assert_eq!(fps.x + fps.width, 800);
        assert_eq!(fps.y + fps.height, 600);

        screen.layout(Rect::new(0, 0, 800, 600));
        assert_eq!(screen.text_panel().unwrap().rect(), panel);
        assert_eq!(screen.fps().label().rect(), fps);
    }

    #[test]
    fn background_stays_blank_until_theme_applies() {
        let mut screen = Screen::new(Compositor::default(), None);
        screen.layout(Rect::new(0, 0, 8, 300));
        let mut fb = FrameBuffer::new(8, 300);

        {
            let mut backend = SoftwareBackend::new(&mut fb);
            screen.paint(&mut backend, 1000).unwrap();
        }
        // readouts only touch the bottom rows
        assert!(fb.pixels[..8 * 200].iter().all(|&p| p == 0));

        let mut theme = Theme::default();
        theme.insert(GRID_BASE, opaque(1, 1, 0xFF_20_20_20));
        theme.insert(GRID_MASK, opaque(1, 1, 0x00_00_00_00));
        screen.apply_theme(&theme);

        fb.clear(0);
        {
            let mut backend = SoftwareBackend::new(&mut fb);
            screen.paint(&mut backend, 0).unwrap();
        }
        // band is fully above the screen at t=0: plain base colour
        assert_eq!(fb.pixels[0], 0x00_20_20_20);
        assert_eq!(fb.pixels[8 * 150], 0x00_20_20_20);
    }

    #[test]
    fn clicks_are_consumed_wheel_is_not() {
        let mut screen = Screen::new(Compositor::default(), None);
        assert!(screen.handle_event(&Event::MousePressed {
            button: input::MouseButton::Left,
            x: 3,
            y: 4
        }));
        assert!(!screen.handle_event(&Event::MouseWheel { dx: 0.0, dy: 1.0 }));
        assert!(!screen.handle_event(&Event::KeyPressed(Key::Char('a'))));
        assert!(!screen.state().termination_requested);
    }

    #[test]
    fn missing_text_file_disables_panel() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.text_file = dir.path().join("missing.txt");
        assert!(Screen::from_config(&config).text_panel().is_none());

        let path = dir.path().join("text.txt");
        std::fs::write(&path, "Welcome").unwrap();
        config.text_file = path;
        assert!(Screen::from_config(&config).text_panel().is_some());
    }
}
