// The three widgets on the screen: two text readouts and the text panel.

use tracing::debug;

use crate::draw::{self, ADVANCE, LINE_HEIGHT};
use crate::types::{FrameBuffer, Rect};

const TEXT_COLOR: u32 = 0x00_FF_FF_FF;

/// Single line of text, sized to its content by the layout pass.
pub struct Label {
    text: String,
    rect: Rect,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), rect: Rect::default() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true when the text actually changed (and the size may have too).
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    pub fn preferred_size(&self) -> (i32, i32) {
        draw::text_size(&self.text)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn paint(&self, fb: &mut FrameBuffer) {
        draw::draw_text(fb, self.rect, self.rect.x, self.rect.y, &self.text, TEXT_COLOR);
    }
}

/// Frames-per-second readout, refreshed once per second.
pub struct FpsCounter {
    label: Label,
    frames: u32,
    window_start_ms: Option<u64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self { label: Label::new("FPS: 0.0"), frames: 0, window_start_ms: None }
    }

    /// Count one frame. Returns true when the displayed text changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames += 1;

        let elapsed = now_ms.saturating_sub(start);
        if elapsed < 1000 {
            return false;
        }
        let fps = self.frames as f64 * 1000.0 / elapsed as f64;
        debug!("FPS: {:.1}", fps);
        self.frames = 0;
        self.window_start_ms = Some(now_ms);
        self.label.set_text(format!("FPS: {:.1}", fps))
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Word-wrap `text` into lines of at most `max_chars` characters.
/// Blank lines in the source are kept; over-long words are split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for para in text.lines() {
        let mut line = String::new();
        for word in para.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..max_chars).collect());
            }
            let line_len = line.chars().count();
            if !line.is_empty() && line_len + 1 + word.len() > max_chars {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

/// Multi-line informational text, wrapped to the panel width.
pub struct TextPanel {
    text: String,
    rect: Rect,
    lines: Vec<String>,
}

impl TextPanel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), rect: Rect::default(), lines: Vec::new() }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Place the panel and re-wrap its text for the new width.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.lines = if rect.is_empty() {
            Vec::new()
        } else {
            wrap(&self.text, (rect.width / ADVANCE) as usize)
        };
    }

    pub fn paint(&self, fb: &mut FrameBuffer) {
        let mut y = self.rect.y;
        for line in &self.lines {
            if y >= self.rect.y + self.rect.height {
                break;
            }
            draw::draw_text(fb, self.rect, self.rect.x, y, line, TEXT_COLOR);
            y += LINE_HEIGHT;
        }
    }
}
