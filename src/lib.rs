//! Animated grid background with a scanning light band, plus FPS and cursor
//! readouts and a text panel. Software rendered into a minifb window.
//!
//! Frame flow: [`window::EventPump`] turns polled input into [`input::Event`]s,
//! [`gui::Gui`] drives the [`screen::Screen`] (layout on resize, theme hand-off,
//! paint), and [`compositor::Compositor`] draws the background through the
//! [`render::Backend`] trait.

pub mod cli;
pub mod compositor;
pub mod config;
pub mod draw;
pub mod error;
pub mod gui;
pub mod input;
pub mod layout;
pub mod overlay;
pub mod render;
pub mod screen;
pub mod theme;
pub mod types;
pub mod widgets;
pub mod window;
