// What you SEE:
// • A grid background with a band of light sweeping down it every two seconds.
// • Bottom-right: FPS. Bottom-left: mouse coordinates while the cursor moves.
// • Centre: the text from assets/text.txt, wrapped to the window.
// • ESC (or closing the window) quits.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use light_grid::cli::Cli;
use light_grid::config::Config;
use light_grid::error::Error;
use light_grid::gui::{self, Gui};
use light_grid::screen::Screen;
use light_grid::theme;
use light_grid::types::FrameBuffer;
use light_grid::window::{Drawer, EventPump};

const CLEAR_COLOR: u32 = 0x00_00_00_00;

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    /* --- Logging ---
       RUST_LOG wins; otherwise info (debug with -v). */
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    /* --- Config: file first, then flag overrides --- */
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    /* --- Window setup ---
       Visual: an empty window appears; the grid fills in once the theme loads. */
    let mut drawer = Drawer::new(&config.window)?;
    drawer.set_target_fps(config.target_fps);
    let (w, h) = drawer.size();
    let mut screen_buf = FrameBuffer::new(w, h);
    info!(width = w, height = h, fps = config.target_fps, "window open");

    /* --- Theme loads in the background; screen copes until it arrives --- */
    let theme_rx = theme::spawn_loader(config.theme_dir.clone());
    let mut gui = Gui::new(Screen::from_config(&config), Some(theme_rx));
    let mut pump = EventPump::default();

    /* ------------------------------ Main loop ------------------------------ */
    while gui::keep_running(drawer.is_open(), gui.root().state()) {
        /* 1) Follow window resizes, then clear. */
        let (w, h) = drawer.size();
        if w == 0 || h == 0 {
            // minimized: keep pumping OS messages, skip drawing
            drawer.idle();
            continue;
        }
        screen_buf.resize(w, h);
        screen_buf.clear(CLEAR_COLOR);

        /* 2) Layout if needed, paint background + widgets. */
        gui.update(&mut screen_buf)?;

        /* 3) Present; minifb sleeps here to hold the target FPS. */
        drawer.present(&screen_buf)?;

        /* 4) Inputs gathered during present. */
        for event in pump.poll(&drawer) {
            gui.handle_event(&event);
        }
    }

    info!("exiting");
    Ok(())
}
