//! A draggable, wheel-scrollable image carousel for the terminal.
//!
//! Run with a directory to browse its images, or without one for a set of
//! generated slides.  Drag with the left mouse button, scroll with the wheel
//! or the arrow keys.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    frame::FrameScheduler,
    handler,
    state::AppState,
};
use crate::core::slides::{self, ScanConfig};
use crate::ui::{
    carousel::{CarouselWidget, ProgressBar},
    layout::AppLayout,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Drag-to-scroll image carousel")]
struct Cli {
    /// Directory of images to show.  Generated slides are used when omitted.
    path: Option<PathBuf>,

    /// Number of generated slides (ignored when a directory is given).
    #[arg(long, default_value_t = 8)]
    count: usize,

    /// Slide width in terminal columns (overrides the config file).
    #[arg(long)]
    item_width: Option<u16>,

    /// Animation frame rate (overrides the config file).
    #[arg(long)]
    fps: Option<u32>,

    /// Include hidden (dot) files when scanning the directory.
    #[arg(long)]
    hidden: bool,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

type Term = Terminal<CrosstermBackend<Stderr>>;

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut config = config::AppConfig::load();
    if let Some(w) = cli.item_width {
        config.item_width = w.max(6);
    }
    if let Some(fps) = cli.fps {
        config.fps = fps.clamp(10, 240);
    }

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }

    // ── load slides ───────────────────────────────────────────
    let slides = match cli.path.clone() {
        Some(dir) => {
            let dir = dir
                .canonicalize()
                .with_context(|| format!("cannot open {}", dir.display()))?;
            let scan = ScanConfig {
                show_hidden: cli.hidden,
                ..ScanConfig::default()
            };
            tokio::task::spawn_blocking(move || slides::scan_dir(&dir, &scan)).await??
        }
        None => slides::generated(cli.count.max(1)),
    };

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // Run, then always restore the terminal before reporting errors.
    let result = run(&mut terminal, slides, config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Term, slides: Vec<slides::Slide>, config: config::AppConfig) -> Result<()> {
    let size = terminal.size()?;
    let layout = AppLayout::from_area(Rect::new(0, 0, size.width, size.height));
    let fps = config.fps;
    let mut state = AppState::new(slides, config, layout.viewport_area.width)?;

    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut frames = FrameScheduler::new(fps);

    // ── event loop ────────────────────────────────────────────
    loop {
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => {
                        let layout = AppLayout::from_area(Rect::new(0, 0, w, h));
                        handler::handle_resize(&mut state, layout.viewport_area.width);
                    }
                    AppEvent::FocusLost => handler::handle_focus_lost(&mut state),
                }
            }

            _ = frames.next_frame() => {
                state.controller.advance();
                // The tick always runs; repaint only while something moves.
                if state.needs_redraw || !state.controller.is_settled() {
                    terminal.draw(|frame| draw(frame, &state))?;
                    state.needs_redraw = false;
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.controller.dispose();
    drop(events);
    Ok(())
}

fn draw(frame: &mut Frame<'_>, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    let view = state.controller.surface();
    let title = format!(
        " {} · {} slides · {:.0}px track · {:.0}% ",
        env!("CARGO_PKG_NAME"),
        state.slides.len(),
        view.track_width(),
        state.controller.state().play_ratio * 100.0,
    );
    let block = Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    frame.render_widget(block, layout.frame_area);

    frame.render_widget(
        CarouselWidget {
            view,
            slides: &state.slides,
        },
        layout.viewport_area,
    );
    frame.render_widget(
        ProgressBar {
            scale: view.bar_scale_x(),
        },
        layout.progress_area,
    );

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}
