//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_match3::term`.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tui_match3::core::{Session, SessionSnapshot, SimpleRng};
use tui_match3::input::{handle_key_event, should_quit, BoardCursor, CursorCommand};
use tui_match3::launch::LaunchOptions;
use tui_match3::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use tui_match3::types::{GameEvent, TICK_MS};

fn main() -> Result<()> {
    let opts = LaunchOptions::from_env();
    init_logging(&opts)?;

    let config = opts.load_config().context("loading level config")?;
    let seed = opts.seed_or_clock();
    let session = Session::new(config, SimpleRng::new(seed)).context("invalid level config")?;
    info!(seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to a file because the terminal is in raw mode.
fn init_logging(opts: &LaunchOptions) -> Result<()> {
    let Some(path) = &opts.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let view = BoardView::default();
    let mut cursor = BoardCursor::new(session.grid().width(), session.grid().height());
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Some(cursor.position()), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match cursor.apply(action) {
                            CursorCommand::Moved(_) => {}
                            CursorCommand::Select(c) if snap.playable() => {
                                let selection = session.select(c)?;
                                debug!(?selection, "select");
                            }
                            CursorCommand::Select(_) => {}
                            CursorCommand::Cancel => session.cancel_selection(),
                            CursorCommand::Restart => session.start_level(),
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.tick(elapsed.as_secs_f32());
            for event in session.drain_events() {
                if let GameEvent::GameEnded { won } = event {
                    info!(won, "level over; press r to play again");
                }
            }
        }
    }
}
