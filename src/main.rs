//! Terminal split-flap board (default binary).
//!
//! Uses crossterm for keyboard and mouse input and a framebuffer-based
//! renderer. Board timers advance on a fixed timestep; the transcript feed
//! runs on its own tokio runtime and is polled once per tick.

use std::fs::File;
use std::io;
use std::panic;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, Event, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use solari::adapter::TranscriptFeed;
use solari::core::{
    Board, BoardConfig, BoardMode, BoardSnapshot, NoTextStream, TextStreamSource, ViewportSource,
};
use solari::input::{handle_key_event, should_quit, PointerMapper};
use solari::term::{BoardView, FrameBuffer, StatusView, TerminalRenderer, TerminalViewport};
use solari::types::{BoardAction, CellScale, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let mut config = BoardConfig::default()
        .from_env()
        .context("invalid board configuration")?;
    if std::env::var_os("SOLARI_SEED").is_none() {
        config = config.with_seed(seed_from_clock());
    }

    let feed = match TranscriptFeed::listen_from_env() {
        Ok(feed) => feed,
        Err(e) => {
            warn!(error = %e, "transcript feed unavailable");
            None
        }
    };

    // Restore the terminal before the panic message is printed.
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, config, feed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `SOLARI_LOG_FILE` when set; the terminal itself belongs to the board.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("SOLARI_LOG_FILE") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("solari=info,solari_core=info,solari_adapter=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    config: BoardConfig,
    feed: Option<TranscriptFeed>,
) -> Result<()> {
    let scale = CellScale::default();
    let mut viewport =
        TerminalViewport::detect(scale).unwrap_or_else(|_| TerminalViewport::new(scale, 80, 24));
    let (width, height) = viewport.size();
    let mut board = Board::new(config, width, height);
    info!(
        cols = board.grid().cols,
        rows = board.grid().rows,
        seed = config.seed,
        "board started"
    );

    let note = feed.as_ref().map(|f| format!("feed {}", f.local_addr()));
    let mut stream: Box<dyn TextStreamSource> = match feed {
        Some(feed) => Box::new(feed),
        None => Box::new(NoTextStream),
    };

    let view = BoardView::new(scale);
    let mut pointer = PointerMapper::new(scale);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = BoardSnapshot::default();

    let started = Instant::now();
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        board.snapshot_into(&mut snap);
        let status = StatusView {
            strategy: board.strategy().as_str(),
            live: board.mode() == BoardMode::LiveStream,
            live_available: stream.supported(),
            note: note.as_deref(),
        };
        view.render_into(&snap, board.plan(), Some(&status), viewport.cells(), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        break;
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&mut board, stream.as_mut(), action);
                    }
                }
                Event::Mouse(mouse) => {
                    let t_ms = started.elapsed().as_millis() as u64;
                    for input in pointer.map(mouse, t_ms) {
                        board.handle_pointer(input);
                    }
                }
                Event::Resize(w, h) => {
                    viewport.on_resize(w, h);
                    term.invalidate();
                }
                _ => {}
            }
        }

        if let Some((width, height)) = viewport.poll_resize() {
            board.resize(width, height);
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            board.poll_stream(stream.as_mut());
            board.tick(TICK_MS);
        }
    }

    board.exit_live_stream(stream.as_mut());
    board.teardown();
    info!("board stopped");
    Ok(())
}

fn apply_action(board: &mut Board, stream: &mut dyn TextStreamSource, action: BoardAction) {
    match action {
        BoardAction::Reshuffle => board.reshuffle(),
        BoardAction::CycleLayout => {
            board.cycle_strategy();
        }
        BoardAction::ToggleLiveStream => match board.mode() {
            BoardMode::Cascade => {
                board.enter_live_stream(stream);
            }
            BoardMode::LiveStream => board.exit_live_stream(stream),
        },
    }
}
