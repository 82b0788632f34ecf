//! Terminal match-3 runner (default binary).
//!
//! Keyboard and mouse drive the same engine as the TCP adapter. Frames are
//! drawn from the presenter, so the board animates at the engine's pacing
//! while the session itself resolves each move immediately.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use match3_tui::adapter::{Adapter, BoardSize, Bridge};
use match3_tui::core::{GameConfig, GameSession};
use match3_tui::engine::{Activation, Engine, FixedPacing};
use match3_tui::input::{handle_key_event, handle_mouse_event, should_quit};
use match3_tui::term::{AdapterStatusView, BoardFrame, BoardView, FrameBuffer, TerminalRenderer, Viewport};
use match3_tui::types::{BoardAction, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env();
    let session = GameSession::from_config(&config).context("failed to build the initial board")?;
    let mut engine = Engine::new(session, FixedPacing::from_env());
    info!(
        "[Main] {}x{} board, {} colors",
        config.rows,
        config.columns,
        config.palette.len()
    );

    let board = BoardSize {
        rows: config.rows,
        columns: config.columns,
    };
    let mut adapter = match Adapter::start_from_env(board) {
        Ok(adapter) => adapter,
        Err(e) => {
            warn!("[Main] adapter not started: {:#}", e);
            None
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine, adapter.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal owns stdout, so logs only go to a file when asked for.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("MATCH3_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("failed to create log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine, mut adapter: Option<&mut Adapter>) -> Result<()> {
    let view = BoardView::default();
    let mut bridge = Bridge::new();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        // Render.
        let status = adapter.as_deref().map(|a| AdapterStatusView {
            client_count: a.status().client_count().min(u16::MAX as usize) as u16,
            controller_id: a.status().controller_id(),
        });
        let frame = BoardFrame {
            presenter: engine.presenter(),
            cursor: Some(engine.cursor()),
            stats: engine.session().stats(),
            busy: engine.is_busy(),
            adapter: status.as_ref(),
        };
        view.render_into(&frame, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    handle_key_event(key)
                }
                Event::Mouse(mouse) => {
                    let grid = engine.session().grid();
                    let (rows, columns) = (grid.rows(), grid.columns());
                    handle_mouse_event(mouse, |x, y| view.cell_at(rows, columns, viewport, x, y))
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    None
                }
                _ => None,
            };

            if let Some(action) = action {
                let changes_board = !matches!(action, BoardAction::MoveCursor(_));
                match engine.dispatch(action) {
                    Ok(Activation::Accepted) if changes_board => {
                        if let Some(adapter) = adapter.as_deref() {
                            adapter.send(bridge.broadcast_observation(engine));
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("[Main] {:?} rejected: {}", action, e),
                }
            }
        }

        // Remote commands.
        if let Some(adapter) = adapter.as_deref_mut() {
            while let Some(cmd) = adapter.try_recv() {
                let out = bridge.handle_command(engine, &cmd);
                adapter.send_all(out);
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let released = engine.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
            if let Some(adapter) = adapter.as_deref() {
                adapter.send_all(bridge.released(engine, &released));
            }
        }
    }
}
