//! Headless match-3 server.
//!
//! Runs the paced engine with only the TCP adapter attached. Useful for bots
//! and CI where no terminal is available. Logs go to stderr (`RUST_LOG`).

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::info;

use match3_tui::adapter::{Adapter, BoardSize, Bridge};
use match3_tui::core::{GameConfig, GameSession};
use match3_tui::engine::{Engine, FixedPacing};
use match3_tui::types::TICK_MS;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::from_env();
    let session = GameSession::from_config(&config).context("failed to build the initial board")?;
    let mut engine = Engine::new(session, FixedPacing::from_env());

    let board = BoardSize {
        rows: config.rows,
        columns: config.columns,
    };
    let Some(mut adapter) = Adapter::start_from_env(board)? else {
        bail!("MATCH3_AI_DISABLED is set; the headless server has nothing to do");
    };
    info!("[Headless] running {}x{} board", config.rows, config.columns);

    let mut bridge = Bridge::new();
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        while let Some(cmd) = adapter.try_recv() {
            let out = bridge.handle_command(&mut engine, &cmd);
            adapter.send_all(out);
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            let released = engine.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
            adapter.send_all(bridge.released(&engine, &released));
        } else {
            thread::sleep(tick - elapsed);
        }
    }
}
