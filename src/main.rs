//! blockfall terminal runner.
//!
//! Drives the engine at a fixed 60 Hz cadence, forwards key presses as game
//! actions and redraws whenever the engine reports a change.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::{Engine, GameSnapshot};
use blockfall::input::{map_key, should_quit};
use blockfall::logging::init_file_logger;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::Config;

fn main() -> Result<()> {
    let config = Config::from_env();
    if let Some(path) = &config.log_path {
        init_file_logger(path, config.log_level)?;
    }
    for warning in config.warnings() {
        log::warn!("{warning}");
    }
    log::info!(
        "starting: seed={:?} frame_ms={:.2}",
        config.seed,
        config.frame_ms
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("exiting with error: {e:#}");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let (tx, rx) = mpsc::channel::<GameSnapshot>();
    let on_change = move |snap: &GameSnapshot| {
        // The receiver lives for the whole loop; a send error only happens on shutdown.
        let _ = tx.send(*snap);
    };
    let mut engine = match config.seed {
        Some(seed) => Engine::with_seed(seed, on_change),
        None => Engine::new(on_change),
    };

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut latest = engine.snapshot();
    let mut dirty = true;
    let mut reported_game_over = false;

    let frame = Duration::from_secs_f64(config.frame_ms / 1000.0);
    let mut last_frame = Instant::now();

    loop {
        if let Some(snap) = rx.try_iter().last() {
            latest = snap;
            dirty = true;
        }
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&latest, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }
        if latest.game_over && !reported_game_over {
            log::info!("game over, press q to quit");
            reported_game_over = true;
        }

        // Input until the next frame is due.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = map_key(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        // Fixed-cadence update, even after game over.
        if last_frame.elapsed() >= frame {
            last_frame += frame;
            engine.update(config.frame_ms);
        }
    }
}
