//! Headless host: replays a recorded stroke event log through the swarm at
//! a fixed 60 Hz frame rate, optionally saving the last frame as SVG.

mod cli;
mod replay;
mod svg;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use swarm_core::{Stage, SwarmConfig, Viewport};

use crate::cli::Cli;
use crate::svg::SvgSurface;

const FRAME_MS: f32 = 1000.0 / 60.0;
const STATS_EVERY: u64 = 60; // frames between progress lines
const SETTLE_FRAMES: u64 = 120; // extra frames after the last event

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, refines the level picked by the flags
    env_logger::builder()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_default_env()
        .init();

    let config = match &cli.config {
        Some(path) => replay::load_config(path)?,
        None => SwarmConfig::default(),
    };
    config.validate().context("invalid swarm configuration")?;

    let events = match &cli.events {
        Some(path) => replay::load_events(path)?,
        None => Vec::new(),
    };
    let frames = cli
        .frames
        .unwrap_or_else(|| events.last().map_or(0, |e| e.frame) + SETTLE_FRAMES);

    let viewport = Viewport::new(cli.width, cli.height);
    let mut stage = Stage::new(config.clone(), cli.seed);
    let mut surface = SvgSurface::new(viewport, config.variant_count);
    let mut pending = events.into_iter().peekable();

    log::info!(
        "replaying {} frames on a {}x{} canvas, seed {}",
        frames,
        viewport.width,
        viewport.height,
        cli.seed
    );
    let started = instant::Instant::now();

    for frame in 0..frames {
        while let Some(timed) = pending.next_if(|e| e.frame <= frame) {
            stage.enqueue(timed.message);
        }

        surface.clear();
        stage.frame(&mut surface, viewport);

        if stage.take_reload_request() {
            log::info!("frame {frame}: reload requested, starting over");
            stage = Stage::new(config.clone(), cli.seed);
        }

        if frame % STATS_EVERY == 0 {
            let swarm = stage.swarm();
            log::debug!(
                "frame {}: {:?}, {} live, {} pulsing, blend {:.3}",
                frame,
                swarm.mode(),
                swarm.live_count(),
                swarm.enlarged_count(),
                swarm.view_blend()
            );
            if cli.trace {
                trace_cursor(&stage, frame);
            }
        }
    }

    let swarm = stage.swarm();
    log::info!(
        "done in {:.1} ms: {} shapes, {:?}, {} live, {} drawn",
        started.elapsed().as_secs_f64() * 1000.0,
        stage.drawing().shapes().len(),
        swarm.mode(),
        swarm.live_count(),
        surface.sprite_count()
    );
    if pending.peek().is_some() {
        log::warn!("{} events fall after the last frame", pending.count());
    }

    if let Some(path) = &cli.svg {
        fs::write(path, surface.to_svg_string())
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

/// Log level for the `-v`/`-q` flags. Verbosity wins over `-q`.
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    match (verbose, quiet) {
        (0, false) => log::LevelFilter::Info,
        (0, true) => log::LevelFilter::Error,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Log where a time-based replay of the most recent stroke would be.
fn trace_cursor(stage: &Stage, frame: u64) {
    let Some(shape) = stage
        .drawing()
        .shapes()
        .iter()
        .rev()
        .find(|s| !s.is_empty())
    else {
        return;
    };
    let pos = shape.pos_at_time(frame as f32 * FRAME_MS);
    log::info!(
        "frame {}: cursor ({:.3}, {:.3}) of {:.0} ms",
        frame,
        pos.x,
        pos.y,
        shape.total_duration()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn flags_pick_the_log_level() {
        assert_eq!(log_level(0, false), LevelFilter::Info);
        assert_eq!(log_level(0, true), LevelFilter::Error);
        assert_eq!(log_level(1, false), LevelFilter::Debug);
        assert_eq!(log_level(2, false), LevelFilter::Trace);
        assert_eq!(log_level(5, true), LevelFilter::Trace);
    }

    #[test]
    fn verbose_flags_parse() {
        let cli = Cli::try_parse_from(["swarm-native", "-vv", "--frames", "61"])
            .expect("flags parse");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.frames, Some(61));
        assert_eq!(log_level(cli.verbose, cli.quiet), LevelFilter::Trace);
    }
}
