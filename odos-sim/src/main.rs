//! Odos simulator - headless mission runner
//!
//! Runs a mission through the live runner against a wall-clock frame
//! scheduler, or synthesizes its replay and plays it back. Poses and trace
//! statistics go to the log.
//!
//! # Usage
//!
//! ```bash
//! # Demo mission with default settings
//! cargo run -p odos-sim
//!
//! # Custom settings and mission, replay mode, per-frame poses
//! RUST_LOG=debug cargo run -p odos-sim -- --config odos.toml --mission mission.toml --replay
//! ```

mod clock;
mod config;
mod renderer;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context};

use odos_core::mission::Mission;
use odos_core::motion::{attachment_rect, Kinematics};
use odos_core::replay::{build_replay_frames, ReplayPlayer};
use odos_core::runner::LiveRunner;

use crate::clock::{IntervalScheduler, DEFAULT_FRAME_HZ};
use crate::config::HostConfig;
use crate::renderer::LogRenderer;

struct Args {
    config_path: Option<PathBuf>,
    mission_path: Option<PathBuf>,
    replay: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut result = Args {
        config_path: None,
        mission_path: None,
        replay: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    result.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--mission" | "-m" => {
                if i + 1 < args.len() {
                    result.mission_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--replay" | "-r" => result.replay = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    result
}

fn print_help() {
    println!("odos-sim - headless mission runner");
    println!();
    println!("USAGE:");
    println!("    odos-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>     Settings file (default: odos.toml if present)");
    println!("    -m, --mission <PATH>    Mission file (default: built-in demo mission)");
    println!("    -r, --replay            Synthesize the replay and play it back");
    println!("    -h, --help              Print this help");
}

fn run_live(host: &HostConfig, mission: Mission) -> anyhow::Result<()> {
    let mut runner = LiveRunner::new(
        IntervalScheduler::new(DEFAULT_FRAME_HZ),
        host.sim_config(),
        host.field_geometry(),
    );
    runner.load_mission(mission);
    runner.attach_renderer(LogRenderer::new());

    let now = runner.scheduler().now_ms();
    runner
        .start(now)
        .map_err(|e| anyhow!("cannot start live run: {}", e))?;

    while let Some((token, now)) = runner.scheduler_mut().wait_next() {
        runner.on_frame(token, now);
    }

    let pose = runner.pose().context("live run produced no pose")?;
    log::info!(
        "Live run {:?} after {:.0} ms: center ({:.2}, {:.2}), heading {:.1}",
        runner.state(),
        runner.scheduler().now_ms(),
        pose.center.x,
        pose.center.y,
        pose.heading
    );
    if let Some(renderer) = runner.renderer() {
        log::info!(
            "  {} pose updates, {} trace points, trace length {:.2}",
            renderer.pose_updates(),
            renderer.trace().len(),
            renderer.trace_length()
        );
    }
    Ok(())
}

fn run_replay(host: &HostConfig, mission: Mission) -> anyhow::Result<()> {
    let sim = host.sim_config();
    let field = host.field_geometry();

    let frames = build_replay_frames(&mission, &sim, &field);
    let duration_ms = frames.last().map_or(0.0, |f| f.t_ms);
    log::info!(
        "Replay built: {} frames, {:.0} ms at {} fps",
        frames.len(),
        duration_ms,
        sim.replay_fps
    );

    let mut player = ReplayPlayer::new(IntervalScheduler::new(sim.replay_fps), sim.trace_enabled);
    player.attach_renderer(LogRenderer::new());
    player.load(frames, Kinematics::for_mission(&mission, &field));
    player.reset();

    if player.play() {
        while let Some((token, _)) = player.scheduler_mut().wait_next() {
            player.on_frame(token);
        }
    }

    let frame = player.current().context("replay has no frames")?;
    log::info!(
        "Replay stopped at frame {} (t = {:.0} ms): center ({:.2}, {:.2}), heading {:.1}",
        player.cursor(),
        frame.t_ms,
        frame.x,
        frame.y,
        frame.heading
    );
    if let Some(renderer) = player.renderer() {
        log::info!(
            "  {} trace points, trace length {:.2}",
            renderer.trace().len(),
            renderer.trace_length()
        );
    }
    Ok(())
}

fn log_attachments(host: &HostConfig, mission: &Mission) {
    let scale = host.field_geometry().scale();
    for attachment in mission.attachments.iter() {
        match attachment_rect(attachment, &mission.body, scale) {
            Some(rect) => log::info!(
                "  Attachment {:?}: {:.2}x{:.2} at ({:.2}, {:.2}) body-local",
                attachment.side,
                rect.width,
                rect.height,
                rect.x,
                rect.y
            ),
            None => log::warn!("  Attachment {:?} has no area, not drawn", attachment.side),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = parse_args();
    let host = config::load_config(args.config_path.as_deref());
    let mission = config::load_mission(args.mission_path.as_deref())
        .context("failed to load mission")?;

    log::info!("odos-sim starting");
    log::info!(
        "  Mission: '{}', {} commands ({} executable)",
        mission.name,
        mission.commands.len(),
        mission.executable_commands()
    );
    log::info!("  Mode: {}", if args.replay { "replay" } else { "live" });
    log_attachments(&host, &mission);

    if args.replay {
        run_replay(&host, mission)
    } else {
        run_live(&host, mission)
    }
}
