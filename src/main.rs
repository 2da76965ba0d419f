use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use highway_sim::simulation::{AnimationController, FrameOutcome, FrameRecorder, Variant};

#[derive(Parser)]
#[command(name = "highway_sim")]
#[command(about = "Highway overtaking collision animation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Animation preset: classic, widescreen or rush
    #[arg(long, default_value = "classic")]
    variant: Variant,

    /// Maximum number of frames to run in headless mode
    #[arg(long, default_value = "3000")]
    frames: u64,

    /// Virtual frame rate of the headless clock
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Seed for reproducible explosions
    #[arg(long)]
    seed: Option<u64>,

    /// Print the ASCII map every N frames in headless mode (0 disables)
    #[arg(long, default_value = "0")]
    map_every: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(cli.variant, cli.seed);
            Ok(())
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        run_headless(&cli)
    }
}

/// Run the animation in headless mode on a virtual clock
fn run_headless(cli: &Cli) -> Result<()> {
    anyhow::ensure!(cli.fps > 0, "--fps must be at least 1");
    let frame_time = Duration::from_secs(1) / cli.fps;
    anyhow::ensure!(
        !frame_time.is_zero(),
        "--fps {} is too high for the virtual clock",
        cli.fps
    );

    info!(
        "Running highway simulation headless: variant={}, max frames={}, fps={}",
        cli.variant, cli.frames, cli.fps
    );

    let mut controller = AnimationController::from_config(cli.variant.config(), cli.seed)
        .with_context(|| format!("failed to build the {} variant", cli.variant))?;
    let mut surface = FrameRecorder::new();

    controller.reset(Some(&mut surface));
    println!("Initial state:");
    controller.world().print_summary();
    controller.world().draw_map();

    controller.start();

    let mut frames_run = 0;
    while frames_run < cli.frames {
        if let Some(token) = controller.advance_timers(frame_time) {
            controller.fire_timer(token, Some(&mut surface));
        }

        if !controller.frame_requested() {
            if controller.pending_end().is_some() {
                // Collided and particles gone; wait for the end timer
                continue;
            }
            break;
        }

        if let FrameOutcome::Rendered(report) = controller.on_frame(Some(&mut surface)) {
            frames_run += 1;
            for id in &report.wrapped {
                let frame = controller.world().frame;
                debug!("Vehicle {} wrapped to the left edge at frame {}", id.0, frame);
            }
        }

        if cli.map_every > 0 && frames_run % cli.map_every == 0 {
            println!("--- After frame {} ---", controller.world().frame);
            controller.world().draw_map();
        }
    }

    if controller.frame_requested() {
        warn!("Frame limit {} reached before the animation settled", cli.frames);
    }

    println!("=== Final State ===");
    controller.world().print_summary();
    controller.world().draw_map();

    info!("SIMULATION COMPLETE");
    info!("Final state: {:?}", controller.state());
    info!("Frames rendered: {}", surface.frames_recorded());
    info!("Simulation frame: {}", controller.world().frame);
    match controller.world().collision {
        Some(event) => info!("Collision frame: {}", event.frame),
        None => info!("Collision frame: none"),
    }
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(variant: Variant, seed: Option<u64>) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    let config = variant.config();

    println!("Starting Highway Sim UI ({variant})...");
    println!();
    println!("Controls:");
    println!("  Space  - Play / Pause");
    println!("  R      - Reset");
    println!("  ESC    - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,highway_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Highway Collision Animation".into(),
                        resolution: (config.canvas_width as u32, config.canvas_height as u32 + 80)
                            .into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(highway_sim::ui::HighwaySimUIPlugin { variant, seed })
        .run();
}
