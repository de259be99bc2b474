//! Freefall Playground entry point
//!
//! Headless runner: drops a body through its container at the display frame rate,
//! then reports the generated spline path, a background sample and the
//! rotate/press animations.
//!
//! Usage: `freefall-playground [settings.json]`

use std::path::PathBuf;
use std::process::ExitCode;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use freefall_playground::anim::{InfiniteRepeat, PressTransform};
use freefall_playground::background::{BackgroundClock, WaveUniforms, gradient_fallback, shade};
use freefall_playground::path::{generate_path, generate_points_data};
use freefall_playground::sim::{PhysicsState, Simulation, StateChange, SystemClock, TickOutcome};
use freefall_playground::{Result, Settings, theme};

fn run(settings: &Settings) -> Result<()> {
    let mut state = PhysicsState::new(false);
    state.subscribe(|change| {
        if let StateChange::Running(running) = change {
            log::info!(
                "{} simulation",
                if *running { "Starting" } else { "Stopping" }
            );
        }
    });
    state.measure(settings.measurement())?;

    let mut sim = Simulation::new(state, SystemClock::new(settings.frame_rate_hz))
        .with_max_frames(settings.max_frames)
        .with_gravity(settings.gravity)?;
    if settings.start_running {
        sim.start();
    }

    log::info!("Body color {:?}", theme::BODY);
    let summary = sim.run()?;
    match summary.outcome {
        TickOutcome::Collided => log::info!(
            "Body hit its container after {} frames: offset y {} velocity {:.3}",
            summary.frames,
            summary.final_offset_y,
            summary.final_velocity
        ),
        TickOutcome::Stopped => log::info!("Simulation not running"),
        TickOutcome::Advanced => log::info!("Body still falling after {} frames", summary.frames),
    }
    log::info!("Mean frame latency: {:.2} ms", summary.mean_frame_time_ms);

    let now = freefall_playground::sim::clock::unix_millis();
    let snapshot = sim.state.snapshot(now);
    log::debug!("Snapshot: {}", serde_json::to_string(&snapshot)?);

    let (x_range, y_range) = settings.path_ranges();
    let mut rng = Pcg32::seed_from_u64(settings.seed);
    let points = generate_points_data(settings.path_points, x_range, y_range, &mut rng)?;
    let path = generate_path(&points)?;
    if let Some(bounds) = path.bounds(16) {
        log::info!(
            "Path {:?}: {} curves spanning ({:.0}, {:.0}) to ({:.0}, {:.0})",
            theme::PATH,
            path.curve_count(),
            bounds.top_left.x,
            bounds.top_left.y,
            bounds.bottom_right.x,
            bounds.bottom_right.y
        );
    }

    let mut background = BackgroundClock::default();
    let uniforms = WaveUniforms::new(settings.container_size, background.on_frame(now));
    let center = settings.container_size * 0.5;
    log::info!(
        "Background at center: shader {:?}, gradient {:?}",
        shade(center, &uniforms),
        gradient_fallback(center.y, settings.container_size.y)
    );
    log::debug!("Sampled corner {:?}", shade(Vec2::ZERO, &uniforms));

    let rotation = InfiniteRepeat::rotation();
    for ms in [0, 1250, 1500, 1750, 2000] {
        log::debug!("Rotation at {ms} ms: {:.1}", rotation.value_at(ms));
    }
    let mut square = PressTransform::default();
    square.set_pressed(true);
    let mut elapsed = 0;
    while square.is_running() && elapsed < 5_000 {
        square.advance(16);
        elapsed += 16;
    }
    log::info!(
        "Press settled after {elapsed} ms: corner {} scale {}",
        square.corner_radius(),
        square.scale()
    );

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = match Settings::load_or_default(settings_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
