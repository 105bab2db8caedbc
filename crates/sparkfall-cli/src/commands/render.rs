//! Headless render command - deterministic run saved as PNG

use anyhow::{Context, Result};
use serde::Serialize;
use sparkfall_core::SimConfig;
use sparkfall_particles::ValueSource;
use sparkfall_runtime::{AnimationDriver, FrameStats};
use std::path::PathBuf;

pub struct RenderArgs {
    pub config: Option<PathBuf>,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub bursts: u32,
    pub seed: u32,
    pub format: String,
}

#[derive(Debug, Serialize)]
struct RenderReport {
    output: String,
    width: u32,
    height: u32,
    frames: u32,
    bursts: u32,
    seed: u32,
    pool_size: usize,
    active_groups: usize,
    live_particles: usize,
    particles_drawn: usize,
    reflections_drawn: usize,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    let Simulation { driver, last } = simulate(&args, config);

    driver
        .frame()
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    tracing::info!(
        output = %args.output.display(),
        frames = args.frames,
        "headless render complete"
    );

    let report = RenderReport {
        output: args.output.display().to_string(),
        width: args.width,
        height: args.height,
        frames: args.frames,
        bursts: args.bursts,
        seed: args.seed,
        pool_size: last.pool_size,
        active_groups: last.active_groups,
        live_particles: last.live_particles,
        particles_drawn: last.render.particles_drawn,
        reflections_drawn: last.render.reflections_drawn,
    };
    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Saved: {}", report.output);
        println!("Size: {}x{}", report.width, report.height);
        println!("Frames: {} ({} bursts, seed {})", report.frames, report.bursts, report.seed);
        println!(
            "Groups: {} pooled, {} active",
            report.pool_size, report.active_groups
        );
        println!(
            "Particles: {} live, {} drawn, {} reflections",
            report.live_particles, report.particles_drawn, report.reflections_drawn
        );
    }
    Ok(())
}

struct Simulation {
    driver: AnimationDriver,
    last: FrameStats,
}

/// Run the animation at exactly one reference frame per step
fn simulate(args: &RenderArgs, config: SimConfig) -> Simulation {
    let mut values = ValueSource::with_seed(args.seed);
    let mut driver = AnimationDriver::with_values(
        config,
        args.width,
        args.height,
        ValueSource::with_seed(args.seed.wrapping_add(1)),
    );
    let viewport = driver.viewport();
    let schedule = burst_schedule(args.frames, args.bursts);

    let mut last = FrameStats::default();
    for frame in 0..args.frames {
        for _ in schedule.iter().filter(|&&f| f == frame) {
            let x = viewport.width * values.range(0.15, 0.85);
            let y = viewport.height * values.range(0.15, 0.55);
            driver.request_burst(x, y);
        }
        last = driver.advance_frame(1.0);
    }
    Simulation { driver, last }
}

/// Frame index of each burst, spread evenly over the first half of the run
fn burst_schedule(frames: u32, bursts: u32) -> Vec<u32> {
    if frames == 0 || bursts == 0 {
        return Vec::new();
    }
    let span = u64::from((frames / 2).max(1));
    (0..bursts)
        .map(|i| (u64::from(i) * span / u64::from(bursts)) as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(frames: u32, bursts: u32) -> RenderArgs {
        RenderArgs {
            config: None,
            output: PathBuf::from("unused.png"),
            width: 160,
            height: 120,
            frames,
            bursts,
            seed: 3,
            format: "text".into(),
        }
    }

    #[test]
    fn test_schedule_spreads_bursts() {
        assert_eq!(burst_schedule(100, 4), vec![0, 12, 25, 37]);
        assert_eq!(burst_schedule(0, 4), Vec::<u32>::new());
        assert_eq!(burst_schedule(10, 0), Vec::<u32>::new());
        assert_eq!(burst_schedule(1, 3), vec![0, 0, 0]);
    }

    #[test]
    fn test_schedule_handles_huge_runs() {
        let half = u32::MAX / 2;
        assert_eq!(
            burst_schedule(u32::MAX, 4),
            vec![0, half / 4, half / 2, (u64::from(half) * 3 / 4) as u32]
        );
        assert!(burst_schedule(u32::MAX, 4).iter().all(|&f| f < u32::MAX));
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let a = simulate(&args(20, 3), SimConfig::default());
        let b = simulate(&args(20, 3), SimConfig::default());
        assert_eq!(a.last, b.last);
        assert_eq!(a.driver.frame().as_bytes(), b.driver.frame().as_bytes());
        assert_eq!(a.last.pool_size, 3);
        assert!(a.last.live_particles > 0);
    }
}
