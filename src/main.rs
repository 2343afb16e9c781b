//! Particle Fight headless runner
//!
//! Builds the quad arena from a config, steps it at a fixed frame rate and
//! prints a summary of who is left.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use particle_fight::consts::MAX_FRAME_DT;
use particle_fight::scenario::build_quad_arena;
use particle_fight::sim::{SimEvent, tick};
use particle_fight::theme::{self, Rgb};
use particle_fight::{Result, SimConfig};

/// Headless Particle Fight - run the arena and report the survivors
#[derive(Parser, Debug)]
#[command(name = "particle-fight")]
#[command(about = "Run the particle arena headless and print a summary")]
struct Args {
    /// JSON config file (defaults are used for anything it leaves out)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Frame rate the simulation is stepped at
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Override the config seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Default, Serialize)]
struct EventCounts {
    bounces: usize,
    clacks: usize,
    bites: usize,
    consumed: usize,
    died: usize,
}

impl EventCounts {
    fn record(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::Bounce { .. } => self.bounces += 1,
                SimEvent::Clack { .. } => self.clacks += 1,
                SimEvent::WallBitten { .. } => self.bites += 1,
                SimEvent::Consumed { .. } => self.consumed += 1,
                SimEvent::Died { .. } => self.died += 1,
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SpeciesSummary {
    count: usize,
    mass: f32,
    color: Rgb,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    sim_time: f64,
    survivors: usize,
    species: BTreeMap<u8, SpeciesSummary>,
    wall_tiles_left: usize,
    wall_health_left: u64,
    events: EventCounts,
    kinetic_energy: f32,
    potential_energy: f32,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut state = build_quad_arena(&config)?;
    let fps = if args.fps > 0.0 { args.fps } else { 60.0 };
    let dt = (1.0 / fps).min(MAX_FRAME_DT);
    let report_every = (fps.round() as u64).max(1);

    let mut counts = EventCounts::default();
    for frame in 1..=args.frames {
        let summary = tick(&mut state, dt);
        counts.record(&state.drain_events());

        if frame % report_every == 0 {
            log::info!(
                "t={:.1}s: {} alive, {} wall tiles, KE={:.0}",
                state.time,
                summary.live,
                state.grid.solid_count(),
                state.kinetic_energy()
            );
        }
        if summary.live <= 1 {
            log::info!("Frame {}: {} body left, stopping", frame, summary.live);
            break;
        }
    }

    let species = state
        .species_tally()
        .into_iter()
        .map(|(s, t)| {
            (
                s.0,
                SpeciesSummary {
                    count: t.count,
                    mass: t.mass,
                    color: theme::species_color(s.0 as usize, &theme::NEON),
                },
            )
        })
        .collect();

    let summary = RunSummary {
        seed: state.seed,
        frames: state.frame,
        sim_time: state.time,
        survivors: state.bodies.len(),
        species,
        wall_tiles_left: state.grid.solid_count(),
        wall_health_left: state.grid.total_health(),
        events: counts,
        kinetic_energy: state.kinetic_energy(),
        potential_energy: state.potential_energy(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} frames ({:.1}s), seed {}",
            summary.frames, summary.sim_time, summary.seed
        );
        println!("Survivors: {}", summary.survivors);
        for (species, s) in &summary.species {
            println!("  species {}: {} bodies, mass {:.1}", species, s.count, s.mass);
        }
        println!(
            "Walls left: {} tiles ({} health)",
            summary.wall_tiles_left, summary.wall_health_left
        );
        println!(
            "Events: {} bounces, {} clacks, {} bites, {} consumed, {} died",
            summary.events.bounces,
            summary.events.clacks,
            summary.events.bites,
            summary.events.consumed,
            summary.events.died
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
