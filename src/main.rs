//! Vinylshop headless demo runner.
//!
//! The record-shop simulation core with:
//! - **bevy_ecs** for entity-component-system architecture
//! - **glam** for 2D vector math
//! - **serde_json** for snapshot output
//!
//! This executable runs the simulation without a renderer: a small
//! autopilot drives the clerk between the supply crate, the shelves, and
//! the register by pressing directional keys, while customers come and go
//! on their own. Every event is tallied and the final snapshot is printed
//! as JSON, so a run doubles as a smoke test of the whole tick pipeline.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 7 --ticks 3600
//! ```

use clap::Parser;
use glam::Vec2;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

use vinylshop::components::station::StationKind;
use vinylshop::game::ShopSim;
use vinylshop::resources::input::HeldKeys;
use vinylshop::resources::layout::ShopLayout;
use vinylshop::resources::simconfig::SimConfig;
use vinylshop::snapshot::ShopSnapshot;

/// Vinylshop simulation core
#[derive(Parser)]
#[command(version, about = "Headless record-shop simulation demo")]
struct Cli {
    /// Seed for the simulation's random source; same seed, same run.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Number of 60 Hz ticks to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// Optional INI file overriding the default tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Where the autopilot wants the clerk next: stock shelves while the shop
/// can absorb records, otherwise ring up whoever is waiting.
fn pick_goal(snap: &ShopSnapshot) -> Vec2 {
    let shelf_with_room = snap
        .stations
        .iter()
        .filter(|s| s.kind == StationKind::Shelf)
        .find(|s| s.stock < s.capacity);
    let crate_rect_center = Vec2::new(63.0, 133.0);
    let register_spot = Vec2::new(322.0, 140.0);

    if snap.queue_len > 0 {
        register_spot
    } else if snap.player.carry > 0 {
        match shelf_with_room {
            // Stand just below the shelf band.
            Some(_) => Vec2::new(155.0, 72.0),
            None => register_spot,
        }
    } else if shelf_with_room.is_some() {
        crate_rect_center
    } else {
        register_spot
    }
}

/// Translate "walk toward this point" into held directional keys.
fn keys_toward(from: Vec2, to: Vec2) -> HeldKeys {
    let delta = to - from;
    HeldKeys {
        up: delta.y < -2.0,
        down: delta.y > 2.0,
        left: delta.x < -2.0,
        right: delta.x > 2.0,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SimConfig::default();
    if let Some(path) = &cli.config {
        if let Err(e) = config.load_from_file(path) {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    }

    let mut sim = match ShopSim::new(config, ShopLayout::default(), cli.seed) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error building session: {e}");
            std::process::exit(1);
        }
    };

    log::info!("running {} ticks with seed {}", cli.ticks, cli.seed);
    let dt = 1.0 / 60.0;
    let mut tally: FxHashMap<&'static str, u32> = FxHashMap::default();
    for _ in 0..cli.ticks {
        let snap = sim.snapshot();
        sim.set_keys(keys_toward(snap.player.pos, pick_goal(&snap)));
        sim.tick(dt);
        for event in sim.drain_events() {
            *tally.entry(event.kind()).or_insert(0) += 1;
        }
    }

    let mut kinds: Vec<_> = tally.iter().collect();
    kinds.sort();
    for (kind, count) in kinds {
        log::info!("{kind}: {count}");
    }

    let snap = sim.snapshot();
    match serde_json::to_string_pretty(&snap) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing snapshot: {e}");
            std::process::exit(1);
        }
    }
}
