//! Runs the simulation without a window and logs population statistics.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example headless --features parallel -- attractors.toml 600
//! ```

use attractors::prelude::*;

const DEFAULT_TICKS: u64 = 600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    let ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut world = World::new(config)?;

    // Nudge the first repeller back and forth to exercise repositioning.
    let repeller = world
        .fields()
        .iter()
        .find(|f| f.polarity() == Polarity::Repeller)
        .map(ForceField::id);

    let mut peak = 0;
    let mut opaque = 0;
    let mut renderer = |frame: &Frame, table: &AppearanceTable| {
        peak = peak.max(frame.population());
        opaque = frame
            .particles
            .iter()
            .filter_map(|p| table.get(p.appearance_index))
            .filter(|a| a.color.a >= 1.0)
            .count();

        if frame.tick % 60 == 0 {
            log::info!(
                "tick {}: {} particles ({} opaque), +{} -{}",
                frame.tick,
                frame.population(),
                opaque,
                frame.emitted,
                frame.culled
            );
        }
    };

    for tick in 0..ticks {
        if let Some(id) = repeller {
            let dx = if (tick / 120) % 2 == 0 { 1.0 } else { -1.0 };
            world.request_reposition(id, dx, 0.0)?;
        }
        if tick == ticks * 3 / 4 {
            world.stop_emitting();
        }
        world.tick_into(&mut renderer);
    }

    log::info!(
        "Done after {} ticks, peak population {}, {} particles left",
        world.tick_count(),
        peak,
        world.population()
    );

    world.stop_emitting();
    let mut drained = 0;
    while !world.is_drained() {
        world.tick();
        drained += 1;
    }
    log::info!("Drained in {drained} more ticks");

    Ok(())
}
