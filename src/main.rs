//! Grid Arena entry point
//!
//! Runs a session without a renderer: loads settings, builds the arena and
//! drives it from the fixed-cadence scheduler while logging telemetry.
//!
//! Usage: `grid-arena [settings.json] [--ticks N] [--fast]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::Instant;

    use grid_arena::sim::{EntityId, Simulation, TickInput};
    use grid_arena::{PressedKeys, Settings, TickScheduler};

    env_logger::init();
    log::info!("Grid Arena (native) starting...");

    let mut settings_path: Option<PathBuf> = None;
    let mut total_ticks: u64 = 600;
    let mut fast = false;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fast" => fast = true,
            "--ticks" => match args.next().and_then(|n| n.parse().ok()) {
                Some(n) => total_ticks = n,
                None => log::warn!("--ticks expects a number; keeping {}", total_ticks),
            },
            _ => settings_path = Some(PathBuf::from(arg)),
        }
    }

    let settings = Settings::load(settings_path.as_deref());
    let mut sim = match Simulation::new(settings) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Could not start simulation: {}", e);
            std::process::exit(1);
        }
    };
    let player_id = EntityId::new(sim.settings().player_id.as_str());
    let tps = sim.settings().ticks_per_second;

    // Scripted input: sweep right across the arena, then down
    let mut keys = PressedKeys::new();
    keys.key_down("ArrowRight");

    let mut scheduler = TickScheduler::new(tps, Instant::now());
    let mut kills = 0usize;

    while sim.tick_count() < total_ticks {
        let due = if fast {
            1
        } else {
            let now = Instant::now();
            let next = scheduler.next_tick_due(now);
            if next > now {
                std::thread::sleep(next - now);
            }
            scheduler.ticks_due(Instant::now())
        };

        for _ in 0..due {
            if sim.tick_count() >= total_ticks {
                break;
            }
            if sim.tick_count() == total_ticks / 2 {
                keys.key_up("ArrowRight");
                keys.key_down("s");
            }

            let input: TickInput = keys.to_tick_input(&player_id);
            let report = match sim.advance(&input) {
                Ok(report) => report,
                Err(e) => {
                    log::warn!("Input rejected: {}", e);
                    sim.step()
                }
            };
            kills += report.kills().count();

            if report.tick % u64::from(tps) == 0 {
                let stats = sim.stats();
                log::info!(
                    "tick {} | entities {} (live {}) | cells {} | grid entries {} | kills {}",
                    stats.tick,
                    stats.entity_count,
                    stats.live_count,
                    stats.occupied_cells,
                    stats.grid_entries,
                    kills
                );
            }
        }
    }

    println!(
        "Ran {} ticks: {} entities remain, {} destroyed, player at {:?}",
        sim.tick_count(),
        sim.store().len(),
        kills,
        sim.player().map(|p| p.pos)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on wasm32; the host page drives it
}
