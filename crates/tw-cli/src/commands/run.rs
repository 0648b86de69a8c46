use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use tw_core::Entity;
use tw_simulation::{CollisionTask, MotionTask, SimEventKind, Simulation};

use crate::scenario::Scenario;

/// Options for the `run` command.
pub struct RunOptions<'a> {
    pub scenario: Option<&'a Path>,
    pub ticks: u64,
    pub interval_ms: Option<f64>,
    pub realtime: bool,
    pub verbose: bool,
    pub json: bool,
}

pub fn run(opts: &RunOptions<'_>) -> Result<(), String> {
    let mut scenario = match opts.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::demo(),
    };
    if let Some(ms) = opts.interval_ms {
        scenario.config.tick_interval_ms = ms;
    }

    let config = scenario.config.clone();
    let mut sim = if opts.realtime {
        Simulation::realtime(config)
    } else {
        Simulation::headless(config)
    }
    .map_err(|e| format!("simulation setup failed: {e}"))?;

    for (i, spec) in scenario.entities.into_iter().enumerate() {
        sim.spawn(spec).map_err(|e| format!("entity {i}: {e}"))?;
    }

    drive(&mut sim, opts.ticks, opts.realtime)?;

    if opts.json {
        print_json(&sim)
    } else {
        print_report(&sim, opts);
        Ok(())
    }
}

/// Tick `n` times. In real time, pace ticks against fixed deadlines so a
/// slow tick shortens the next sleep instead of drifting the schedule.
fn drive(sim: &mut Simulation, n: u64, realtime: bool) -> Result<(), String> {
    if !realtime {
        sim.run(n);
        return Ok(());
    }

    let interval_ms = sim.config().tick_interval_ms;
    let start = Instant::now();
    for k in 1..=n {
        let deadline = Duration::try_from_secs_f64(interval_ms * k as f64 / 1000.0)
            .ok()
            .and_then(|offset| start.checked_add(offset))
            .ok_or_else(|| {
                format!("tick interval of {interval_ms}ms is too large for real-time pacing")
            })?;
        match deadline.checked_duration_since(Instant::now()) {
            Some(wait) => std::thread::sleep(wait),
            None => log::debug!(
                "tick {k} overran its deadline by {:.3}ms",
                Instant::now().duration_since(deadline).as_secs_f64() * 1000.0
            ),
        }
        sim.tick();
        log::debug!("realtime tick {k} at {:.3}ms", sim.clock().this_time());
    }
    Ok(())
}

fn print_json(sim: &Simulation) -> Result<(), String> {
    let entities: Vec<&Entity> = sim.registry().iter().collect();
    let collisions: Vec<_> = sim
        .events()
        .events()
        .iter()
        .filter_map(|e| match e.kind {
            SimEventKind::Collision { a, b } => Some(serde_json::json!({
                "tick": e.tick,
                "a": a,
                "b": b,
            })),
            _ => None,
        })
        .collect();

    let report = serde_json::json!({
        "ticks": sim.current_tick(),
        "elapsed_ms": sim.clock().this_time(),
        "entities": entities,
        "collisions": collisions,
    });
    let text = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    println!("{text}");
    Ok(())
}

fn print_report(sim: &Simulation, opts: &RunOptions<'_>) {
    let mode = if opts.realtime { "realtime" } else { "headless" };
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({} ticks, {}ms interval, {mode})",
            sim.current_tick(),
            sim.config().tick_interval_ms
        )
        .dimmed()
    );
    let hits = sim.task::<CollisionTask>().map_or(0, |c| c.total_hits());
    let arrivals = sim.task::<MotionTask>().map_or(0, |m| m.arrivals());
    println!(
        "  {} entities, {:.1}ms simulated, {hits} collision reports, {arrivals} arrivals",
        sim.registry().len(),
        sim.clock().this_time(),
    );
    println!();

    if opts.verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in sim.events().events() {
            let tick_label = format!("[tick {:>4}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if sim.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    }

    println!("  {}", "Entities".bold().underline());
    println!();

    let touching = sim.last_collisions();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Entity", "Position", "Shape", "Target", "Speed", "Colliding"]);

    for entity in sim.registry().iter() {
        let shape = entity
            .shape()
            .map_or_else(|| "--".to_string(), |s| s.to_string());
        let (target, speed) = match &entity.mover {
            Some(m) => (m.target.to_string(), m.speed.to_string()),
            None => ("--".to_string(), "--".to_string()),
        };
        let colliding = touching
            .iter()
            .any(|(a, b)| *a == entity.id || *b == entity.id);
        table.add_row(vec![
            entity.id.to_string(),
            format!("({:.2}, {:.2})", entity.position.x, entity.position.y),
            shape,
            target,
            speed,
            if colliding { "yes".red().to_string() } else { "no".to_string() },
        ]);
    }

    println!("{table}");
    println!();
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::Collision { .. } => description.red(),
        SimEventKind::Arrived { .. } => description.green(),
        SimEventKind::TaskRetired { .. } => description.cyan(),
    }
}
