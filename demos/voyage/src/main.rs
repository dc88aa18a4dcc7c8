//! voyage: end-to-end walk through the maritime twin engine.
//!
//! Loads a small world lane graph, plans Rotterdam → Shanghai, closes the
//! Suez Canal and re-plans, applies a canal delay instead of a closure,
//! crosses the Pacific over the dateline, and finally replays a voyage with
//! the playback clock.
//!
//! ```text
//! cargo run -p voyage -- [graph.json] [config.json]
//! RUST_LOG=debug cargo run -p voyage
//! ```

use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mt_core::{Playback, TwinConfig};
use mt_graph::NetworkStats;
use mt_route::{DelayPenalties, RouteResult};
use mt_sim::{Twin, Voyage};

// ── Constants ─────────────────────────────────────────────────────────────────

const SAMPLE_GRAPH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_graph.json");
const DEPARTURE_MS: i64 = 1_767_225_600_000; // 2026-01-01T00:00Z
const PLAYBACK_TICKS: usize = 12;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let graph_path = args.next().unwrap_or_else(|| SAMPLE_GRAPH.to_string());
    let config = match args.next() {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<TwinConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => TwinConfig::default(),
    };

    let json = fs::read_to_string(&graph_path).with_context(|| format!("reading {graph_path}"))?;
    let mut twin = Twin::from_json_str(&json, config).context("loading lane graph")?;

    let stats = NetworkStats::of(&twin.graph);
    println!(
        "graph: {} nodes, {} lanes, {} dateline bridges, {} ports",
        stats.nodes, stats.lanes, stats.bridges, stats.ports
    );
    for (name, lanes) in &stats.lanes_per_chokepoint {
        println!("  {name:<20} {lanes} lane(s)");
    }

    // ── Baseline, closure, delay ──────────────────────────────────────────────

    println!("\n== Rotterdam -> Shanghai");
    report(&twin, "NLRTM", "CNSHA");

    twin.toggle_chokepoint("Suez Canal");
    println!("\n== Suez Canal closed");
    report(&twin, "NLRTM", "CNSHA");
    twin.reset();

    twin.set_penalties([("Suez Canal", 96.0)].into_iter().collect::<DelayPenalties>());
    println!("\n== Suez Canal open with a 96 h queue");
    report(&twin, "NLRTM", "CNSHA");
    twin.set_penalties(DelayPenalties::new());

    twin.toggle_port("CNSHA");
    println!("\n== Shanghai closed");
    report(&twin, "NLRTM", "CNSHA");
    twin.reset();

    // ── Across the Pacific ────────────────────────────────────────────────────

    println!("\n== Shanghai -> Los Angeles");
    let Some(route) = report(&twin, "CNSHA", "USLAX") else {
        return Ok(());
    };

    // ── Playback ──────────────────────────────────────────────────────────────

    let voyage = Voyage::from_route(&route, DEPARTURE_MS, twin.config.ship_speed_kmh);
    let mut clock = Playback::new(voyage.duration_hours() / PLAYBACK_TICKS as f64);
    println!(
        "\n== Playback: {:.0} km, {:.1} days",
        voyage.total_km(),
        voyage.duration_hours() / 24.0
    );
    for _ in 0..=PLAYBACK_TICKS {
        match voyage.position_at_playback(&clock) {
            Some(p) => println!("  {clock}  {p}"),
            None => warn!("voyage has no geometry"),
        }
        clock.advance(voyage.duration_hours());
    }

    info!(eta_unix_ms = voyage.eta_unix_ms(), "done");
    Ok(())
}

/// Plan `origin` → `destination` and print a one-paragraph summary.
fn report(twin: &Twin, origin: &str, destination: &str) -> Option<RouteResult> {
    match twin.plan(origin, destination) {
        Ok(r) => {
            let speed = twin.config.ship_speed_kmh;
            println!(
                "  {:.0} km over {} lanes, {:.1} days at sea",
                r.total_distance_km,
                r.edges.len(),
                r.duration_hours(speed) / 24.0
            );
            if r.weighted_cost_km > r.total_distance_km {
                println!("  expected delay {:.1} h", r.delay_hours(speed));
            }
            if !r.chokepoints.is_empty() {
                println!("  via {}", r.chokepoints.join(", "));
            }
            if r.crosses_dateline() {
                println!("  crosses the dateline");
            }
            Some(r)
        }
        Err(e) => {
            println!("  no feasible route: {e}");
            None
        }
    }
}
