//! lot-cli: headless driver for the smart_parking workspace.
//!
//! Loads a lot map and a JSON configuration, places the vehicle at a panel
//! pixel, and searches for a spot until the vehicle parks or no free spot is
//! left.  When the reserved spot is taken on the way, the search restarts
//! from wherever the vehicle stopped.
//!
//! ```text
//! lot-cli [MAP] [CONFIG.json] [X Y]
//! ```
//!
//! Set `RUST_LOG=debug` to see the library's routing and reservation logs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sp_core::{ParkingConfig, PixelPoint};
use sp_grid::{CellKind, CellMark, GridSnapshot, SpotStatus, load_graph};
use sp_lot::ParkingLotBuilder;
use sp_reserve::{ParkingEvent, RunOutcome};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_MAP:   &str = "maps/lot.txt";
const DEFAULT_START: PixelPoint = PixelPoint { x: 60, y: 60 };
const MAX_ATTEMPTS:  usize = 10;

// ── Arguments ─────────────────────────────────────────────────────────────────

struct Args {
    map:    PathBuf,
    config: Option<PathBuf>,
    start:  PixelPoint,
}

fn parse_args() -> Result<Args> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let map = match argv.first() {
        Some(p) => PathBuf::from(p),
        None => Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_MAP),
    };
    let config = argv.get(1).map(PathBuf::from);
    let start = match (argv.get(2), argv.get(3)) {
        (Some(x), Some(y)) => PixelPoint::new(
            x.parse().with_context(|| format!("bad x coordinate {x:?}"))?,
            y.parse().with_context(|| format!("bad y coordinate {y:?}"))?,
        ),
        (None, None) => DEFAULT_START,
        _ => bail!("start needs both X and Y"),
    };
    Ok(Args { map, config, start })
}

fn load_config(path: Option<&Path>) -> Result<ParkingConfig> {
    let config: ParkingConfig = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => ParkingConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn glyph(kind: CellKind, mark: CellMark) -> char {
    match (kind, mark) {
        (_, CellMark::Vehicle) => 'V',
        (CellKind::Wall, _) => '#',
        (CellKind::Spot { status: SpotStatus::Free }, _) => 'F',
        (CellKind::Spot { status: SpotStatus::Reserved }, _) => 'R',
        (CellKind::Spot { status: SpotStatus::Occupied }, _) => 'X',
        (CellKind::Road { .. }, CellMark::Trail) => '*',
        (CellKind::Road { traffic }, CellMark::Baseline) => match traffic {
            0..=33 => '.',
            34..=66 => ':',
            _ => '!',
        },
    }
}

fn render(snap: &GridSnapshot) {
    for row in 0..snap.rows {
        let line: String = (0..snap.cols)
            .filter_map(|col| snap.at(row, col))
            .map(|(kind, mark)| glyph(kind, mark))
            .collect();
        println!("  {line}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_deref())?;

    println!("=== lot-cli: smart_parking ===");
    println!(
        "Tick: {} ms  |  Fault p: {}  |  Seed: {}",
        config.tick_interval_ms, config.fault_probability, config.seed
    );

    // 1. Load the map and size the cells to the panel.
    let graph = load_graph(&args.map, config.panel_width_px, config.panel_height_px)
        .with_context(|| format!("loading map {}", args.map.display()))?;
    println!(
        "Lot: {} x {} cells, {} edges, {} free spots",
        graph.rows(),
        graph.cols(),
        graph.edge_count(),
        graph.free_spots().count()
    );

    // 2. Build the lot and place the vehicle.
    let mut lot = ParkingLotBuilder::new(config, graph).build()?;
    let Some(mut start) = lot.select_start(args.start)? else {
        bail!("pixel ({}, {}) is not on a road", args.start.x, args.start.y);
    };
    println!("Start: cell {start} at pixel ({}, {})", args.start.x, args.start.y);
    println!();
    render(&lot.snapshot());
    println!();

    // 3. Search until parked or out of spots.
    let t0 = Instant::now();
    for attempt in 1..=MAX_ATTEMPTS {
        info!(attempt, %start, "searching");
        for event in lot.start_search(start)? {
            match &event {
                ParkingEvent::Reserved { spot, route } => {
                    println!("reserved {spot}: {} steps, cost {}", route.steps(), route.cost);
                }
                ParkingEvent::Stepped { cell, tick, .. } => println!("  {tick} -> {cell}"),
                ParkingEvent::Arrived { spot, tick } => println!("  {tick} parked in {spot}"),
                ParkingEvent::Faulted { spot, at, reason, tick } => {
                    println!("  {tick} lost {spot} at {at}: {reason}");
                }
                ParkingEvent::Cancelled { at, tick } => println!("  {tick} cancelled at {at}"),
                ParkingEvent::NoReachableSpot { start } => println!("no free spot reachable from {start}"),
            }
        }

        match lot.wait()? {
            Some(RunOutcome::Faulted { at, .. }) => start = at,
            Some(outcome) => {
                println!();
                println!("Outcome after {attempt} run(s): {outcome:?}");
                break;
            }
            None => bail!("search ended without an outcome"),
        }
    }

    println!("Finished in {:.3} s", t0.elapsed().as_secs_f64());
    println!();
    render(&lot.snapshot());
    Ok(())
}
