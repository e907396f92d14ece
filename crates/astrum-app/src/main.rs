use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use astrum_app::game_loop::spawn_game_loop;
use astrum_app::state::LoopSettings;
use astrum_core::commands::SimInput;
use astrum_core::types::PlayerId;
use astrum_intel::policy::load_intel_config_from_env;
use astrum_intel::IntelConfig;
use astrum_sim::engine::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless ASTRUM galaxy simulation", long_about = None)]
struct Cli {
    /// RNG seed; the same seed and inputs replay the same galaxy.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Ticks to run before printing the result.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Players to seed home systems for.
    #[arg(long, default_value_t = 2)]
    players: u16,
    /// Intel config JSON. Falls back to ASTRUM_INTEL_CONFIG, then the builtin.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON array of inputs queued before the first tick.
    #[arg(long)]
    inputs: Option<PathBuf>,
    /// Pace ticks in real time.
    #[arg(long)]
    realtime: bool,
    /// Print this player's faction view instead of the full snapshot.
    #[arg(long)]
    faction: Option<u16>,
    /// Emit JSON instead of a text summary.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let intel = match &cli.config {
        Some(path) => Arc::new(
            IntelConfig::from_file(path)
                .with_context(|| format!("loading intel config {}", path.display()))?,
        ),
        None => load_intel_config_from_env().0,
    };

    let mut engine = SimulationEngine::new(SimConfig {
        seed: cli.seed,
        intel,
    });
    let homeworlds = engine
        .seed_demo_galaxy(cli.players)
        .context("seeding demo galaxy")?;
    info!(
        seed = cli.seed,
        players = homeworlds.len(),
        entities = engine.registry().len(),
        "ASTRUM galaxy ready"
    );

    if let Some(path) = &cli.inputs {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading inputs {}", path.display()))?;
        let inputs: Vec<SimInput> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing inputs {}", path.display()))?;
        info!(count = inputs.len(), "queued external inputs");
        engine.queue_inputs(inputs);
    }

    let game_loop = spawn_game_loop(
        engine,
        LoopSettings {
            max_ticks: Some(cli.ticks),
            realtime: cli.realtime,
        },
    )
    .context("spawning game loop")?;

    let engine = game_loop
        .join()
        .context("game loop thread panicked")?;

    match cli.faction {
        Some(player) => print_faction_view(&engine, PlayerId(player), cli.json),
        None => print_snapshot(&engine, cli.json),
    }
}

fn print_snapshot(engine: &SimulationEngine, json: bool) -> Result<()> {
    let snapshot = engine.snapshot_handle().latest();
    if json {
        println!("{}", serde_json::to_string_pretty(&*snapshot)?);
        return Ok(());
    }
    println!("tick {} ({} entities)", snapshot.time.tick, snapshot.items.len());
    for item in &snapshot.items {
        let owner = item
            .owner
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".into());
        let status = item
            .command
            .as_ref()
            .map(|c| format!(" {:?} x{}", c.status, c.elements.len()))
            .unwrap_or_default();
        let alert = item
            .alert
            .map(|a| format!(" [{a:?}]"))
            .unwrap_or_default();
        println!(
            "{:>6} {:<14} {:<4} {}{}{}",
            item.id.to_string(),
            format!("{:?}", item.kind),
            owner,
            item.name,
            status,
            alert
        );
    }
    Ok(())
}

fn print_faction_view(engine: &SimulationEngine, faction: PlayerId, json: bool) -> Result<()> {
    let view = engine.faction_view(faction);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }
    println!("{} at tick {} knows {} contacts", faction, view.time.tick, view.contacts.len());
    for contact in &view.contacts {
        println!(
            "{:>6} {:<14} {:<13} {}",
            contact.id.to_string(),
            format!("{:?}", contact.kind),
            format!("{:?}", contact.current()),
            contact.name.as_deref().unwrap_or("?")
        );
    }
    Ok(())
}
