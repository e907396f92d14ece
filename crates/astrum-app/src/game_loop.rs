//! Game loop thread: owns the engine, ticks it, and publishes snapshots.
//!
//! The engine moves into the thread. Inputs arrive via `mpsc`; snapshots
//! are read through the engine's `SnapshotHandle`, which any number of
//! threads may hold.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Instant;

use astrum_sim::engine::{SimulationEngine, SnapshotHandle};

use crate::state::{LoopCommand, LoopSettings};

/// A running game loop.
pub struct GameLoop {
    pub commands: mpsc::Sender<LoopCommand>,
    pub snapshots: SnapshotHandle,
    thread: JoinHandle<SimulationEngine>,
}

impl GameLoop {
    /// Wait for the loop to finish and take the engine back.
    pub fn join(self) -> Option<SimulationEngine> {
        self.thread.join().ok()
    }
}

/// Move `engine` onto a new thread and start ticking.
pub fn spawn_game_loop(engine: SimulationEngine, settings: LoopSettings) -> io::Result<GameLoop> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let snapshots = engine.snapshot_handle();

    let thread = std::thread::Builder::new()
        .name("astrum-game-loop".into())
        .spawn(move || run_game_loop(engine, &cmd_rx, settings))?;

    Ok(GameLoop {
        commands: cmd_tx,
        snapshots,
        thread,
    })
}

/// Runs until the tick limit, a Shutdown command, or channel disconnect
/// once the limit is unbounded.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: &mpsc::Receiver<LoopCommand>,
    settings: LoopSettings,
) -> SimulationEngine {
    let tick_duration = settings.tick_duration();
    let mut next_tick_time = Instant::now();
    let mut ticks = 0_u64;

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Input(input)) => engine.queue_input(input),
                Ok(LoopCommand::Shutdown) => return engine,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if settings.max_ticks.is_none() {
                        return engine;
                    }
                    break;
                }
            }
        }

        let snapshot = engine.tick();
        ticks += 1;
        if !snapshot.events.is_empty() {
            tracing::debug!(
                target: "astrum::loop",
                tick = snapshot.time.tick,
                events = snapshot.events.len(),
                "tick.events"
            );
        }

        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            tracing::info!(target: "astrum::loop", ticks, "loop.finished");
            return engine;
        }

        if settings.realtime {
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else {
                next_tick_time = now;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrum_core::commands::SimInput;
    use astrum_core::types::{PlayerId, Position};
    use astrum_sim::engine::SimConfig;
    use astrum_sim::world_setup::spawn_ship;

    #[test]
    fn test_loop_runs_to_tick_limit() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.seed_demo_galaxy(2).unwrap();
        let game_loop = spawn_game_loop(
            engine,
            LoopSettings {
                max_ticks: Some(25),
                realtime: false,
            },
        )
        .unwrap();
        let snapshots = game_loop.snapshots.clone();

        let engine = game_loop.join().unwrap();
        assert_eq!(engine.time().tick, 25);
        assert_eq!(snapshots.latest().time.tick, 25);
    }

    #[test]
    fn test_shutdown_stops_unbounded_loop() {
        let engine = SimulationEngine::new(SimConfig::default());
        let game_loop = spawn_game_loop(
            engine,
            LoopSettings {
                max_ticks: None,
                realtime: true,
            },
        )
        .unwrap();
        game_loop.commands.send(LoopCommand::Shutdown).unwrap();
        assert!(game_loop.join().is_some());
    }

    #[test]
    fn test_shutdown_leaves_pending_inputs_queued() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let ship = spawn_ship(engine.registry_mut(), "Courier", PlayerId(0), Position::ORIGIN);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let destination = Position::new(25.0, 0.0, 0.0);
        cmd_tx
            .send(LoopCommand::Input(SimInput::Place {
                entity: ship.id(),
                position: destination,
                is_active: true,
            }))
            .unwrap();
        cmd_tx.send(LoopCommand::Shutdown).unwrap();

        let mut engine = run_game_loop(engine, &cmd_rx, LoopSettings::default());
        assert_eq!(engine.time().tick, 0);
        assert_eq!(engine.registry().placement(ship).unwrap().position, Position::ORIGIN);

        engine.tick();
        assert_eq!(engine.registry().placement(ship).unwrap().position, destination);
    }

    #[test]
    fn test_inputs_reach_the_engine() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let ship = spawn_ship(engine.registry_mut(), "Courier", PlayerId(0), Position::ORIGIN);
        let game_loop = spawn_game_loop(
            engine,
            LoopSettings {
                max_ticks: None,
                realtime: true,
            },
        )
        .unwrap();
        let destination = Position::new(25.0, 0.0, 0.0);
        game_loop
            .commands
            .send(LoopCommand::Input(SimInput::Place {
                entity: ship.id(),
                position: destination,
                is_active: true,
            }))
            .unwrap();
        game_loop.commands.send(LoopCommand::Shutdown).unwrap();

        // The input lands either in the loop or on the next tick after shutdown.
        let mut engine = game_loop.join().unwrap();
        engine.tick();
        let placement = engine.registry().placement(ship).unwrap();
        assert_eq!(placement.position, destination);
    }
}
