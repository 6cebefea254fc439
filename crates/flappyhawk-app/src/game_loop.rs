//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in shared
//! state for polling. An optional [`Controller`] supplies input from each
//! snapshot. The loop ends on `Shutdown`, channel disconnect, game over or
//! the tick limit, and returns the run summary.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::info;

use flappyhawk_core::constants::TICK_RATE;
use flappyhawk_core::enums::GamePhase;
use flappyhawk_core::state::{GameStateSnapshot, RunSummary};
use flappyhawk_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot::Controller;
use crate::state::{GameLoopCommand, GameLoopHandle, SharedSnapshot};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How the loop paces itself against the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// One tick per `TICK_DURATION`, scaled by the engine's time scale.
    Realtime,
    /// As fast as the CPU allows.
    Unthrottled,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub pacing: Pacing,
    /// Stop once the simulation clock reaches this many ticks. Paused and
    /// ready ticks do not count.
    pub max_ticks: Option<u64>,
    /// Stop once the run reaches `GameOver`.
    pub stop_on_game_over: bool,
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    config: SimConfig,
    options: LoopOptions,
    controller: Option<Box<dyn Controller>>,
) -> GameLoopHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("flappyhawk-game-loop".into())
        .spawn(move || run_game_loop(config, options, controller, cmd_rx, &shared))
        .expect("Failed to spawn game loop thread");

    GameLoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    }
}

/// The game loop. Runs until a stop condition and reports the run.
fn run_game_loop(
    config: SimConfig,
    options: LoopOptions,
    mut controller: Option<Box<dyn Controller>>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> RunSummary {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return engine.run_summary();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        let ticks = snapshot.time.tick;

        // 3. Let the controller react to what it sees
        if let Some(controller) = controller.as_mut() {
            engine.queue_commands(controller.decide(&snapshot));
        }

        let game_over = snapshot.phase == GamePhase::GameOver;

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.stop_on_game_over && game_over {
            info!("Run ended in game over after {ticks} ticks");
            return engine.run_summary();
        }
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            info!("Tick limit reached after {ticks} ticks");
            return engine.run_summary();
        }

        // 5. Sleep until next tick, adjusting for time_scale
        if options.pacing == Pacing::Realtime {
            let time_scale = engine.time_scale();
            let effective_tick_duration = if time_scale > 0.001 {
                TICK_DURATION.div_f64(time_scale)
            } else {
                TICK_DURATION
            };

            next_tick_time += effective_tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > effective_tick_duration * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopilot::Autopilot;
    use flappyhawk_core::commands::PlayerCommand;
    use flappyhawk_core::enums::GameMode;

    fn unthrottled(max_ticks: u64) -> LoopOptions {
        LoopOptions {
            pacing: Pacing::Unthrottled,
            max_ticks: Some(max_ticks),
            stop_on_game_over: true,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartRun))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartRun)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_limit_stops_loop() {
        let handle = spawn_game_loop(SimConfig::default(), unthrottled(120), None);
        assert!(handle.send(PlayerCommand::StartRun));
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
        }
        let snapshot = handle.latest_snapshot().unwrap();
        assert!(snapshot.time.tick == 120 || snapshot.phase == GamePhase::GameOver);
        assert!(handle.join().is_some());
    }

    #[test]
    fn test_shutdown_returns_summary() {
        let config = SimConfig {
            mode: GameMode::GameDay,
            ..SimConfig::default()
        };
        let options = LoopOptions {
            pacing: Pacing::Realtime,
            max_ticks: None,
            stop_on_game_over: false,
        };
        let handle = spawn_game_loop(config, options, None);
        handle.send(PlayerCommand::StartRun);
        std::thread::sleep(Duration::from_millis(50));
        let summary = handle.shutdown().unwrap();
        assert_eq!(summary.game_mode, GameMode::GameDay);
    }

    #[test]
    fn test_controller_input_reaches_engine() {
        let handle = spawn_game_loop(
            SimConfig::default(),
            unthrottled(90),
            Some(Box::new(Autopilot::new(0.0))),
        );
        handle.send(PlayerCommand::StartRun);
        let summary = handle.join().unwrap();
        assert!(summary.jumps > 0, "autopilot should have flapped");
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartRun);

        // Run enough ticks to populate entities
        for _ in 0..120 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
