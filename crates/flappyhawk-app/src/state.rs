//! State shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use flappyhawk_core::commands::PlayerCommand;
use flappyhawk_core::state::{GameStateSnapshot, RunSummary};

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Stop the loop and report the run.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Handle to a running game loop.
pub struct GameLoopHandle {
    pub(crate) command_tx: mpsc::Sender<GameLoopCommand>,
    pub(crate) latest_snapshot: SharedSnapshot,
    pub(crate) thread: JoinHandle<RunSummary>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns false once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Copy of the most recent snapshot, if a tick has run.
    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the loop to stop on its own.
    pub fn join(self) -> Option<RunSummary> {
        self.thread.join().ok()
    }

    /// Ask the loop to stop and wait for its run summary.
    pub fn shutdown(self) -> Option<RunSummary> {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.thread.join().ok()
    }
}
