use std::{
    collections::HashMap,
    sync::{Arc, RwLock, mpsc},
};

use crate::{
    effects::effect::RemoteState,
    foundation::error::{LumaError, LumaResult},
    mix::animator::AnimatorId,
};

/// What a remote command addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Target {
    /// A top-level layer of the show's mixer, by stack index.
    Layer(usize),
    /// A subscribed animator such as the scene sequencer.
    Animator(AnimatorId),
}

/// One remote-control command: adopt `state` on `target`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Command {
    pub target: Target,
    pub state: RemoteState,
}

type Board = Arc<RwLock<HashMap<Target, RemoteState>>>;

/// Frame-thread side of remote control: the command inbox and the snapshot
/// board it publishes to.
#[derive(Debug)]
pub(crate) struct ControlHub {
    tx: mpsc::Sender<Command>,
    rx: mpsc::Receiver<Command>,
    board: Board,
}

impl ControlHub {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            board: Arc::default(),
        }
    }

    pub(crate) fn handle(&self) -> ControlHandle {
        ControlHandle {
            tx: self.tx.clone(),
            board: Arc::clone(&self.board),
        }
    }

    /// Commands queued since the last drain, in arrival order.
    pub(crate) fn drain(&self) -> Vec<Command> {
        self.rx.try_iter().collect()
    }

    pub(crate) fn publish(&self, entries: impl IntoIterator<Item = (Target, RemoteState)>) {
        let mut board = self.board.write().unwrap_or_else(|e| e.into_inner());
        board.clear();
        board.extend(entries);
    }
}

/// Cloneable, thread-safe handle for remote operators.
///
/// Commands are queued and applied by the frame thread at the start of its
/// next tick. Snapshots are copies published after each tick; they never
/// reference buffers the frame thread is writing.
#[derive(Clone, Debug)]
pub struct ControlHandle {
    tx: mpsc::Sender<Command>,
    board: Board,
}

impl ControlHandle {
    pub fn send(&self, command: Command) -> LumaResult<()> {
        self.tx
            .send(command)
            .map_err(|_| LumaError::state("the show is no longer running"))
    }

    pub fn snapshot(&self, target: Target) -> Option<RemoteState> {
        let board = self.board.read().unwrap_or_else(|e| e.into_inner());
        board.get(&target).copied()
    }

    /// Every target with a published snapshot.
    pub fn targets(&self) -> Vec<Target> {
        let board = self.board.read().unwrap_or_else(|e| e.into_inner());
        let mut targets: Vec<_> = board.keys().copied().collect();
        targets.sort_by_key(|t| match *t {
            Target::Layer(i) => (0, i),
            Target::Animator(id) => (1, id.0),
        });
        targets
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/control.rs"]
mod tests;
