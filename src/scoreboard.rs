//! Process scoreboard.
//!
//! Tallies active and idle workers from a pool's process list. Workers in
//! any state other than `Running` or `Idle` are left out of every count and
//! reported as an error diagnostic, so `total` can be lower than the number
//! of processes.

use serde::Serialize;

use crate::observability::logging::log_error;
use crate::status::{Process, ProcessState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub active: u64,
    pub idle: u64,
    /// Always `active + idle`.
    pub total: u64,
}

pub fn calculate_scoreboard(processes: &[Process]) -> Scoreboard {
    let mut board = Scoreboard::default();

    for process in processes {
        match &process.state {
            ProcessState::Running => board.active += 1,
            ProcessState::Idle => board.idle += 1,
            ProcessState::Other(state) => {
                log_error!("Unknown process state '{}' for pid {}", state, process.pid);
            }
        }
    }

    board.total = board.active + board.idle;
    board
}
