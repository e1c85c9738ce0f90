//! Pool and process snapshot types.
//!
//! Field names on the wire are PHP-FPM's own status keys, spaces included.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::timestamp::Timestamp;

/// Process state reported for an idle worker.
pub const PROCESS_STATE_IDLE: &str = "Idle";

/// Process state reported for a worker handling a request.
pub const PROCESS_STATE_RUNNING: &str = "Running";

/// Snapshot of one pool as reported by its status page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolStatus {
    #[serde(rename = "pool")]
    pub name: String,
    #[serde(rename = "process manager")]
    pub process_manager: String,
    #[serde(rename = "start time")]
    pub start_time: Timestamp,
    #[serde(rename = "start since")]
    pub start_since: i64,
    #[serde(rename = "accepted conn")]
    pub accepted_connections: i64,
    #[serde(rename = "listen queue")]
    pub listen_queue: i64,
    #[serde(rename = "max listen queue")]
    pub max_listen_queue: i64,
    #[serde(rename = "listen queue len")]
    pub listen_queue_length: i64,
    #[serde(rename = "idle processes")]
    pub idle_processes: i64,
    #[serde(rename = "active processes")]
    pub active_processes: i64,
    #[serde(rename = "total processes")]
    pub total_processes: i64,
    #[serde(rename = "max active processes")]
    pub max_active_processes: i64,
    #[serde(rename = "max children reached")]
    pub max_children_reached: i64,
    #[serde(rename = "slow requests")]
    pub slow_requests: i64,
    pub processes: Vec<Process>,
}

/// A single PHP-FPM worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Process {
    pub pid: i64,
    pub state: ProcessState,
    #[serde(rename = "start time")]
    pub start_time: i64,
    #[serde(rename = "start since")]
    pub start_since: i64,
    pub requests: i64,
    #[serde(rename = "request duration")]
    pub request_duration: i64,
    #[serde(rename = "request method")]
    pub request_method: String,
    #[serde(rename = "request uri")]
    pub request_uri: String,
    #[serde(rename = "content length")]
    pub content_length: i64,
    pub user: String,
    pub script: String,
    #[serde(rename = "last request cpu")]
    pub last_request_cpu: f64,
    #[serde(rename = "last request memory")]
    pub last_request_memory: i64,
}

/// Worker state. Anything other than `Idle` or `Running` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessState {
    Idle,
    Running,
    Other(String),
}

impl ProcessState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => PROCESS_STATE_IDLE,
            Self::Running => PROCESS_STATE_RUNNING,
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for ProcessState {
    /// A missing state key decodes to the empty, unrecognized state.
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ProcessState {
    fn from(s: String) -> Self {
        match s.as_str() {
            PROCESS_STATE_IDLE => Self::Idle,
            PROCESS_STATE_RUNNING => Self::Running,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ProcessState {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ProcessState> for String {
    fn from(state: ProcessState) -> Self {
        match state {
            ProcessState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
