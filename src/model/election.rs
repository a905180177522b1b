use serde::{Deserialize, Serialize};

/// Candidate ids are integers, assigned densely from 1 in registration
/// order. They are never reused or renumbered.
pub type CandidateId = u32;

/// A registered choice with its running tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub vote_count: u64,
}

/// Phases of the election lifecycle. There is no terminal phase; the
/// admin may reopen and reclose the window arbitrarily many times.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionPhase {
    /// Votes are rejected. The initial phase.
    Closed,
    /// Votes are accepted.
    Open,
}

/// Read-only projection of the election's scalar fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionDescription {
    pub name: String,
    pub is_open: bool,
    pub candidates_count: u32,
}
