use rocket::tokio::sync::broadcast::{self, Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::model::election::CandidateId;
use crate::model::identity::Identity;

/// Notifications emitted for off-ledger observers such as audit logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuditEvent {
    CandidateAdded { id: CandidateId, name: String },
    VotingStatusChanged { is_open: bool },
    VoteCast { voter: Identity, candidate: CandidateId },
}

/// Append-only notification channel, decoupled from the state mutation
/// that produced each event: delivery is fire-and-forget and a delivery
/// failure never rolls back a committed mutation.
#[derive(Debug)]
pub struct AuditLog {
    sender: Sender<AuditEvent>,
}

impl AuditLog {
    /// `backlog` bounds how far a slow subscriber may lag before it starts
    /// missing events.
    pub fn new(backlog: usize) -> Self {
        let (sender, _) = broadcast::channel(backlog);
        Self { sender }
    }

    /// Attach an observer. Only events emitted after this call are seen.
    pub fn subscribe(&self) -> Receiver<AuditEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Having no live subscribers is not an error.
    pub fn emit(&self, event: AuditEvent) {
        info!("audit: {event:?}");
        let _ = self.sender.send(event);
    }
}
