use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::election::{Candidate, CandidateId, ElectionDescription, ElectionPhase};
use crate::model::identity::Identity;

/// The authoritative state of a single one-round election: the scalar
/// election fields, the candidate table, and the per-identity voted flags.
///
/// Every mutating operation authenticates the caller and checks all of its
/// preconditions before touching state, so a failed call leaves the
/// aggregate exactly as it was. Hosts that expose this behind concurrent
/// access must serialize mutations with one exclusive lock around the whole
/// aggregate; the voted flag and the tally written by [`cast_vote`] must
/// commit together.
///
/// [`cast_vote`]: ElectionLedger::cast_vote
#[derive(Debug)]
pub struct ElectionLedger {
    name: String,
    admin: Identity,
    phase: ElectionPhase,
    candidates: Vec<Candidate>,
    voters: HashMap<Identity, bool>,
}

impl ElectionLedger {
    /// Create the election: closed, no candidates, `admin` holding the only
    /// administrative capability. An empty name is rejected.
    pub fn new(name: impl Into<String>, admin: Identity) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "election name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            admin,
            phase: ElectionPhase::Closed,
            candidates: Vec::new(),
            voters: HashMap::new(),
        })
    }

    /// Register a candidate and return its id. Admin only. Enabled in both
    /// phases, so the ballot can still grow while voting is open.
    pub fn add_candidate(
        &mut self,
        caller: &Identity,
        name: impl Into<String>,
    ) -> Result<CandidateId> {
        self.ensure_admin(caller)?;
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "candidate name must not be empty".to_string(),
            ));
        }
        let id = self.candidates_count() + 1;
        self.candidates.push(Candidate {
            id,
            name,
            vote_count: 0,
        });
        Ok(id)
    }

    /// Transition `Closed` -> `Open`. Admin only.
    pub fn open_voting(&mut self, caller: &Identity) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.phase == ElectionPhase::Open {
            return Err(Error::InvalidState("voting is already open".to_string()));
        }
        self.phase = ElectionPhase::Open;
        Ok(())
    }

    /// Transition `Open` -> `Closed`. Admin only.
    pub fn close_voting(&mut self, caller: &Identity) -> Result<()> {
        self.ensure_admin(caller)?;
        if self.phase == ElectionPhase::Closed {
            return Err(Error::InvalidState("voting is not open".to_string()));
        }
        self.phase = ElectionPhase::Closed;
        Ok(())
    }

    /// Record one vote for `candidate_id` on behalf of `voter`.
    ///
    /// Preconditions, checked in order with the first failure winning:
    /// the window is open, the voter has not voted, and the id refers to a
    /// registered candidate. Only then do the voted flag and the tally move,
    /// together.
    pub fn cast_vote(&mut self, voter: &Identity, candidate_id: CandidateId) -> Result<()> {
        if self.phase != ElectionPhase::Open {
            return Err(Error::InvalidState("voting is not open".to_string()));
        }
        if self.has_voted(voter) {
            return Err(Error::AlreadyDone(format!("{voter} has already voted")));
        }
        let index = candidate_id
            .checked_sub(1)
            .map(|index| index as usize)
            .filter(|&index| index < self.candidates.len())
            .ok_or_else(|| Error::InvalidInput(format!("invalid candidate id {candidate_id}")))?;

        self.voters.insert(voter.clone(), true);
        self.candidates[index].vote_count += 1;
        Ok(())
    }

    /// All candidates in ascending id order. Empty if none are registered.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Whether `identity` has cast their vote. No record means no.
    pub fn has_voted(&self, identity: &Identity) -> bool {
        self.voters.get(identity).copied().unwrap_or(false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> ElectionPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == ElectionPhase::Open
    }

    pub fn candidates_count(&self) -> u32 {
        self.candidates.len() as u32
    }

    pub fn description(&self) -> ElectionDescription {
        ElectionDescription {
            name: self.name.clone(),
            is_open: self.is_open(),
            candidates_count: self.candidates_count(),
        }
    }

    /// Equality with the creating identity is the entire authorization
    /// model; there are no roles beyond admin and everyone else.
    fn ensure_admin(&self, caller: &Identity) -> Result<()> {
        if caller != &self.admin {
            return Err(Error::Unauthorized(format!(
                "{caller} is not the election admin"
            )));
        }
        Ok(())
    }
}
