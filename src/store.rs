//! Shared election state: voters, vote records and the catalog tables
//!
//! [`ElectionStore`] is the explicitly owned storage handle passed into each
//! engine operation. All shared mutable state lives here behind `RwLock`s;
//! nothing else in the crate holds state across requests.
//!
//! ## Atomicity
//!
//! Locks are always acquired in a fixed order: positions, candidates,
//! voters, records (later locks may be skipped, earlier ones never follow).
//! [`ElectionStore::commit_ballot`] holds the voter and record write guards
//! for its entire duration, so the "not yet voted" check, the record
//! inserts and the `has_voted` flip are one unit of work: either every
//! effect becomes visible when the guards drop, or an early return leaves
//! the store untouched. Readers that need a consistent view of the flag and
//! the records take the same locks in the same order and therefore never
//! observe a half-committed ballot.
//!
//! Poisoned locks are surfaced as [`Error::Unavailable`]; the store never
//! panics across a lock boundary in normal operation.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::catalog::{self, Catalog};
use crate::errors::{Error, Result};
use crate::types::{
    total_selections, Candidate, CandidateId, CastReceipt, Position, PositionId, ResetReport,
    Selections, TallySummary, Voter, VoteRecord, VoterId,
};
use crate::unavailable;

/// Voter table indexed both by id and by credential
#[derive(Debug, Default)]
struct VoterTable {
    by_id: HashMap<VoterId, Voter>,
    by_credential: HashMap<String, VoterId>,
}

/// In-memory election store
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
#[derive(Debug, Default)]
pub struct ElectionStore {
    positions: RwLock<HashMap<PositionId, Position>>,
    candidates: RwLock<HashMap<CandidateId, Candidate>>,
    voters: RwLock<VoterTable>,
    records: RwLock<Vec<VoteRecord>>,
}

impl ElectionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Catalog loading (called by the surrounding administrative layer)
    // ------------------------------------------------------------------

    /// Insert or replace a position
    pub fn upsert_position(&self, position: Position) -> Result<()> {
        let mut positions = self
            .positions
            .write()
            .map_err(|_| unavailable!("position table lock poisoned"))?;
        positions.insert(position.id, position);
        Ok(())
    }

    /// Insert or replace a candidate; its position must already exist
    pub fn upsert_candidate(&self, candidate: Candidate) -> Result<()> {
        let positions = self
            .positions
            .read()
            .map_err(|_| unavailable!("position table lock poisoned"))?;
        if !positions.contains_key(&candidate.position_id) {
            return Err(Error::unknown_position(candidate.position_id));
        }
        let mut candidates = self
            .candidates
            .write()
            .map_err(|_| unavailable!("candidate table lock poisoned"))?;
        candidates.insert(candidate.id, candidate);
        Ok(())
    }

    /// Remove a candidate from the catalog
    ///
    /// Returns whether the candidate existed. Ballots already shown to
    /// voters may still reference the candidate; commit-time validation
    /// catches those submissions.
    pub fn remove_candidate(&self, id: &CandidateId) -> Result<bool> {
        let mut candidates = self
            .candidates
            .write()
            .map_err(|_| unavailable!("candidate table lock poisoned"))?;
        Ok(candidates.remove(id).is_some())
    }

    /// Remove a position and all of its candidates
    pub fn remove_position(&self, id: &PositionId) -> Result<bool> {
        let mut positions = self
            .positions
            .write()
            .map_err(|_| unavailable!("position table lock poisoned"))?;
        let mut candidates = self
            .candidates
            .write()
            .map_err(|_| unavailable!("candidate table lock poisoned"))?;
        candidates.retain(|_, c| c.position_id != *id);
        Ok(positions.remove(id).is_some())
    }

    /// Register a voter under an opaque credential
    ///
    /// Credentials are unique; registering an already-taken credential
    /// fails without touching the table.
    pub fn register_voter(&self, credential: impl Into<String>) -> Result<Voter> {
        let credential = credential.into();
        let mut voters = self
            .voters
            .write()
            .map_err(|_| unavailable!("voter table lock poisoned"))?;
        if voters.by_credential.contains_key(&credential) {
            return Err(unavailable!("credential already registered"));
        }
        let voter = Voter {
            id: uuid::Uuid::new_v4(),
            credential: credential.clone(),
            has_voted: false,
        };
        voters.by_credential.insert(credential, voter.id);
        voters.by_id.insert(voter.id, voter.clone());
        Ok(voter)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Clone the current catalog state into a snapshot
    pub fn catalog(&self) -> Result<Catalog> {
        let positions = self
            .positions
            .read()
            .map_err(|_| unavailable!("position table lock poisoned"))?;
        let candidates = self
            .candidates
            .read()
            .map_err(|_| unavailable!("candidate table lock poisoned"))?;
        Ok(Catalog::from_parts(
            positions.values().cloned().collect(),
            candidates.values().cloned().collect(),
        ))
    }

    /// Resolve a credential to its voter
    pub fn voter_by_credential(&self, credential: &str) -> Result<Voter> {
        let voters = self
            .voters
            .read()
            .map_err(|_| unavailable!("voter table lock poisoned"))?;
        voters
            .by_credential
            .get(credential)
            .and_then(|id| voters.by_id.get(id))
            .cloned()
            .ok_or(Error::NotFound)
    }

    /// Consistent snapshot for reporting: catalog, summary counts and all
    /// committed vote records
    ///
    /// Takes every lock in the global order, so a ballot being committed is
    /// either fully included (records plus `has_voted` flag) or not at all.
    pub fn report_snapshot(&self) -> Result<(Catalog, TallySummary, Vec<VoteRecord>)> {
        let positions = self
            .positions
            .read()
            .map_err(|_| unavailable!("position table lock poisoned"))?;
        let candidates = self
            .candidates
            .read()
            .map_err(|_| unavailable!("candidate table lock poisoned"))?;
        let voters = self
            .voters
            .read()
            .map_err(|_| unavailable!("voter table lock poisoned"))?;
        let records = self
            .records
            .read()
            .map_err(|_| unavailable!("record table lock poisoned"))?;

        let summary = TallySummary {
            positions: positions.len(),
            candidates: candidates.len(),
            voters: voters.by_id.len(),
            voters_voted: voters.by_id.values().filter(|v| v.has_voted).count(),
            votes_cast: records.len(),
        };
        let catalog = Catalog::from_parts(
            positions.values().cloned().collect(),
            candidates.values().cloned().collect(),
        );
        Ok((catalog, summary, records.clone()))
    }

    // ------------------------------------------------------------------
    // Mutations (the only two, besides catalog loading)
    // ------------------------------------------------------------------

    /// Atomically commit a validated ballot for the voter behind `credential`
    ///
    /// Inside one unit of work: re-checks the voter has not voted,
    /// re-validates the selections against current catalog state, inserts
    /// one vote record per chosen candidate and flips `has_voted`. Any
    /// failure aborts with the store unchanged. Concurrent calls for the
    /// same voter serialize on the voter write lock, so at most one commits
    /// and the rest observe [`Error::AlreadyVoted`].
    pub fn commit_ballot(&self, credential: &str, selections: &Selections) -> Result<CastReceipt> {
        if total_selections(selections) == 0 {
            return Err(Error::EmptyBallot);
        }

        let positions = self
            .positions
            .read()
            .map_err(|_| unavailable!("position table lock poisoned"))?;
        let candidates = self
            .candidates
            .read()
            .map_err(|_| unavailable!("candidate table lock poisoned"))?;
        let mut voters = self
            .voters
            .write()
            .map_err(|_| unavailable!("voter table lock poisoned"))?;
        let mut records = self
            .records
            .write()
            .map_err(|_| unavailable!("record table lock poisoned"))?;

        let voter_id = *voters.by_credential.get(credential).ok_or(Error::NotFound)?;

        let voter = voters
            .by_id
            .get_mut(&voter_id)
            .ok_or_else(|| unavailable!("voter table inconsistent for {}", voter_id))?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted);
        }

        // Authoritative commit-time validation, never skipped.
        catalog::validate_against(&positions, &candidates, selections)?;

        // Checks done; from here every effect happens before the guards drop.
        let cast_at = Utc::now();
        let mut records_created = 0;
        for (position_id, chosen) in selections {
            for candidate_id in chosen {
                records.push(VoteRecord::new(voter_id, *candidate_id, *position_id, cast_at));
                records_created += 1;
            }
        }
        voter.has_voted = true;

        tracing::info!(
            "🗳️ Ballot committed: voter={}, records={}",
            voter_id,
            records_created
        );

        Ok(CastReceipt {
            voter_id,
            records_created,
            cast_at,
        })
    }

    /// Atomically delete all vote records and reset every voter's flag
    ///
    /// Administrative maintenance between election cycles; the only mutator
    /// of vote records besides [`ElectionStore::commit_ballot`].
    pub fn reset_all_votes(&self) -> Result<ResetReport> {
        let mut voters = self
            .voters
            .write()
            .map_err(|_| unavailable!("voter table lock poisoned"))?;
        let mut records = self
            .records
            .write()
            .map_err(|_| unavailable!("record table lock poisoned"))?;

        let records_deleted = records.len();
        records.clear();

        let mut voters_reset = 0;
        for voter in voters.by_id.values_mut() {
            if voter.has_voted {
                voter.has_voted = false;
                voters_reset += 1;
            }
        }

        tracing::info!(
            "🧹 All votes reset: records_deleted={}, voters_reset={}",
            records_deleted,
            voters_reset
        );

        Ok(ResetReport {
            records_deleted,
            voters_reset,
        })
    }
}
