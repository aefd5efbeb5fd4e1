//! Catalog snapshot and selection validation
//!
//! A [`Catalog`] is a read-only snapshot of the contested positions and
//! their candidates, cloned from the store at request time. The engine never
//! caches a catalog across requests: ballot assembly and commit-time
//! validation each take their own snapshot, so catalog edits made between
//! the two are always caught at commit.
//!
//! The selection validator lives here because its checks are pure,
//! in-memory and synchronous: membership (every chosen candidate belongs to
//! the position it is filed under) and cardinality (no more than `max_vote`
//! selections per position).

use std::collections::HashMap;

use crate::errors::{Error, Result};
use crate::types::{Candidate, CandidateId, Position, PositionId, Selections};

/// Read-only snapshot of positions and candidates
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    positions: HashMap<PositionId, Position>,
    candidates: HashMap<CandidateId, Candidate>,
}

impl Catalog {
    /// Build a catalog from already-loaded entities
    pub fn from_parts(positions: Vec<Position>, candidates: Vec<Candidate>) -> Self {
        Self {
            positions: positions.into_iter().map(|p| (p.id, p)).collect(),
            candidates: candidates.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Look up a position by id
    pub fn position(&self, id: &PositionId) -> Option<&Position> {
        self.positions.get(id)
    }

    /// Look up a candidate by id
    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    /// Number of positions in the catalog
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of candidates in the catalog
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Positions in display order
    ///
    /// Ordered by `priority` ascending (lower value shows first), with
    /// description and id as tie-breakers so the order is deterministic.
    pub fn positions_ordered(&self) -> Vec<&Position> {
        let mut positions: Vec<&Position> = self.positions.values().collect();
        positions.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.description.cmp(&b.description))
                .then_with(|| a.id.cmp(&b.id))
        });
        positions
    }

    /// Candidates of one position in stable display order (name, then id)
    pub fn candidates_for(&self, position_id: &PositionId) -> Vec<&Candidate> {
        let mut candidates: Vec<&Candidate> = self
            .candidates
            .values()
            .filter(|c| c.position_id == *position_id)
            .collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        candidates
    }

    /// Validate a submission against this catalog
    ///
    /// For every position named in the submission:
    /// - the position must exist in the catalog,
    /// - the chosen set must not exceed the position's `max_vote`,
    /// - every chosen candidate must exist and belong to that position.
    ///
    /// Positions omitted from the submission (or mapped to an empty set) are
    /// valid: abstaining is permitted per position. The system-wide
    /// empty-ballot rule is enforced by the vote recorder, not here.
    pub fn validate_selections(&self, selections: &Selections) -> Result<()> {
        validate_against(&self.positions, &self.candidates, selections)
    }
}

/// Validate a submission directly against position/candidate tables
///
/// Used by [`Catalog::validate_selections`] and by the store's commit path,
/// where the tables are borrowed under the unit-of-work locks rather than
/// cloned into a snapshot.
pub(crate) fn validate_against(
    positions: &HashMap<PositionId, Position>,
    candidates: &HashMap<CandidateId, Candidate>,
    selections: &Selections,
) -> Result<()> {
    for (position_id, chosen) in selections {
        let position = positions
            .get(position_id)
            .ok_or_else(|| Error::unknown_position(*position_id))?;

        if chosen.len() > position.max_vote as usize {
            return Err(Error::over_limit(*position_id, position.max_vote, chosen.len()));
        }

        for candidate_id in chosen {
            match candidates.get(candidate_id) {
                Some(candidate) if candidate.position_id == *position_id => {}
                Some(_) => {
                    return Err(Error::foreign_candidate(*position_id, *candidate_id));
                }
                None => {
                    return Err(Error::unknown_candidate(*position_id, *candidate_id));
                }
            }
        }
    }
    Ok(())
}
