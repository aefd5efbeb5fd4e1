//! # Core Types for the Ballot Processing & Tally Engine
//!
//! This module defines the data model shared by every engine component:
//! the catalog entities (positions and candidates), voters, the immutable
//! vote record, and the derived ballot/tally views handed to the external
//! presentation layer.
//!
//! ## Design Principles
//!
//! - **Read-only catalog**: [`Position`] and [`Candidate`] are maintained by
//!   external administrative tooling; the engine never mutates them.
//! - **Single mutable flag**: the only voter attribute the engine touches is
//!   [`Voter::has_voted`].
//! - **Immutable facts**: a [`VoteRecord`] is created exactly once and never
//!   updated; it is deleted only by the administrative bulk reset.
//! - **Derived views**: [`BallotView`] and the tally types are computed fresh
//!   per request and never persisted.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a contested position
pub type PositionId = Uuid;

/// Unique identifier of a candidate
pub type CandidateId = Uuid;

/// Unique identifier of a voter
pub type VoterId = Uuid;

/// A voter submission: for each position, the set of chosen candidates
///
/// Positions omitted from the mapping (or mapped to an empty set) count as
/// abstention for that position, which is always permitted. A submission with
/// zero selections across all positions is rejected as an empty ballot.
pub type Selections = HashMap<PositionId, HashSet<CandidateId>>;

/// Total number of chosen candidates across all positions in a submission
pub fn total_selections(selections: &Selections) -> usize {
    selections.values().map(HashSet::len).sum()
}

/// A contested office with a bounded number of selectable candidates
///
/// Positions are created and edited by external administrative tooling and
/// are read-only to the engine. They are assumed immutable during an active
/// voting session, but the engine does not rely on that: every submission is
/// re-validated against current catalog state at commit time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    /// Unique position identifier
    pub id: PositionId,

    /// Human-readable office name (e.g. "President")
    pub description: String,

    /// Maximum number of candidates a voter may select for this position
    ///
    /// The minimum is implicitly zero: abstaining is always permitted.
    pub max_vote: u32,

    /// Display order; lower values are shown first
    pub priority: i32,
}

impl Position {
    /// Derived machine-friendly label for the position
    ///
    /// Lowercases the description and collapses every run of
    /// non-alphanumeric characters into a single underscore.
    ///
    /// ```rust
    /// use ballot::types::Position;
    /// use uuid::Uuid;
    ///
    /// let position = Position {
    ///     id: Uuid::new_v4(),
    ///     description: "Vice President".to_string(),
    ///     max_vote: 1,
    ///     priority: 2,
    /// };
    /// assert_eq!(position.slug(), "vice_president");
    /// ```
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.description.len());
        for ch in self.description.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.ends_with('_') && !slug.is_empty() {
                slug.push('_');
            }
        }
        slug.trim_end_matches('_').to_string()
    }
}

/// An option belonging to exactly one position
///
/// Like positions, candidates are maintained externally and read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    /// Unique candidate identifier
    pub id: CandidateId,

    /// The position this candidate runs for (many-to-one)
    pub position_id: PositionId,

    /// Candidate's display name
    pub name: String,

    /// Optional manifesto text
    pub manifesto: Option<String>,
}

/// A registered voter
///
/// Voter records are created externally; `has_voted` is the only attribute
/// the engine ever mutates, and only inside the atomic commit of a ballot
/// or the administrative bulk reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voter {
    /// Unique voter identifier
    pub id: VoterId,

    /// Opaque per-voter credential used to request a ballot and submit votes
    pub credential: String,

    /// Whether this voter has committed a ballot
    ///
    /// Transitions false to true exactly once, atomically with the insertion
    /// of the voter's vote records.
    pub has_voted: bool,
}

/// An immutable fact: one voter selected one candidate
///
/// One record is created per chosen candidate, so a single submission may
/// produce several records for the same voter when a position allows
/// multiple selections. Records are never updated; the administrative bulk
/// reset is the only way they are ever deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    /// Unique record identifier
    pub id: Uuid,

    /// The voter who made this selection
    pub voter_id: VoterId,

    /// The chosen candidate
    pub candidate_id: CandidateId,

    /// The position the record is filed under
    ///
    /// Always the position the candidate belongs to; validation rejects any
    /// cross-position selection before a record is created.
    pub position_id: PositionId,

    /// When the containing submission was committed
    pub cast_at: DateTime<Utc>,
}

impl VoteRecord {
    /// Create a new vote record with a fresh identity
    pub fn new(
        voter_id: VoterId,
        candidate_id: CandidateId,
        position_id: PositionId,
        cast_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            voter_id,
            candidate_id,
            position_id,
            cast_at,
        }
    }
}

/// The voter-facing ballot, computed on demand
///
/// When `already_voted` is set the positions list is empty: there is
/// nothing left to present to that voter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BallotView {
    /// Configured election title, carried for display
    pub election_title: String,

    /// Whether this voter has already committed a ballot
    pub already_voted: bool,

    /// Positions ordered by priority, each with its candidates and limit
    pub positions: Vec<BallotPosition>,
}

/// One position as presented on a ballot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BallotPosition {
    pub id: PositionId,
    pub description: String,
    /// Derived label, see [`Position::slug`]
    pub slug: String,
    /// Selection limit for this position
    pub max_vote: u32,
    /// Candidates in stable display order (name, then id)
    pub candidates: Vec<BallotCandidate>,
}

/// One candidate as presented on a ballot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BallotCandidate {
    pub id: CandidateId,
    pub name: String,
    pub manifesto: Option<String>,
}

/// Receipt returned for a successfully committed submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastReceipt {
    /// The voter the ballot was committed for
    pub voter_id: VoterId,

    /// Number of vote records created by this submission
    pub records_created: usize,

    /// Commit timestamp shared by all records of the submission
    pub cast_at: DateTime<Utc>,
}

/// Outcome of the administrative bulk reset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResetReport {
    /// Vote records deleted
    pub records_deleted: usize,

    /// Voters whose `has_voted` flag was flipped back
    pub voters_reset: usize,
}

/// Summary counts for administrative reporting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TallySummary {
    pub positions: usize,
    pub candidates: usize,
    pub voters: usize,
    /// Voters whose ballot has been committed
    pub voters_voted: usize,
    /// Total vote records (several per voter when limits allow)
    pub votes_cast: usize,
}

/// Per-candidate count within a position tally
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateTally {
    pub candidate_id: CandidateId,
    pub name: String,
    pub votes: usize,
}

/// Tally for one position: candidates ordered by vote count descending
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionTally {
    pub position_id: PositionId,
    pub description: String,
    pub candidates: Vec<CandidateTally>,
}

/// Full tally report: summary counts plus per-position tallies
///
/// Derived from committed vote records at read time; never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TallyReport {
    pub summary: TallySummary,
    /// Positions in catalog display order (priority ascending)
    pub positions: Vec<PositionTally>,
}
