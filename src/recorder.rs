//! Vote recording
//!
//! The voter state machine is minimal: `NOT_VOTED -> VOTED`, terminal, with
//! no externalized in-progress state. [`cast_vote`] drives the transition
//! through the store's atomic unit of work, so the "not yet voted" check,
//! commit-time re-validation, record insertion and flag flip either all take
//! effect or none do.
//!
//! From the voter's perspective the operation is effectively idempotent: a
//! client that times out may retry with the same payload and will either
//! commit normally (the original attempt never did) or be rejected with
//! `AlreadyVoted` (it did), never produce a second set of records.

use crate::errors::{Error, Result};
use crate::store::ElectionStore;
use crate::types::{total_selections, CastReceipt, Selections};

/// Cast a ballot for the voter behind `credential`
///
/// The empty-ballot rule is checked up front (it needs no storage access);
/// everything else is verified inside the store's unit of work, which is
/// authoritative regardless of any validation the caller already ran
/// against an assembled ballot.
pub fn cast_vote(
    store: &ElectionStore,
    credential: &str,
    selections: &Selections,
) -> Result<CastReceipt> {
    if total_selections(selections) == 0 {
        return Err(Error::EmptyBallot);
    }

    store.commit_ballot(credential, selections)
}
