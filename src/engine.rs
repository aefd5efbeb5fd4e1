//! Engine facade: the API surface consumed by the surrounding application
//!
//! Four operations, matching what the external collaborators call into:
//! ballot retrieval, vote submission, statistics retrieval and the
//! administrative votes reset. Authorization (who may reset, which session
//! maps to which credential) is enforced outside this crate.

use std::sync::Arc;

use crate::ballot;
use crate::config::Config;
use crate::errors::Result;
use crate::recorder;
use crate::store::ElectionStore;
use crate::tally;
use crate::types::{BallotView, CastReceipt, ResetReport, Selections, TallyReport};

/// Ballot processing and tally engine
///
/// Holds the configuration and the shared store handle; cheap to clone into
/// concurrent request-handling workers.
#[derive(Clone)]
pub struct Engine {
    config: Config,
    store: Arc<ElectionStore>,
}

impl Engine {
    /// Create an engine around an existing store
    pub fn new(config: Config, store: Arc<ElectionStore>) -> Self {
        Self { config, store }
    }

    /// Create an engine with a fresh empty store, for testing
    pub fn for_testing() -> Self {
        Self::new(Config::for_testing(), Arc::new(ElectionStore::new()))
    }

    /// The underlying store handle (catalog loading, voter registration)
    pub fn store(&self) -> &Arc<ElectionStore> {
        &self.store
    }

    /// Assemble the ballot for a voter, or report they already voted
    pub fn ballot(&self, credential: &str) -> Result<BallotView> {
        ballot::assemble(&self.store, &self.config.election.title, credential)
    }

    /// Submit a voter's selections for atomic, exactly-once recording
    pub fn submit(&self, credential: &str, selections: &Selections) -> Result<CastReceipt> {
        match recorder::cast_vote(&self.store, credential, selections) {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                tracing::warn!("🚫 Submission rejected: {err}");
                Err(err)
            }
        }
    }

    /// Current tally report for administrative dashboards
    pub fn statistics(&self) -> Result<TallyReport> {
        tally::report(&self.store)
    }

    /// Administrative bulk reset of all votes (privilege-gated externally)
    pub fn reset_votes(&self) -> Result<ResetReport> {
        tally::reset_all_votes(&self.store)
    }
}
