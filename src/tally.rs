//! Tally aggregation
//!
//! Derives per-candidate and per-position vote counts from the committed
//! vote records, plus the summary counts used on the administrative
//! dashboard. Counts are computed from a consistent store snapshot at read
//! time; there is no caching, so a tally taken immediately after a commit
//! already includes it, and an in-flight uncommitted submission never
//! appears.

use std::collections::HashMap;

use crate::errors::Result;
use crate::store::ElectionStore;
use crate::types::{CandidateId, CandidateTally, PositionTally, ResetReport, TallyReport};

/// Build the full tally report
///
/// Positions appear in catalog display order; within each position the
/// candidates are ordered by vote count descending, name as tie-breaker.
/// Every candidate appears even with zero votes.
pub fn report(store: &ElectionStore) -> Result<TallyReport> {
    let (catalog, summary, records) = store.report_snapshot()?;

    let mut counts: HashMap<CandidateId, usize> = HashMap::new();
    for record in &records {
        *counts.entry(record.candidate_id).or_default() += 1;
    }

    let positions = catalog
        .positions_ordered()
        .into_iter()
        .map(|position| {
            let mut candidates: Vec<CandidateTally> = catalog
                .candidates_for(&position.id)
                .into_iter()
                .map(|candidate| CandidateTally {
                    candidate_id: candidate.id,
                    name: candidate.name.clone(),
                    votes: counts.get(&candidate.id).copied().unwrap_or(0),
                })
                .collect();
            candidates.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.name.cmp(&b.name)));
            PositionTally {
                position_id: position.id,
                description: position.description.clone(),
                candidates,
            }
        })
        .collect();

    Ok(TallyReport { summary, positions })
}

/// Delete all vote records and reset every voter to not-voted
///
/// Atomic all-or-nothing maintenance operation between election cycles.
/// Privilege checks belong to the external authorization layer.
pub fn reset_all_votes(store: &ElectionStore) -> Result<ResetReport> {
    store.reset_all_votes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::types::Selections;
    use std::collections::HashSet;

    #[test]
    fn test_empty_store_report() {
        let store = ElectionStore::new();
        let report = report(&store).unwrap();
        assert_eq!(report.summary.positions, 0);
        assert_eq!(report.summary.votes_cast, 0);
        assert!(report.positions.is_empty());
    }

    #[test]
    fn test_counts_and_ordering() {
        let store = ElectionStore::new();
        let fixture = seed::demo_catalog(&store).unwrap();
        let president = &fixture.positions[0];
        let president_candidates: Vec<_> = fixture
            .candidates
            .iter()
            .filter(|c| c.position_id == president.id)
            .collect();
        let (alice, bob) = (president_candidates[0], president_candidates[1]);

        // Two votes for Bob, one for Alice
        for (credential, choice) in [
            ("AAA111111", bob.id),
            ("BBB222222", bob.id),
            ("CCC333333", alice.id),
        ] {
            store.register_voter(credential).unwrap();
            let mut selections = Selections::new();
            selections.insert(president.id, HashSet::from([choice]));
            store.commit_ballot(credential, &selections).unwrap();
        }

        let tally = report(&store).unwrap();
        assert_eq!(tally.summary.voters, 3);
        assert_eq!(tally.summary.voters_voted, 3);
        assert_eq!(tally.summary.votes_cast, 3);
        assert_eq!(tally.summary.positions, 2);
        assert_eq!(tally.summary.candidates, 5);

        // Positions in display order, leader first within a position
        assert_eq!(tally.positions[0].position_id, president.id);
        let leader = &tally.positions[0].candidates[0];
        assert_eq!(leader.candidate_id, bob.id);
        assert_eq!(leader.votes, 2);
        assert_eq!(tally.positions[0].candidates[1].votes, 1);

        // Council candidates all present with zero votes
        assert!(tally.positions[1].candidates.iter().all(|c| c.votes == 0));
        assert_eq!(tally.positions[1].candidates.len(), 3);
    }

    #[test]
    fn test_reset_round_trip() {
        let store = ElectionStore::new();
        let fixture = seed::demo_catalog(&store).unwrap();
        let president = &fixture.positions[0];
        let choice = fixture
            .candidates
            .iter()
            .find(|c| c.position_id == president.id)
            .unwrap();

        store.register_voter("AAA111111").unwrap();
        let mut selections = Selections::new();
        selections.insert(president.id, HashSet::from([choice.id]));
        store.commit_ballot("AAA111111", &selections).unwrap();

        let reset = reset_all_votes(&store).unwrap();
        assert_eq!(reset.records_deleted, 1);
        assert_eq!(reset.voters_reset, 1);

        let tally = report(&store).unwrap();
        assert_eq!(tally.summary.votes_cast, 0);
        assert_eq!(tally.summary.voters_voted, 0);
        assert!(tally
            .positions
            .iter()
            .flat_map(|p| &p.candidates)
            .all(|c| c.votes == 0));
    }
}
