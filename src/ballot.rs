//! Ballot assembly
//!
//! Builds the voter-facing ballot from a fresh catalog snapshot: positions
//! ordered by priority (ascending), each carrying its candidates in stable
//! display order and its selection limit. Pure read, no side effects.

use crate::errors::Result;
use crate::store::ElectionStore;
use crate::types::{BallotCandidate, BallotPosition, BallotView};

/// Assemble the ballot for the voter behind `credential`
///
/// Returns an `already_voted` view (with an empty positions list) when the
/// voter has committed a ballot, and a full ballot otherwise. Fails with
/// [`crate::Error::NotFound`] for an unknown credential and
/// [`crate::Error::Unavailable`] when the catalog cannot be read.
pub fn assemble(
    store: &ElectionStore,
    election_title: &str,
    credential: &str,
) -> Result<BallotView> {
    let voter = store.voter_by_credential(credential)?;

    if voter.has_voted {
        return Ok(BallotView {
            election_title: election_title.to_string(),
            already_voted: true,
            positions: Vec::new(),
        });
    }

    let catalog = store.catalog()?;
    let positions = catalog
        .positions_ordered()
        .into_iter()
        .map(|position| BallotPosition {
            id: position.id,
            description: position.description.clone(),
            slug: position.slug(),
            max_vote: position.max_vote,
            candidates: catalog
                .candidates_for(&position.id)
                .into_iter()
                .map(|candidate| BallotCandidate {
                    id: candidate.id,
                    name: candidate.name.clone(),
                    manifesto: candidate.manifesto.clone(),
                })
                .collect(),
        })
        .collect();

    Ok(BallotView {
        election_title: election_title.to_string(),
        already_voted: false,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::seed;
    use crate::types::Selections;
    use std::collections::HashSet;

    #[test]
    fn test_unknown_credential() {
        let store = ElectionStore::new();
        assert_eq!(
            assemble(&store, "Voting System", "ZZZ000000").unwrap_err(),
            Error::NotFound
        );
    }

    #[test]
    fn test_ballot_shape_and_order() {
        let store = ElectionStore::new();
        let fixture = seed::demo_catalog(&store).unwrap();
        store.register_voter("ABC123456").unwrap();

        let ballot = assemble(&store, "Student Council 2026", "ABC123456").unwrap();
        assert_eq!(ballot.election_title, "Student Council 2026");
        assert!(!ballot.already_voted);

        // Priority ascending: President before Council
        assert_eq!(ballot.positions.len(), 2);
        assert_eq!(ballot.positions[0].description, "President");
        assert_eq!(ballot.positions[0].slug, "president");
        assert_eq!(ballot.positions[0].max_vote, 1);
        assert_eq!(ballot.positions[1].description, "Council");
        assert_eq!(ballot.positions[1].max_vote, 2);

        // Candidates sorted by name
        let names: Vec<&str> = ballot.positions[1]
            .candidates
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(fixture.candidates.len(), 5);
    }

    #[test]
    fn test_already_voted_view() {
        let store = ElectionStore::new();
        let fixture = seed::demo_catalog(&store).unwrap();
        store.register_voter("ABC123456").unwrap();

        let president = &fixture.positions[0];
        let choice = fixture
            .candidates
            .iter()
            .find(|c| c.position_id == president.id)
            .unwrap();
        let mut selections = Selections::new();
        selections.insert(president.id, HashSet::from([choice.id]));
        store.commit_ballot("ABC123456", &selections).unwrap();

        let ballot = assemble(&store, "Voting System", "ABC123456").unwrap();
        assert!(ballot.already_voted);
        assert!(ballot.positions.is_empty());
    }
}
