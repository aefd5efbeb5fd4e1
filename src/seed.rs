//! Seeding helpers for demos, tests and fresh deployments
//!
//! Mirrors the maintenance tooling of the surrounding application: a small
//! demo catalog fixture and bulk voter registration with generated
//! credentials (three uppercase letters followed by six digits).

use rand::Rng;

use crate::errors::Result;
use crate::store::ElectionStore;
use crate::types::{Candidate, Position, Voter};
use uuid::Uuid;

/// The demo catalog as loaded, in creation order
///
/// `positions[0]` is "President" (max_vote 1, candidates Alice and Bob),
/// `positions[1]` is "Council" (max_vote 2, candidates Carol, Dave, Eve).
#[derive(Debug, Clone)]
pub struct CatalogFixture {
    pub positions: Vec<Position>,
    pub candidates: Vec<Candidate>,
}

/// Generate an opaque voter credential: 3 uppercase letters + 6 digits
pub fn generate_credential(rng: &mut impl Rng) -> String {
    let letters: String = (0..3)
        .map(|_| rng.gen_range(b'A'..=b'Z') as char)
        .collect();
    let digits: String = (0..6).map(|_| rng.gen_range(b'0'..=b'9') as char).collect();
    format!("{letters}{digits}")
}

/// Register `count` voters with freshly generated unique credentials
pub fn register_voters(store: &ElectionStore, count: usize) -> Result<Vec<Voter>> {
    let mut rng = rand::thread_rng();
    let mut voters = Vec::with_capacity(count);
    let mut failures = 0;
    while voters.len() < count {
        let credential = generate_credential(&mut rng);
        // Registration itself rejects taken credentials, so a credential
        // grabbed concurrently just means another draw. A long failure
        // streak is a storage fault, not a collision.
        match store.register_voter(credential) {
            Ok(voter) => {
                failures = 0;
                voters.push(voter);
            }
            Err(err) if err.is_retryable() && failures < 100 => {
                failures += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(voters)
}

/// Load a small two-position demo catalog into the store
pub fn demo_catalog(store: &ElectionStore) -> Result<CatalogFixture> {
    let positions = vec![
        Position {
            id: Uuid::new_v4(),
            description: "President".to_string(),
            max_vote: 1,
            priority: 1,
        },
        Position {
            id: Uuid::new_v4(),
            description: "Council".to_string(),
            max_vote: 2,
            priority: 2,
        },
    ];

    let candidates = vec![
        Candidate {
            id: Uuid::new_v4(),
            position_id: positions[0].id,
            name: "Alice".to_string(),
            manifesto: Some("Transparency in every decision".to_string()),
        },
        Candidate {
            id: Uuid::new_v4(),
            position_id: positions[0].id,
            name: "Bob".to_string(),
            manifesto: None,
        },
        Candidate {
            id: Uuid::new_v4(),
            position_id: positions[1].id,
            name: "Carol".to_string(),
            manifesto: None,
        },
        Candidate {
            id: Uuid::new_v4(),
            position_id: positions[1].id,
            name: "Dave".to_string(),
            manifesto: Some("Better facilities".to_string()),
        },
        Candidate {
            id: Uuid::new_v4(),
            position_id: positions[1].id,
            name: "Eve".to_string(),
            manifesto: None,
        },
    ];

    for position in &positions {
        store.upsert_position(position.clone())?;
    }
    for candidate in &candidates {
        store.upsert_candidate(candidate.clone())?;
    }

    Ok(CatalogFixture {
        positions,
        candidates,
    })
}
