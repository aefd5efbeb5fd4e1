//! Simple test to verify compilation and basic functionality

use ballot::{config::Config, seed, types::Selections, ElectionStore, Engine, Result};
use std::collections::HashSet;

#[test]
fn test_basic_compilation() -> Result<()> {
    println!("🔧 Testing basic compilation and functionality...");

    // Test configuration
    let config = Config::for_testing();
    assert_eq!(config.election.title, "Test Election");
    println!("✅ Configuration works");

    // Test store and seeding
    let store = ElectionStore::new();
    let fixture = seed::demo_catalog(&store)?;
    assert_eq!(fixture.positions.len(), 2);
    let voters = seed::register_voters(&store, 3)?;
    assert_eq!(voters.len(), 3);
    println!("✅ Store seeding works");

    // Test the engine surface end to end
    let engine = Engine::for_testing();
    seed::demo_catalog(engine.store())?;
    engine.store().register_voter("ABC123456")?;

    let view = engine.ballot("ABC123456")?;
    assert!(!view.already_voted);
    assert_eq!(view.positions.len(), 2);
    println!("✅ Ballot assembly works");

    let president = &view.positions[0];
    let mut selections = Selections::new();
    selections.insert(president.id, HashSet::from([president.candidates[0].id]));
    let receipt = engine.submit("ABC123456", &selections)?;
    assert_eq!(receipt.records_created, 1);
    println!("✅ Vote submission works");

    let stats = engine.statistics()?;
    assert_eq!(stats.summary.votes_cast, 1);
    println!("✅ Tally works");

    // Test serialization of the views
    let ballot_json = serde_json::to_string(&view).unwrap();
    assert!(ballot_json.contains("already_voted"));
    let stats_json = serde_json::to_string(&stats).unwrap();
    assert!(stats_json.contains("votes_cast"));
    println!("✅ Serialization works");

    Ok(())
}
