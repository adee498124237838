//! End-to-end scoring passes over in-memory artifacts.

use golfpool::engine::prize::PrizeAllocator;
use golfpool::engine::{compute_results, refresh, score_stored};
use golfpool::leaderboard::Normalizer;
use golfpool::storage::Store;
use golfpool::types::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::mocks::{MemoryStore, MockSource};

const TABLE: &str = "\
1
Scottie Scheffler
-
2
Ludvig Aberg
-
T3
Tommy Fleetwood
-
T3
Collin Morikawa
-
T 12
Rory McIlroy
-
-
Max Homa
-
The following players failed to make the cut at +6
T 60
Tiger Woods
-
-
Jon Rahm
-
";

fn snapshot() -> LeaderboardSnapshot {
    LeaderboardSnapshot {
        date_time: "April 14, 2024 18:05".to_string(),
        leaderboard: Normalizer::default().normalize_text(TABLE).unwrap(),
    }
}

fn bets() -> Pool {
    let json = r#"{
        "pot": 300,
        "gamblers": [
            { "name": "Anna", "bet": [
                { "pos": 1, "name": "Scottie Scheffler" },
                { "pos": 3, "name": "Collin Morikawa" },
                { "pos": 12, "name": "Rory McIlroy" }
            ] },
            { "name": "Bram", "bet": [
                { "pos": 2, "name": "Scottie Scheffler" },
                { "pos": 2, "name": "Ludvig Aberg" },
                { "pos": 7, "name": "Tiger Woods" }
            ] },
            { "name": "Cees", "bet": [
                { "pos": 5, "name": "Tommy Fleetwood" },
                { "pos": 1, "name": "Ludvig Aberg" },
                { "pos": 4, "name": "Max Homa" },
                { "pos": 6, "name": "" }
            ] },
            { "name": "Dirk", "bet": [
                { "pos": 1, "name": "Scottie Scheffler" },
                { "pos": 3, "name": "Collin Morikawa" },
                { "pos": 9, "name": "Brooks Koepka" }
            ] },
            { "name": "Eva", "bet": [
                { "pos": 8, "name": "Jon Rahm" }
            ] }
        ]
    }"#;
    serde_json::from_str(json).unwrap()
}

fn gambler<'a>(pool: &'a Pool, name: &str) -> &'a Gambler {
    pool.gamblers.iter().find(|g| g.name == name).unwrap()
}

#[test]
fn test_scores_and_ranking() {
    let results = compute_results(&snapshot(), bets(), &PrizeAllocator::default()).unwrap();
    let pool = &results.pool;

    // Anna: winner 50 + exact T3 30 + T12 0
    assert_eq!(gambler(pool, "Anna").total_points, 80);
    // Bram: winner 50 + exact 30 + cut at T60 0
    assert_eq!(gambler(pool, "Bram").total_points, 80);
    // Cees: T3 15 + 2nd 15 + unknown 0 + empty 0
    assert_eq!(gambler(pool, "Cees").total_points, 30);
    // Dirk: 50 + 30 + missing 0
    assert_eq!(gambler(pool, "Dirk").total_points, 80);
    assert_eq!(gambler(pool, "Eva").total_points, 0);

    let order: Vec<_> = pool.gamblers.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(order, vec!["Anna", "Bram", "Dirk", "Cees", "Eva"]);

    let sum_totals: u32 = pool.gamblers.iter().map(|g| g.total_points).sum();
    assert_eq!(sum_totals, pool.total_bet_points());
}

#[test]
fn test_prizes() {
    let results = compute_results(&snapshot(), bets(), &PrizeAllocator::default()).unwrap();
    let pool = &results.pool;

    // 150 / 3 = 50 each
    for name in ["Anna", "Bram", "Dirk"] {
        assert_eq!(gambler(pool, name).prize_amount.as_deref(), Some("€ 50,00"));
    }
    assert_eq!(gambler(pool, "Cees").prize_amount.as_deref(), Some("€ 90,00"));
    assert_eq!(gambler(pool, "Eva").prize_amount.as_deref(), Some("€ 60,00"));

    let paid: Decimal = results.payouts.iter().map(|p| p.paid_out()).sum();
    assert!(paid <= pool.total_prize);
    assert_eq!(paid, dec!(300));
}

#[test]
fn test_bet_details() {
    let results = compute_results(&snapshot(), bets(), &PrizeAllocator::default()).unwrap();
    let pool = &results.pool;

    let bram = gambler(pool, "Bram");
    assert_eq!(bram.bets[2].actual_position_text.as_deref(), Some("T 60"));
    assert_eq!(bram.bets[2].is_cut, Some(true));

    let cees = gambler(pool, "Cees");
    assert_eq!(cees.bets[2].actual_position_text.as_deref(), Some(""));
    assert_eq!(cees.bets[3].actual_position_text, None);

    assert_eq!(results.missing.len(), 1);
    assert_eq!(results.missing[0].gambler, "Dirk");
    assert_eq!(results.missing[0].predicted_position, 9);
    assert_eq!(results.missing[0].name, "Brooks Koepka");
}

#[test]
fn test_results_are_idempotent() {
    let alloc = PrizeAllocator::default();
    let first = compute_results(&snapshot(), bets(), &alloc).unwrap();
    let second = compute_results(&snapshot(), bets(), &alloc).unwrap();

    assert_eq!(
        serde_json::to_string_pretty(&first.pool).unwrap(),
        serde_json::to_string_pretty(&second.pool).unwrap()
    );
}

#[test]
fn test_results_artifact_shape() {
    let results = compute_results(&snapshot(), bets(), &PrizeAllocator::default()).unwrap();
    let value = serde_json::to_value(&results.pool).unwrap();

    assert_eq!(value["date_time"], "April 14, 2024 18:05");
    let first = &value["gamblers"][0];
    assert_eq!(first["name"], "Anna");
    assert_eq!(first["totaal"], 80);
    assert_eq!(first["winnings"], "€ 50,00");
    assert_eq!(first["bet"][1]["loc"], "T3");
    assert_eq!(first["bet"][1]["punten"], 30);
    assert_eq!(first["bet"][1]["cut"], false);
}

#[tokio::test]
async fn test_refresh_then_score_through_store() {
    let source = MockSource::new(snapshot());
    let store = MemoryStore::with_bets(bets());

    refresh(&source, &store).await.unwrap();
    assert_eq!(source.calls(), 1);

    let results = score_stored(&store, &PrizeAllocator::default()).unwrap();
    let saved = store.load_results().unwrap();
    assert_eq!(saved, results.pool);
    assert_eq!(saved.gamblers[0].name, "Anna");
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let source = MockSource::new(snapshot());
    let store = MemoryStore::with_bets(bets());
    refresh(&source, &store).await.unwrap();

    source.set_error("timed out");
    assert!(refresh(&source, &store).await.is_err());
    assert_eq!(store.load_snapshot().unwrap(), snapshot());
}

#[test]
fn test_scoring_without_snapshot_fails() {
    let store = MemoryStore::with_bets(bets());
    assert!(score_stored(&store, &PrizeAllocator::default()).is_err());
    assert!(store.load_results().is_err());
}

#[test]
fn test_scoring_without_bets_fails() {
    let store = MemoryStore::default();
    store.save_snapshot(&snapshot()).unwrap();
    assert!(score_stored(&store, &PrizeAllocator::default()).is_err());
}
