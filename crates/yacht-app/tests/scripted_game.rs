use std::io::Cursor;

use yacht_app::config::{PacingConfig, SimulationConfig};
use yacht_app::controller::{GameController, PlayerSpec};
use yacht_app::store::{MemoryScoreStore, ScoreStore};
use yacht_bot::BotDifficulty;
use yacht_core::model::category::Category;

fn quick_sim() -> SimulationConfig {
    SimulationConfig {
        normal_trials: 25,
        hard_trials: 25,
    }
}

/// Roll once, stop, score the given row, then acknowledge.
fn stop_and_score(row: usize) -> String {
    format!("\ns\n{row}\n\n")
}

#[test]
fn solo_human_fills_rows_in_order() {
    let script: String = (1..=13).map(stop_and_score).collect();
    let players = [PlayerSpec::human("Ann")];
    let mut controller = GameController::new(
        &players,
        Some(2024),
        &quick_sim(),
        PacingConfig::instant(),
        Cursor::new(script.into_bytes()),
        Vec::new(),
    );

    let standings = controller.play_match().expect("match completes");
    assert_eq!(standings.len(), 1);

    let card = &controller.state().scorecards()[0];
    assert!(card.is_complete());
    assert_eq!(standings[0].total, card.total());
    assert_eq!(
        card.total(),
        card.upper_sum() + card.upper_bonus() + card.lower_sum() + card.yahtzee_bonus()
    );

    let text = String::from_utf8(controller.into_output()).expect("utf8");
    assert!(text.contains("'Ann' wins!"));
    assert_eq!(text.matches("Ann scored").count(), 13);
}

#[test]
fn used_category_is_refused_and_reprompted() {
    // Turn one scores Chance; turn two tries Chance again before taking Ones.
    let script = format!("{}\ns\n13\n1\n\n", stop_and_score(13));
    let players = [PlayerSpec::human("Bo")];
    let mut controller = GameController::new(
        &players,
        Some(5),
        &quick_sim(),
        PacingConfig::instant(),
        Cursor::new(script.into_bytes()),
        Vec::new(),
    );

    let first = controller.play_turn().expect("first turn");
    assert_eq!(first.category, Category::Chance);
    let second = controller.play_turn().expect("second turn");
    assert_eq!(second.category, Category::Ones);

    let text = String::from_utf8(controller.into_output()).expect("utf8");
    assert!(text.contains("Chance has already been used."));
}

#[test]
fn holds_survive_a_human_reroll() {
    let script = "\nt 1,2 5\nr\ns\n13\n\n";
    let players = [PlayerSpec::human("Cy")];
    let mut controller = GameController::new(
        &players,
        Some(77),
        &quick_sim(),
        PacingConfig::instant(),
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
    );
    controller.play_turn().expect("turn");

    let text = String::from_utf8(controller.into_output()).expect("utf8");
    let rolls: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("Rolled "))
        .collect();
    assert_eq!(rolls.len(), 2);
    let faces = |roll: &str| -> Vec<char> {
        roll.chars().filter(|c| c.is_ascii_digit()).take(5).collect()
    };
    let first = faces(rolls[0]);
    let second = faces(rolls[1]);
    assert_eq!(first[0], second[0]);
    assert_eq!(first[1], second[1]);
    assert_eq!(first[4], second[4]);
}

#[test]
fn human_against_computers_records_all_players() {
    let script: String = (1..=13).map(stop_and_score).collect();
    let players = [
        PlayerSpec::human("Di"),
        PlayerSpec::computer("Computer 1", BotDifficulty::Normal),
        PlayerSpec::computer("Computer 2", BotDifficulty::Easy),
    ];
    let mut controller = GameController::new(
        &players,
        Some(31),
        &quick_sim(),
        PacingConfig::instant(),
        Cursor::new(script.into_bytes()),
        Vec::new(),
    );
    let standings = controller.play_match().expect("match completes");
    assert_eq!(standings.len(), 3);
    assert!(standings.windows(2).all(|w| w[0].total >= w[1].total));

    let mut store = MemoryScoreStore::new();
    assert!(controller.record_results(&mut store).expect("output"));
    let top = store.top_scores(10).expect("memory store");
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].name, standings[0].name);
}
