use yacht_core::model::category::Category;
use yacht_core::model::dice::Dice;
use yacht_core::model::scorecard::Scorecard;
use yacht_core::model::scoring::{joker_upper_category, score_category};

fn dice(faces: [u8; 5]) -> Dice {
    Dice::new(faces).expect("valid dice")
}

fn card_with_yahtzee() -> Scorecard {
    let mut card = Scorecard::new("Ann");
    card.record(Category::Yahtzee, &dice([2, 2, 2, 2, 2])).expect("open box");
    card
}

#[test]
fn repeat_yahtzee_adds_bonus_in_any_box() {
    let sixes = dice([6, 6, 6, 6, 6]);
    for category in Category::ALL.iter().copied().filter(|c| *c != Category::Yahtzee) {
        let mut card = card_with_yahtzee();
        let before = card.total();
        let outcome = card.record(category, &sixes).expect("open box");
        assert!(outcome.joker_bonus, "{category} should trigger the bonus");
        assert_eq!(card.yahtzee_bonus_count(), 1);
        assert_eq!(card.total(), before + outcome.points + 100);
    }
}

#[test]
fn joker_unlocks_fixed_lower_scores() {
    let card = card_with_yahtzee();
    let fours = dice([4, 4, 4, 4, 4]);
    assert_eq!(card.preview(Category::FullHouse, &fours), 25);
    assert_eq!(card.preview(Category::SmallStraight, &fours), 30);
    assert_eq!(card.preview(Category::LargeStraight, &fours), 40);
    assert_eq!(card.preview(Category::Fours, &fours), 20);
    assert_eq!(card.preview(Category::Twos, &fours), 20);
    assert_eq!(card.preview(Category::Chance, &fours), 20);
    assert_eq!(score_category(Category::FullHouse, &fours), 0);
}

#[test]
fn zeroed_yahtzee_box_disables_joker() {
    let mut card = Scorecard::new("Bo");
    card.record(Category::Yahtzee, &dice([1, 2, 3, 4, 6])).expect("open box");
    let fives = dice([5, 5, 5, 5, 5]);
    assert_eq!(card.preview(Category::FullHouse, &fives), 0);
    let outcome = card.record(Category::Chance, &fives).expect("open box");
    assert!(!outcome.joker_bonus);
    assert_eq!(card.yahtzee_bonus_count(), 0);
    assert_eq!(joker_upper_category(&fives, &card), None);
}

#[test]
fn upper_hint_only_while_matching_box_is_open() {
    let mut card = card_with_yahtzee();
    let threes = dice([3, 3, 3, 3, 3]);
    assert_eq!(joker_upper_category(&threes, &card), Some(Category::Threes));
    card.record(Category::Threes, &dice([3, 3, 1, 1, 2])).expect("open box");
    assert_eq!(joker_upper_category(&threes, &card), None);
}

#[test]
fn open_face_box_scores_every_upper_row_as_that_face() {
    let mut card = card_with_yahtzee();
    let sixes = dice([6, 6, 6, 6, 6]);
    assert_eq!(card.preview(Category::Twos, &sixes), 30);
    let outcome = card.record(Category::Twos, &sixes).expect("open box");
    assert_eq!(outcome.points, 30);
    assert!(outcome.joker_bonus);
    assert_eq!(card.upper_sum(), 30);

    card.record(Category::Sixes, &dice([6, 6, 6, 1, 2])).expect("open box");
    assert_eq!(card.preview(Category::Ones, &sixes), 0);
}

#[test]
fn twelve_jokers_reach_the_ceiling() {
    let mut card = Scorecard::new("Cy");
    let sixes = dice([6, 6, 6, 6, 6]);
    card.record(Category::Yahtzee, &sixes).expect("open box");
    for category in Category::ALL.iter().copied().filter(|c| *c != Category::Yahtzee) {
        card.record(category, &sixes).expect("open box");
    }
    assert!(card.is_complete());
    assert_eq!(card.yahtzee_bonus_count(), 12);
    // Sixes stays open until last, so every upper row scores 30 and earns the bonus.
    assert_eq!(card.upper_sum(), 180);
    assert_eq!(card.total(), 180 + 35 + 30 * 3 + 25 + 30 + 40 + 50 + 1200);
}
