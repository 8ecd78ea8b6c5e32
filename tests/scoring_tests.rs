//! Scoring tests.
//!
//! Matches are played to the end through the battle engine, then scored:
//! multiplier tables, unclassed prizes, set bonuses, and the final result.

use skirmish_engine::battle::BattleEngine;
use skirmish_engine::cards::{MultiplierTable, Prize, PrizeAbility, PrizeClass};
use skirmish_engine::core::{MatchConfig, MatchState, PlayerId};
use skirmish_engine::rules::{GameResult, RulesEngine};
use skirmish_engine::scoring::{ScoreBreakdown, ScoringEngine};

fn p(seat: u8) -> PlayerId {
    PlayerId::new(seat)
}

/// Seat 1 takes both prizes after a tie; the match ends on a final empty tie.
fn play_out(prizes: Vec<Prize>, table: Option<MultiplierTable>) -> (BattleEngine, MatchState) {
    let config = MatchConfig::builder()
        .prizes(prizes)
        .hand_values(vec![1, 2, 3])
        .build()
        .unwrap();
    let engine = BattleEngine::new();
    let mut state = engine.start_new_game(&config);
    if let Some(table) = table {
        state.assign_multiplier_table(p(1), table).unwrap();
    }

    for (a, b) in [(3, 3), (2, 1), (1, 1)] {
        engine.play_card(&mut state, p(1), a).unwrap();
        engine.play_card(&mut state, p(2), b).unwrap();
    }
    assert!(state.is_game_over());
    assert_eq!(state.claimed(p(1)).unwrap().len(), 2);

    (engine, state)
}

fn mining_corp(multiplier: f64) -> MultiplierTable {
    MultiplierTable::new("CORP_MINING", "Deep Core").with_multiplier(PrizeClass::Mining, multiplier)
}

fn research_corp(multiplier: f64) -> MultiplierTable {
    MultiplierTable::new("CORP_LAB", "Halcyon Labs").with_multiplier(PrizeClass::Research, multiplier)
}

/// Classed VP is multiplied, unclassed VP is not: 3 * 2.0 + 2 = 8.
#[test]
fn test_multiplier_skips_unclassed() {
    let prizes = vec![Prize::new("M", 3).with_class(PrizeClass::Mining), Prize::new("U", 2)];
    let (_, state) = play_out(prizes, Some(mining_corp(2.0)));

    let scores = ScoringEngine::new().final_scores(&state);

    assert_eq!(scores[p(1)], 8.0);
    assert_eq!(scores[p(2)], 0.0);
}

/// Set-bonus VP is added after multiplication: (2 + 2) * 2.0 + 3 = 11.
#[test]
fn test_set_bonus_is_additive() {
    let prizes = vec![
        Prize::new("R1", 2)
            .with_class(PrizeClass::Research)
            .with_ability(PrizeAbility::class_set_bonus(PrizeClass::Research, [(2, 3)])),
        Prize::new("R2", 2).with_class(PrizeClass::Research),
    ];
    let (_, state) = play_out(prizes, Some(research_corp(2.0)));

    let breakdown = ScoringEngine::new().breakdown(&state, p(1));

    assert_eq!(
        breakdown,
        ScoreBreakdown { classed: 8.0, unclassed: 0.0, set_bonus: 3.0, total: 11.0 }
    );
}

/// Changing the multiplier never changes the set bonus.
#[test]
fn test_set_bonus_ignores_multiplier() {
    let prizes = || {
        vec![
            Prize::new("R1", 1)
                .with_class(PrizeClass::Research)
                .with_ability(PrizeAbility::class_set_bonus(PrizeClass::Research, [(1, 2), (2, 5)])),
            Prize::new("R2", 1).with_class(PrizeClass::Research),
        ]
    };
    let scoring = ScoringEngine::new();

    let bonuses: Vec<f64> = [None, Some(research_corp(3.0)), Some(research_corp(-1.0))]
        .into_iter()
        .map(|table| {
            let (_, state) = play_out(prizes(), table);
            scoring.breakdown(&state, p(1)).set_bonus
        })
        .collect();

    assert_eq!(bonuses, vec![5.0, 5.0, 5.0]);
}

/// Without an assigned table every category scores at face value.
#[test]
fn test_no_table_scores_face_value() {
    let prizes = vec![
        Prize::new("T", 2).with_class(PrizeClass::TradePost),
        Prize::new("S", -1).with_class(PrizeClass::Station),
    ];
    let (_, state) = play_out(prizes, None);

    let scoring = ScoringEngine::new();
    assert_eq!(scoring.final_scores(&state)[p(1)], 1.0);
    assert_eq!(scoring.raw_scores(&state)[p(1)], 1);
}

/// Scoring twice gives the same result and leaves the state alone.
#[test]
fn test_scoring_is_pure() {
    let prizes = vec![Prize::new("M", 3).with_class(PrizeClass::Mining), Prize::new("U", 2)];
    let (_, state) = play_out(prizes, Some(mining_corp(1.5)));
    let before = state.clone();

    let scoring = ScoringEngine::new();
    let first = scoring.final_scores(&state);
    let second = scoring.final_scores(&state);

    assert_eq!(first, second);
    assert_eq!(state, before);
}

/// The rules-engine view of a finished match names the top scorer.
#[test]
fn test_terminal_result() {
    let prizes = vec![Prize::new("M", 3).with_class(PrizeClass::Mining), Prize::new("U", 2)];
    let (engine, state) = play_out(prizes, None);

    assert_eq!(engine.is_terminal(&state), Some(GameResult::Winner(p(1))));
}
