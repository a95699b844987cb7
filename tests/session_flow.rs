//! Turn controller scenarios on hand-built boards

use rand::SeedableRng;
use rand_pcg::Pcg32;
use veggie_match::board::{Board, Cell, Pos, SpecialKind, VeggieKind};
use veggie_match::game::{CascadeStep, GameEvent, GamePhase, GameSession, SwapError};
use veggie_match::level::{LevelConfig, StarThresholds, Target};

const KINDS: [VeggieKind; 4] = [
    VeggieKind::Tomato,
    VeggieKind::Carrot,
    VeggieKind::Eggplant,
    VeggieKind::Broccoli,
];

/// At rest; the only valid move is (0, 2) <-> (1, 2), which lines up three
/// tomatoes along the top row
const ONE_MOVE: [&str; 6] = ["ttebtc", "ebtceb", "tcebtc", "ebtceb", "tcebtc", "ebtceb"];

fn level(max_moves: u32, target_score: u64) -> LevelConfig {
    LevelConfig {
        number: 1,
        description: String::new(),
        rows: 6,
        cols: 6,
        veggies: KINDS.to_vec(),
        max_moves,
        target_score,
        targets: Vec::new(),
        stars: StarThresholds {
            one: target_score,
            two: target_score * 2,
            three: target_score * 3,
        },
    }
}

fn session(layout: &[&str], level: LevelConfig) -> GameSession {
    let board = Board::from_layout(layout, &KINDS, Pcg32::seed_from_u64(3)).unwrap();
    GameSession::with_board(level, board)
}

fn assert_at_rest(session: &mut GameSession) {
    let board = session.board();
    assert!(board.grid().is_full());
    assert!(board.find_matches().is_empty());
    if session.phase() == GamePhase::Playing {
        assert!(session.hint().is_some());
    }
}

#[test]
fn test_rejected_swap_changes_nothing() {
    let mut s = session(&ONE_MOVE, level(10, 1_000_000));
    let before = s.board().snapshot();

    assert_eq!(
        s.try_swap(Pos::new(5, 0), Pos::new(5, 1)),
        Err(SwapError::NoMatch)
    );
    assert_eq!(
        s.try_swap(Pos::new(0, 0), Pos::new(1, 1)),
        Err(SwapError::NotAdjacent)
    );
    assert_eq!(
        s.try_swap(Pos::new(5, 5), Pos::new(6, 5)),
        Err(SwapError::OutOfBounds(Pos::new(6, 5)))
    );

    assert_eq!(s.board().snapshot(), before);
    assert_eq!(s.moves_left(), 10);
    assert_eq!(s.phase(), GamePhase::Playing);
    assert_eq!(s.drain_events(), vec![GameEvent::InvalidSwap]);
}

#[test]
fn test_swap_into_empty_cell() {
    let mut layout = ONE_MOVE;
    layout[1] = "ebtc.b";
    let mut s = session(&layout, level(10, 1_000_000));
    assert_eq!(
        s.try_swap(Pos::new(1, 3), Pos::new(1, 4)),
        Err(SwapError::EmptyCell(Pos::new(1, 4)))
    );
}

#[test]
fn test_hint_finds_only_move() {
    let mut s = session(&ONE_MOVE, level(10, 1_000_000));
    let hint = s.hint().unwrap();
    assert_eq!((hint.from, hint.to), (Pos::new(0, 2), Pos::new(1, 2)));
}

#[test]
fn test_valid_swap_scores_and_settles() {
    let mut s = session(&ONE_MOVE, level(10, 1_000_000));
    s.try_swap(Pos::new(0, 2), Pos::new(1, 2)).unwrap();
    assert_eq!(s.moves_left(), 9);
    assert_eq!(s.phase(), GamePhase::Resolving);
    assert_eq!(
        s.try_swap(Pos::new(0, 2), Pos::new(1, 2)),
        Err(SwapError::NotPlaying(GamePhase::Resolving))
    );

    match s.step() {
        Some(CascadeStep::Matched {
            cascade,
            outcome,
            points,
            ..
        }) => {
            assert_eq!(cascade, 0);
            assert_eq!(outcome.removed.len(), 3);
            assert!(outcome.specials.is_empty());
            assert_eq!(points, 50);
        }
        other => panic!("expected a match, got {other:?}"),
    }
    // Three gaps in the top row refill without falls
    match s.step() {
        Some(CascadeStep::Settled { falls, spawns }) => {
            assert!(falls.is_empty());
            assert_eq!(spawns.len(), 3);
        }
        other => panic!("expected a settle, got {other:?}"),
    }

    let rest: Vec<CascadeStep> = s.resolve().collect();
    assert!(matches!(rest.last(), Some(CascadeStep::TurnEnded { .. })));
    assert!(s.step().is_none());
    assert!(s.score() >= 50);
    assert_at_rest(&mut s);

    let events = s.drain_events();
    assert_eq!(events[0], GameEvent::Swapped);
    assert!(events.contains(&GameEvent::Matched { longest: 3, cascade: 0 }));
}

#[test]
fn test_stripe_in_match_fires_line_blast() {
    let mut board = Board::from_layout(&ONE_MOVE, &KINDS, Pcg32::seed_from_u64(3)).unwrap();
    board.set_cell(Pos::new(0, 1), Some(Cell::stripe_h(VeggieKind::Tomato)));
    let mut s = GameSession::with_board(level(10, 1_000_000), board);

    s.try_swap(Pos::new(0, 2), Pos::new(1, 2)).unwrap();
    let steps: Vec<CascadeStep> = s.resolve().collect();
    assert!(matches!(steps[0], CascadeStep::Matched { .. }));
    match &steps[1] {
        CascadeStep::LineBlast {
            origin,
            special,
            activation,
            points,
        } => {
            assert_eq!(*origin, Pos::new(0, 1));
            assert_eq!(*special, SpecialKind::StripeH);
            // Rest of the top row: b, t, c
            assert_eq!(activation.removed.len(), 3);
            assert_eq!(*points, 150);
        }
        other => panic!("expected a line blast, got {other:?}"),
    }
    assert!(s.score() >= 200);
    assert_at_rest(&mut s);
}

#[test]
fn test_rainbow_swap_clears_target_kind() {
    let mut layout = ONE_MOVE;
    layout[0] = "*tebtc";
    let mut level = level(10, 1_000_000);
    level.targets = vec![Target {
        veggie: VeggieKind::Tomato,
        count: 100,
    }];
    let mut s = session(&layout, level);

    // A rainbow swap is always accepted
    s.try_swap(Pos::new(0, 0), Pos::new(0, 1)).unwrap();
    assert_eq!(s.moves_left(), 9);

    match s.step() {
        Some(CascadeStep::RainbowBlast {
            origin,
            activation,
            points,
        }) => {
            // The rainbow moved to the tomato's old position
            assert_eq!(origin, Pos::new(0, 1));
            assert_eq!(activation.removed[0].cell, Cell::rainbow());
            // Rainbow plus nine tomatoes
            assert_eq!(activation.removed.len(), 10);
            assert_eq!(points, 500);
        }
        other => panic!("expected a rainbow blast, got {other:?}"),
    }
    assert_eq!(s.eliminated()[&VeggieKind::Tomato], 9);

    let rest: Vec<CascadeStep> = s.resolve().collect();
    assert!(matches!(rest.first(), Some(CascadeStep::Settled { .. })));
    assert!(s.eliminated()[&VeggieKind::Tomato] >= 9);
    assert_at_rest(&mut s);
}

#[test]
fn test_reaching_target_completes_level() {
    let mut s = session(&ONE_MOVE, level(10, 50));
    s.try_swap(Pos::new(0, 2), Pos::new(1, 2)).unwrap();
    let last = s.resolve().last();

    let stars = s.stars();
    assert!(stars >= 1);
    assert_eq!(s.phase(), GamePhase::Complete { stars });
    assert!(matches!(last, Some(CascadeStep::TurnEnded { phase: GamePhase::Complete { .. }, .. })));
    assert!(s.drain_events().contains(&GameEvent::LevelComplete { stars }));
    assert!(s.hint().is_none());
    assert_eq!(
        s.try_swap(Pos::new(0, 0), Pos::new(0, 1)),
        Err(SwapError::NotPlaying(GamePhase::Complete { stars }))
    );
}

#[test]
fn test_unmet_targets_block_completion() {
    let mut level = level(10, 50);
    level.targets = vec![Target {
        veggie: VeggieKind::Broccoli,
        count: 500,
    }];
    let mut s = session(&ONE_MOVE, level);
    s.try_swap(Pos::new(0, 2), Pos::new(1, 2)).unwrap();
    s.resolve().for_each(drop);
    assert!(!s.targets_met());
    assert_eq!(s.phase(), GamePhase::Playing);
    assert!(s.drain_events().contains(&GameEvent::StarEarned { stars: s.stars() }));
}

#[test]
fn test_last_move_fails_level() {
    let mut s = session(&ONE_MOVE, level(1, 1_000_000));
    s.try_swap(Pos::new(0, 2), Pos::new(1, 2)).unwrap();
    s.resolve().for_each(drop);

    assert_eq!(s.phase(), GamePhase::Failed);
    assert_eq!(s.moves_left(), 0);
    let events = s.drain_events();
    assert!(events.contains(&GameEvent::LevelFailed));
    assert!(events.contains(&GameEvent::LowMoves { moves_left: 0 }));

    s.retry();
    assert_eq!(s.phase(), GamePhase::Playing);
    assert_eq!(s.moves_left(), 1);
    assert_eq!(s.score(), 0);
    assert_at_rest(&mut s);
}

#[test]
fn test_low_moves_warns_once() {
    let mut s = GameSession::new(level(5, 1_000_000), 8);
    let mut warnings = 0;
    while s.phase() == GamePhase::Playing {
        let hint = s.hint().unwrap();
        s.try_swap(hint.from, hint.to).unwrap();
        s.resolve().for_each(drop);
        warnings += s
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LowMoves { .. }))
            .count();
    }
    assert_eq!(s.phase(), GamePhase::Failed);
    assert_eq!(warnings, 1);
}
