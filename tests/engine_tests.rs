//! Engine tests - selection, swap rules, clearing and refill through the public API

use match3::core::Board;
use match3::engine::{
    EngineState, Game, GameConfig, IgnoreReason, RefillTick, RuleSet, SelectOutcome,
    SwapResolution, SwapToken,
};
use match3::types::{Coord, Cue, TileKind};

use TileKind::{Blue as B, Green as G, Orange as O, Purple as P, Red as R, Yellow as Y};

fn game(rows: Vec<Vec<TileKind>>, rules: RuleSet, moves: u32) -> Game {
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(Some).collect())
        .collect();
    let config = GameConfig {
        rules,
        moves,
        kinds: 6,
        ..GameConfig::default()
    };
    Game::from_board(Board::from_rows(rows).unwrap(), config, 11)
}

fn c(x: u8, y: u8) -> Coord {
    Coord::new(x, y)
}

#[test]
fn test_first_click_selects_and_second_deselects() {
    let mut g = game(vec![vec![R, G, B]], RuleSet::guarded(), 5);

    assert_eq!(g.select(c(1, 0)), SelectOutcome::Selected(c(1, 0)));
    assert_eq!(g.state(), EngineState::Selected(c(1, 0)));
    assert_eq!(g.select(c(1, 0)), SelectOutcome::Deselected(c(1, 0)));
    assert_eq!(g.state(), EngineState::Idle);
    assert_eq!(g.drain_cues(), vec![Cue::Select]);
}

#[test]
fn test_non_adjacent_click_moves_selection() {
    let mut g = game(vec![vec![R, G, B, Y]], RuleSet::guarded(), 5);
    g.select(c(0, 0));
    assert_eq!(
        g.select(c(2, 0)),
        SelectOutcome::Reselected {
            from: c(0, 0),
            to: c(2, 0)
        }
    );
    assert_eq!(g.selected(), Some(c(2, 0)));
    assert_eq!(g.moves_left(), 5);
}

#[test]
fn test_same_kind_swap_is_rejected() {
    let mut g = game(vec![vec![R, R, B]], RuleSet::unconditional(), 5);
    let before = g.board().clone();

    g.select(c(0, 0));
    assert_eq!(
        g.select(c(1, 0)),
        SelectOutcome::SameKindRejected {
            from: c(0, 0),
            to: c(1, 0)
        }
    );
    assert_eq!(g.board(), &before);
    assert_eq!(g.moves_left(), 5);
    assert_eq!(g.selected(), Some(c(1, 0)));
}

#[test]
fn test_clicks_ignored_in_order_of_precedence() {
    let mut g = game(vec![vec![R, G, B]], RuleSet::guarded(), 5);
    assert_eq!(
        g.select(c(7, 0)),
        SelectOutcome::Ignored(IgnoreReason::OutOfBounds)
    );

    let mut spent = game(vec![vec![R, G, B]], RuleSet::unconditional(), 1);
    spent.select(c(0, 0));
    spent.select(c(1, 0));
    assert_eq!(spent.moves_left(), 0);
    assert_eq!(
        spent.select(c(7, 0)),
        SelectOutcome::Ignored(IgnoreReason::OutOfMoves)
    );

    // Out of moves also wins over an empty cell
    let rows = vec![vec![Some(R), None, Some(B)]];
    let config = GameConfig {
        moves: 0,
        ..GameConfig::default()
    };
    let mut idle = Game::from_board(Board::from_rows(rows).unwrap(), config, 1);
    assert_eq!(
        idle.select(c(1, 0)),
        SelectOutcome::Ignored(IgnoreReason::OutOfMoves)
    );
    assert_eq!(
        idle.select(c(9, 0)),
        SelectOutcome::Ignored(IgnoreReason::OutOfMoves)
    );
}

#[test]
fn test_unconditional_swap_without_match_still_costs_a_move() {
    let mut g = game(vec![vec![R, G, B]], RuleSet::unconditional(), 5);
    g.select(c(0, 0));
    let SelectOutcome::Committed(report) = g.select(c(1, 0)) else {
        panic!("unconditional swaps commit immediately");
    };
    assert!(!report.matched());
    assert_eq!(g.board().value(c(0, 0)), Some(G));
    assert_eq!(g.board().value(c(1, 0)), Some(R));
    assert_eq!(g.moves_left(), 4);
    assert!(!g.is_shifting());
}

#[test]
fn test_unconditional_swap_clears_split_run() {
    // [R,R,G,R,R]: moving the G left joins the right-hand pair with the swapped R
    let mut g = game(vec![vec![R, R, G, R, R]], RuleSet::unconditional(), 5);
    g.select(c(2, 0));
    let SelectOutcome::Committed(report) = g.select(c(1, 0)) else {
        panic!("expected commit");
    };

    let mut cleared = report.cleared.clone();
    cleared.sort_by_key(|at| at.x);
    assert_eq!(cleared, vec![c(2, 0), c(3, 0), c(4, 0)]);
    assert_eq!(g.board().value(c(0, 0)), Some(R));
    assert_eq!(g.board().value(c(1, 0)), Some(G));
    assert!(g.is_shifting());

    let cues = g.drain_cues();
    assert_eq!(cues, vec![Cue::Select, Cue::Swap, Cue::Clear]);
}

#[test]
fn test_guarded_swap_reverts_without_match() {
    let mut g = game(
        vec![vec![R, G, B], vec![Y, O, P]],
        RuleSet::guarded(),
        5,
    );
    let before = g.board().clone();

    g.select(c(0, 0));
    let SelectOutcome::SwapPending(pending) = g.select(c(1, 0)) else {
        panic!("guarded swaps are provisional");
    };
    assert!(!pending.will_commit);
    assert_eq!(pending.wait_ms, 200);
    // Tiles are shown swapped while the swap is pending
    assert_eq!(g.board().value(c(0, 0)), Some(G));

    assert_eq!(
        g.select(c(2, 1)),
        SelectOutcome::Ignored(IgnoreReason::SwapInFlight)
    );

    assert_eq!(
        g.resolve_swap(pending.token),
        SwapResolution::Reverted {
            first: c(0, 0),
            second: c(1, 0)
        }
    );
    assert_eq!(g.board(), &before);
    assert_eq!(g.moves_left(), 5);
    assert_eq!(g.state(), EngineState::Idle);
}

#[test]
fn test_guarded_swap_commits_with_match() {
    let mut g = game(
        vec![vec![G, R, R, R], vec![R, B, Y, O]],
        RuleSet::guarded(),
        5,
    );

    g.select(c(0, 1));
    let SelectOutcome::SwapPending(pending) = g.select(c(0, 0)) else {
        panic!("expected pending swap");
    };
    assert!(pending.will_commit);

    let SwapResolution::Committed(report) = g.resolve_swap(pending.token) else {
        panic!("expected commit");
    };
    assert_eq!(report.cleared.len(), 4);
    assert_eq!(g.moves_left(), 4);
    assert!(g.is_shifting());

    // A second resolution of the same token is a no-op
    assert_eq!(g.resolve_swap(pending.token), SwapResolution::Stale);
}

#[test]
fn test_unknown_token_is_stale() {
    let mut g = game(vec![vec![R, G]], RuleSet::guarded(), 5);
    assert_eq!(g.resolve_swap(SwapToken::from_id(99)), SwapResolution::Stale);
}

#[test]
fn test_refill_fills_every_gap_and_restores_input() {
    let mut g = game(
        vec![vec![G, R, R, R], vec![R, B, Y, O], vec![B, Y, O, P]],
        RuleSet::guarded(),
        5,
    );
    g.select(c(0, 1));
    let SelectOutcome::SwapPending(pending) = g.select(c(0, 0)) else {
        panic!("expected pending swap");
    };
    g.resolve_swap(pending.token);
    assert!(g.is_shifting());
    assert_eq!(
        g.select(c(0, 2)),
        SelectOutcome::Ignored(IgnoreReason::Shifting)
    );

    let mut ticks = 0;
    loop {
        match g.advance_refill() {
            RefillTick::Settled => break,
            RefillTick::Idle => panic!("sweep stopped without settling"),
            _ => ticks += 1,
        }
        assert!(ticks < 100, "refill did not settle");
    }
    assert!(!g.is_shifting());
    assert_eq!(g.board().empty_count(), 0);
    assert!(matches!(g.select(c(0, 2)), SelectOutcome::Selected(_)));
}

#[test]
fn test_find_any_matches_has_no_side_effects() {
    let mut g = game(vec![vec![B, B, B, B]], RuleSet::guarded(), 5);
    let before = g.board().clone();
    assert!(g.find_any_matches(c(0, 0)));
    assert_eq!(g.board(), &before);
    assert!(!g.is_shifting());

    assert!(g.clear_all_matches(c(0, 0)));
    assert_eq!(g.board().empty_count(), 4);
    assert!(g.is_shifting());
    assert!(!g.clear_all_matches(c(0, 0)));
}

#[test]
fn test_same_seed_plays_the_same_game() {
    let a = Game::new(GameConfig::default(), 2024).unwrap();
    let b = Game::new(GameConfig::default(), 2024).unwrap();
    assert_eq!(a.board(), b.board());
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_empty_cell_click_keeps_selection() {
    let rows = vec![vec![Some(R), None, Some(B)]];
    let config = GameConfig {
        rules: RuleSet::guarded(),
        ..GameConfig::default()
    };
    let mut g = Game::from_board(Board::from_rows(rows).unwrap(), config, 1);

    g.select(c(0, 0));
    assert_eq!(
        g.select(c(1, 0)),
        SelectOutcome::Ignored(IgnoreReason::EmptyCell)
    );
    assert_eq!(g.selected(), Some(c(0, 0)));
}
