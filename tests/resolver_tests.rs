//! Resolver tests - swap validation, cascades and refill

use std::collections::HashSet;

use tui_match3::core::{
    find_matches, GameConfig, Phase, Resolver, Scoreboard, SequenceSource, SimpleRng, SwapRejected,
};
use tui_match3::types::{Coord, GameEvent, TokenId, TokenTypeId};

/// Diagonal stripes with no runs, except row 2 which reads `B P R P P G B P`
/// and row 3 has a `P` at column 5. Swapping (5, 2) with (5, 3) completes
/// `P P P` in row 2, columns 3 to 5.
const SCENARIO: [&str; 8] = [
    "YGBPROYG", "ROYGBPRO", "BPROYGBP", "YGBPROYG", "ROYGBPRO", "BPRPPGBP", "YGBPROYG", "ROYGBPRO",
];

fn scenario(script: Vec<usize>) -> Resolver<SequenceSource> {
    Resolver::with_layout(&GameConfig::default(), SequenceSource::new(script), &SCENARIO).unwrap()
}

fn ids(r: &Resolver<impl tui_match3::core::RandomSource>) -> Vec<Option<(TokenId, TokenTypeId)>> {
    r.grid()
        .coords()
        .map(|c| r.grid().get(c).unwrap().map(|t| (t.id(), t.kind_id())))
        .collect()
}

#[test]
fn test_scenario_layout_has_no_starting_runs() {
    let r = scenario(vec![0]);
    assert!(find_matches(r.grid(), 3).is_empty());
}

#[test]
fn test_single_run_clears_three_and_scores_thirty() {
    let mut r = scenario(vec![0, 1, 2]);
    let mut sb = Scoreboard::new(800);

    r.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();
    let report = r.run_until_idle(&mut sb).cloned().unwrap();

    assert!(!report.reverted);
    assert_eq!(report.chains(), 1);
    assert_eq!(report.total_awarded(), 30);
    assert_eq!(sb.score(), 30);

    let cleared: Vec<_> = r
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::TokensCleared { coords, chain } => Some((coords, chain)),
            _ => None,
        })
        .collect();
    assert_eq!(
        cleared,
        vec![(
            vec![Coord::new(3, 2), Coord::new(4, 2), Coord::new(5, 2)],
            1
        )]
    );

    assert!(r.grid().is_full());
    assert!(r.grid().all_settled());
    assert!(find_matches(r.grid(), 3).is_empty());
    assert_eq!(r.phase(), Phase::Idle);
}

#[test]
fn test_columns_shift_down_and_refill_from_the_top() {
    let mut r = scenario(vec![0, 1, 2]);
    let mut sb = Scoreboard::new(800);
    r.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();
    r.run_until_idle(&mut sb);

    let rows: Vec<String> = r
        .grid()
        .kind_rows()
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|k| {
                    let id = k.unwrap();
                    r.palette().get(id).unwrap().display.glyph
                })
                .collect()
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            "YGBROYYG", "ROYPRORO", "BPRGBPBP", "YGBOYGYG", "ROYPRORO", "BPRGBGBP", "YGBPROYG",
            "ROYGBPRO",
        ]
    );
}

#[test]
fn test_cascade_pays_the_chain_multiplier() {
    // The second refill lines up Y Y Y along the top row.
    let mut r = scenario(vec![0, 2, 2]);
    let mut sb = Scoreboard::new(800);

    r.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();
    let report = r.run_until_idle(&mut sb).cloned().unwrap();

    assert_eq!(report.chains(), 2);
    assert_eq!(report.steps[0].awarded, 30);
    assert_eq!(report.steps[1].base_score, 30);
    assert_eq!(report.steps[1].awarded, 45);
    assert_eq!(
        report.steps[1].cleared().collect::<Vec<_>>(),
        vec![Coord::new(4, 7), Coord::new(5, 7), Coord::new(6, 7)]
    );
    assert_eq!(sb.score(), 75);
    assert!(find_matches(r.grid(), 3).is_empty());
}

#[test]
fn test_reaching_target_stops_the_cascade_but_refills() {
    let mut r = scenario(vec![0, 2, 2]);
    let mut sb = Scoreboard::new(30);

    r.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();
    let report = r.run_until_idle(&mut sb).cloned().unwrap();

    assert!(report.target_reached);
    assert_eq!(report.chains(), 1);
    assert_eq!(sb.score(), 30);
    assert!(r.grid().is_full());
    // The Y Y Y the refill made is left for the next level.
    assert!(!find_matches(r.grid(), 3).is_empty());
}

#[test]
fn test_unproductive_swap_is_undone_token_for_token() {
    let mut r = scenario(vec![0]);
    let before = ids(&r);
    let mut sb = Scoreboard::new(800);

    r.request_swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
    let report = r.run_until_idle(&mut sb).cloned().unwrap();

    assert!(report.reverted);
    assert_eq!(report.chains(), 0);
    assert_eq!(ids(&r), before);
    assert_eq!(sb.score(), 0);

    let events = r.take_events();
    assert!(events.contains(&GameEvent::SwapReverted {
        a: Coord::new(0, 0),
        b: Coord::new(1, 0)
    }));
    assert_eq!(events.last(), Some(&GameEvent::TurnCompleted { chains: 0 }));
}

#[test]
fn test_non_adjacent_and_out_of_bounds_swaps_change_nothing() {
    let mut r = scenario(vec![0]);
    let before = ids(&r);

    assert_eq!(
        r.request_swap(Coord::new(0, 0), Coord::new(1, 1)),
        Err(SwapRejected::NotAdjacent(Coord::new(0, 0), Coord::new(1, 1)))
    );
    assert_eq!(
        r.request_swap(Coord::new(0, 0), Coord::new(2, 0)),
        Err(SwapRejected::NotAdjacent(Coord::new(0, 0), Coord::new(2, 0)))
    );
    assert_eq!(
        r.request_swap(Coord::new(7, 0), Coord::new(8, 0)),
        Err(SwapRejected::OutOfBounds(Coord::new(8, 0)))
    );
    assert_eq!(
        r.request_swap(Coord::new(3, 3), Coord::new(3, 3)),
        Err(SwapRejected::NotAdjacent(Coord::new(3, 3), Coord::new(3, 3)))
    );

    assert_eq!(ids(&r), before);
    assert!(r.is_idle());
    assert!(r.take_events().is_empty());
}

#[test]
fn test_swap_waits_for_tokens_to_arrive() {
    let mut r = scenario(vec![0, 1, 2]);
    let mut sb = Scoreboard::new(800);
    r.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();

    // One tile at 12 tiles/s takes 1/12 s.
    r.tick(0.04, &mut sb);
    assert!(matches!(r.phase(), Phase::Validating { .. }));
    assert_eq!(sb.score(), 0);

    r.tick(0.05, &mut sb);
    assert!(matches!(r.phase(), Phase::Resolving { chain: 1, .. }));
    assert_eq!(sb.score(), 30);
}

#[test]
fn test_small_tiles_still_animate_the_swap() {
    // One tile apart is 0.01 world units here.
    let config = GameConfig {
        tile_size: 0.01,
        fall_speed: 0.12,
        ..GameConfig::default()
    };
    let mut r = Resolver::with_layout(&config, SequenceSource::new(vec![0, 1, 2]), &SCENARIO).unwrap();
    let mut sb = Scoreboard::new(800);

    r.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();
    r.tick(0.0, &mut sb);
    assert!(matches!(r.phase(), Phase::Validating { .. }));
    assert!(!r.grid().all_settled());

    r.tick(0.05, &mut sb);
    assert!(matches!(r.phase(), Phase::Validating { .. }));

    let report = r.run_until_idle(&mut sb).cloned().unwrap();
    assert_eq!(report.total_awarded(), 30);
    assert!(r.grid().all_settled());
}

#[test]
fn test_chain_limit_ends_an_endless_cascade() {
    let cfg = GameConfig {
        width: 3,
        height: 3,
        max_chain: 4,
        palette: vec![tui_match3::types::default_gem_types()[0]],
        ..GameConfig::default()
    };
    let mut r = Resolver::with_layout(&cfg, SimpleRng::new(5), &["RRR", "RRR", "RRR"]).unwrap();
    let mut sb = Scoreboard::new(u32::MAX);

    r.request_swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
    let report = r.run_until_idle(&mut sb).cloned().unwrap();

    assert!(report.capped);
    assert_eq!(report.chains(), 4);
    assert!(r.is_idle());
    assert!(r.grid().is_full());
}

#[test]
fn test_random_play_keeps_board_full_stable_and_ids_unique() {
    for seed in 1..6 {
        let mut r = Resolver::new(&GameConfig::default(), SimpleRng::new(seed)).unwrap();
        let mut sb = Scoreboard::new(u32::MAX);
        let mut pick = SimpleRng::new(seed.wrapping_mul(7919));

        for _ in 0..25 {
            let a = Coord::new(pick.next_range(8) as i32, pick.next_range(7) as i32);
            let b = if pick.next_range(2) == 0 {
                Coord::new(a.x, a.y + 1)
            } else if a.x < 7 {
                Coord::new(a.x + 1, a.y)
            } else {
                Coord::new(a.x - 1, a.y)
            };
            r.request_swap(a, b).unwrap();
            let report = r.run_until_idle(&mut sb).cloned().unwrap();
            assert!(!report.capped);

            assert!(r.grid().is_full());
            assert!(r.grid().all_settled());
            assert!(find_matches(r.grid(), 3).is_empty(), "seed {}", seed);
            let unique: HashSet<TokenId> = r.grid().tokens().map(|(_, t)| t.id()).collect();
            assert_eq!(unique.len(), 64);
        }
    }
}
