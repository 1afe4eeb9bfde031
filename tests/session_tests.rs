//! Session tests - timer, win/lose precedence and selection

use tui_match3::core::{GameConfig, Resolver, Selection, SequenceSource, Session, SimpleRng};
use tui_match3::types::{Coord, GameEvent, Outcome};

const SCENARIO: [&str; 8] = [
    "YGBPROYG", "ROYGBPRO", "BPROYGBP", "YGBPROYG", "ROYGBPRO", "BPRPPGBP", "YGBPROYG", "ROYGBPRO",
];

fn session(target: u32, time: f32, script: Vec<usize>) -> Session<SequenceSource> {
    let config = GameConfig {
        target_score: target,
        time_limit_secs: time,
        ..GameConfig::default()
    };
    let resolver = Resolver::with_layout(&config, SequenceSource::new(script), &SCENARIO).unwrap();
    Session::with_resolver(config, resolver)
}

fn ended_count(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
        .count()
}

#[test]
fn test_reaching_target_wins_immediately() {
    let mut s = session(30, 60.0, vec![0, 2, 2]);
    s.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();

    // Swap lands and the first chain step is scored in this tick.
    s.tick(0.1);
    assert_eq!(s.score(), 30);
    assert_eq!(s.outcome(), Some(Outcome::Won));
    // The board is still collapsing.
    assert!(s.is_busy());

    let events: Vec<_> = s.drain_events().collect();
    assert_eq!(ended_count(&events), 1);
    assert!(events.contains(&GameEvent::GameEnded { won: true }));

    // The timer is frozen once the level is decided.
    let left = s.time_left();
    for _ in 0..10 {
        s.tick(0.1);
    }
    assert_eq!(s.time_left(), left);
    assert!(!s.is_busy());
    assert_eq!(s.outcome(), Some(Outcome::Won));
    assert_eq!(ended_count(&s.drain_events().collect::<Vec<_>>()), 0);
}

#[test]
fn test_timeout_waits_for_the_board_to_settle() {
    let mut s = session(1000, 0.05, vec![0, 1, 2]);
    s.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();

    s.tick(1.0);
    assert_eq!(s.time_left(), 0.0);
    assert_eq!(s.outcome(), None, "cascade still in flight");

    for _ in 0..5 {
        s.tick(1.0);
    }
    assert_eq!(s.score(), 30);
    assert_eq!(s.outcome(), Some(Outcome::Lost));
}

#[test]
fn test_timeout_with_target_met_is_a_win() {
    let mut s = session(0, 0.5, vec![0]);
    s.tick(1.0);
    assert_eq!(s.outcome(), Some(Outcome::Won));
}

#[test]
fn test_timer_counts_down_and_reports() {
    let mut s = session(1000, 2.0, vec![0]);
    s.drain_events().for_each(drop);

    s.tick(0.5);
    assert_eq!(
        s.drain_events().collect::<Vec<_>>(),
        vec![GameEvent::TimeChanged {
            seconds_remaining: 1.5
        }]
    );
    s.tick(5.0);
    assert_eq!(s.time_left(), 0.0);
    assert_eq!(s.outcome(), Some(Outcome::Lost));
}

#[test]
fn test_end_game_is_decided_once() {
    let mut s = session(1000, 10.0, vec![0]);
    s.end_game(true);
    s.end_game(false);
    s.tick(20.0);
    assert_eq!(s.outcome(), Some(Outcome::Won));
    assert_eq!(ended_count(&s.drain_events().collect::<Vec<_>>()), 1);
}

#[test]
fn test_start_level_resets_everything() {
    let mut s = Session::new(GameConfig::default(), SimpleRng::new(4)).unwrap();
    s.select(Coord::new(0, 0)).unwrap();
    s.tick(3.0);
    s.end_game(false);

    let level = s.level_id();
    s.start_level();
    assert_eq!(s.level_id(), level + 1);
    assert_eq!(s.score(), 0);
    assert_eq!(s.time_left(), 60.0);
    assert_eq!(s.outcome(), None);
    assert_eq!(s.selected(), None);
    assert!(s.grid().is_full());
    assert_eq!(
        s.drain_events().collect::<Vec<_>>(),
        vec![
            GameEvent::ScoreChanged { score: 0 },
            GameEvent::TimeChanged {
                seconds_remaining: 60.0
            },
        ]
    );
}

#[test]
fn test_two_adjacent_selections_play_a_turn() {
    let mut s = session(1000, 60.0, vec![0, 1, 2]);
    let a = Coord::new(5, 3);
    let b = Coord::new(5, 2);

    assert_eq!(s.select(a), Ok(Selection::Selected(a)));
    assert_eq!(s.select(b), Ok(Selection::SwapRequested(a, b)));
    assert_eq!(s.selected(), None);

    s.settle();
    assert_eq!(s.score(), 30);
    assert!(!s.is_busy());
    assert_eq!(s.outcome(), None);
}

#[test]
fn test_settle_applies_the_win_rule() {
    let mut s = session(30, 60.0, vec![0, 1, 2]);
    s.request_swap(Coord::new(5, 2), Coord::new(5, 3)).unwrap();
    s.settle();
    assert_eq!(s.outcome(), Some(Outcome::Won));
    assert_eq!(s.time_left(), 60.0);
}
