//! Integration tests for the main game loop

use crossterm::event::{KeyCode, KeyEvent};

use tui_match3::core::{find_matches, GameConfig, Session, SessionSnapshot, SimpleRng};
use tui_match3::input::{handle_key_event, BoardCursor, CursorCommand};
use tui_match3::term::{BoardView, FrameBuffer, Viewport};
use tui_match3::types::{Coord, GameEvent, Outcome, TICK_MS};

const DT: f32 = TICK_MS as f32 / 1000.0;

fn press(session: &mut Session, cursor: &mut BoardCursor, code: KeyCode) {
    let Some(action) = handle_key_event(KeyEvent::from(code)) else {
        return;
    };
    match cursor.apply(action) {
        CursorCommand::Moved(_) => {}
        CursorCommand::Select(c) => {
            session.select(c).unwrap();
        }
        CursorCommand::Cancel => session.cancel_selection(),
        CursorCommand::Restart => session.start_level(),
    }
}

#[test]
fn test_game_lifecycle() {
    let mut session = Session::new(GameConfig::default(), SimpleRng::new(12345)).unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.target_score(), 800);
    assert_eq!(session.outcome(), None);
    assert!(session.grid().is_full());
    assert!(find_matches(session.grid(), 3).is_empty());
}

#[test]
fn test_keyboard_selection_requests_a_swap() {
    let mut session = Session::new(GameConfig::default(), SimpleRng::new(99)).unwrap();
    let mut cursor = BoardCursor::new(8, 8);

    press(&mut session, &mut cursor, KeyCode::Char(' '));
    assert_eq!(session.selected(), Some(Coord::new(3, 3)));

    press(&mut session, &mut cursor, KeyCode::Right);
    press(&mut session, &mut cursor, KeyCode::Enter);
    assert_eq!(session.selected(), None);
    assert!(session.is_busy());

    // Play the turn out frame by frame.
    for _ in 0..2000 {
        session.tick(DT);
        if !session.is_busy() {
            break;
        }
    }
    assert!(!session.is_busy());
    assert!(session.grid().is_full());
    assert!(find_matches(session.grid(), 3).is_empty());

    let events: Vec<_> = session.drain_events().collect();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TurnCompleted { .. })));
}

#[test]
fn test_escape_drops_selection() {
    let mut session = Session::new(GameConfig::default(), SimpleRng::new(5)).unwrap();
    let mut cursor = BoardCursor::new(8, 8);
    press(&mut session, &mut cursor, KeyCode::Char(' '));
    assert!(session.selected().is_some());
    press(&mut session, &mut cursor, KeyCode::Esc);
    assert_eq!(session.selected(), None);
}

#[test]
fn test_level_times_out_and_restarts() {
    let config = GameConfig {
        time_limit_secs: 1.0,
        ..GameConfig::default()
    };
    let mut session = Session::new(config, SimpleRng::new(8)).unwrap();
    let mut cursor = BoardCursor::new(8, 8);

    let mut frames = 0;
    while session.outcome().is_none() && frames < 1000 {
        session.tick(DT);
        frames += 1;
    }
    assert_eq!(session.outcome(), Some(Outcome::Lost));
    assert_eq!(session.time_left(), 0.0);
    let ended = session
        .drain_events()
        .filter(|e| *e == GameEvent::GameEnded { won: false })
        .count();
    assert_eq!(ended, 1);

    press(&mut session, &mut cursor, KeyCode::Char('r'));
    assert_eq!(session.outcome(), None);
    assert_eq!(session.time_left(), 1.0);
}

#[test]
fn test_render_loop_reuses_buffers() {
    let mut session = Session::new(GameConfig::default(), SimpleRng::new(3)).unwrap();
    let view = BoardView::default();
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    for _ in 0..30 {
        session.tick(DT);
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Some(Coord::new(0, 0)), Viewport::new(60, 20), &mut fb);
    }
    assert_eq!(snap.cells.iter().flatten().count(), 64);
    assert_eq!(fb.width(), 60);
    assert!(fb.row_text(7).contains("Time: 01:00"));
}

#[test]
fn test_config_file_drives_the_session() {
    let config = GameConfig::from_json_str(
        r#"{ "width": 5, "height": 6, "target_score": 50, "time_limit_secs": 30 }"#,
    )
    .unwrap();
    let session = Session::new(config, SimpleRng::new(1)).unwrap();
    assert_eq!(session.grid().width(), 5);
    assert_eq!(session.grid().height(), 6);
    assert_eq!(session.target_score(), 50);
    assert_eq!(session.time_left(), 30.0);
}
