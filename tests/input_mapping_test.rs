//! Terminal events through the input crate into a live session

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use tile_tally::controller::{Session, TimingConfig};
use tile_tally::input::{handle_key_event, map_mouse_event, BoardViewport, KeyContext};
use tile_tally::types::{GameConfig, GameStatus, SelectionMode};

fn context(session: &Session) -> KeyContext {
    let state = session.state();
    KeyContext {
        status: state.status(),
        config: GameConfig::default().with_board_side(4),
        volume: state.preferences().volume,
        theme: state.preferences().theme,
    }
}

fn press(session: &mut Session, code: KeyCode) {
    let ctx = context(session);
    if let Some(event) = handle_key_event(KeyEvent::from(code), &ctx) {
        session.handle_input(event);
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn keys_drive_the_menu() {
    let mut session = Session::with_seed(21, TimingConfig::default());
    press(&mut session, KeyCode::Enter);
    assert_eq!(session.state().status(), GameStatus::Playing);
    assert_eq!(session.state().board().side(), 4);

    press(&mut session, KeyCode::Char('p'));
    assert_eq!(session.state().status(), GameStatus::Paused);
    press(&mut session, KeyCode::Char('p'));
    assert_eq!(session.state().status(), GameStatus::Playing);

    press(&mut session, KeyCode::Char('v'));
    assert!(!session.state().preferences().show_value_indicator);

    press(&mut session, KeyCode::Esc);
    assert_eq!(session.state().status(), GameStatus::Ready);
}

#[test]
fn mouse_drag_selects_adjacent_tiles() {
    let mut session = Session::with_seed(21, TimingConfig::default());
    let config = GameConfig::default().with_board_side(4);
    assert_eq!(config.selection_mode, SelectionMode::Drag);
    press(&mut session, KeyCode::Enter);
    session.advance(450);

    // Board drawn at (2, 1), 3 columns by 1 row per tile
    let viewport = BoardViewport::new(2, 1, 3, 1, 4);
    let events = [
        mouse(MouseEventKind::Down(MouseButton::Left), 2, 1),
        mouse(MouseEventKind::Drag(MouseButton::Left), 5, 1),
        mouse(MouseEventKind::Drag(MouseButton::Left), 80, 40),
    ];
    for event in events {
        if let Some(input) = map_mouse_event(event, &viewport) {
            session.handle_input(input);
        }
    }

    let state = session.state();
    assert!(state.is_selecting());
    assert_eq!(state.selection().len(), 2);
    assert_eq!(state.pointer().map(|p| (p.x, p.y)), Some((80.0, 40.0)));

    let up = map_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 80, 40), &viewport);
    session.handle_input(up.unwrap());
    assert!(!session.state().is_selecting());
    assert!(session.state().selection().is_empty());
}
