//! Key and mouse mapping from terminal events to board actions.

use crate::types::{BoardAction, Coord, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to board actions.
pub fn handle_key_event(key: KeyEvent) -> Option<BoardAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(BoardAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(BoardAction::MoveCursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(BoardAction::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(BoardAction::MoveCursor(Direction::Down))
        }

        // Select
        KeyCode::Char(' ') | KeyCode::Enter => Some(BoardAction::ActivateCursor),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(BoardAction::Restart),

        _ => None,
    }
}

/// Map a mouse event to an activation.
///
/// Only left-button presses count. `locate` turns a terminal position
/// (column, row) into a board coordinate, or `None` outside the board.
pub fn handle_mouse_event(
    mouse: MouseEvent,
    locate: impl Fn(u16, u16) -> Option<Coord>,
) -> Option<BoardAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            locate(mouse.column, mouse.row).map(BoardAction::Activate)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn click(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(BoardAction::MoveCursor(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('L'))),
            Some(BoardAction::MoveCursor(Direction::Right))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('w'))),
            Some(BoardAction::MoveCursor(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('j'))),
            Some(BoardAction::MoveCursor(Direction::Down))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(BoardAction::ActivateCursor)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(BoardAction::ActivateCursor)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(BoardAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_left_click_activates_located_cell() {
        let locate = |x: u16, y: u16| (x < 10 && y < 6).then(|| Coord::new(y as usize, (x / 2) as usize));

        assert_eq!(
            handle_mouse_event(click(MouseEventKind::Down(MouseButton::Left), 5, 3), locate),
            Some(BoardAction::Activate(Coord::new(3, 2)))
        );
        assert_eq!(
            handle_mouse_event(click(MouseEventKind::Down(MouseButton::Left), 40, 3), locate),
            None
        );
        assert_eq!(
            handle_mouse_event(click(MouseEventKind::Down(MouseButton::Right), 5, 3), locate),
            None
        );
        assert_eq!(
            handle_mouse_event(click(MouseEventKind::Moved, 5, 3), locate),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
