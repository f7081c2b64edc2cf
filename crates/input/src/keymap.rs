//! Key mapping from terminal events to simulated board inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Direction, EdgeEvent};

/// What a key press stands for on the simulated board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    /// Push the joystick
    Stick(Direction),
    /// Press a button (edge-triggered)
    Edge(EdgeEvent),
    /// Leave the simulator
    Quit,
}

/// Map keyboard input to a simulated board input.
pub fn map_key_event(key: KeyEvent) -> Option<HostInput> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(HostInput::Quit);
    }

    match key.code {
        // Joystick
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(HostInput::Stick(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(HostInput::Stick(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(HostInput::Stick(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(HostInput::Stick(Direction::Down))
        }

        // Buttons
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(HostInput::Edge(EdgeEvent::Confirm))
        }
        KeyCode::Char('m') | KeyCode::Char('M') => Some(HostInput::Edge(EdgeEvent::ToggleSound)),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(HostInput::Edge(EdgeEvent::ForceLoss)),

        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(HostInput::Quit),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_stick_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            Some(HostInput::Stick(Direction::Left))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Right)),
            Some(HostInput::Stick(Direction::Right))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Up)),
            Some(HostInput::Stick(Direction::Up))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('S'))),
            Some(HostInput::Stick(Direction::Down))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('h'))),
            Some(HostInput::Stick(Direction::Left))
        );
    }

    #[test]
    fn test_button_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(HostInput::Edge(EdgeEvent::Confirm))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(HostInput::Edge(EdgeEvent::Confirm))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('m'))),
            Some(HostInput::Edge(EdgeEvent::ToggleSound))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('F'))),
            Some(HostInput::Edge(EdgeEvent::ForceLoss))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('q'))), Some(HostInput::Quit));
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Esc)), Some(HostInput::Quit));
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(HostInput::Quit)
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }
}
