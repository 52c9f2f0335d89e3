use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys handled by the application rather than by the game itself
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Restart,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::Restart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit))]
    #[case(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE), Some(Command::Quit))]
    #[case(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE), Some(Command::Restart))]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE), None)]
    #[case(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL), None)]
    #[case(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), None)]
    fn test_from_key_event(#[case] ev: KeyEvent, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(ev), cmd);
    }
}
