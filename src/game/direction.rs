use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Map an input key to a direction.  Only the four arrow keys are
    /// recognized.
    pub(crate) fn from_key_code(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Down => Some(Direction::Down),
            _ => None,
        }
    }
}
