use super::direction::Direction;
use ratatui::layout::Position;
use std::fmt;

/// A single grid coordinate.
///
/// A `Cell` is a plain value: moving produces a new `Cell` rather than
/// changing an existing one.  No validation is done on construction, so a
/// `Cell` may lie outside of (or on the border of) any particular grid.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) col: u16,
    pub(crate) row: u16,
}

impl Cell {
    pub(crate) const fn new(col: u16, row: u16) -> Cell {
        Cell { col, row }
    }

    /// Return the cell one step away from `self` in `direction`, or `None`
    /// if that would take a coordinate out of the representable range
    pub(crate) fn step(self, direction: Direction) -> Option<Cell> {
        let Cell { mut col, mut row } = self;
        match direction {
            Direction::Up => row = row.checked_sub(1)?,
            Direction::Down => row = row.checked_add(1)?,
            Direction::Left => col = col.checked_sub(1)?,
            Direction::Right => col = col.checked_add(1)?,
        }
        Some(Cell { col, row })
    }
}

impl From<Cell> for Position {
    fn from(cell: Cell) -> Position {
        Position::new(cell.col, cell.row)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Cell::new(7, 5), Direction::Up, Some(Cell::new(7, 4)))]
    #[case(Cell::new(7, 5), Direction::Down, Some(Cell::new(7, 6)))]
    #[case(Cell::new(7, 5), Direction::Left, Some(Cell::new(6, 5)))]
    #[case(Cell::new(7, 5), Direction::Right, Some(Cell::new(8, 5)))]
    #[case(Cell::new(7, 0), Direction::Up, None)]
    #[case(Cell::new(0, 5), Direction::Left, None)]
    #[case(Cell::new(u16::MAX, 5), Direction::Right, None)]
    fn test_step(#[case] cell: Cell, #[case] d: Direction, #[case] r: Option<Cell>) {
        assert_eq!(cell.step(d), r);
    }

    #[test]
    fn step_leaves_original_alone() {
        let cell = Cell::new(3, 3);
        let moved = cell.step(Direction::Right);
        assert_eq!(cell, Cell::new(3, 3));
        assert_ne!(moved, Some(cell));
    }

    #[test]
    fn equality_is_by_coordinates() {
        assert_eq!(Cell::new(10, 10), Cell::new(10, 10));
        assert_ne!(Cell::new(10, 10), Cell::new(10, 11));
        assert_ne!(Cell::new(10, 10), Cell::new(11, 10));
    }

    #[test]
    fn display() {
        assert_eq!(Cell::new(8, 5).to_string(), "(8, 5)");
    }
}
