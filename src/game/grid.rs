use super::cell::Cell;
use crate::consts;
use rand::Rng;
use thiserror::Error;

/// The playable coordinate space.  The outermost ring of cells is a
/// permanent wall; everything inside it is the interior.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Smallest permitted width or height, leaving at least one interior
    /// cell
    pub(crate) const MIN_SIDE: u16 = 3;

    pub(crate) fn new(width: u16, height: u16) -> Result<Grid, GridError> {
        if width < Self::MIN_SIDE || height < Self::MIN_SIDE {
            Err(GridError::TooSmall { width, height })
        } else {
            Ok(Grid { width, height })
        }
    }

    /// Derive a grid from the dimensions of a canvas divided into square
    /// cells of `cell_size` units.  Partial cells at the right & bottom are
    /// dropped.
    pub(crate) fn from_canvas(
        canvas_width: u16,
        canvas_height: u16,
        cell_size: u16,
    ) -> Result<Grid, GridError> {
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        Grid::new(canvas_width / cell_size, canvas_height / cell_size)
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    /// Is `cell` within the grid at all (wall or interior)?
    pub(crate) fn contains(self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    /// Is `cell` on the wall ring?
    pub(crate) fn is_wall(self, cell: Cell) -> bool {
        cell.col == 0
            || cell.row == 0
            || cell.col == self.width - 1
            || cell.row == self.height - 1
    }

    /// Is `cell` strictly inside the wall ring?
    pub(crate) fn is_interior(self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_wall(cell)
    }

    /// Iterate over the cells of the wall ring, row by row
    pub(crate) fn walls(self) -> impl Iterator<Item = Cell> {
        self.cells().filter(move |&c| self.is_wall(c))
    }

    /// Iterate over the interior cells, row by row
    pub(crate) fn interior(self) -> impl Iterator<Item = Cell> {
        (1..self.height - 1)
            .flat_map(move |row| (1..self.width - 1).map(move |col| Cell::new(col, row)))
    }

    /// Draw an interior cell uniformly at random
    pub(crate) fn random_interior_cell<R: Rng>(self, rng: &mut R) -> Cell {
        let col = rng.random_range(1..=self.width - 2);
        let row = rng.random_range(1..=self.height - 2);
        Cell::new(col, row)
    }

    fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(col, row)))
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid {
            width: consts::CANVAS_WIDTH / consts::CELL_SIZE,
            height: consts::CANVAS_HEIGHT / consts::CELL_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("grid of {width}x{height} cells is too small; both sides must be at least 3")]
    TooSmall { width: u16, height: u16 },
    #[error("cell size must be nonzero")]
    ZeroCellSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[test]
    fn from_default_canvas() {
        let grid = Grid::from_canvas(600, 600, 20).unwrap();
        assert_eq!(grid.width(), 30);
        assert_eq!(grid.height(), 30);
    }

    #[test]
    fn default_matches_default_canvas() {
        assert_eq!(Grid::default(), Grid::from_canvas(600, 600, 20).unwrap());
    }

    #[test]
    fn from_canvas_drops_partial_cells() {
        let grid = Grid::from_canvas(610, 455, 20).unwrap();
        assert_eq!((grid.width(), grid.height()), (30, 22));
    }

    #[rstest]
    #[case(2, 10, Err(GridError::TooSmall { width: 2, height: 10 }))]
    #[case(10, 2, Err(GridError::TooSmall { width: 10, height: 2 }))]
    #[case(0, 0, Err(GridError::TooSmall { width: 0, height: 0 }))]
    #[case(3, 3, Ok(Grid { width: 3, height: 3 }))]
    fn test_new(#[case] width: u16, #[case] height: u16, #[case] r: Result<Grid, GridError>) {
        assert_eq!(Grid::new(width, height), r);
    }

    #[test]
    fn zero_cell_size() {
        assert_eq!(Grid::from_canvas(600, 600, 0), Err(GridError::ZeroCellSize));
    }

    #[rstest]
    #[case(Cell::new(0, 5), true)]
    #[case(Cell::new(29, 5), true)]
    #[case(Cell::new(5, 0), true)]
    #[case(Cell::new(5, 29), true)]
    #[case(Cell::new(1, 1), false)]
    #[case(Cell::new(28, 28), false)]
    #[case(Cell::new(15, 15), false)]
    fn test_is_wall(#[case] cell: Cell, #[case] wall: bool) {
        let grid = Grid::new(30, 30).unwrap();
        assert_eq!(grid.is_wall(cell), wall);
        assert_eq!(grid.is_interior(cell), !wall);
    }

    #[test]
    fn outside_is_not_interior() {
        let grid = Grid::new(30, 30).unwrap();
        assert!(!grid.contains(Cell::new(30, 5)));
        assert!(!grid.is_interior(Cell::new(30, 5)));
    }

    #[test]
    fn interior_and_walls_partition_grid() {
        let grid = Grid::new(5, 4).unwrap();
        let interior = grid.interior().collect::<Vec<_>>();
        assert_eq!(
            interior,
            [
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(3, 1),
                Cell::new(1, 2),
                Cell::new(2, 2),
                Cell::new(3, 2),
            ]
        );
        assert_eq!(grid.walls().count(), 5 * 4 - interior.len());
        assert!(grid.walls().all(|c| grid.is_wall(c)));
    }

    #[test]
    fn random_cells_are_interior() {
        let grid = Grid::new(4, 7).unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        for _ in 0..500 {
            let cell = grid.random_interior_cell(&mut rng);
            assert!(grid.is_interior(cell), "{cell} is not interior");
        }
    }
}
