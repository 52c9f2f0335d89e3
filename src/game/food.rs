use super::cell::Cell;
use super::grid::Grid;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;
use thiserror::Error;

/// The single piece of food on the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    position: Cell,
}

impl Food {
    pub(crate) fn new(position: Cell) -> Food {
        Food { position }
    }

    pub(crate) fn position(&self) -> Cell {
        self.position
    }

    /// Move the food to a random interior cell not in `occupied`.
    ///
    /// Candidates are drawn uniformly from the interior until one is free.
    /// After [`MAX_RANDOM_DRAWS`][consts::MAX_RANDOM_DRAWS] misses the food
    /// is instead placed uniformly among the free interior cells, so that a
    /// crowded grid still terminates.  If there are no free cells at all,
    /// the position is left unchanged and `NoFreeCell` is returned.
    pub(crate) fn relocate<R: Rng>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Cell>,
    ) -> Result<(), NoFreeCell> {
        for _ in 0..consts::MAX_RANDOM_DRAWS {
            let candidate = grid.random_interior_cell(rng);
            if !occupied.contains(&candidate) {
                self.position = candidate;
                return Ok(());
            }
        }
        log::warn!(
            "No free cell found after {} random draws; choosing among free cells",
            consts::MAX_RANDOM_DRAWS
        );
        let position = grid
            .interior()
            .filter(|c| !occupied.contains(c))
            .choose(rng)
            .ok_or(NoFreeCell)?;
        self.position = position;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no free interior cell left to place food in")]
pub(crate) struct NoFreeCell;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn relocated_food_is_interior_and_free() {
        let grid = Grid::new(30, 30).unwrap();
        let occupied = HashSet::from_iter((1..=28).map(|col| Cell::new(col, 14)));
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut food = Food::new(consts::START_FOOD);
        for _ in 0..1000 {
            food.relocate(&mut rng, grid, &occupied).unwrap();
            let pos = food.position();
            assert!((1..=28).contains(&pos.col), "column out of range: {pos}");
            assert!((1..=28).contains(&pos.row), "row out of range: {pos}");
            assert!(!occupied.contains(&pos), "food placed on snake at {pos}");
        }
    }

    #[test]
    fn single_free_cell_is_found() {
        let grid = Grid::new(6, 6).unwrap();
        let free = Cell::new(3, 2);
        let occupied = grid.interior().filter(|&c| c != free).collect::<HashSet<_>>();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut food = Food::new(Cell::new(1, 1));
        food.relocate(&mut rng, grid, &occupied).unwrap();
        assert_eq!(food.position(), free);
    }

    #[test]
    fn full_interior() {
        let grid = Grid::new(4, 4).unwrap();
        let occupied = grid.interior().collect::<HashSet<_>>();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut food = Food::new(Cell::new(1, 1));
        assert_eq!(food.relocate(&mut rng, grid, &occupied), Err(NoFreeCell));
        assert_eq!(food.position(), Cell::new(1, 1));
    }

    #[test]
    fn same_seed_same_position() {
        let grid = Grid::new(30, 30).unwrap();
        let occupied = HashSet::new();
        let mut food1 = Food::new(consts::START_FOOD);
        let mut food2 = Food::new(consts::START_FOOD);
        food1
            .relocate(&mut ChaCha12Rng::seed_from_u64(RNG_SEED), grid, &occupied)
            .unwrap();
        food2
            .relocate(&mut ChaCha12Rng::seed_from_u64(RNG_SEED), grid, &occupied)
            .unwrap();
        assert_eq!(food1, food2);
    }
}
