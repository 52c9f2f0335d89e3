use super::cell::Cell;
use super::direction::Direction;
use super::grid::Grid;
use crate::consts;
use std::collections::{HashSet, VecDeque};

/// The snake: its body, head first, plus the direction it last moved in and
/// the direction queued for its next move
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells of the snake, head first.  Never empty.
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake moved on the last tick
    pub(super) direction: Direction,

    /// The direction in which the snake will move on the next tick
    pub(super) pending_direction: Direction,
}

impl Snake {
    /// Create a snake occupying `body` (head first) and facing in
    /// `direction`.  Returns `None` if `body` is empty.
    #[cfg(test)]
    pub(crate) fn new<I: IntoIterator<Item = Cell>>(body: I, direction: Direction) -> Option<Snake> {
        let body = body.into_iter().collect::<VecDeque<_>>();
        (!body.is_empty()).then_some(Snake {
            body,
            direction,
            pending_direction: direction,
        })
    }

    /// Create the snake that every game starts with
    pub(crate) fn starting() -> Snake {
        Snake {
            body: VecDeque::from(consts::START_BODY),
            direction: consts::START_DIRECTION,
            pending_direction: consts::START_DIRECTION,
        }
    }

    pub(crate) fn head(&self) -> Cell {
        self.body[0]
    }

    /// Return the cells of the snake, head first
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Return the set of cells currently covered by the snake
    pub(crate) fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Queue a turn for the next tick.  A request for the exact opposite of
    /// the direction of the last move is ignored, so the head can never fold
    /// back onto the segment behind it.  Any other request replaces
    /// whatever was queued before.
    pub(crate) fn set_direction(&mut self, requested: Direction) {
        if !requested.is_opposite(self.direction) {
            self.pending_direction = requested;
        }
    }

    /// Determine whether the head moving to `candidate` would be fatal.
    /// `None` stands for a position that cannot even be represented, which
    /// only lies beyond the wall.
    ///
    /// The self check runs against the current body, tail included, even
    /// though the tail may be about to move away.
    pub(crate) fn collision(&self, candidate: Option<Cell>, grid: Grid) -> Option<Collision> {
        let Some(cell) = candidate else {
            return Some(Collision::Wall);
        };
        if !grid.contains(cell) || grid.is_wall(cell) {
            Some(Collision::Wall)
        } else if self.body.contains(&cell) {
            Some(Collision::SelfCollision)
        } else {
            None
        }
    }

    /// Move the snake forwards one cell.  If the new head lands on `food`,
    /// the tail is kept and the snake grows by one.  On a collision the
    /// body is left untouched.
    pub(crate) fn advance(&mut self, grid: Grid, food: Cell) -> Advance {
        self.direction = self.pending_direction;
        let candidate = self.head().step(self.direction);
        if let Some(collision) = self.collision(candidate, grid) {
            return Advance::Collided(collision);
        }
        let Some(new_head) = candidate else {
            return Advance::Collided(Collision::Wall);
        };
        self.body.push_front(new_head);
        if new_head == food {
            Advance::Ate
        } else {
            let _ = self.body.pop_back();
            Advance::Moved
        }
    }
}

/// What happened when the snake advanced
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Advance {
    /// Moved into an empty cell
    Moved,

    /// Moved onto the food and grew
    Ate,

    /// Could not move without hitting something
    Collided(Collision),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    SelfCollision,
}
