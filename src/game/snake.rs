use super::direction::Direction;
use super::grid::{Cell, Grid};
use crate::consts;
use std::collections::VecDeque;

/// Snake state.  Snate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells of the snake, head first.  Never empty.
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake moved on the last tick
    pub(super) direction: Direction,

    /// The direction in which the snake will move on the next tick
    pub(super) next_direction: Direction,
}

impl Snake {
    /// Create a snake occupying `body` (head first) and facing `direction`.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub(crate) fn new<I: IntoIterator<Item = Cell>>(body: I, direction: Direction) -> Snake {
        let body = VecDeque::from_iter(body);
        assert!(!body.is_empty(), "snake body must not be empty");
        Snake {
            body,
            direction,
            next_direction: direction,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Cell {
        self.body[0]
    }

    /// Return the cells of the snake, head first
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Request that the snake turn to face `direction` on the next tick.
    /// Requests to reverse the committed direction are ignored.
    pub(crate) fn propose_direction(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.next_direction = direction;
        }
    }

    /// Move the snake one cell forwards, growing it if the new head lands on
    /// `food`.
    pub(crate) fn advance(&mut self, food: Option<Cell>, grid: &Grid) -> MoveOutcome {
        self.direction = self.next_direction;
        let head = self.direction.advance(self.head(), grid.cell_size());
        self.body.push_front(head);
        let ate = food == Some(head);
        if !ate {
            let _ = self.body.pop_back();
        }
        let collision = if !grid.is_in_bounds(head) {
            Some(Collision::Boundary)
        } else if self.body.iter().skip(1).any(|&c| c == head) {
            Some(Collision::SelfHit)
        } else {
            None
        };
        match (collision, ate) {
            (Some(collision), ate) => MoveOutcome::Collided { collision, ate },
            (None, true) => MoveOutcome::Ate,
            (None, false) => MoveOutcome::Moved,
        }
    }
}

impl Default for Snake {
    fn default() -> Snake {
        Snake::new(consts::INITIAL_BODY, consts::INITIAL_DIRECTION)
    }
}

/// The result of moving the snake forwards one tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MoveOutcome {
    Moved,
    Ate,
    /// The move ended the run.  `ate` is true if the snake's new head was
    /// also on the food.
    Collided { collision: Collision, ate: bool },
}

impl MoveOutcome {
    pub(crate) fn ate(self) -> bool {
        matches!(
            self,
            MoveOutcome::Ate | MoveOutcome::Collided { ate: true, .. }
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head left the playfield
    Boundary,
    /// The head ran into the rest of the body
    SelfHit,
}
