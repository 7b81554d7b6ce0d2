use super::grid::{Cell, Grid};
use crate::consts;
use rand::Rng;
use std::collections::VecDeque;

/// Chooses where the next piece of food goes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpawner {
    grid: Grid,
    max_attempts: usize,
}

impl FoodSpawner {
    pub(crate) fn new(grid: Grid) -> FoodSpawner {
        FoodSpawner {
            grid,
            max_attempts: consts::MAX_SPAWN_ATTEMPTS,
        }
    }

    /// Draw random cells until one is found that is not in `excluding`.  If
    /// none is found within the attempt limit, the last cell drawn is used
    /// anyway.
    pub(crate) fn spawn<R: Rng>(&self, rng: &mut R, excluding: &VecDeque<Cell>) -> Cell {
        let mut cell = self.grid.random_cell(rng);
        for _ in 1..self.max_attempts {
            if !excluding.contains(&cell) {
                return cell;
            }
            cell = self.grid.random_cell(rng);
        }
        if excluding.contains(&cell) {
            tracing::warn!(
                attempts = self.max_attempts,
                %cell,
                "no free cell found for food; placing it under the snake"
            );
        }
        cell
    }
}
