//! Board ownership, score and paint count.
//!
//! Cells are stored row-major in a flat vector (`row * size + col`). Every
//! ownership change goes through [`BoardState::paint`], which updates the
//! score and the paint count in the same step.

use serde::{Serialize, Deserialize};

use crate::game::types::{Cell, Player, Position, Score};

/// Side length of a bomb block.
pub const BOMB_BLOCK: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    size: usize,
    cells: Vec<Cell>,
    score: Score,
    painted: usize,
}

impl BoardState {
    pub fn new(size: usize) -> Self {
        BoardState {
            size,
            cells: vec![Cell::Neutral; size * size],
            score: Score::default(),
            painted: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Number of non-neutral cells.
    pub fn painted(&self) -> usize {
        self.painted
    }

    pub fn total(&self) -> usize {
        self.cells.len()
    }

    pub fn neutral_count(&self) -> usize {
        self.total() - self.painted
    }

    pub fn is_full(&self) -> bool {
        self.painted >= self.total()
    }

    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    pub fn position_of(&self, index: usize) -> Option<Position> {
        if index < self.total() {
            Some(Position { row: index / self.size, col: index % self.size })
        } else {
            None
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.index_of(row, col).map(|idx| self.cells[idx])
    }

    /// Give the cell at `index` to `player`.
    /// Returns true if anything changed; repainting an own cell or an
    /// out-of-range index is a no-op.
    pub fn paint(&mut self, index: usize, player: Player) -> bool {
        let Some(before) = self.cells.get(index).copied() else {
            return false;
        };

        match before {
            Cell::Owned(owner) if owner == player => return false,
            Cell::Owned(owner) => {
                let former = self.score.get_mut(owner);
                *former = former.saturating_sub(1);
            }
            Cell::Neutral => self.painted += 1,
        }
        *self.score.get_mut(player) += 1;
        self.cells[index] = Cell::Owned(player);
        true
    }

    /// Paint the 2x2 block whose top-left corner is (row, col), skipping
    /// cells that fall off the board. Returns the number of cells changed;
    /// an anchor outside the board paints nothing.
    pub fn paint_block(&mut self, row: usize, col: usize, player: Player) -> usize {
        if self.index_of(row, col).is_none() {
            return 0;
        }
        let mut changed = 0;
        for r in row..row + BOMB_BLOCK {
            for c in col..col + BOMB_BLOCK {
                if let Some(idx) = self.index_of(r, c) {
                    if self.paint(idx, player) {
                        changed += 1;
                    }
                }
            }
        }
        changed
    }

    /// Reallocate to `size * size` neutral cells and zero the counters.
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.cells = vec![Cell::Neutral; size * size];
        self.score = Score::default();
        self.painted = 0;
    }
}
