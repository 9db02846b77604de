// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conway's Game of Life on a wrapping grid, one generation per tick.

use cadence_sdk::{ComputeModule, ModuleError};

/// Generations between two population reports.
const REPORT_EVERY: u64 = 120;

/// A toroidal Life board.
#[derive(Debug, Clone)]
pub struct Life {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    scratch: Vec<bool>,
    generation: u64,
}

impl Life {
    /// Creates an empty board. Both sides must be at least 8 cells.
    pub fn new(width: usize, height: usize) -> Result<Self, ModuleError> {
        if width < 8 || height < 8 {
            return Err(format!("board {width}x{height} is too small, need at least 8x8").into());
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            scratch: vec![false; width * height],
            generation: 0,
        })
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the cell at `(x, y)` is alive. Coordinates wrap.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Brings the cell at `(x, y)` to life. Coordinates wrap.
    pub fn set_alive(&mut self, x: usize, y: usize) {
        let index = self.index(x, y);
        self.cells[index] = true;
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (y % self.height) * self.width + (x % self.width)
    }

    fn live_neighbours(&self, x: usize, y: usize) -> usize {
        let mut count = 0;
        for dy in [self.height - 1, 0, 1] {
            for dx in [self.width - 1, 0, 1] {
                if (dx, dy) != (0, 0) && self.is_alive(x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Computes the next generation.
    pub fn step(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let alive = self.is_alive(x, y);
                let next = matches!((alive, self.live_neighbours(x, y)), (true, 2) | (_, 3));
                let index = self.index(x, y);
                self.scratch[index] = next;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }
}

impl ComputeModule for Life {
    fn init(&mut self) -> Result<(), ModuleError> {
        // A glider in one corner and an R-pentomino in the middle.
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            self.set_alive(x, y);
        }
        let (cx, cy) = (self.width / 2, self.height / 2);
        for (x, y) in [(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)] {
            self.set_alive(cx + x, cy + y);
        }
        log::info!(
            "Life board {}x{} seeded with {} cells",
            self.width,
            self.height,
            self.population()
        );
        Ok(())
    }

    fn tick(&mut self) -> Result<(), ModuleError> {
        self.step();
        if self.generation() % REPORT_EVERY == 0 {
            log::info!(
                "Life generation {}: {} cells alive",
                self.generation(),
                self.population()
            );
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "life"
    }
}
