//! Estimates of the remaining cost used to order best-first frontiers.
//!
//! Every heuristic gets one `preprocess` call with the static level before it's queried.
//! Querying a heuristic that needs preprocessing without it is a setup bug
//! and returns `SearchErr::PreprocessingUnavailable`.

mod advanced;
mod goal_count;
mod matching;

use std::fmt::Debug;

use log::debug;

use crate::data::Pos;
use crate::goal::GoalDescription;
use crate::level::Level;
use crate::solver::SearchErr;
use crate::state::State;

pub use self::advanced::Advanced;
pub use self::goal_count::GoalCount;
pub use self::matching::Matching;

pub trait Heuristic: Debug {
    /// Called once before the search, builds lookup tables from the static level.
    fn preprocess(&mut self, level: &Level) -> Result<(), SearchErr>;

    /// Lower is better. Must only depend on the arguments (and preprocessed tables).
    fn h(&self, state: &State<'_>, goal: &GoalDescription) -> Result<u32, SearchErr>;

    fn name(&self) -> &'static str;
}

impl<H: Heuristic + ?Sized> Heuristic for Box<H> {
    fn preprocess(&mut self, level: &Level) -> Result<(), SearchErr> {
        (**self).preprocess(level)
    }

    fn h(&self, state: &State<'_>, goal: &GoalDescription) -> Result<u32, SearchErr> {
        (**self).h(state, goal)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Largest level (in cells, walls included) a `DistanceTable` is built for.
///
/// 4096 cells (e.g. 64x64) is a 32 MiB table.
pub const MAX_TABLE_CELLS: usize = 4096;

/// Distances between every pair of cells.
///
/// Uses Manhattan distance which ignores walls and other entities
/// so it never overestimates the walking distance.
/// Size is (rows * cols)^2 - fine for hospital levels (50x50 -> ~12 MiB),
/// way too much for the largest grids `Pos` can represent.
#[derive(Clone)]
pub(crate) struct DistanceTable {
    rows: u8,
    cols: u8,
    cells: usize,
    dists: Vec<u16>,
}

impl DistanceTable {
    #[inline(never)] // this is called only once and this way it's easier to see in callgrind
    pub(crate) fn manhattan(level: &Level) -> Result<Self, SearchErr> {
        let cells = level.cell_count();
        if cells > MAX_TABLE_CELLS {
            return Err(SearchErr::LevelTooLarge(cells));
        }
        let mut dists = vec![0; cells * cells];
        for from in level.positions() {
            let row_start = level.cell_index(from) * cells;
            for to in level.positions() {
                dists[row_start + level.cell_index(to)] = from.dist(to);
            }
        }
        debug!(
            "Distance table for {}x{} level: {} entries",
            level.rows(),
            level.cols(),
            dists.len()
        );
        Ok(DistanceTable {
            rows: level.rows(),
            cols: level.cols(),
            cells,
            dists,
        })
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.r < self.rows && pos.c < self.cols {
            Some(usize::from(pos.r) * usize::from(self.cols) + usize::from(pos.c))
        } else {
            None
        }
    }

    /// Positions outside the level are computed directly.
    pub(crate) fn get(&self, from: Pos, to: Pos) -> u16 {
        match (self.index(from), self.index(to)) {
            (Some(a), Some(b)) => self.dists[a * self.cells + b],
            _ => from.dist(to),
        }
    }
}

impl Debug for DistanceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DistanceTable {{ rows: {}, cols: {}, entries: {} }}",
            self.rows,
            self.cols,
            self.dists.len()
        )
    }
}
