use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

/// Row-major grid stored in a single vector.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: u8,
    cols: u8,
}

impl<T> Vec2d<T> {
    /// Pads shorter rows with `pad` so that all rows have the same length.
    pub(crate) fn new(grid: Vec<Vec<T>>, pad: T) -> Self
    where
        T: Clone,
    {
        assert!(!grid.is_empty(), "Grid must have at least one row");
        assert!(grid.len() <= usize::from(u8::max_value()));

        let max_cols = grid.iter().map(Vec::len).max().unwrap_or(0).max(1);
        assert!(max_cols <= usize::from(u8::max_value()));

        let rows = grid.len();
        let mut data = Vec::with_capacity(rows * max_cols);
        for row in grid {
            let len = row.len();
            data.extend(row);
            for _ in len..max_cols {
                data.push(pad.clone());
            }
        }
        Vec2d {
            data,
            rows: rows as u8,
            cols: max_cols as u8,
        }
    }

    pub(crate) fn rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn cols(&self) -> u8 {
        self.cols
    }

    /// Number of cells
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn contains(&self, pos: Pos) -> bool {
        pos.r < self.rows && pos.c < self.cols
    }

    /// Index into the underlying vector, stable for the lifetime of the grid.
    pub(crate) fn flat_index(&self, pos: Pos) -> usize {
        usize::from(pos.r) * usize::from(self.cols) + usize::from(pos.c)
    }

    pub(crate) fn get(&self, pos: Pos) -> Option<&T> {
        if self.contains(pos) {
            Some(&self.data[self.flat_index(pos)])
        } else {
            None
        }
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let rows = self.rows;
        let cols = self.cols;
        (0..rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    pub(crate) fn scratchpad<U: Default + Clone>(&self) -> Vec2d<U> {
        self.scratchpad_with_default(U::default())
    }

    pub(crate) fn scratchpad_with_default<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl Display for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.into()) {
            for &cell in row {
                write!(f, "{}", if cell { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Debug> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.into()) {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        // unchecked indexing is only marginally faster (if at all) to justify unsafe
        &self.data[self.flat_index(index)]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = self.flat_index(index);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding() {
        let grid = Vec2d::new(vec![vec![true], vec![false, true, false]], true);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.to_string(), "111\n010\n");
    }

    #[test]
    fn indexing() {
        let mut grid = Vec2d::new(vec![vec![0; 4]; 3], 0);
        grid[Pos::new(2, 3)] = 7;
        assert_eq!(grid[Pos::new(2, 3)], 7);
        assert_eq!(grid.flat_index(Pos::new(2, 3)), 11);
        assert_eq!(grid.get(Pos::new(2, 3)), Some(&7));
        assert_eq!(grid.get(Pos::new(3, 0)), None);
        assert_eq!(grid.get(Pos::new(0, 4)), None);
    }

    #[test]
    fn iterating_positions() {
        let grid = Vec2d::new(vec![vec![0; 2]; 2], 0);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );

        let scratch: Vec2d<bool> = grid.scratchpad();
        assert_eq!(scratch.to_string(), "00\n00\n");
    }
}
