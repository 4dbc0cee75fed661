use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Color, Pos};
use crate::vec2d::Vec2d;

/// Static part of a level: walls, dimensions and colors.
///
/// Created once when loading and shared read-only by every state of a search.
#[derive(Clone)]
pub struct Level {
    pub(crate) name: String,
    pub(crate) walls: Vec2d<bool>,
    pub(crate) agent_colors: [Option<Color>; 10],
    pub(crate) box_colors: [Option<Color>; 26],
}

impl Level {
    pub(crate) fn new(
        name: String,
        walls: Vec2d<bool>,
        agent_colors: [Option<Color>; 10],
        box_colors: [Option<Color>; 26],
    ) -> Self {
        Level {
            name,
            walls,
            agent_colors,
            box_colors,
        }
    }

    /// A level without colors - every agent can move every box.
    /// Mostly useful for building levels in code.
    pub fn uncolored(walls: Vec<Vec<bool>>) -> Self {
        Level::new(
            String::new(),
            Vec2d::new(walls, true),
            [Some(Color::Blue); 10],
            [Some(Color::Blue); 26],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> u8 {
        self.walls.rows()
    }

    pub fn cols(&self) -> u8 {
        self.walls.cols()
    }

    /// Cells outside the grid count as walls.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls.get(pos).cloned().unwrap_or(true)
    }

    pub fn agent_color(&self, agent: char) -> Option<Color> {
        agent
            .to_digit(10)
            .and_then(|i| self.agent_colors[i as usize])
    }

    pub fn box_color(&self, letter: char) -> Option<Color> {
        if letter.is_ascii_uppercase() {
            self.box_colors[(letter as u8 - b'A') as usize]
        } else {
            None
        }
    }

    /// Agents may only push and pull boxes of their own color.
    pub fn can_move_box(&self, agent: char, letter: char) -> bool {
        match (self.agent_color(agent), self.box_color(letter)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        self.walls.positions()
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.walls.len()
    }

    pub(crate) fn cell_index(&self, pos: Pos) -> usize {
        self.walls.flat_index(pos)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                let wall = self.walls[Pos::new(r, c)];
                write!(f, "{}", if wall { '+' } else { ' ' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_and_bounds() {
        let level = Level::uncolored(vec![vec![true, true, true], vec![true, false, true]]);
        assert_eq!(level.rows(), 2);
        assert_eq!(level.cols(), 3);
        assert!(level.is_wall(Pos::new(0, 0)));
        assert!(!level.is_wall(Pos::new(1, 1)));
        assert!(level.is_wall(Pos::new(2, 1)));
        assert!(level.is_wall(Pos::new(1, 3)));
        assert_eq!(level.to_string(), "+++\n+ +\n");
    }

    #[test]
    fn colors() {
        let mut agent_colors = [None; 10];
        let mut box_colors = [None; 26];
        agent_colors[0] = Some(Color::Red);
        agent_colors[1] = Some(Color::Blue);
        box_colors[0] = Some(Color::Red);
        let level = Level::new(
            "colors".to_string(),
            Vec2d::new(vec![vec![false]], true),
            agent_colors,
            box_colors,
        );

        assert!(level.can_move_box('0', 'A'));
        assert!(!level.can_move_box('1', 'A'));
        assert!(!level.can_move_box('0', 'B'));
        assert!(!level.can_move_box('2', 'A'));
        assert!(!level.can_move_box('0', 'a'));
    }
}
