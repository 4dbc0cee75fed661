use std::fmt::{self, Debug, Display, Formatter};

/// Levels larger than this in either dimension are rejected by the parser.
pub(crate) const MAX_SIZE: usize = 255;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u16 {
        let dr = (i16::from(self.r) - i16::from(other.r)).abs();
        let dc = (i16::from(self.c) - i16::from(other.c)).abs();
        (dr + dc) as u16
    }

    /// Neighbor in the given direction, `None` if it would leave the representable area.
    ///
    /// Whether the neighbor is inside the level is up to the level.
    pub fn step(self, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.offset();
        let r = i16::from(self.r) + dr;
        let c = i16::from(self.c) + dc;
        if r < 0 || c < 0 || r > MAX_SIZE as i16 || c > MAX_SIZE as i16 {
            None
        } else {
            Some(Pos::new(r as u8, c as u8))
        }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

impl Debug for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dir {
    N,
    E,
    S,
    W,
}

pub const DIRECTIONS: [Dir; 4] = [Dir::N, Dir::E, Dir::S, Dir::W];

impl Dir {
    fn offset(self) -> (i16, i16) {
        match self {
            Dir::N => (-1, 0),
            Dir::E => (0, 1),
            Dir::S => (1, 0),
            Dir::W => (0, -1),
        }
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::N => Dir::S,
            Dir::E => Dir::W,
            Dir::S => Dir::N,
            Dir::W => Dir::E,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = match *self {
            Dir::N => 'N',
            Dir::E => 'E',
            Dir::S => 'S',
            Dir::W => 'W',
        };
        write!(f, "{}", c)
    }
}

impl Debug for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Red,
    Cyan,
    Purple,
    Green,
    Orange,
    Pink,
    Grey,
    Lightblue,
    Brown,
}

impl Color {
    pub(crate) fn from_name(name: &str) -> Option<Color> {
        let color = match name.to_lowercase().as_str() {
            "blue" => Color::Blue,
            "red" => Color::Red,
            "cyan" => Color::Cyan,
            "purple" => Color::Purple,
            "green" => Color::Green,
            "orange" => Color::Orange,
            "pink" => Color::Pink,
            "grey" | "gray" => Color::Grey,
            "lightblue" => Color::Lightblue,
            "brown" => Color::Brown,
            _ => return None,
        };
        Some(color)
    }
}

pub(crate) fn is_agent(c: char) -> bool {
    c.is_ascii_digit()
}

pub(crate) fn is_box(c: char) -> bool {
    c.is_ascii_uppercase()
}
