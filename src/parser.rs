use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use log::debug;

use crate::data::{self, Color, Pos, MAX_SIZE};
use crate::goal::{GoalDescription, SubGoal};
use crate::level::Level;
use crate::state::{Agent, BoxItem, State};
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    MissingSection(&'static str),
    UnknownSection(String),
    Domain(String),
    UnknownColor(String),
    ColorItem(String),
    MissingColor(char),
    DuplicateAgent(char),
    /// Invalid cell in the initial section
    Pos(usize, usize),
    /// Invalid cell in the goal section
    GoalPos(usize, usize),
    SizeMismatch,
    /// Over 255 rows or columns.
    /// Heuristics with distance tables reject smaller levels, see `heuristic::MAX_TABLE_CELLS`.
    TooLarge,
    Empty,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::MissingSection(name) => write!(f, "Missing section #{}", name),
            ParserErr::UnknownSection(ref name) => write!(f, "Unknown section #{}", name),
            ParserErr::Domain(ref name) => write!(f, "Unsupported domain: {}", name),
            ParserErr::UnknownColor(ref name) => write!(f, "Unknown color: {}", name),
            ParserErr::ColorItem(ref item) => {
                write!(f, "Expected an agent or a box in colors, got: {}", item)
            }
            ParserErr::MissingColor(c) => write!(f, "No color for {}", c),
            ParserErr::DuplicateAgent(c) => write!(f, "Agent {} is in the level more than once", c),
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::GoalPos(r, c) => write!(f, "Invalid goal cell at pos: [{}, {}]", r, c),
            ParserErr::SizeMismatch => write!(f, "Initial and goal sections differ in size"),
            ParserErr::TooLarge => write!(f, "Level larger than 255 rows/columns"),
            ParserErr::Empty => write!(f, "No cells in the initial section"),
        }
    }
}

impl std::error::Error for ParserErr {}

/// A loaded level: the static part, the initial positions and the goal.
#[derive(Debug, Clone)]
pub struct Problem {
    level: Level,
    agents: Vec<Agent>,
    boxes: Vec<BoxItem>,
    goal: GoalDescription,
}

impl Problem {
    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn goal(&self) -> &GoalDescription {
        &self.goal
    }

    /// Agents sorted by id
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Boxes in reading order, this is also their index in every state
    pub fn boxes(&self) -> &[BoxItem] {
        &self.boxes
    }

    pub fn initial_state(&self) -> State<'_> {
        State::initial(&self.level, self.agents.clone(), self.boxes.clone())
    }
}

impl FromStr for Problem {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Lines of each `#section`, in file order.
type Sections<'s> = Vec<(&'s str, Vec<&'s str>)>;

pub(crate) fn parse(level: &str) -> Result<Problem, ParserErr> {
    let sections = split_sections(level)?;
    let domain = section(&sections, "domain")?;
    let name = section(&sections, "levelname")?;
    let colors = section(&sections, "colors")?;
    let initial = section(&sections, "initial")?;
    let goal = section(&sections, "goal")?;

    let domain = domain.first().map(|d| d.trim()).unwrap_or("");
    if domain != "hospital" {
        return Err(ParserErr::Domain(domain.to_string()));
    }
    let name = name.first().map(|n| n.trim()).unwrap_or("").to_string();

    let (agent_colors, box_colors) = parse_colors(colors)?;
    let (walls, agents, boxes) = parse_initial(initial, &agent_colors, &box_colors)?;
    let goal = parse_goal(goal, &walls)?;

    debug!(
        "Parsed level {}: {} agents, {} boxes, {} sub-goals",
        name,
        agents.len(),
        boxes.len(),
        goal.num_sub_goals()
    );

    let walls = Vec2d::new(walls, true);
    Ok(Problem {
        level: Level::new(name, walls, agent_colors, box_colors),
        agents,
        boxes,
        goal,
    })
}

fn split_sections(level: &str) -> Result<Sections<'_>, ParserErr> {
    let mut sections: Sections<'_> = Vec::new();

    // lines() also strips the \r of \r\n
    for line in level.lines() {
        if line.starts_with('#') {
            let header = line[1..].trim();
            match header {
                "domain" | "levelname" | "colors" | "initial" | "goal" => {
                    sections.push((header, Vec::new()))
                }
                "end" => break,
                _ => return Err(ParserErr::UnknownSection(header.to_string())),
            }
        } else if let Some((_, lines)) = sections.last_mut() {
            lines.push(line);
        } else if !line.trim().is_empty() {
            // content before the first header
            return Err(ParserErr::MissingSection("domain"));
        }
    }

    // a missing #end is tolerated
    Ok(sections)
}

fn section<'a, 's>(
    sections: &'a Sections<'s>,
    name: &'static str,
) -> Result<&'a [&'s str], ParserErr> {
    sections
        .iter()
        .find(|&&(header, _)| header == name)
        .map(|(_, lines)| &lines[..])
        .ok_or(ParserErr::MissingSection(name))
}

fn parse_colors(
    lines: &[&str],
) -> Result<([Option<Color>; 10], [Option<Color>; 26]), ParserErr> {
    let mut agent_colors = [None; 10];
    let mut box_colors = [None; 26];

    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        let mut parts = line.splitn(2, ':');
        let color_name = parts.next().unwrap_or("").trim();
        let color = Color::from_name(color_name)
            .ok_or_else(|| ParserErr::UnknownColor(color_name.to_string()))?;
        let items = parts
            .next()
            .ok_or_else(|| ParserErr::ColorItem(line.to_string()))?;

        for item in items.split(',').map(str::trim) {
            let mut chars = item.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if data::is_agent(c) => {
                    agent_colors[(c as u8 - b'0') as usize] = Some(color)
                }
                (Some(c), None) if data::is_box(c) => {
                    box_colors[(c as u8 - b'A') as usize] = Some(color)
                }
                _ => return Err(ParserErr::ColorItem(item.to_string())),
            }
        }
    }

    Ok((agent_colors, box_colors))
}

type Initial = (Vec<Vec<bool>>, Vec<Agent>, Vec<BoxItem>);

fn parse_initial(
    lines: &[&str],
    agent_colors: &[Option<Color>; 10],
    box_colors: &[Option<Color>; 26],
) -> Result<Initial, ParserErr> {
    let lines = trim_trailing_empty(lines);
    if lines.is_empty() {
        return Err(ParserErr::Empty);
    }
    if lines.len() > MAX_SIZE {
        return Err(ParserErr::TooLarge);
    }

    let mut walls = Vec::with_capacity(lines.len());
    let mut agents: Vec<Agent> = Vec::new();
    let mut boxes = Vec::new();
    for (r, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (c, cell) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);
            match cell {
                '+' => row.push(true),
                ' ' => row.push(false),
                _ if data::is_agent(cell) => {
                    if agent_colors[(cell as u8 - b'0') as usize].is_none() {
                        return Err(ParserErr::MissingColor(cell));
                    }
                    if agents.iter().any(|a| a.id == cell) {
                        return Err(ParserErr::DuplicateAgent(cell));
                    }
                    agents.push(Agent::new(pos, cell));
                    row.push(false);
                }
                _ if data::is_box(cell) => {
                    if box_colors[(cell as u8 - b'A') as usize].is_none() {
                        return Err(ParserErr::MissingColor(cell));
                    }
                    boxes.push(BoxItem::new(pos, cell));
                    row.push(false);
                }
                _ => return Err(ParserErr::Pos(r, c)),
            }
        }
        walls.push(row);
    }

    agents.sort_by_key(|a| a.id);
    Ok((walls, agents, boxes))
}

fn parse_goal(lines: &[&str], walls: &[Vec<bool>]) -> Result<GoalDescription, ParserErr> {
    let lines = trim_trailing_empty(lines);
    if lines.len() != walls.len() {
        return Err(ParserErr::SizeMismatch);
    }

    let mut goal = GoalDescription::default();
    for (r, (line, wall_row)) in lines.iter().zip(walls).enumerate() {
        for (c, cell) in line.chars().enumerate() {
            let is_wall = wall_row.get(c).cloned().unwrap_or(true);
            match cell {
                '+' | ' ' => {}
                _ if (data::is_agent(cell) || data::is_box(cell)) && !is_wall => {
                    goal.add(SubGoal::new(Pos::new(r as u8, c as u8), cell, true));
                }
                _ => return Err(ParserErr::GoalPos(r, c)),
            }
        }
    }
    Ok(goal)
}

fn trim_trailing_empty<'l, 's>(lines: &'l [&'s str]) -> &'l [&'s str] {
    let len = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);
    &lines[..len]
}
