use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::data::Pos;
use crate::level::Level;
use crate::moves::{JointAction, Plan};
use crate::vec2d::Vec2d;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Agent {
    pub pos: Pos,
    /// `'0'..='9'`
    pub id: char,
}

impl Agent {
    pub fn new(pos: Pos, id: char) -> Self {
        Agent { pos, id }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoxItem {
    pub pos: Pos,
    /// `'A'..='Z'`
    pub letter: char,
}

impl BoxItem {
    pub fn new(pos: Pos, letter: char) -> Self {
        BoxItem { pos, letter }
    }
}

/// Snapshot of all movable entities.
///
/// Equality and hashing only look at agent and box positions. The level, the parent link,
/// the action and the path cost don't take part - two states reached by different paths
/// are the same state.
///
/// Boxes keep their index for the whole search (it's their identity), they are not sorted.
pub struct State<'a> {
    level: &'a Level,
    agents: Vec<Agent>,
    boxes: Vec<BoxItem>,
    parent: Option<Rc<State<'a>>>,
    action: Option<JointAction>,
    g: u32,
}

impl<'a> State<'a> {
    pub fn initial(level: &'a Level, agents: Vec<Agent>, boxes: Vec<BoxItem>) -> Self {
        let state = State {
            level,
            agents,
            boxes,
            parent: None,
            action: None,
            g: 0,
        };
        debug_assert!(state.is_consistent(), "Overlapping entities or entity in wall");
        state
    }

    /// A successor of `parent` reached by `action`.
    pub fn child(
        parent: &Rc<State<'a>>,
        action: JointAction,
        agents: Vec<Agent>,
        boxes: Vec<BoxItem>,
    ) -> Self {
        let state = State {
            level: parent.level,
            agents,
            boxes,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            g: parent.g + 1,
        };
        debug_assert!(state.is_consistent(), "Overlapping entities or entity in wall");
        state
    }

    pub fn level(&self) -> &'a Level {
        self.level
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn boxes(&self) -> &[BoxItem] {
        &self.boxes
    }

    pub fn parent(&self) -> Option<&Rc<State<'a>>> {
        self.parent.as_ref()
    }

    pub fn action(&self) -> Option<&JointAction> {
        self.action.as_ref()
    }

    /// Number of joint actions from the initial state
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Index of the agent at `pos`
    pub fn agent_at(&self, pos: Pos) -> Option<usize> {
        self.agents.iter().position(|a| a.pos == pos)
    }

    /// Index of the box at `pos`
    pub fn box_at(&self, pos: Pos) -> Option<usize> {
        self.boxes.iter().position(|b| b.pos == pos)
    }

    /// Agent id or box letter at `pos`
    pub fn object_at(&self, pos: Pos) -> Option<char> {
        if let Some(i) = self.agent_at(pos) {
            Some(self.agents[i].id)
        } else if let Some(i) = self.box_at(pos) {
            Some(self.boxes[i].letter)
        } else {
            None
        }
    }

    pub fn is_free(&self, pos: Pos) -> bool {
        !self.level.is_wall(pos) && self.object_at(pos).is_none()
    }

    /// Follows parent links back to the initial state.
    pub fn extract_plan(&self) -> Plan {
        let mut steps = Vec::with_capacity(self.g as usize);
        let mut cur = self;
        while let (Some(parent), Some(action)) = (cur.parent.as_ref(), cur.action.as_ref()) {
            steps.push(action.clone());
            cur = &**parent;
        }
        steps.reverse();
        Plan::new(steps)
    }

    fn is_consistent(&self) -> bool {
        let mut occupied: Vec2d<bool> = self.level.walls.scratchpad();
        let positions = self
            .agents
            .iter()
            .map(|a| a.pos)
            .chain(self.boxes.iter().map(|b| b.pos));
        for pos in positions {
            if self.level.is_wall(pos) || occupied[pos] {
                return false;
            }
            occupied[pos] = true;
        }
        true
    }
}

impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.agents.iter().map(|a| a.pos).eq(other.agents.iter().map(|a| a.pos))
            && self.boxes.iter().map(|b| b.pos).eq(other.boxes.iter().map(|b| b.pos))
    }
}

impl Eq for State<'_> {}

impl Hash for State<'_> {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        for agent in &self.agents {
            agent.pos.hash(hasher);
        }
        for b in &self.boxes {
            b.pos.hash(hasher);
        }
    }
}

// The default drop would recurse once per ancestor and overflow the stack on long paths
// (DFS easily gets hundreds of thousands deep).
impl Drop for State<'_> {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(rc) = parent {
            match Rc::try_unwrap(rc) {
                Ok(mut state) => parent = state.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl Display for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.level.rows() {
            for c in 0..self.level.cols() {
                let pos = Pos::new(r, c);
                let cell = if self.level.is_wall(pos) {
                    '+'
                } else {
                    self.object_at(pos).unwrap_or(' ')
                };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "g: {}", self.g)?;
        write!(f, "{}", self)
    }
}
