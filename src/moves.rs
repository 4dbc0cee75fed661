use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;

// Terminology:
// action = what one agent does during one step
// joint action = one action per agent, applied atomically
// plan = joint actions leading from the initial state to a goal state

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NoOp,
    /// Agent moves into a free cell.
    Move(Dir),
    /// Agent moves into the box's cell, the box moves in the second direction.
    Push(Dir, Dir),
    /// Agent moves in the first direction, the box next to it (in the second direction)
    /// follows into the cell the agent left.
    Pull(Dir, Dir),
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Action::NoOp => write!(f, "NoOp"),
            Action::Move(dir) => write!(f, "Move({})", dir),
            Action::Push(agent_dir, box_dir) => write!(f, "Push({},{})", agent_dir, box_dir),
            Action::Pull(agent_dir, box_dir) => write!(f, "Pull({},{})", agent_dir, box_dir),
        }
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// One action per agent, in agent order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct JointAction(Vec<Action>);

impl JointAction {
    pub fn new(actions: Vec<Action>) -> Self {
        JointAction(actions)
    }

    pub fn actions(&self) -> &[Action] {
        &self.0
    }

    pub fn is_noop(&self) -> bool {
        self.0.iter().all(|&a| a == Action::NoOp)
    }
}

impl Display for JointAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", action)?;
        }
        Ok(())
    }
}

impl Debug for JointAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Plan(Vec<JointAction>);

impl Plan {
    pub(crate) fn new(steps: Vec<JointAction>) -> Self {
        Plan(steps)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of individual push and pull actions over the whole plan.
    pub fn box_action_cnt(&self) -> usize {
        self.0
            .iter()
            .flat_map(|joint| joint.actions())
            .filter(|a| match a {
                Action::Push(..) | Action::Pull(..) => true,
                _ => false,
            })
            .count()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, JointAction> {
        self.0.iter()
    }
}

impl IntoIterator for Plan {
    type Item = JointAction;
    type IntoIter = ::std::vec::IntoIter<JointAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a JointAction;
    type IntoIter = ::std::slice::Iter<'a, JointAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One joint action per line
impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for joint in self {
            writeln!(f, "{}", joint)?;
        }
        Ok(())
    }
}

impl Debug for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_actions() {
        let joint = JointAction::new(vec![
            Action::NoOp,
            Action::Move(Dir::N),
            Action::Push(Dir::E, Dir::S),
            Action::Pull(Dir::W, Dir::E),
        ]);
        assert_eq!(joint.to_string(), "NoOp|Move(N)|Push(E,S)|Pull(W,E)");
        assert!(!joint.is_noop());
        assert!(JointAction::new(vec![Action::NoOp, Action::NoOp]).is_noop());
    }

    #[test]
    fn formatting_and_counting_plans() {
        let plan = Plan::new(vec![
            JointAction::new(vec![Action::Move(Dir::E), Action::NoOp]),
            JointAction::new(vec![Action::Push(Dir::E, Dir::E), Action::Pull(Dir::S, Dir::N)]),
        ]);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.box_action_cnt(), 2);
        assert_eq!(plan.to_string(), "Move(E)|NoOp\nPush(E,E)|Pull(S,N)\n");
        assert_eq!(plan.iter().count(), 2);
        assert_eq!(plan.into_iter().count(), 2);
        assert!(Plan::default().is_empty());
    }
}
