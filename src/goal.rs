use std::fmt::{self, Display, Formatter};

use crate::data::{is_agent, is_box, Pos};
use crate::state::State;

/// A literal over the contents of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubGoal {
    pub pos: Pos,
    /// Agent id or box letter
    pub ch: char,
    /// `true`: the cell must contain `ch`, `false`: it must not.
    pub positive: bool,
}

impl SubGoal {
    pub fn new(pos: Pos, ch: char, positive: bool) -> Self {
        SubGoal { pos, ch, positive }
    }

    pub fn is_goal(&self, state: &State<'_>) -> bool {
        let holds = state.object_at(self.pos) == Some(self.ch);
        holds == self.positive
    }
}

impl Display for SubGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let polarity = if self.positive { "" } else { "not " };
        write!(f, "{}{} at {}", polarity, self.ch, self.pos)
    }
}

/// Conjunction of sub-goals.
///
/// Order is fixed once built: agent goals first, then box goals, each in insertion order.
/// `Advanced` relies on the box goal order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalDescription {
    agent_goals: Vec<SubGoal>,
    box_goals: Vec<SubGoal>,
}

impl GoalDescription {
    pub fn new(goals: Vec<SubGoal>) -> Self {
        let mut description = GoalDescription::default();
        for goal in goals {
            description.add(goal);
        }
        description
    }

    pub fn add(&mut self, goal: SubGoal) {
        debug_assert!(is_agent(goal.ch) || is_box(goal.ch), "Bad goal char {}", goal.ch);
        if is_agent(goal.ch) {
            self.agent_goals.push(goal);
        } else {
            self.box_goals.push(goal);
        }
    }

    pub fn is_goal(&self, state: &State<'_>) -> bool {
        self.agent_goals
            .iter()
            .chain(&self.box_goals)
            .all(|goal| goal.is_goal(state))
    }

    pub fn num_sub_goals(&self) -> usize {
        self.agent_goals.len() + self.box_goals.len()
    }

    /// Panics if `index >= num_sub_goals()`.
    pub fn get_sub_goal(&self, index: usize) -> &SubGoal {
        if index < self.agent_goals.len() {
            &self.agent_goals[index]
        } else {
            &self.box_goals[index - self.agent_goals.len()]
        }
    }

    pub fn agent_goals(&self) -> &[SubGoal] {
        &self.agent_goals
    }

    pub fn box_goals(&self) -> &[SubGoal] {
        &self.box_goals
    }
}

impl Display for GoalDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, goal) in self.agent_goals.iter().chain(&self.box_goals).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", goal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::state::{Agent, BoxItem};

    fn level() -> Level {
        Level::uncolored(vec![
            vec![true; 5],
            vec![true, false, false, false, true],
            vec![true; 5],
        ])
    }

    #[test]
    fn literals() {
        let level = level();
        let state = State::initial(
            &level,
            vec![Agent::new(Pos::new(1, 1), '0')],
            vec![BoxItem::new(Pos::new(1, 2), 'A')],
        );

        assert!(SubGoal::new(Pos::new(1, 2), 'A', true).is_goal(&state));
        assert!(!SubGoal::new(Pos::new(1, 3), 'A', true).is_goal(&state));
        assert!(SubGoal::new(Pos::new(1, 3), 'A', false).is_goal(&state));
        assert!(!SubGoal::new(Pos::new(1, 2), 'A', false).is_goal(&state));
        assert!(SubGoal::new(Pos::new(1, 1), '0', true).is_goal(&state));
        assert!(SubGoal::new(Pos::new(1, 1), 'A', false).is_goal(&state));
    }

    #[test]
    fn conjunction_and_order() {
        let level = level();
        let state = State::initial(
            &level,
            vec![Agent::new(Pos::new(1, 1), '0')],
            vec![BoxItem::new(Pos::new(1, 2), 'A')],
        );

        let goal = GoalDescription::new(vec![
            SubGoal::new(Pos::new(1, 2), 'A', true),
            SubGoal::new(Pos::new(1, 1), '0', true),
        ]);
        assert_eq!(goal.num_sub_goals(), 2);
        // agent goals come first
        assert_eq!(goal.get_sub_goal(0).ch, '0');
        assert_eq!(goal.get_sub_goal(1).ch, 'A');
        assert!(goal.is_goal(&state));

        let goal = GoalDescription::new(vec![
            SubGoal::new(Pos::new(1, 2), 'A', true),
            SubGoal::new(Pos::new(1, 3), '0', true),
        ]);
        assert!(!goal.is_goal(&state));

        assert!(GoalDescription::default().is_goal(&state));
        assert_eq!(goal.to_string(), "0 at [1, 3], A at [1, 2]");
    }
}
