use crate::goal::GoalDescription;
use crate::heuristic::Heuristic;
use crate::level::Level;
use crate::solver::SearchErr;
use crate::state::State;

/// Number of unsatisfied sub-goals.
///
/// Not admissible - one action can satisfy several literals at once
/// and a literal can need many actions. Meant for greedy search.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalCount;

impl GoalCount {
    pub fn new() -> Self {
        GoalCount
    }
}

impl Heuristic for GoalCount {
    fn preprocess(&mut self, _level: &Level) -> Result<(), SearchErr> {
        Ok(())
    }

    fn h(&self, state: &State<'_>, goal: &GoalDescription) -> Result<u32, SearchErr> {
        let unsatisfied = (0..goal.num_sub_goals())
            .filter(|&i| !goal.get_sub_goal(i).is_goal(state))
            .count();
        Ok(unsatisfied as u32)
    }

    fn name(&self) -> &'static str {
        "goal count"
    }
}
