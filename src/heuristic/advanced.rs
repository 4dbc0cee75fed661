use crate::goal::GoalDescription;
use crate::heuristic::{DistanceTable, Heuristic};
use crate::level::Level;
use crate::solver::SearchErr;
use crate::state::State;

/// Positional box-to-goal plus agent-to-box distance.
///
/// Box goal `i` is paired with box `i` and agent `i` with box `i`
/// instead of solving an assignment problem.
/// When the counts differ, pairing stops at the shorter sequence.
/// Only admissible if the pairing happens to be the real one, see `Matching` for an alternative.
#[derive(Debug, Clone, Default)]
pub struct Advanced {
    dists: Option<DistanceTable>,
}

impl Advanced {
    pub fn new() -> Self {
        Advanced { dists: None }
    }
}

impl Heuristic for Advanced {
    fn preprocess(&mut self, level: &Level) -> Result<(), SearchErr> {
        self.dists = Some(DistanceTable::manhattan(level)?);
        Ok(())
    }

    fn h(&self, state: &State<'_>, goal: &GoalDescription) -> Result<u32, SearchErr> {
        let dists = self
            .dists
            .as_ref()
            .ok_or(SearchErr::PreprocessingUnavailable)?;
        let boxes = state.boxes();

        let box_to_goal: u32 = goal
            .box_goals()
            .iter()
            .zip(boxes)
            .map(|(goal, b)| u32::from(dists.get(goal.pos, b.pos)))
            .sum();

        let agent_to_box: u32 = state
            .agents()
            .iter()
            .zip(boxes)
            .map(|(agent, b)| u32::from(dists.get(agent.pos, b.pos)))
            .sum();

        Ok(box_to_goal + agent_to_box)
    }

    fn name(&self) -> &'static str {
        "advanced"
    }
}
