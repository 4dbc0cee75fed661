use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

use fnv::FnvHashSet;

use crate::frontier::Frontier;
use crate::goal::GoalDescription;
use crate::heuristic::Heuristic;
use crate::solver::SearchErr;
use crate::state::State;

/// How a state's priority is computed from its path cost `g` and heuristic value `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// h
    Greedy,
    /// g + h
    AStar,
    /// g + w * h
    WeightedAStar(u32),
}

impl Evaluation {
    fn priority(self, g: u32, h: u32) -> u64 {
        let (g, h) = (u64::from(g), u64::from(h));
        match self {
            Evaluation::Greedy => h,
            Evaluation::AStar => g + h,
            Evaluation::WeightedAStar(w) => g + u64::from(w) * h,
        }
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Evaluation::Greedy => write!(f, "greedy"),
            Evaluation::AStar => write!(f, "A*"),
            Evaluation::WeightedAStar(w) => write!(f, "WA*({})", w),
        }
    }
}

#[derive(Debug)]
struct Entry<'a> {
    priority: u64,
    /// insertion order, breaks ties first in first out
    seq: u64,
    state: Rc<State<'a>>,
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for Entry<'_> {}

impl PartialOrd for Entry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        (other.priority, other.seq).cmp(&(self.priority, self.seq))
    }
}

/// Pops the state with the lowest priority according to `Evaluation`,
/// equal priorities in insertion order.
///
/// The heuristic must be preprocessed before the first `add`.
#[derive(Debug)]
pub struct BestFirstFrontier<'a, H: Heuristic> {
    evaluation: Evaluation,
    heuristic: H,
    goal: Option<GoalDescription>,
    heap: BinaryHeap<Entry<'a>>,
    set: FnvHashSet<Rc<State<'a>>>,
    next_seq: u64,
}

impl<'a, H: Heuristic> BestFirstFrontier<'a, H> {
    pub fn new(evaluation: Evaluation, heuristic: H) -> Self {
        BestFirstFrontier {
            evaluation,
            heuristic,
            goal: None,
            heap: BinaryHeap::new(),
            set: FnvHashSet::default(),
            next_seq: 0,
        }
    }

    pub fn greedy(heuristic: H) -> Self {
        Self::new(Evaluation::Greedy, heuristic)
    }

    pub fn a_star(heuristic: H) -> Self {
        Self::new(Evaluation::AStar, heuristic)
    }

    pub fn weighted_a_star(heuristic: H, weight: u32) -> Self {
        Self::new(Evaluation::WeightedAStar(weight), heuristic)
    }
}

impl<'a, H: Heuristic> Frontier<'a> for BestFirstFrontier<'a, H> {
    fn prepare(&mut self, goal: &GoalDescription) {
        self.goal = Some(goal.clone());
        self.heap.clear();
        self.set.clear();
        self.next_seq = 0;
    }

    fn add(&mut self, state: Rc<State<'a>>) -> Result<(), SearchErr> {
        if self.set.contains(&state) {
            return Ok(());
        }

        let goal = self.goal.as_ref().ok_or(SearchErr::FrontierNotPrepared)?;
        let h = self.heuristic.h(&state, goal)?;
        let priority = self.evaluation.priority(state.g(), h);

        self.set.insert(Rc::clone(&state));
        self.heap.push(Entry {
            priority,
            seq: self.next_seq,
            state,
        });
        self.next_seq += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<Rc<State<'a>>, SearchErr> {
        let entry = self.heap.pop().ok_or(SearchErr::EmptyFrontierPop)?;
        self.set.remove(&entry.state);
        Ok(entry.state)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn size(&self) -> usize {
        self.heap.len()
    }

    fn contains(&self, state: &State<'a>) -> bool {
        self.set.contains(state)
    }

    fn name(&self) -> String {
        format!("best-first ({}, {})", self.evaluation, self.heuristic.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Pos;
    use crate::frontier::test_utils::{agent_at, agent_at_depth, corridor};
    use crate::goal::SubGoal;
    use crate::heuristic::{Advanced, GoalCount};
    use crate::level::Level;

    /// Agent `0` should end up in the last cell of the corridor.
    fn goal_at_end(len: u8) -> GoalDescription {
        GoalDescription::new(vec![SubGoal::new(Pos::new(0, len - 1), '0', true)])
    }

    #[derive(Debug)]
    struct DistToEnd;

    impl Heuristic for DistToEnd {
        fn preprocess(&mut self, _level: &Level) -> Result<(), SearchErr> {
            Ok(())
        }

        fn h(&self, state: &State<'_>, goal: &GoalDescription) -> Result<u32, SearchErr> {
            let target = goal.get_sub_goal(0).pos;
            Ok(u32::from(state.agents()[0].pos.dist(target)))
        }

        fn name(&self) -> &'static str {
            "distance to end"
        }
    }

    #[test]
    fn greedy_order() {
        let level = corridor(6);
        let mut frontier = BestFirstFrontier::greedy(DistToEnd);
        frontier.prepare(&goal_at_end(6));

        for &c in &[2, 5, 0, 3] {
            frontier.add(agent_at(&level, c)).unwrap();
        }
        for &c in &[5, 3, 2, 0] {
            assert_eq!(*frontier.pop().unwrap(), *agent_at(&level, c));
        }
        assert_eq!(frontier.pop().unwrap_err(), SearchErr::EmptyFrontierPop);
    }

    #[test]
    fn a_star_uses_path_cost() {
        let level = corridor(6);
        let mut frontier = BestFirstFrontier::a_star(DistToEnd);
        frontier.prepare(&goal_at_end(6));

        // g 4 + h 1 = 5 vs g 0 + h 3 = 3
        frontier.add(agent_at_depth(&level, 4, 4)).unwrap();
        frontier.add(agent_at_depth(&level, 2, 0)).unwrap();
        assert_eq!(frontier.pop().unwrap().g(), 0);
        assert_eq!(frontier.pop().unwrap().g(), 4);

        let mut frontier = BestFirstFrontier::weighted_a_star(DistToEnd, 3);
        frontier.prepare(&goal_at_end(6));
        // 4 + 3 * 1 = 7 vs 0 + 3 * 3 = 9
        frontier.add(agent_at_depth(&level, 2, 0)).unwrap();
        frontier.add(agent_at_depth(&level, 4, 4)).unwrap();
        assert_eq!(frontier.pop().unwrap().g(), 4);
    }

    #[test]
    fn ties_in_insertion_order() {
        let level = corridor(6);
        let mut frontier = BestFirstFrontier::greedy(GoalCount::new());
        frontier.prepare(&goal_at_end(6));

        // all have h == 1
        for &c in &[3, 0, 4, 1] {
            frontier.add(agent_at(&level, c)).unwrap();
        }
        for &c in &[3, 0, 4, 1] {
            assert_eq!(*frontier.pop().unwrap(), *agent_at(&level, c));
        }
    }

    #[test]
    fn membership_and_reuse() {
        let level = corridor(6);
        let mut frontier = BestFirstFrontier::greedy(GoalCount::new());
        frontier.prepare(&goal_at_end(6));

        frontier.add(agent_at(&level, 1)).unwrap();
        frontier.add(agent_at(&level, 1)).unwrap();
        frontier.add(agent_at(&level, 2)).unwrap();
        assert_eq!(frontier.size(), 2);
        assert!(frontier.contains(&agent_at(&level, 1)));
        frontier.pop().unwrap();
        assert!(!frontier.contains(&agent_at(&level, 1)));
        assert!(frontier.contains(&agent_at(&level, 2)));

        frontier.prepare(&goal_at_end(6));
        assert!(frontier.is_empty());
        assert_eq!(frontier.size(), 0);
        assert!(!frontier.contains(&agent_at(&level, 2)));
    }

    #[test]
    fn setup_errors() {
        let level = corridor(6);

        let mut frontier = BestFirstFrontier::greedy(GoalCount::new());
        assert_eq!(
            frontier.add(agent_at(&level, 1)).unwrap_err(),
            SearchErr::FrontierNotPrepared
        );

        let mut frontier = BestFirstFrontier::greedy(Advanced::new());
        frontier.prepare(&goal_at_end(6));
        assert_eq!(
            frontier.add(agent_at(&level, 1)).unwrap_err(),
            SearchErr::PreprocessingUnavailable
        );
        assert!(frontier.is_empty());
        assert!(!frontier.contains(&agent_at(&level, 1)));
    }
}
