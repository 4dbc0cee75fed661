use std::collections::VecDeque;
use std::rc::Rc;

use fnv::FnvHashSet;

use crate::frontier::Frontier;
use crate::goal::GoalDescription;
use crate::solver::SearchErr;
use crate::state::State;

/// First in, first out. With unit action costs the first goal popped has a shortest plan.
#[derive(Debug, Default)]
pub struct BfsFrontier<'a> {
    queue: VecDeque<Rc<State<'a>>>,
    set: FnvHashSet<Rc<State<'a>>>,
}

impl<'a> BfsFrontier<'a> {
    pub fn new() -> Self {
        BfsFrontier {
            queue: VecDeque::new(),
            set: FnvHashSet::default(),
        }
    }
}

impl<'a> Frontier<'a> for BfsFrontier<'a> {
    fn prepare(&mut self, _goal: &GoalDescription) {
        self.queue.clear();
        self.set.clear();
    }

    fn add(&mut self, state: Rc<State<'a>>) -> Result<(), SearchErr> {
        if self.set.insert(Rc::clone(&state)) {
            self.queue.push_back(state);
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<Rc<State<'a>>, SearchErr> {
        let state = self.queue.pop_front().ok_or(SearchErr::EmptyFrontierPop)?;
        self.set.remove(&state);
        Ok(state)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn size(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, state: &State<'a>) -> bool {
        self.set.contains(state)
    }

    fn name(&self) -> String {
        "breadth-first".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::test_utils::{agent_at, corridor};

    #[test]
    fn queue_order() {
        let level = corridor(4);
        let mut frontier = BfsFrontier::new();
        frontier.prepare(&GoalDescription::default());

        for c in 0..4 {
            frontier.add(agent_at(&level, c)).unwrap();
        }
        for c in 0..4 {
            assert!(frontier.contains(&agent_at(&level, c)));
            assert_eq!(*frontier.pop().unwrap(), *agent_at(&level, c));
            assert!(!frontier.contains(&agent_at(&level, c)));
        }
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop().unwrap_err(), SearchErr::EmptyFrontierPop);
    }

    #[test]
    fn reuse_after_prepare() {
        let level = corridor(4);
        let mut frontier = BfsFrontier::new();
        frontier.prepare(&GoalDescription::default());
        frontier.add(agent_at(&level, 0)).unwrap();
        frontier.add(agent_at(&level, 0)).unwrap();
        assert_eq!(frontier.size(), 1);

        frontier.prepare(&GoalDescription::default());
        assert!(frontier.is_empty());
        assert_eq!(frontier.size(), 0);

        frontier.add(agent_at(&level, 3)).unwrap();
        assert_eq!(*frontier.pop().unwrap(), *agent_at(&level, 3));
    }
}
