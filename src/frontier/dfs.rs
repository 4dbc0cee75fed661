use std::collections::VecDeque;
use std::rc::Rc;

use fnv::FnvHashSet;

use crate::frontier::Frontier;
use crate::goal::GoalDescription;
use crate::solver::SearchErr;
use crate::state::State;

/// Last in, first out.
#[derive(Debug, Default)]
pub struct DfsFrontier<'a> {
    stack: VecDeque<Rc<State<'a>>>,
    set: FnvHashSet<Rc<State<'a>>>,
}

impl<'a> DfsFrontier<'a> {
    pub fn new() -> Self {
        DfsFrontier {
            stack: VecDeque::new(),
            set: FnvHashSet::default(),
        }
    }
}

impl<'a> Frontier<'a> for DfsFrontier<'a> {
    fn prepare(&mut self, _goal: &GoalDescription) {
        self.stack.clear();
        self.set.clear();
    }

    fn add(&mut self, state: Rc<State<'a>>) -> Result<(), SearchErr> {
        if self.set.insert(Rc::clone(&state)) {
            self.stack.push_back(state);
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<Rc<State<'a>>, SearchErr> {
        let state = self.stack.pop_back().ok_or(SearchErr::EmptyFrontierPop)?;
        self.set.remove(&state);
        Ok(state)
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn size(&self) -> usize {
        self.stack.len()
    }

    fn contains(&self, state: &State<'a>) -> bool {
        self.set.contains(state)
    }

    fn name(&self) -> String {
        "depth-first".to_string()
    }
}
