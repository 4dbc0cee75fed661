//! Containers of discovered but not yet expanded states.
//!
//! All variants keep an ordering structure and a membership set side by side,
//! every `add` and `pop` updates both.

mod best_first;
mod bfs;
mod dfs;

use std::rc::Rc;

use crate::goal::GoalDescription;
use crate::solver::SearchErr;
use crate::state::State;

pub use self::best_first::{BestFirstFrontier, Evaluation};
pub use self::bfs::BfsFrontier;
pub use self::dfs::DfsFrontier;

pub trait Frontier<'a> {
    /// Clears everything, the frontier behaves as if newly created afterwards.
    /// Called at the start of every search so one frontier can be reused.
    fn prepare(&mut self, goal: &GoalDescription);

    /// Adding a state that's already in the frontier does nothing.
    fn add(&mut self, state: Rc<State<'a>>) -> Result<(), SearchErr>;

    /// Removes the next state in strategy order, `SearchErr::EmptyFrontierPop` if there's none.
    fn pop(&mut self) -> Result<Rc<State<'a>>, SearchErr>;

    fn is_empty(&self) -> bool;

    fn size(&self) -> usize;

    /// Exactly the states added and not yet popped since the last `prepare`.
    fn contains(&self, state: &State<'a>) -> bool;

    fn name(&self) -> String;
}

impl<'a, F: Frontier<'a> + ?Sized> Frontier<'a> for Box<F> {
    fn prepare(&mut self, goal: &GoalDescription) {
        (**self).prepare(goal)
    }

    fn add(&mut self, state: Rc<State<'a>>) -> Result<(), SearchErr> {
        (**self).add(state)
    }

    fn pop(&mut self) -> Result<Rc<State<'a>>, SearchErr> {
        (**self).pop()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn contains(&self, state: &State<'a>) -> bool {
        (**self).contains(state)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}
