use std::fmt::{Debug, Display, Formatter, Result};

use separator::Separatable;

use crate::state::State;

/// Counts of states by depth (path cost `g`).
///
/// Every generated state is either a duplicate, eventually expanded or still
/// in the frontier when the search ends.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<i32>,
    duplicate_states: Vec<i32>,
    expanded_states: Vec<i32>,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            created_states: vec![],
            duplicate_states: vec![],
            expanded_states: vec![],
        }
    }

    pub fn total_created(&self) -> i32 {
        self.created_states.iter().sum::<i32>()
    }

    pub fn total_duplicates(&self) -> i32 {
        self.duplicate_states.iter().sum::<i32>()
    }

    pub fn total_expanded(&self) -> i32 {
        self.expanded_states.iter().sum::<i32>()
    }

    pub(crate) fn add_created(&mut self, state: &State<'_>) -> bool {
        Self::add(&mut self.created_states, state)
    }

    pub(crate) fn add_duplicate(&mut self, state: &State<'_>) -> bool {
        Self::add(&mut self.duplicate_states, state)
    }

    /// Returns true when this is the first expanded state at its depth.
    pub(crate) fn add_expanded(&mut self, state: &State<'_>) -> bool {
        Self::add(&mut self.expanded_states, state)
    }

    fn add(counts: &mut Vec<i32>, state: &State<'_>) -> bool {
        let depth = state.g() as usize;
        let mut ret = false;

        // while because some depths might be skipped (all duplicates)
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total duplicates: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "total expanded: {}", self.total_expanded().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let created = self.total_created();
        let duplicates = self.total_duplicates();
        let expanded = self.total_expanded();
        let left = created - expanded - duplicates;
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Expanded total: {}", expanded.separated_string())?;
        writeln!(f, "Created but not expanded total: {}", left.separated_string())?;
        writeln!(f)?;

        writeln!(f, "Depth          Created        Duplicates     Expanded")?;
        let depths = self
            .created_states
            .len()
            .max(self.expanded_states.len());
        for i in 0..depths {
            let depth = format!("{}:", i);
            let get = |counts: &Vec<i32>| counts.get(i).cloned().unwrap_or(0);
            writeln!(
                f,
                "{:<15}{:<15}{:<15}{}",
                depth,
                get(&self.created_states).separated_string(),
                get(&self.duplicate_states).separated_string(),
                get(&self.expanded_states).separated_string(),
            )?;
        }
        Ok(())
    }
}
