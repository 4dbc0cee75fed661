mod stats;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;
use std::time::Instant;

use fnv::FnvHashSet;
use log::{debug, info};
use separator::Separatable;

use crate::config::{HeuristicKind, SearchConfig, Strategy};
use crate::frontier::{BestFirstFrontier, BfsFrontier, DfsFrontier, Evaluation, Frontier};
use crate::goal::GoalDescription;
use crate::heuristic::{Advanced, GoalCount, Heuristic, Matching, MAX_TABLE_CELLS};
use crate::level::Level;
use crate::moves::Plan;
use crate::parser::Problem;
use crate::state::State;
use crate::successors::{HospitalSuccessors, Successors};
use crate::Solve;

pub use self::stats::Stats;

const PROGRESS_INTERVAL: u64 = 10_000;

/// Broken contracts between the driver, frontiers and heuristics.
///
/// Not finding a solution is not an error, see `SearchOutcome::Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErr {
    EmptyFrontierPop,
    PreprocessingUnavailable,
    FrontierNotPrepared,
    /// Cell count of a level too large for a distance table.
    LevelTooLarge(usize),
}

impl Display for SearchErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SearchErr::EmptyFrontierPop => write!(f, "Pop from an empty frontier"),
            SearchErr::PreprocessingUnavailable => {
                write!(f, "Heuristic used before preprocessing the level")
            }
            SearchErr::FrontierNotPrepared => {
                write!(f, "Frontier used before being prepared with a goal")
            }
            SearchErr::LevelTooLarge(cells) => write!(
                f,
                "Level has {} cells, distance tables support at most {}",
                cells, MAX_TABLE_CELLS
            ),
        }
    }
}

impl Error for SearchErr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Initialized,
    Running,
    Succeeded,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Plan),
    /// Every reachable state was expanded, there is no solution.
    Exhausted,
    /// Stopped by the expansion budget, can be resumed.
    Interrupted,
}

/// Graph search with duplicate elimination.
///
/// Expansion order is entirely up to the frontier, the driver only makes sure
/// no state is added twice or expanded twice.
pub struct GraphSearch<'a, F, S> {
    goal: GoalDescription,
    frontier: F,
    successors: S,
    explored: FnvHashSet<Rc<State<'a>>>,
    phase: SearchPhase,
    solution: Option<Rc<State<'a>>>,
    stats: Stats,
    expansions: u64,
    print_status: bool,
    started: Instant,
}

impl<'a, F: Frontier<'a>, S: Successors> GraphSearch<'a, F, S> {
    /// Prepares the frontier for `goal` and seeds it with `initial`.
    pub fn new(
        initial: State<'a>,
        goal: GoalDescription,
        mut frontier: F,
        successors: S,
    ) -> Result<Self, SearchErr> {
        debug!("Search called with {}", frontier.name());

        frontier.prepare(&goal);
        let mut stats = Stats::new();
        stats.add_created(&initial);
        frontier.add(Rc::new(initial))?;

        Ok(GraphSearch {
            goal,
            frontier,
            successors,
            explored: FnvHashSet::default(),
            phase: SearchPhase::Initialized,
            solution: None,
            stats,
            expansions: 0,
            print_status: false,
            started: Instant::now(),
        })
    }

    /// Log stats every time a new depth is expanded.
    pub fn with_print_status(mut self, print_status: bool) -> Self {
        self.print_status = print_status;
        self
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        match self.phase {
            SearchPhase::Succeeded | SearchPhase::Exhausted => true,
            SearchPhase::Initialized | SearchPhase::Running => false,
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn frontier(&self) -> &F {
        &self.frontier
    }

    /// Same as the expanded total in `stats`.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    /// Plan to the goal state once the search succeeded
    pub fn plan(&self) -> Option<Plan> {
        self.solution.as_ref().map(|state| state.extract_plan())
    }

    pub fn outcome(&self) -> SearchOutcome {
        match self.phase {
            SearchPhase::Succeeded => SearchOutcome::Solved(self.plan().unwrap_or_default()),
            SearchPhase::Exhausted => SearchOutcome::Exhausted,
            SearchPhase::Initialized | SearchPhase::Running => SearchOutcome::Interrupted,
        }
    }

    /// One pop, goal test and expansion.
    ///
    /// Does nothing once the search is finished.
    pub fn step(&mut self) -> Result<SearchPhase, SearchErr> {
        if self.is_finished() {
            return Ok(self.phase);
        }
        self.phase = SearchPhase::Running;

        if self.frontier.is_empty() {
            debug!("Frontier empty, no solution");
            self.phase = SearchPhase::Exhausted;
            return Ok(self.phase);
        }

        let cur = self.frontier.pop()?;

        if self.goal.is_goal(&cur) {
            debug!("Solved at depth {}, extracting plan", cur.g());
            self.solution = Some(cur);
            self.phase = SearchPhase::Succeeded;
            return Ok(self.phase);
        }

        // goal states are popped but not expanded
        self.expansions += 1;

        if self.stats.add_expanded(&cur) && self.print_status {
            info!("Expanded new depth: {}", cur.g());
            info!("{:?}", self.stats);
        }

        // insert before expanding so children equal to their parent are caught
        self.explored.insert(Rc::clone(&cur));
        for child in self.successors.expand(&cur) {
            self.stats.add_created(&child);
            if self.explored.contains(&child) || self.frontier.contains(&child) {
                self.stats.add_duplicate(&child);
                continue;
            }
            self.frontier.add(Rc::new(child))?;
        }

        if self.expansions % PROGRESS_INTERVAL == 0 {
            self.log_progress();
        }

        Ok(self.phase)
    }

    /// Steps until a solution is found or the state space is exhausted.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchErr> {
        while !self.is_finished() {
            self.step()?;
        }
        self.log_progress();
        Ok(self.outcome())
    }

    /// Like `run` but gives up after `max_expansions` pops.
    /// Calling it again continues where it stopped.
    pub fn run_with_budget(&mut self, max_expansions: u64) -> Result<SearchOutcome, SearchErr> {
        let mut done = 0;
        while !self.is_finished() {
            if done >= max_expansions && !self.frontier.is_empty() {
                debug!("Expansion budget of {} used up", max_expansions);
                return Ok(SearchOutcome::Interrupted);
            }
            self.step()?;
            done += 1;
        }
        self.log_progress();
        Ok(self.outcome())
    }

    fn log_progress(&self) {
        info!(
            "Expanded: {}, explored: {}, frontier: {}, generated: {}, time: {:.3} s",
            self.expansions.separated_string(),
            self.explored.len().separated_string(),
            self.frontier.size().separated_string(),
            self.stats.total_created().separated_string(),
            self.started.elapsed().as_secs_f64(),
        );
    }
}

impl<F, S> Debug for GraphSearch<'_, F, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "phase: {:?}", self.phase)?;
        writeln!(f, "explored: {}", self.explored.len())?;
        write!(f, "{:?}", self.stats)
    }
}

/// Builds the frontier for `config`.
///
/// Heuristics are preprocessed here, before they are handed over to the frontier.
pub fn build_frontier<'a>(
    config: &SearchConfig,
    level: &Level,
) -> Result<Box<dyn Frontier<'a> + 'a>, SearchErr> {
    let evaluation = match config.strategy {
        Strategy::Bfs => return Ok(Box::new(BfsFrontier::new())),
        Strategy::Dfs => return Ok(Box::new(DfsFrontier::new())),
        Strategy::Greedy => Evaluation::Greedy,
        Strategy::AStar => Evaluation::AStar,
        Strategy::WeightedAStar => Evaluation::WeightedAStar(config.weight),
    };

    let mut heuristic: Box<dyn Heuristic> = match config.heuristic {
        HeuristicKind::GoalCount => Box::new(GoalCount::new()),
        HeuristicKind::Advanced => Box::new(Advanced::new()),
        HeuristicKind::Matching => Box::new(Matching::new()),
    };
    debug!("Preprocessing for {} heuristic", heuristic.name());
    heuristic.preprocess(level)?;
    debug!("Preprocessed");

    Ok(Box::new(BestFirstFrontier::new(evaluation, heuristic)))
}

pub struct SolverOk {
    pub outcome: SearchOutcome,
    pub stats: Stats,
    pub config: SearchConfig,
}

impl SolverOk {
    fn new(outcome: SearchOutcome, stats: Stats, config: SearchConfig) -> Self {
        SolverOk {
            outcome,
            stats,
            config,
        }
    }

    pub fn plan(&self) -> Option<&Plan> {
        match self.outcome {
            SearchOutcome::Solved(ref plan) => Some(plan),
            SearchOutcome::Exhausted | SearchOutcome::Interrupted => None,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SearchOutcome::Solved(ref plan) => writeln!(f, "{}: {}", self.config, plan.len())?,
            SearchOutcome::Exhausted => writeln!(f, "No solution")?,
            SearchOutcome::Interrupted => writeln!(f, "Interrupted")?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Problem {
    fn solve(&self, config: &SearchConfig) -> Result<SolverOk, SearchErr> {
        let frontier = build_frontier(config, self.level())?;
        let mut search = GraphSearch::new(
            self.initial_state(),
            self.goal().clone(),
            frontier,
            HospitalSuccessors::new(),
        )?
        .with_print_status(config.print_status);

        let outcome = match config.max_expansions {
            Some(max) => search.run_with_budget(max)?,
            None => search.run()?,
        };
        Ok(SolverOk::new(outcome, search.stats().clone(), *config))
    }
}
