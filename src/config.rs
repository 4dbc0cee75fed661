use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    Greedy,
    AStar,
    WeightedAStar,
}

impl Strategy {
    pub const NAMES: [&'static str; 5] = ["bfs", "dfs", "greedy", "astar", "wastar"];

    /// Whether the frontier needs a heuristic.
    pub fn is_informed(self) -> bool {
        match self {
            Strategy::Bfs | Strategy::Dfs => false,
            Strategy::Greedy | Strategy::AStar | Strategy::WeightedAStar => true,
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::Bfs => write!(f, "bfs"),
            Strategy::Dfs => write!(f, "dfs"),
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::AStar => write!(f, "astar"),
            Strategy::WeightedAStar => write!(f, "wastar"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "greedy" => Ok(Strategy::Greedy),
            "astar" => Ok(Strategy::AStar),
            "wastar" => Ok(Strategy::WeightedAStar),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    GoalCount,
    Advanced,
    Matching,
}

impl HeuristicKind {
    pub const NAMES: [&'static str; 3] = ["goalcount", "advanced", "matching"];
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::GoalCount => write!(f, "goalcount"),
            HeuristicKind::Advanced => write!(f, "advanced"),
            HeuristicKind::Matching => write!(f, "matching"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goalcount" => Ok(HeuristicKind::GoalCount),
            "advanced" => Ok(HeuristicKind::Advanced),
            "matching" => Ok(HeuristicKind::Matching),
            _ => Err(format!("Unknown heuristic: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Ignored by uninformed strategies
    pub heuristic: HeuristicKind,
    /// Only used by weighted A*
    pub weight: u32,
    /// Stop after this many expansions
    pub max_expansions: Option<u64>,
    /// Log stats every time a new depth is reached
    pub print_status: bool,
}

impl SearchConfig {
    pub fn new(strategy: Strategy, heuristic: HeuristicKind) -> Self {
        SearchConfig {
            strategy,
            heuristic,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            strategy: Strategy::Bfs,
            heuristic: HeuristicKind::GoalCount,
            weight: 5,
            max_expansions: None,
            print_status: false,
        }
    }
}

impl Display for SearchConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.strategy.is_informed() {
            write!(f, "{}", self.strategy)
        } else if self.strategy == Strategy::WeightedAStar {
            write!(f, "{} ({}, w = {})", self.strategy, self.heuristic, self.weight)
        } else {
            write!(f, "{} ({})", self.strategy, self.heuristic)
        }
    }
}
