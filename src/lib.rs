// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod frontier;
pub mod goal;
pub mod heuristic;
pub mod level;
pub mod moves;
pub mod parser;
pub mod solver;
pub mod state;
pub mod successors;

mod fs;
mod vec2d;

use std::error::Error;

use crate::config::SearchConfig;
use crate::parser::Problem;
use crate::solver::{SearchErr, SolverOk};

pub trait LoadLevel {
    fn load_level(&self) -> Result<Problem, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, config: &SearchConfig) -> Result<SolverOk, SearchErr>;
}
