use std::env;
use std::process;

use clap::{App, Arg, ArgGroup, ArgMatches};
use env_logger::Env;
use log::debug;

use hospital_search::config::{HeuristicKind, SearchConfig, Strategy};
use hospital_search::solver::SearchOutcome;
use hospital_search::{LoadLevel, Solve};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = App::new("hospital-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds plans for hospital levels using graph search")
        .arg(
            Arg::with_name("bfs")
                .short("b")
                .long("bfs")
                .help("breadth-first search (default)"),
        )
        .arg(
            Arg::with_name("dfs")
                .short("d")
                .long("dfs")
                .help("depth-first search"),
        )
        .arg(
            Arg::with_name("greedy")
                .short("g")
                .long("greedy")
                .help("greedy best-first search"),
        )
        .arg(
            Arg::with_name("astar")
                .short("a")
                .long("astar")
                .help("A* search"),
        )
        .arg(
            Arg::with_name("wastar")
                .short("w")
                .long("wastar")
                .help("weighted A* search"),
        )
        .group(ArgGroup::with_name("strategy").args(&["bfs", "dfs", "greedy", "astar", "wastar"]))
        .arg(
            Arg::with_name("heuristic")
                .short("e")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&HeuristicKind::NAMES)
                .default_value("goalcount")
                .help("heuristic used by informed strategies"),
        )
        .arg(
            Arg::with_name("weight")
                .long("weight")
                .takes_value(true)
                .default_value("5")
                .validator(is_weight)
                .help("weight of the heuristic for weighted A*"),
        )
        .arg(
            Arg::with_name("max-expansions")
                .long("max-expansions")
                .takes_value(true)
                .validator(is_number)
                .help("give up after expanding this many states"),
        )
        .arg(
            Arg::with_name("status")
                .short("s")
                .long("status")
                .help("log stats whenever a new depth is reached"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let config = config_from_matches(&matches);
    let path = matches.value_of("file").unwrap_or_default();

    let problem = path.load_level().unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => eprintln!("Can't load level {} in {}: {}", path, dir.display(), err),
            Err(_) => eprintln!("Can't load level {}: {}", path, err),
        }
        process::exit(1);
    });
    debug!("Loaded level:\n{:?}", problem.level());

    println!("Solving {} using {}...", path, config);
    let solver_ok = problem.solve(&config).unwrap_or_else(|err| {
        eprintln!("Search failed: {}", err);
        process::exit(1);
    });

    match solver_ok.outcome {
        SearchOutcome::Solved(ref plan) => {
            println!("Found solution:");
            print!("{}", plan);
            println!("Steps: {}", plan.len());
            println!("Box actions: {}", plan.box_action_cnt());
        }
        SearchOutcome::Exhausted => println!("No solution"),
        SearchOutcome::Interrupted => println!("Gave up after the maximum number of expansions"),
    }
    println!();
    print!("{}", solver_ok.stats);
}

fn config_from_matches(matches: &ArgMatches<'_>) -> SearchConfig {
    let strategy = if matches.is_present("dfs") {
        Strategy::Dfs
    } else if matches.is_present("greedy") {
        Strategy::Greedy
    } else if matches.is_present("astar") {
        Strategy::AStar
    } else if matches.is_present("wastar") {
        Strategy::WeightedAStar
    } else {
        Strategy::Bfs
    };
    // validated by clap
    let heuristic = matches
        .value_of("heuristic")
        .and_then(|h| h.parse().ok())
        .unwrap_or(HeuristicKind::GoalCount);
    let weight = matches
        .value_of("weight")
        .and_then(|w| w.parse().ok())
        .unwrap_or(5);
    let max_expansions = matches
        .value_of("max-expansions")
        .and_then(|m| m.parse().ok());

    SearchConfig {
        strategy,
        heuristic,
        weight,
        max_expansions,
        print_status: matches.is_present("status"),
    }
}

fn is_weight(value: String) -> Result<(), String> {
    value
        .parse::<u32>()
        .map(|_| ())
        .map_err(|_| format!("{} is not a weight between 0 and {}", value, u32::max_value()))
}

fn is_number(value: String) -> Result<(), String> {
    value
        .parse::<u64>()
        .map(|_| ())
        .map_err(|_| format!("{} is not a non-negative number", value))
}
