use criterion::{criterion_group, criterion_main, Criterion};

use hospital_search::config::{HeuristicKind, SearchConfig, Strategy};
use hospital_search::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_two_rooms_bfs(c: &mut Criterion) {
    // joint actions of 2 agents
    bench_level(c, Strategy::Bfs, HeuristicKind::GoalCount, "levels/two-rooms.lvl", 50);
}

#[allow(unused)]
fn bench_two_rooms_greedy(c: &mut Criterion) {
    bench_level(c, Strategy::Greedy, HeuristicKind::Matching, "levels/two-rooms.lvl", 100);
}

#[allow(unused)]
fn bench_box_in_room_astar(c: &mut Criterion) {
    bench_level(c, Strategy::AStar, HeuristicKind::Advanced, "levels/box-in-room.lvl", 100);
}

fn bench_level(
    c: &mut Criterion,
    strategy: Strategy,
    heuristic: HeuristicKind,
    level_path: &str,
    samples: usize,
) {
    let problem = level_path.load_level().unwrap();
    let config = SearchConfig::new(strategy, heuristic);

    let mut group = c.benchmark_group(config.to_string());
    group.sample_size(samples);
    group.bench_function(level_path, |b| {
        b.iter(|| criterion::black_box(problem.solve(criterion::black_box(&config))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_two_rooms_bfs,
    bench_two_rooms_greedy,
    bench_box_in_room_astar,
);
criterion_main!(benches);
