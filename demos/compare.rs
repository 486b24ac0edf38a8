use maze_pathfinding::metrics::{MetricsConfig, PathMetrics};
use maze_pathfinding::{generate, MazeConfig, MazeSolver, SolverKind};
use std::time::Instant;

// Generates one maze and runs every solver from the start in the top-left corner to the goal in
// the bottom-right corner, printing how long each search took and how long the path is.
//
// Usage: cargo run --example compare [size] [seed]

fn main() {
    let mut args = std::env::args().skip(1);
    let size = args.next().and_then(|s| s.parse().ok()).unwrap_or(101);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let config = MazeConfig::new(size);
    let grid = match generate(&config, seed) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if size <= 41 {
        println!("{}", grid);
    }
    let start = grid.start().unwrap();
    let goal = config.bottom_right();
    let metrics_config = MetricsConfig::default();

    for kind in SolverKind::ALL {
        let solver = kind.solver();
        let begin = Instant::now();
        let path = solver.find_path(&grid, start, goal);
        let elapsed = begin.elapsed();
        match path {
            Some(path) => {
                let metrics = PathMetrics::compute(&path, size, &metrics_config);
                println!(
                    "{:>13}: {:>9.3?}, {} cells, {:.2} m, {:.2} min",
                    solver.name(),
                    elapsed,
                    path.len(),
                    metrics.distance_m,
                    metrics.traversal_time_s / 60.0
                );
            }
            None => println!("{:>13}: no path", solver.name()),
        }
    }
}
