use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use warren::generators;
use warren::grid::Grid;
use warren::pathing::{self, SolveReport};
use warren::stepping::Silent;

/// UI policy, not a core invariant: the core only enforces a lower bound on
/// the grid dimensions.
const MAX_DIMENSION: u32 = 50;
const MIN_DIMENSION: u32 = 5;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Algorithm {
    Backtracker,
    Prim,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Solver {
    Bfs,
    Dfs,
    None,
}

/// Carve a maze, optionally solve it, and print the result.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid width in cells (5..=50, even values are decremented to odd)
    #[arg(long, default_value_t = 21)]
    width: u32,

    /// Grid height in cells (5..=50, even values are decremented to odd)
    #[arg(long, default_value_t = 21)]
    height: u32,

    /// Maze generation algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::Backtracker)]
    algorithm: Algorithm,

    /// Path search to run on the carved maze
    #[arg(long, value_enum, default_value_t = Solver::Bfs)]
    solver: Solver,

    /// Random seed, for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,
}

/// Bounds are enforced here rather than in the core; even values are nudged
/// down so the carving lattice aligns.
fn clamp_dimension(requested: u32) -> anyhow::Result<u32> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&requested) {
        anyhow::bail!("dimension {} is outside {}..={}",
                      requested,
                      MIN_DIMENSION,
                      MAX_DIMENSION);
    }
    Ok(if requested % 2 == 0 { requested - 1 } else { requested })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let width = clamp_dimension(args.width).context("invalid --width")?;
    let height = clamp_dimension(args.height).context("invalid --height")?;

    let mut grid = Grid::new(width, height)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match args.algorithm {
        Algorithm::Backtracker => {
            generators::recursive_backtracker(&mut grid, &mut rng, &mut Silent)
        }
        Algorithm::Prim => generators::randomized_prim(&mut grid, &mut rng, &mut Silent),
    }
    info!("generated a {}x{} maze with {:?}", width, height, args.algorithm);

    let report = match args.solver {
        Solver::Bfs => Some(pathing::breadth_first(&mut grid, &mut Silent)),
        Solver::Dfs => Some(pathing::depth_first(&mut grid, &mut rng, &mut Silent)),
        Solver::None => None,
    };

    print!("{}", grid);
    if let Some(report) = report {
        print_report(args.solver, &report);
    }

    Ok(())
}

fn print_report(solver: Solver, report: &SolveReport) {
    if report.path_found {
        println!("{:?}: visited {} cells in {} steps, path length {}",
                 solver,
                 report.cells_visited,
                 report.steps_taken,
                 report.path_length.unwrap_or(0));
    } else {
        println!("{:?}: no path found after {} steps ({} cells visited)",
                 solver,
                 report.steps_taken,
                 report.cells_visited);
    }
}
