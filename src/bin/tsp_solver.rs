use std::{fmt::Display, str::FromStr, time::Duration};

use ::log::{LevelFilter, info};
use anyhow::{Context, anyhow};
use itertools::Itertools;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;
use structopt::StructOpt;
use tsp_exact::{
    graph::instances, log::build_logger_for_verbosity, prelude::*, utils::signal_handling,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SolverChoice {
    Ucs,
    Bnb,
    Both,
}

impl FromStr for SolverChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ucs" => Ok(SolverChoice::Ucs),
            "bnb" | "b&b" => Ok(SolverChoice::Bnb),
            "both" => Ok(SolverChoice::Both),
            _ => Err(format!("unknown solver {s:?}; expected ucs, bnb or both")),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
enum Solver {
    #[serde(rename = "ucs")]
    UniformCost,
    #[serde(rename = "bnb")]
    BranchAndBound,
}

impl SolverChoice {
    fn solvers(self) -> &'static [Solver] {
        match self {
            SolverChoice::Ucs => &[Solver::UniformCost],
            SolverChoice::Bnb => &[Solver::BranchAndBound],
            SolverChoice::Both => &[Solver::UniformCost, Solver::BranchAndBound],
        }
    }
}

/// Solves the twenty city road network (default) or a random instance exactly
#[derive(Debug, StructOpt)]
struct Opts {
    /// Solve a random G(n,p) instance with this many nodes instead
    #[structopt(short = "n", long)]
    random: Option<NumNodes>,

    /// Edge probability of the random instance
    #[structopt(short = "p", long, default_value = "0.5")]
    density: f64,

    #[structopt(short, long, default_value = "1")]
    seed: u64,

    /// Orient the edges of the random instance
    #[structopt(short, long)]
    directed: bool,

    /// Start vertex; defaults to the first vertex
    #[structopt(long)]
    start: Option<String>,

    /// ucs, bnb or both
    #[structopt(long, default_value = "both")]
    solver: SolverChoice,

    #[structopt(long)]
    max_expansions: Option<u64>,

    #[structopt(long)]
    timeout_ms: Option<u64>,

    /// Print outcomes and statistics as JSON lines
    #[structopt(long)]
    json: bool,

    /// Print the 0/1 adjacency matrix before solving
    #[structopt(long)]
    print_matrix: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

impl Opts {
    fn limits(&self) -> SearchLimits {
        let mut limits =
            SearchLimits::unlimited().with_cancel_flag(signal_handling::cancel_flag());
        if let Some(max) = self.max_expansions {
            limits = limits.with_max_expansions(max);
        }
        if let Some(ms) = self.timeout_ms {
            limits = limits.with_timeout(Duration::from_millis(ms));
        }
        limits
    }
}

#[derive(Serialize)]
struct Report<V> {
    solver: Solver,
    outcome: SearchOutcome<V>,
    statistics: SearchStatistics,
}

fn print_adjacency_matrix<V: Label + Display>(graph: &WeightedGraph<V>) {
    let (matrix, order) = graph.adjacency_matrix();
    println!("   {}", order.iter().map(|v| format!("{v:>3}")).join(""));
    for (v, row) in order.iter().zip(matrix) {
        println!(
            "{v:>3}{}",
            row.into_iter().map(|b| format!("{:>3}", b as u8)).join("")
        );
    }
}

fn solve<V>(opts: &Opts, graph: &WeightedGraph<V>, start: &V) -> anyhow::Result<()>
where
    V: Label + Display + Serialize + Send + Sync + 'static,
{
    if opts.print_matrix {
        print_adjacency_matrix(graph);
    }

    let start = graph.index_of(start)?;

    for &solver in opts.solver.solvers() {
        if signal_handling::received_ctrl_c() {
            info!("Skip {solver:?} after Ctrl-C");
            break;
        }

        let (outcome, statistics) = match solver {
            Solver::UniformCost => {
                let mut algo = UniformCostSearch::new(graph, start).with_limits(opts.limits());
                (algo.solve(), algo.statistics().clone())
            }
            Solver::BranchAndBound => {
                let mut algo = BranchAndBound::new(graph, start).with_limits(opts.limits());
                (algo.solve(), algo.statistics().clone())
            }
        };
        let outcome = outcome.map_vertices(|u| graph.label_of(u).clone());

        if opts.json {
            let report = Report {
                solver,
                outcome,
                statistics,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            match solver {
                Solver::UniformCost => println!("-----Uniform cost search-----"),
                Solver::BranchAndBound => println!("-----Branch and bound-----"),
            }
            println!("{outcome}");
            print!("{statistics}");
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);
    signal_handling::initialize();

    match opts.random {
        None => {
            let graph = instances::twenty_cities()?;
            let start = match opts.start.as_deref() {
                None => *graph
                    .vertices()
                    .first()
                    .ok_or_else(|| anyhow!("instance has no vertices"))?,
                Some(label) => *graph
                    .vertices()
                    .iter()
                    .find(|&&v| v == label)
                    .ok_or_else(|| anyhow!("unknown start vertex {label:?}"))?,
            };
            info!("Solve the twenty city instance from {start}");
            solve(&opts, &graph, &start)
        }
        Some(n) => {
            let mut rng = Pcg64::seed_from_u64(opts.seed);
            let graph =
                WeightedGraph::<Node>::random_gnp(&mut rng, n, opts.density, 1..100, opts.directed);
            let start = match opts.start.as_deref() {
                None => 0,
                Some(label) => label
                    .parse::<Node>()
                    .with_context(|| format!("start vertex {label:?} is not a node index"))?,
            };
            info!(
                "Solve a random instance with n={} m={} from {start}",
                graph.number_of_nodes(),
                graph.number_of_edges()
            );
            solve(&opts, &graph, &start)
        }
    }
}
