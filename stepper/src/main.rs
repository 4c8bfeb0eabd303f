use clap::{Parser, Subcommand};
use fnv::FnvHashMap;
use rand::{rngs::StdRng, Rng, SeedableRng};
use stepped_pathfinding::{prelude::*, SearchConfig};
use std::{
    error::Error,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

/// Watch A* and Greedy Best-First search step by step
#[derive(Parser)]
#[command(name = "stepper", version, about)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single Search on a graph file and print every Step
    Run {
        /// the graph file to load
        graph: PathBuf,
        /// `astar` or `best-first`
        #[arg(short, long, default_value_t = Strategy::AStar)]
        strategy: Strategy,
        /// the start Node, counting from 1
        #[arg(long, default_value_t = 1)]
        start: NodeID,
        /// the goal Node, counting from 1. Defaults to the last Node
        #[arg(long)]
        goal: Option<NodeID>,
        /// milliseconds to wait between two Steps
        #[arg(short, long, default_value_t = 0)]
        delay: u64,
        /// only print expansions and the result
        #[arg(long)]
        coarse: bool,
    },
    /// Compare the Paths of A* and Best-First on random graphs
    Compare {
        /// number of graphs to generate
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        /// number of Nodes per graph
        #[arg(long, default_value_t = 2000, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        nodes: usize,
        /// seed for the graph generator
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Run {
            graph,
            strategy,
            start,
            goal,
            delay,
            coarse,
        } => {
            let graph = Graph::load(&graph)?;
            let goal = goal.unwrap_or(graph.node_count() as NodeID);
            run(&graph, strategy, start, goal, Duration::from_millis(delay), coarse)
        }
        Command::Compare {
            rounds,
            nodes,
            seed,
        } => {
            compare(rounds, nodes, seed.unwrap_or_else(rand::random));
            Ok(())
        }
    }
}

/// converts a Node label as shown to the user into a NodeID
fn from_label(label: NodeID) -> Result<NodeID, String> {
    label
        .checked_sub(1)
        .ok_or_else(|| "Nodes are counted from 1".to_owned())
}

fn label(node: NodeID) -> NodeID {
    node + 1
}

fn run(
    graph: &Graph,
    strategy: Strategy,
    start: NodeID,
    goal: NodeID,
    delay: Duration,
    coarse: bool,
) -> Result<(), Box<dyn Error>> {
    let config = SearchConfig {
        strategy,
        frontier_steps: !coarse,
        size_hint: graph.node_count(),
    };
    let mut search = Search::with_config(graph, from_label(start)?, Some(from_label(goal)?), config)?;

    println!(
        "{} from {} to {} on {} nodes, {} edges",
        strategy,
        start,
        goal,
        graph.node_count(),
        graph.edge_count()
    );

    for step in search.steps() {
        let step = step?;
        match &step.kind {
            StepKind::Started => println!("Ready"),
            StepKind::Expanded(node) => print!("expand {:<6} ", label(*node)),
            StepKind::FrontierUpdated => print!("{:<13}", ""),
            StepKind::Found(_) | StepKind::Exhausted => {}
        }
        println!(
            "Expanded: {} Frontier: {}",
            step.closed.len(),
            step.frontier.len()
        );

        match step.kind {
            StepKind::Found(path) => {
                println!("Path found ({} nodes)", path.len());
                let labels: Vec<String> = path.iter().map(|&n| label(n).to_string()).collect();
                println!("{} (cost {:.3})", labels.join(" -> "), path.cost());
            }
            StepKind::Exhausted => println!("No path found"),
            _ => {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
        }
    }
    Ok(())
}

/// Nodes on a jittered grid, connected to their right and lower neighbors, with some connections
/// missing
fn random_graph(rng: &mut StdRng, len: usize) -> Graph {
    let side = (len as f64).sqrt().ceil() as NodeID;
    let positions = (0..len as NodeID)
        .map(|i| {
            let (x, y) = (i % side, i / side);
            (
                x as f64 * 10.0 + rng.gen_range(0.0..8.0),
                y as f64 * 10.0 + rng.gen_range(0.0..8.0),
            )
        })
        .collect();

    let mut pairs = vec![];
    for i in 0..len as NodeID {
        if i % side + 1 < side && i + 1 < len as NodeID && rng.gen_bool(0.8) {
            pairs.push((i, i + 1));
        }
        if i + side < len as NodeID && rng.gen_bool(0.8) {
            pairs.push((i, i + side));
        }
    }
    // random graphs are built from valid input only
    Graph::new(positions, pairs).unwrap()
}

fn compare(rounds: usize, nodes: usize, seed: u64) {
    println!("seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let strategies = [Strategy::AStar, Strategy::BestFirst];
    let mut results: FnvHashMap<Strategy, Vec<(u128, Option<f64>, usize)>> =
        strategies.iter().map(|s| (*s, vec![])).collect();

    for _ in 0..rounds {
        let graph = random_graph(&mut rng, nodes);
        let corners = [0, nodes as NodeID - 1];

        for &strategy in &strategies {
            let results = results.entry(strategy).or_default();
            for (start, goal) in [(corners[0], corners[1]), (corners[1], corners[0])] {
                let start_time = Instant::now();
                let mut search = Search::with_config(&graph, start, Some(goal), strategy.into())
                    .unwrap();
                let outcome = search.run().unwrap();
                let dt = start_time.elapsed().as_nanos();
                results.push((dt, outcome.path().map(|p| p.cost()), search.expanded()));
            }
        }
    }

    let best: Vec<Option<f64>> = results[&Strategy::AStar].iter().map(|r| r.1).collect();

    for strategy in strategies {
        let results = &results[&strategy];
        let times = results.iter().map(|r| r.0);
        let min_time = times.clone().min().unwrap_or(0) as f64 / 1_000_000.0;
        let max_time = times.clone().max().unwrap_or(0) as f64 / 1_000_000.0;
        let avg_time = times.sum::<u128>() as f64 / results.len().max(1) as f64 / 1_000_000.0;
        let avg_expanded =
            results.iter().map(|r| r.2).sum::<usize>() as f64 / results.len().max(1) as f64;

        let costs: Vec<f64> = results
            .iter()
            .zip(&best)
            .filter_map(|(r, best)| Some(best.as_ref()? / r.1?))
            .collect();
        let min_cost = costs.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max_cost = costs.iter().fold(0.0_f64, |a, &b| a.max(b));
        let avg_cost = costs.iter().sum::<f64>() / costs.len().max(1) as f64;

        println!(
            "{:<10} | {:.3}ms - {:.3}ms; {:.3}ms | {:.1} expanded | {:.2}% - {:.2}%; {:.2}%",
            strategy,
            min_time,
            max_time,
            avg_time,
            avg_expanded,
            min_cost * 100.0,
            max_cost * 100.0,
            avg_cost * 100.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_needs_nodes() {
        assert!(Cli::try_parse_from(["stepper", "compare", "--nodes", "0"]).is_err());
        assert!(Cli::try_parse_from(["stepper", "compare", "--nodes", "1"]).is_ok());
    }

    #[test]
    fn labels() {
        assert_eq!(from_label(1), Ok(0));
        assert!(from_label(0).is_err());
        assert_eq!(label(0), 1);
    }
}
