#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to watch A* and Greedy Best-First search at work.
//!
//! ## Introduction
//! Most Pathfinding implementations are a single function call: a start and a goal go in, a Path
//! comes out. That is the right thing when only the Path matters, but it hides everything that
//! makes these algorithms interesting: which Nodes are expanded in which order, how the frontier
//! grows, and why A* ends up with a cheaper Path than Greedy Best-First on the same Graph.
//!
//! This crate turns the Search into a value. A [`Search`] is created on a [`Graph`] and then
//! advanced one [`Step`] at a time by whoever drives it, be it an animation, a logger or a test.
//! Every Step carries a snapshot of the closed set and the frontier, so the driver never needs to
//! know how the Search works internally.
//!
//! Graphs are undirected and the weight of an Edge is the Euclidean distance between the
//! positions of its endpoints. The straight-line distance to the goal is used as the heuristic,
//! which is consistent on such Graphs, so A* always finds the cheapest Path.
//!
//! ## Examples
//! Creating a Graph:
//! ```
//! use stepped_pathfinding::prelude::*;
//!
//! //  3 ---- 2
//! //  |    / |
//! //  |  /   |
//! //  0 ---- 1
//! let graph = Graph::new(
//!     vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], // positions
//!     [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],             // edges
//! )
//! .unwrap();
//! ```
//! Graphs can also be read from a text format, see [`Graph::from_str`](std::str::FromStr) and
//! [`Graph::load`].
//!
//! ### Stepping through a Search
//! ```
//! # use stepped_pathfinding::prelude::*;
//! # let graph = Graph::new(
//! #     vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
//! #     [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
//! # )
//! # .unwrap();
//! let mut search = Search::new(&graph, 0, Some(2), Strategy::AStar).unwrap();
//!
//! loop {
//!     let step = search.step().unwrap();
//!     println!(
//!         "expanded: {} frontier: {}",
//!         step.closed.len(),
//!         step.frontier.len()
//!     );
//!     match step.kind {
//!         StepKind::Found(path) => {
//!             assert_eq!(path.nodes(), &[0, 2]);
//!             break;
//!         }
//!         StepKind::Exhausted => panic!("no path"),
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ### Finding a Path directly
//! ```
//! # use stepped_pathfinding::prelude::*;
//! # let graph = Graph::new(
//! #     vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
//! #     [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
//! # )
//! # .unwrap();
//! let path = graph.find_path(1, 3, Strategy::BestFirst).unwrap();
//!
//! assert_eq!(path.unwrap().nodes(), &[1, 0, 3]);
//! ```
//!
//! ### Configuration
//! [`Search::with_config`] takes a [`SearchConfig`] for more control over the produced Steps.
//! ```
//! use stepped_pathfinding::{prelude::*, SearchConfig};
//! # let graph = Graph::new(
//! #     vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
//! #     [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
//! # )
//! # .unwrap();
//!
//! let config = SearchConfig {
//!     frontier_steps: false,
//!     ..SearchConfig::BEST_FIRST
//! };
//! let mut search = Search::with_config(&graph, 0, Some(2), config).unwrap();
//!
//! // only expansions and the final Step
//! assert_eq!(search.steps().count(), 4);
//! ```
//!
//! ## Crate Features
//! - `parallel` (default): enables [`Graph::find_paths_parallel`] using `rayon`.

/// The Type used to reference a Node in the Graph
pub type NodeID = u32;

/// A position on the plane
pub type Point = (f64, f64);

mod node_id;
pub use node_id::{BuildNodeIDHasher, NodeIDHasher, NodeIDMap, NodeIDSet};

mod error;
pub use error::{GraphError, ParseStrategyError, SearchError};

pub mod graph;
pub use graph::Graph;

pub mod open_set;

pub mod path;
pub use path::Path;

mod search;
pub use search::{Outcome, Search, SearchConfig, SearchState, Step, StepKind, Steps, Strategy};

/// The prelude for this crate.
pub mod prelude {
    pub use crate::{
        Graph, NodeID, Outcome, Path, Point, Search, SearchState, Step, StepKind, Strategy,
    };
}
