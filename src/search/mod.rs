//! The step-by-step Search engine.

mod config;
pub use config::{SearchConfig, Strategy};

mod step;
pub use step::{Outcome, SearchState, Step, StepKind};

mod batch;

use crate::{
    node_id::{node_id_map_with_cap, node_id_set_with_cap},
    open_set::OpenSet,
    path::{reconstruct, Cost},
    Graph, NodeID, NodeIDMap, NodeIDSet, Path, SearchError,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Ready,
    /// the next Step takes a Node from the frontier
    Select,
    /// the next Step handles the Node that was just expanded, reached at the given Cost
    Expanded(NodeID, Cost),
    Found,
    Exhausted,
}

/// A Search from a start Node to a goal Node that advances one Step at a time.
///
/// The Search never runs on its own. Every call to [`step`](Search::step) does a single unit of
/// work and returns a [`Step`] with a snapshot of the closed set and the frontier, so that a
/// driver (a visualization, a logger, a test) can observe the Search as it happens.
///
/// For a Search with `n` expansions the Steps are:
/// 1. [`StepKind::Started`]: the frontier only contains the start
/// 2. [`StepKind::Expanded`]: a Node was taken from the frontier and closed
/// 3. [`StepKind::FrontierUpdated`]: its neighbors were added to the frontier
///    (skipped if [`SearchConfig::frontier_steps`] is off)
/// 4. 2 and 3 repeat until either
///    - the goal was expanded: [`StepKind::Found`] with the Path
///    - the frontier is empty: [`StepKind::Exhausted`]
///
/// Calling `step` after that returns [`SearchError::Finished`].
///
/// ## Examples
/// ```
/// use stepped_pathfinding::prelude::*;
///
/// //  3 ---- 2
/// //  |    / |
/// //  |  /   |
/// //  0 ---- 1
/// let graph = Graph::new(
///     vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
///     [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
/// )
/// .unwrap();
///
/// let mut search = Search::new(&graph, 0, Some(2), Strategy::AStar).unwrap();
///
/// let first = search.step().unwrap();
/// assert_eq!(first.kind, StepKind::Started);
/// assert!(first.frontier.contains(&0));
///
/// let second = search.step().unwrap();
/// assert_eq!(second.current(), Some(0));
///
/// while !search.is_terminal() {
///     search.step().unwrap();
/// }
/// assert_eq!(search.state(), SearchState::Found);
/// assert!(search.step().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Search<'g> {
    graph: &'g Graph,
    start: NodeID,
    goal: Option<NodeID>,
    config: SearchConfig,
    open: OpenSet,
    came_from: NodeIDMap<NodeID>,
    g_cost: NodeIDMap<Cost>,
    closed: NodeIDSet,
    frontier: NodeIDSet,
    phase: Phase,
    expanded: usize,
}

impl<'g> Search<'g> {
    /// Creates a new Search on `graph` from `start` to `goal` with the default config for
    /// `strategy`.
    ///
    /// `start == goal` is allowed and finds the Path `[start]`. Without a `goal` the heuristic
    /// is always `0` and the Search explores every Node reachable from `start` before ending
    /// with [`StepKind::Exhausted`].
    ///
    /// ## Errors
    /// [`SearchError::NodeOutOfRange`] if `start` or `goal` are not part of `graph`.
    pub fn new(
        graph: &'g Graph,
        start: NodeID,
        goal: Option<NodeID>,
        strategy: Strategy,
    ) -> Result<Search<'g>, SearchError> {
        Search::with_config(graph, start, goal, SearchConfig::with_strategy(strategy))
    }

    /// Creates a new Search with the given [`SearchConfig`]. See [`Search::new`].
    pub fn with_config(
        graph: &'g Graph,
        start: NodeID,
        goal: Option<NodeID>,
        config: SearchConfig,
    ) -> Result<Search<'g>, SearchError> {
        for node in std::iter::once(start).chain(goal) {
            if !graph.contains_node(node) {
                return Err(SearchError::NodeOutOfRange {
                    node,
                    len: graph.node_count(),
                });
            }
        }

        let size_hint = config.size_hint;
        let mut search = Search {
            graph,
            start,
            goal,
            config,
            open: OpenSet::with_capacity(size_hint / 2),
            came_from: node_id_map_with_cap(size_hint),
            g_cost: node_id_map_with_cap(size_hint),
            closed: node_id_set_with_cap(size_hint),
            frontier: node_id_set_with_cap(size_hint / 2),
            phase: Phase::Ready,
            expanded: 0,
        };

        search.g_cost.insert(start, 0.0);
        search.open.push(graph.heuristic(start, goal), start, 0.0);
        search.frontier.insert(start);

        log::debug!(
            "new {} search from {} to {:?} on {} nodes",
            config.strategy,
            start,
            goal,
            graph.node_count()
        );

        Ok(search)
    }

    /// Advances the Search by one Step and returns a snapshot of the result.
    ///
    /// ## Errors
    /// - [`SearchError::Finished`] if the Search already produced its terminal Step
    /// - [`SearchError::BrokenParentChain`] if the goal was reached but the Path could not be
    ///   reconstructed. This indicates a bug in the Search.
    pub fn step(&mut self) -> Result<Step, SearchError> {
        match self.phase {
            Phase::Ready => {
                self.phase = Phase::Select;
                Ok(self.snapshot(StepKind::Started))
            }
            Phase::Select => Ok(self.select()),
            Phase::Expanded(node, cost) => self.finish_expansion(node, cost),
            Phase::Found | Phase::Exhausted => Err(SearchError::Finished),
        }
    }

    /// An Iterator over the remaining Steps, ending after the terminal Step (or the first error).
    pub fn steps(&mut self) -> Steps<'_, 'g> {
        Steps {
            search: self,
            failed: false,
        }
    }

    /// Steps the Search until it is finished.
    ///
    /// ## Errors
    /// see [`step`](Search::step)
    pub fn run(&mut self) -> Result<Outcome, SearchError> {
        loop {
            let step = self.step()?;
            match step.kind {
                StepKind::Found(path) => return Ok(Outcome::Found(path)),
                StepKind::Exhausted => return Ok(Outcome::Exhausted),
                _ => {}
            }
        }
    }

    fn select(&mut self) -> Step {
        let entry = match self.open.pop_min(&self.closed) {
            Some(entry) => entry,
            None => {
                self.phase = Phase::Exhausted;
                self.frontier.clear();
                log::debug!(
                    "{} search from {} exhausted after {} expansions",
                    self.config.strategy,
                    self.start,
                    self.expanded
                );
                return self.snapshot(StepKind::Exhausted);
            }
        };

        let node = entry.node;
        self.frontier.remove(&node);
        self.closed.insert(node);
        self.expanded += 1;
        self.phase = Phase::Expanded(node, entry.cost);
        log::trace!(
            "expanding {} (f = {}, g = {})",
            node,
            entry.priority,
            entry.cost
        );

        self.snapshot(StepKind::Expanded(node))
    }

    fn finish_expansion(&mut self, node: NodeID, cost: Cost) -> Result<Step, SearchError> {
        if Some(node) == self.goal {
            let path = self.path_to(node)?;
            log::debug!(
                "{} search found {} after {} expansions",
                self.config.strategy,
                path,
                self.expanded
            );
            self.phase = Phase::Found;
            return Ok(self.snapshot(StepKind::Found(path)));
        }

        match self.config.strategy {
            Strategy::AStar => self.relax_a_star(node),
            Strategy::BestFirst => self.relax_best_first(node, cost),
        }

        if self.config.frontier_steps {
            self.phase = Phase::Select;
            Ok(self.snapshot(StepKind::FrontierUpdated))
        } else {
            Ok(self.select())
        }
    }

    fn relax_a_star(&mut self, node: NodeID) {
        let graph = self.graph;
        let current_cost = self.g_cost.get(&node).copied().unwrap_or(Cost::INFINITY);

        for (other, weight) in graph.neighbors(node) {
            // the heuristic is consistent, so a closed Node already has its best cost
            if self.closed.contains(&other) {
                continue;
            }
            let other_cost = current_cost + weight;
            let known_cost = self.g_cost.get(&other).copied().unwrap_or(Cost::INFINITY);
            if other_cost >= known_cost {
                continue;
            }
            self.g_cost.insert(other, other_cost);
            self.came_from.insert(other, node);

            let priority = other_cost + graph.heuristic(other, self.goal);
            if self.open.contains(other) {
                if self.open.try_improve(other, priority, other_cost) {
                    log::trace!("improved {} to f = {} via {}", other, priority, node);
                }
            } else {
                self.open.push(priority, other, other_cost);
                self.frontier.insert(other);
            }
        }
    }

    /// Best-First does not track costs, `current_cost` is only carried along for the open set
    /// entries.
    fn relax_best_first(&mut self, node: NodeID, current_cost: Cost) {
        let graph = self.graph;

        for (other, weight) in graph.neighbors(node) {
            if self.closed.contains(&other) || self.came_from.contains_key(&other) {
                continue;
            }
            self.came_from.insert(other, node);
            let priority = graph.heuristic(other, self.goal);
            self.open.push(priority, other, current_cost + weight);
            self.frontier.insert(other);
        }
    }

    fn path_to(&self, goal: NodeID) -> Result<Path<NodeID>, SearchError> {
        let nodes = reconstruct(&self.came_from, self.start, goal);
        let cost = match self.graph.path_cost(&nodes) {
            Some(cost) if !nodes.is_empty() => cost,
            _ => {
                log::error!(
                    "parent links from {} do not lead back to {}",
                    goal,
                    self.start
                );
                return Err(SearchError::BrokenParentChain {
                    start: self.start,
                    goal,
                });
            }
        };
        Ok(Path::new(nodes, cost))
    }

    fn snapshot(&self, kind: StepKind) -> Step {
        Step {
            kind,
            closed: self.closed.clone(),
            frontier: self.frontier.clone(),
        }
    }

    /// The phase the Search is in
    pub fn state(&self) -> SearchState {
        match self.phase {
            Phase::Ready => SearchState::Ready,
            Phase::Select | Phase::Expanded(..) => SearchState::Expanding,
            Phase::Found => SearchState::Found,
            Phase::Exhausted => SearchState::Exhausted,
        }
    }

    /// `true` once the terminal Step was produced
    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }

    /// The Graph this Search runs on
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The start Node
    pub fn start(&self) -> NodeID {
        self.start
    }

    /// The goal Node, if there is one
    pub fn goal(&self) -> Option<NodeID> {
        self.goal
    }

    /// The config this Search was created with
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The number of Nodes expanded so far
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// The Nodes that were expanded so far
    pub fn closed(&self) -> &NodeIDSet {
        &self.closed
    }

    /// The Nodes waiting to be expanded
    pub fn frontier(&self) -> &NodeIDSet {
        &self.frontier
    }

    /// The best known predecessor of every discovered Node except the start
    pub fn came_from(&self) -> &NodeIDMap<NodeID> {
        &self.came_from
    }

    /// The best known Cost from the start to `node`. Only tracked by A*, Best-First only knows
    /// the Cost of the start.
    pub fn cost_to(&self, node: NodeID) -> Option<Cost> {
        self.g_cost.get(&node).copied()
    }

    /// The queue of pending Nodes
    pub fn open_set(&self) -> &OpenSet {
        &self.open
    }
}

/// An Iterator over the Steps of a [`Search`]. See [`Search::steps`].
#[derive(Debug)]
pub struct Steps<'s, 'g> {
    search: &'s mut Search<'g>,
    failed: bool,
}

impl Iterator for Steps<'_, '_> {
    type Item = Result<Step, SearchError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.search.is_terminal() {
            return None;
        }
        let step = self.search.step();
        self.failed = step.is_err();
        Some(step)
    }
}

impl std::iter::FusedIterator for Steps<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        Graph::new(
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
        )
        .unwrap()
    }

    fn set(nodes: &[NodeID]) -> NodeIDSet {
        nodes.iter().copied().collect()
    }

    #[test]
    fn out_of_range() {
        let graph = square();
        assert_eq!(
            Search::new(&graph, 4, Some(0), Strategy::AStar).unwrap_err(),
            SearchError::NodeOutOfRange { node: 4, len: 4 }
        );
        assert_eq!(
            Search::new(&graph, 0, Some(7), Strategy::BestFirst).unwrap_err(),
            SearchError::NodeOutOfRange { node: 7, len: 4 }
        );
    }

    #[test]
    fn a_star_steps() {
        let graph = square();
        let mut search = Search::new(&graph, 0, Some(2), Strategy::AStar).unwrap();
        assert_eq!(search.state(), SearchState::Ready);

        let step = search.step().unwrap();
        assert_eq!(step.kind, StepKind::Started);
        assert_eq!(step.closed, set(&[]));
        assert_eq!(step.frontier, set(&[0]));
        assert_eq!(search.state(), SearchState::Expanding);

        let step = search.step().unwrap();
        assert_eq!(step.kind, StepKind::Expanded(0));
        assert_eq!(step.closed, set(&[0]));
        assert_eq!(step.frontier, set(&[]));

        let step = search.step().unwrap();
        assert_eq!(step.kind, StepKind::FrontierUpdated);
        assert_eq!(step.closed, set(&[0]));
        assert_eq!(step.frontier, set(&[1, 2, 3]));

        let step = search.step().unwrap();
        assert_eq!(step.kind, StepKind::Expanded(2));
        assert_eq!(step.frontier, set(&[1, 3]));

        let step = search.step().unwrap();
        let path = step.path().unwrap();
        assert_eq!(path.nodes(), &[0, 2]);
        assert!((path.cost() - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(step.closed, set(&[0, 2]));
        assert!(step.is_terminal());

        assert_eq!(search.state(), SearchState::Found);
        assert_eq!(search.step(), Err(SearchError::Finished));
        assert_eq!(search.expanded(), 2);
    }

    #[test]
    fn coarse_steps() {
        let graph = square();
        let mut search = Search::with_config(&graph, 0, Some(2), SearchConfig::COARSE).unwrap();

        let kinds: Vec<_> = search.steps().map(|step| step.unwrap().kind).collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds[0], StepKind::Started);
        assert_eq!(kinds[1], StepKind::Expanded(0));
        assert_eq!(kinds[2], StepKind::Expanded(2));
        assert!(matches!(kinds[3], StepKind::Found(_)));
    }

    #[test]
    fn no_improvement_without_shorter_path() {
        //      2
        //    /   \
        //  0 ----- 1 ---- 3
        let graph = Graph::new(
            vec![(0.0, 0.0), (4.0, 0.0), (2.0, 0.5), (8.0, 0.0)],
            [(0, 1), (0, 2), (2, 1), (1, 3)],
        )
        .unwrap();
        let mut search = Search::new(&graph, 0, Some(3), Strategy::AStar).unwrap();

        search.step().unwrap(); // started
        search.step().unwrap(); // expanded 0
        search.step().unwrap(); // frontier {1, 2}
        let entry = *search.open_set().get(2).unwrap();

        assert_eq!(search.step().unwrap().current(), Some(1));
        search.step().unwrap();
        // going over 1 is no shortcut to 2
        assert_eq!(search.open_set().get(2), Some(&entry));
        assert_eq!(search.came_from()[&2], 0);

        let outcome = search.run().unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.nodes(), &[0, 1, 3]);
        assert_eq!(path.cost(), 8.0);
        assert_eq!(search.cost_to(3), Some(8.0));
    }

    #[test]
    fn relaxing_updates_pending_entry() {
        // 3 is expanded first and discovers 1, but the way over 2 is shorter
        //
        //  3
        //  |  \
        //  0    \            4
        //   \     \
        //    2 --- 1
        let graph = Graph::new(
            vec![(0.0, 0.0), (5.0, -3.0), (1.0, -2.0), (1.0, 1.0), (10.0, 0.0)],
            [(0, 3), (3, 1), (0, 2), (2, 1), (1, 4)],
        )
        .unwrap();
        let mut search = Search::new(&graph, 0, Some(4), Strategy::AStar).unwrap();

        let mut improved = false;
        while !search.is_terminal() {
            let before = search.open_set().get(1).copied();
            search.step().unwrap();
            if let (Some(before), Some(after)) = (before, search.open_set().get(1)) {
                if after.priority < before.priority {
                    assert_eq!(after.sequence, before.sequence);
                    improved = true;
                }
            }
        }
        assert!(improved);
        assert_eq!(search.came_from()[&1], 2);
        let expected = graph.path_cost(&[0, 2, 1, 4]).unwrap();
        assert_eq!(search.cost_to(4), Some(expected));
    }

    #[test]
    fn best_first_keeps_first_discovery() {
        let graph = square();
        let mut search = Search::new(&graph, 1, Some(3), Strategy::BestFirst).unwrap();
        let path = search.run().unwrap().into_path().unwrap();
        // 0 and 2 are equally close to 3, 0 was discovered first
        assert_eq!(path.nodes(), &[1, 0, 3]);
        assert_eq!(path.cost(), 2.0);
        assert_eq!(search.cost_to(3), None);
    }

    #[test]
    fn no_goal_explores_everything() {
        let graph = square();
        let mut search = Search::new(&graph, 3, None, Strategy::AStar).unwrap();
        assert_eq!(search.run().unwrap(), Outcome::Exhausted);
        assert_eq!(search.closed(), &set(&[0, 1, 2, 3]));
        assert!(search.frontier().is_empty());
    }

    #[test]
    fn run_after_finish() {
        let graph = square();
        let mut search = Search::new(&graph, 0, Some(0), Strategy::AStar).unwrap();
        assert!(search.run().is_ok());
        assert_eq!(search.run(), Err(SearchError::Finished));
        assert_eq!(search.steps().count(), 0);
    }
}
