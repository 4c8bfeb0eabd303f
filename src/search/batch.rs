use super::{Search, SearchConfig, Strategy};
use crate::{node_id::node_id_map_with_cap, Graph, NodeID, NodeIDMap, Path, SearchError};

impl Graph {
    /// Runs a complete Search from `start` to `goal` and returns the Path, or `None` if `goal`
    /// cannot be reached.
    ///
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use stepped_pathfinding::{Graph, Strategy};
    /// // 0 -- 1    2
    /// let graph = Graph::new(vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], [(0, 1)]).unwrap();
    ///
    /// let path = graph.find_path(0, 1, Strategy::AStar).unwrap();
    /// assert_eq!(path.unwrap().nodes(), &[0, 1]);
    ///
    /// let path = graph.find_path(0, 2, Strategy::AStar).unwrap();
    /// assert!(path.is_none());
    /// ```
    ///
    /// ## Errors
    /// [`SearchError::NodeOutOfRange`] if `start` or `goal` are not part of the Graph
    pub fn find_path(
        &self,
        start: NodeID,
        goal: NodeID,
        strategy: Strategy,
    ) -> Result<Option<Path<NodeID>>, SearchError> {
        let config = SearchConfig {
            strategy,
            frontier_steps: false,
            size_hint: 0,
        };
        let outcome = Search::with_config(self, start, Some(goal), config)?.run()?;
        Ok(outcome.into_path())
    }

    /// Runs one Search from `start` to every Node in `goals`, returning the Paths to all goals
    /// that could be reached.
    ///
    /// Every goal gets its own, independent Search. See also
    /// [`find_paths_parallel`](Graph::find_paths_parallel).
    ///
    /// ## Errors
    /// [`SearchError::NodeOutOfRange`] if `start` or any goal are not part of the Graph
    pub fn find_paths(
        &self,
        start: NodeID,
        goals: &[NodeID],
        strategy: Strategy,
    ) -> Result<NodeIDMap<Path<NodeID>>, SearchError> {
        self.check_nodes(start, goals)?;

        let mut paths = node_id_map_with_cap(goals.len());
        for &goal in goals {
            if let Some(path) = self.find_path(start, goal, strategy)? {
                paths.insert(goal, path);
            }
        }
        Ok(paths)
    }

    /// The same as [`find_paths`](Graph::find_paths), but the Searches are distributed over
    /// multiple threads. Each individual Search still runs on a single thread.
    ///
    /// ## Examples
    /// ```
    /// # use stepped_pathfinding::{Graph, Strategy};
    /// // 0 -- 1 -- 2    3
    /// let graph = Graph::new(
    ///     vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)],
    ///     [(0, 1), (1, 2)],
    /// )
    /// .unwrap();
    ///
    /// let paths = graph.find_paths_parallel(0, &[2, 3], Strategy::AStar).unwrap();
    ///
    /// assert_eq!(paths[&2].nodes(), &[0, 1, 2]);
    /// assert!(!paths.contains_key(&3));
    /// ```
    #[cfg(feature = "parallel")]
    pub fn find_paths_parallel(
        &self,
        start: NodeID,
        goals: &[NodeID],
        strategy: Strategy,
    ) -> Result<NodeIDMap<Path<NodeID>>, SearchError> {
        use rayon::prelude::*;

        self.check_nodes(start, goals)?;

        goals
            .par_iter()
            .filter_map(|&goal| match self.find_path(start, goal, strategy) {
                Ok(path) => path.map(|path| Ok((goal, path))),
                Err(err) => Some(Err(err)),
            })
            .collect()
    }

    fn check_nodes(&self, start: NodeID, goals: &[NodeID]) -> Result<(), SearchError> {
        for &node in std::iter::once(&start).chain(goals) {
            if !self.contains_node(node) {
                return Err(SearchError::NodeOutOfRange {
                    node,
                    len: self.node_count(),
                });
            }
        }
        Ok(())
    }
}
