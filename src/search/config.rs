use crate::ParseStrategyError;
use std::fmt;
use std::str::FromStr;

/// Decides which pending Node a [`Search`](crate::Search) expands next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Expand by `cost so far + heuristic`. Always finds the cheapest Path.
    #[default]
    AStar,
    /// Expand by the heuristic alone. Usually expands fewer Nodes than A*, but the first Path
    /// it finds is kept even if a cheaper one exists.
    BestFirst,
}

impl fmt::Display for Strategy {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::AStar => write!(fmt, "A*"),
            Strategy::BestFirst => write!(fmt, "Best-First"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    /// ```
    /// # use stepped_pathfinding::Strategy;
    /// assert_eq!("astar".parse(), Ok(Strategy::AStar));
    /// assert_eq!("Best".parse(), Ok(Strategy::BestFirst));
    /// assert!("dijkstra".parse::<Strategy>().is_err());
    /// ```
    fn from_str(name: &str) -> Result<Strategy, ParseStrategyError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Strategy::AStar),
            "best" | "best-first" | "bestfirst" | "greedy" => Ok(Strategy::BestFirst),
            _ => Err(ParseStrategyError(name.to_owned())),
        }
    }
}

/// Options for configuring a [`Search`](crate::Search)
///
/// Default options:
/// ```
/// # use stepped_pathfinding::{SearchConfig, Strategy};
/// assert_eq!(
///     SearchConfig {
///         strategy: Strategy::AStar,
///         frontier_steps: true,
///         size_hint: 0,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// How the next Node to expand is chosen (defaults to [`Strategy::AStar`])
    pub strategy: Strategy,
    /// `true` (default): after the neighbors of an expanded Node were added to the frontier, an
    /// extra [`StepKind::FrontierUpdated`](crate::StepKind::FrontierUpdated) Step is produced.
    ///
    /// `false`: every call to `step` expands a Node (or finishes the Search), which is all that
    /// observers that only care about expansions need.
    pub frontier_steps: bool,
    /// How many Nodes the Search is expected to touch (defaults to `0`). Only used to reserve
    /// memory up front.
    pub size_hint: usize,
}

impl SearchConfig {
    /// A* with all Steps
    pub const A_STAR: SearchConfig = SearchConfig {
        strategy: Strategy::AStar,
        frontier_steps: true,
        size_hint: 0,
    };
    /// Greedy Best-First with all Steps
    pub const BEST_FIRST: SearchConfig = SearchConfig {
        strategy: Strategy::BestFirst,
        frontier_steps: true,
        size_hint: 0,
    };
    /// A* with only expansion and terminal Steps
    ///
    /// Values:
    /// ```
    /// # use stepped_pathfinding::{SearchConfig, Strategy};
    /// assert_eq!(
    ///     SearchConfig {
    ///         strategy: Strategy::AStar,
    ///         frontier_steps: false,
    ///         size_hint: 0,
    ///     },
    ///     SearchConfig::COARSE
    /// );
    /// ```
    pub const COARSE: SearchConfig = SearchConfig {
        strategy: Strategy::AStar,
        frontier_steps: false,
        size_hint: 0,
    };

    /// The default config with a different Strategy
    pub fn with_strategy(strategy: Strategy) -> SearchConfig {
        SearchConfig {
            strategy,
            ..Default::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig::A_STAR
    }
}

impl From<Strategy> for SearchConfig {
    fn from(strategy: Strategy) -> SearchConfig {
        SearchConfig::with_strategy(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names() {
        for strategy in [Strategy::AStar, Strategy::BestFirst] {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
        }
        assert_eq!(" greedy ".parse(), Ok(Strategy::BestFirst));
        assert_eq!(
            "bfs".parse::<Strategy>(),
            Err(ParseStrategyError("bfs".to_owned()))
        );
    }

    #[test]
    fn with_strategy() {
        assert_eq!(
            SearchConfig::with_strategy(Strategy::BestFirst),
            SearchConfig::BEST_FIRST
        );
        assert_eq!(SearchConfig::from(Strategy::AStar), SearchConfig::A_STAR);
    }
}
