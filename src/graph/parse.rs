use super::Graph;
use crate::{GraphError, NodeID, Point};

use std::io::BufRead;
use std::str::FromStr;

/// The non-blank lines of the input, with their 1-based line numbers
struct Lines<I> {
    inner: I,
}

impl<I: Iterator<Item = (usize, String)>> Lines<I> {
    fn next_tokens(
        &mut self,
        expected: impl FnOnce() -> String,
    ) -> Result<(usize, Vec<String>), GraphError> {
        for (line, text) in self.inner.by_ref() {
            let tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
            if !tokens.is_empty() {
                return Ok((line, tokens));
            }
        }
        Err(GraphError::UnexpectedEof {
            expected: expected(),
        })
    }
}

fn number<T: FromStr>(line: usize, token: &str) -> Result<T, GraphError> {
    token.parse().map_err(|_| GraphError::InvalidNumber {
        line,
        token: token.to_owned(),
    })
}

fn expect_count(line: usize, tokens: &[String], expected: usize) -> Result<(), GraphError> {
    if tokens.len() != expected {
        return Err(GraphError::WrongTokenCount {
            line,
            expected,
            found: tokens.len(),
        });
    }
    Ok(())
}

fn parse_lines(lines: impl Iterator<Item = (usize, String)>) -> Result<Graph, GraphError> {
    let mut lines = Lines { inner: lines };

    let (line, tokens) = lines.next_tokens(|| "the number of nodes".to_owned())?;
    expect_count(line, &tokens, 1)?;
    let len: usize = number(line, &tokens[0])?;
    if NodeID::try_from(len).is_err() {
        return Err(GraphError::TooManyNodes { len });
    }

    // the header alone does not prove that many lines follow
    let mut positions: Vec<Point> = Vec::with_capacity(len.min(1024));
    for node in 0..len {
        let (line, tokens) = lines.next_tokens(|| format!("the position of node {}", node + 1))?;
        expect_count(line, &tokens, 2)?;
        positions.push((number(line, &tokens[0])?, number(line, &tokens[1])?));
    }

    let mut pairs = Vec::new();
    for node in 0..len as NodeID {
        let (line, tokens) = lines.next_tokens(|| format!("the neighbors of node {}", node + 1))?;
        let count: usize = number(line, &tokens[0])?;
        expect_count(line, &tokens, count.saturating_add(1))?;

        let first = pairs.len();
        for token in &tokens[1..] {
            let index: usize = number(line, token)?;
            if index == 0 || index > len {
                return Err(GraphError::NeighborOutOfRange { line, index, len });
            }
            let other = (index - 1) as NodeID;
            if other == node {
                return Err(GraphError::SelfLoop { node });
            }
            if pairs[first..].contains(&(node, other)) {
                log::warn!("line {}: neighbor {} is listed more than once", line, index);
                continue;
            }
            pairs.push((node, other));
        }
    }

    if let Ok((line, _)) = lines.next_tokens(String::new) {
        log::warn!("ignoring trailing input starting at line {}", line);
    }

    Graph::new(positions, pairs)
}

impl FromStr for Graph {
    type Err = GraphError;

    /// Parses a Graph from its text format.
    ///
    /// ```text
    /// n                 number of nodes
    /// x y               position of node 1
    /// ...               (n lines)
    /// k a_1 ... a_k     node 1 is connected to the 1-based nodes a_1 to a_k
    /// ...               (n lines)
    /// ```
    /// Blank lines are ignored. A connection only needs to be listed by one of its endpoints.
    ///
    /// ## Examples
    /// ```
    /// # use stepped_pathfinding::Graph;
    /// let graph: Graph = "
    /// 3
    /// 0 0
    /// 3 0
    /// 3 4
    ///
    /// 1 2
    /// 2 1 3
    /// 0
    /// "
    /// .parse()
    /// .unwrap();
    ///
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 2);
    /// assert_eq!(graph.edge_weight(1, 2), Some(4.0));
    /// ```
    fn from_str(text: &str) -> Result<Graph, GraphError> {
        parse_lines(
            text.lines()
                .enumerate()
                .map(|(i, line)| (i + 1, line.to_owned())),
        )
    }
}

impl Graph {
    /// Reads a Graph in its text format from `reader`. See [`Graph::from_str`] for the format.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Graph, GraphError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        parse_lines(lines.into_iter().enumerate().map(|(i, line)| (i + 1, line)))
    }

    /// Reads a Graph from the file at `path`. See [`Graph::from_str`] for the format.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Graph, GraphError> {
        let file = std::fs::File::open(path)?;
        Graph::from_reader(std::io::BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "4
0 0
1 0
1 1
0 1
3 2 4 3
2 1 3
2 2 4
2 3 1
";

    #[test]
    fn square() {
        let graph: Graph = SQUARE.parse().unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.position(2), (1.0, 1.0));
        let endpoints: Vec<_> = graph.edges().iter().map(|e| e.endpoints()).collect();
        assert_eq!(endpoints, vec![(0, 1), (0, 3), (0, 2), (1, 2), (2, 3)]);
    }

    #[test]
    fn from_reader() {
        let graph = Graph::from_reader(SQUARE.as_bytes()).unwrap();
        assert_eq!(graph, SQUARE.parse::<Graph>().unwrap());
    }

    #[test]
    fn blank_lines() {
        let graph: Graph = "\n2\n\n0 0\n  \n5 0\n1 2\n\n0\n\n".parse().unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(0, 1), Some(5.0));
    }

    #[test]
    fn errors() {
        fn parse(text: &str) -> GraphError {
            text.parse::<Graph>().unwrap_err()
        }

        assert!(matches!(parse(""), GraphError::UnexpectedEof { .. }));
        assert!(matches!(
            parse("two"),
            GraphError::InvalidNumber { line: 1, .. }
        ));
        assert!(matches!(
            parse("2\n0 0\n1\n"),
            GraphError::WrongTokenCount {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
        assert!(matches!(
            parse("2\n0 0\n1 0\n2 2\n0"),
            GraphError::WrongTokenCount {
                line: 4,
                expected: 3,
                found: 2
            }
        ));
        assert!(matches!(
            parse("2\n0 0\n1 0\n1 3\n0"),
            GraphError::NeighborOutOfRange {
                line: 4,
                index: 3,
                len: 2
            }
        ));
        assert!(matches!(
            parse("2\n0 0\n1 0\n1 1\n0"),
            GraphError::SelfLoop { node: 0 }
        ));
        assert!(matches!(
            parse("2\n0 0\n1 0\n1 2\n"),
            GraphError::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn huge_node_count_with_truncated_body() {
        assert!(matches!(
            "4000000000\n0 0\n".parse::<Graph>(),
            Err(GraphError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn repeated_neighbors_and_trailing_input() {
        // 3 is listed twice by node 1, and a stray line follows the last neighbor list
        let graph: Graph = "3\n0 0\n1 0\n0 1\n3 2 3 3\n1 1\n0\n7 7\n".parse().unwrap();

        let endpoints: Vec<_> = graph.edges().iter().map(|e| e.endpoints()).collect();
        assert_eq!(endpoints, vec![(0, 1), (0, 2)]);
        assert_eq!(graph.nodes()[0].degree(), 2);
        assert_eq!(graph.nodes()[2].degree(), 1);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Graph::load("this/file/does/not/exist.txt"),
            Err(GraphError::Io(_))
        ));
    }
}
