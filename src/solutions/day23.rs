use std::collections::{HashMap, HashSet};

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use petgraph::graph::{NodeIndex, UnGraph};

#[solution_runner(
    name = "Day 23: LAN Party",
    parsed = Network,
    part_one = Day23,
    part_two = Day23
)]
impl super::AdventOfCode2024<23> {}

/*
Input is a map of the local network, with one connection between two computers per line, like
`kh-tc`. Connections are not directional.
*/

#[derive(Debug)]
struct Network {
    graph: UnGraph<String, ()>,
}

#[derive(thiserror::Error, Debug)]
enum ParseNetworkError {
    #[error("expected a connection formatted as `a-b`")]
    InvalidConnection,

    #[error("computer {0:?} is connected to itself")]
    SelfConnection(String),

    #[error("input has no connections")]
    NoConnections,
}

impl ParseData for Network {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut graph = UnGraph::new_undirected();
        let mut computers: HashMap<&str, NodeIndex> = HashMap::new();

        for connection in parse_input_lines(input, |_, line| -> Result<_, ParseNetworkError> {
            let (a, b) = line
                .trim()
                .split_once('-')
                .filter(|(a, b)| !a.is_empty() && !b.is_empty())
                .ok_or(ParseNetworkError::InvalidConnection)?;
            if a == b {
                return Err(ParseNetworkError::SelfConnection(a.to_string()));
            }
            Ok((a, b))
        }) {
            let (a, b) = connection?;
            let [a, b] = [a, b].map(|name| {
                *computers
                    .entry(name)
                    .or_insert_with(|| graph.add_node(name.to_string()))
            });
            graph.update_edge(a, b, ());
        }

        if graph.edge_count() == 0 {
            return Err(ParseNetworkError::NoConnections.into());
        }
        Ok(Self { graph })
    }
}

impl Network {
    fn neighbors(&self) -> Vec<HashSet<NodeIndex>> {
        self.graph
            .node_indices()
            .map(|node| self.graph.neighbors(node).collect())
            .collect()
    }

    /// Every set of three computers all connected to each other.
    fn triangles(&self) -> Vec<[NodeIndex; 3]> {
        let neighbors = self.neighbors();
        let mut triangles = Vec::new();
        for a in self.graph.node_indices() {
            for &b in neighbors[a.index()].iter().filter(|&&b| b > a) {
                for &c in neighbors[a.index()]
                    .intersection(&neighbors[b.index()])
                    .filter(|&&c| c > b)
                {
                    triangles.push([a, b, c]);
                }
            }
        }
        triangles
    }

    /// The largest set of computers all connected to each other.
    ///
    /// Uses the Bron-Kerbosch algorithm, pivoting on the candidate with the most neighbors left
    /// to consider.
    fn largest_clique(&self) -> Vec<NodeIndex> {
        fn extend(
            neighbors: &[HashSet<NodeIndex>],
            clique: &mut Vec<NodeIndex>,
            mut candidates: HashSet<NodeIndex>,
            mut excluded: HashSet<NodeIndex>,
            largest: &mut Vec<NodeIndex>,
        ) {
            let Some(&pivot) = candidates.union(&excluded).max_by_key(|&&node| {
                neighbors[node.index()].intersection(&candidates).count()
            }) else {
                if clique.len() > largest.len() {
                    largest.clone_from(clique);
                }
                return;
            };

            let branches: Vec<_> = candidates
                .difference(&neighbors[pivot.index()])
                .copied()
                .collect();
            for node in branches {
                let adjacent = &neighbors[node.index()];
                clique.push(node);
                extend(
                    neighbors,
                    clique,
                    candidates.intersection(adjacent).copied().collect(),
                    excluded.intersection(adjacent).copied().collect(),
                    largest,
                );
                clique.pop();
                candidates.remove(&node);
                excluded.insert(node);
            }
        }

        let neighbors = self.neighbors();
        let mut largest = Vec::new();
        extend(
            &neighbors,
            &mut Vec::new(),
            self.graph.node_indices().collect(),
            HashSet::new(),
            &mut largest,
        );
        largest
    }

    fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }
}

/*
For part 1, find every set of three inter-connected computers. Count the sets containing at least
one computer with a name starting with `t`.
*/

struct Day23;

impl Solution<PartOne> for Day23 {
    type Input = Network;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .triangles()
            .into_iter()
            .filter(|triangle| {
                triangle
                    .iter()
                    .any(|&node| input.name(node).starts_with('t'))
            })
            .count())
    }
}

/*
For part 2, the LAN party is the largest set of computers all connected to each other. The
password to get in is the name of every computer at the party, sorted alphabetically and joined
with commas.
*/

impl Solution<PartTwo> for Day23 {
    type Input = Network;
    type Output = String;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut names: Vec<&str> = input
            .largest_clique()
            .into_iter()
            .map(|node| input.name(node))
            .collect();
        names.sort_unstable();
        Ok(names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"kh-tc
qp-kh
de-cg
ka-co
yn-aq
qp-ub
cg-tb
vc-aq
tb-ka
wh-tc
yn-cg
kh-ub
ta-co
de-co
tc-td
tb-wq
wh-td
ta-ka
td-qp
aq-cg
wq-ub
ub-vc
de-ta
wq-aq
wq-vc
wh-yn
ka-de
kh-ta
co-tc
wh-qp
tb-vc
td-yn
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT)?;
        let result = <Day23 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 7);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT)?;
        let result = <Day23 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, "co,de,ka,ta");
        Ok(())
    }

    #[test]
    fn finds_every_triangle() -> DynamicResult<()> {
        let parsed = Network::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.triangles().len(), 12);
        Ok(())
    }

    #[test]
    fn rejects_invalid_connections() {
        assert!(Network::parse("").is_err());
        assert!(Network::parse("kh\n").is_err());
        assert!(Network::parse("kh-kh\n").is_err());
    }
}
