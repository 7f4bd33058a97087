use std::collections::HashSet;

use aoc_framework::grid::{Direction, Grid, Position};
use aoc_framework::runner::solution_runner;
use aoc_framework::search::{ShortestPaths, dijkstra_all};
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 16: Reindeer Maze",
    parsed = Maze,
    part_one = Day16,
    part_two = Day16
)]
impl super::AdventOfCode2024<16> {}

/*
Input is a maze for the Reindeer Olympics.

- `#` is a wall.
- `.` is open track.
- `S` is the start tile, where the reindeer begins facing east.
- `E` is the end tile.

Reindeer may move forward one tile for 1 point, or rotate 90 degrees clockwise or counterclockwise
for 1000 points. They cannot move into walls.
*/

#[derive(Debug)]
struct Maze {
    /// Whether each tile is a wall.
    walls: Grid<bool>,
    start: Position,
    end: Position,
}

#[derive(thiserror::Error, Debug)]
enum ParseMazeError {
    #[error("invalid maze tile: {0:?}")]
    InvalidTile(char),

    #[error("maze needs exactly one start and one end tile")]
    MissingEndpoint,
}

impl ParseData for Maze {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        let walls = Grid::parse_with(input, |position, ch| match ch {
            '#' => Ok(true),
            '.' => Ok(false),
            'S' => {
                starts.push(position);
                Ok(false)
            }
            'E' => {
                ends.push(position);
                Ok(false)
            }
            _ => Err(ParseMazeError::InvalidTile(ch)),
        })?;

        let ([start], [end]) = (&starts[..], &ends[..]) else {
            return Err(ParseMazeError::MissingEndpoint.into());
        };
        Ok(Self {
            walls,
            start: *start,
            end: *end,
        })
    }
}

type Score = u64;

const MOVE_SCORE: Score = 1;
const TURN_SCORE: Score = 1000;

/// A reindeer's tile and facing.
type Reindeer = (Position, Direction);

impl Maze {
    fn moves(&self, (position, facing): Reindeer) -> impl Iterator<Item = (Reindeer, Score)> {
        let forward = self
            .walls
            .step(position, facing)
            .filter(|&ahead| self.walls.get(ahead) == Some(&false))
            .map(|ahead| ((ahead, facing), MOVE_SCORE));
        let turns = [facing.turn_left(), facing.turn_right()]
            .map(|turned| ((position, turned), TURN_SCORE));
        forward.into_iter().chain(turns)
    }

    fn end_states(&self) -> [Reindeer; 4] {
        Direction::ALL.map(|facing| (self.end, facing))
    }

    fn best_paths(&self) -> DynamicResult<ShortestPaths<Reindeer, Score>> {
        Ok(dijkstra_all([(self.start, Direction::East)], |&reindeer| {
            self.moves(reindeer)
        })?)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("the end tile cannot be reached")]
struct EndUnreachable;

/*
For part 1, find the lowest score a reindeer could possibly get from the start to the end tile.
*/

struct Day16;

impl Solution<PartOne> for Day16 {
    type Input = Maze;
    type Output = Score;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let paths = input.best_paths()?;
        Ok(paths
            .min_cost_among(&input.end_states())
            .ok_or(EndUnreachable)?)
    }
}

/*
For part 2, count the tiles that are part of at least one of the best paths through the maze.
*/

impl Solution<PartTwo> for Day16 {
    type Input = Maze;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let paths = input.best_paths()?;
        let on_best_paths = paths.states_on_shortest_paths(&input.end_states());
        if on_best_paths.is_empty() {
            return Err(EndUnreachable.into());
        }

        let tiles: HashSet<Position> = on_best_paths
            .into_iter()
            .map(|(position, _)| position)
            .collect();
        Ok(tiles.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST_EXAMPLE: &str = r"###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
";

    const SECOND_EXAMPLE: &str = r"#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        for (example, expected) in [(FIRST_EXAMPLE, 7036), (SECOND_EXAMPLE, 11048)] {
            let parsed = Maze::parse(example)?;
            let result = <Day16 as Solution<PartOne>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn part_two_solves_examples() -> DynamicResult<()> {
        for (example, expected) in [(FIRST_EXAMPLE, 45), (SECOND_EXAMPLE, 64)] {
            let parsed = Maze::parse(example)?;
            let result = <Day16 as Solution<PartTwo>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn walled_off_end_is_unreachable() -> DynamicResult<()> {
        let parsed = Maze::parse("#####\n#S#E#\n#####\n")?;
        assert!(<Day16 as Solution<PartOne>>::solve(&parsed).is_err());
        assert!(<Day16 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }
}
