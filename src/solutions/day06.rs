use aoc_framework::grid::{Direction, Grid, Position};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use rayon::prelude::*;

#[solution_runner(
    name = "Day 6: Guard Gallivant",
    parsed = Lab,
    part_one = Day06,
    part_two = Day06
)]
impl super::AdventOfCode2024<6> {}

/*
Input is a map of a lab with a patrolling guard.

- `.` is open floor.
- `#` is an obstruction.
- `^`, `>`, `v`, `<` is the guard, facing up, right, down, or left respectively.

The guard follows a strict protocol: if there is something directly in front, turn right 90
degrees. Otherwise, take a step forward.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Open,
    Obstruction,
}

#[derive(Debug)]
struct Lab {
    map: Grid<Cell>,
    start: Position,
    facing: Direction,
}

#[derive(thiserror::Error, Debug)]
enum ParseLabError {
    #[error("invalid lab character: {0:?}")]
    InvalidChar(char),

    #[error("lab must have exactly one guard, found {0}")]
    GuardCount(usize),
}

impl ParseData for Lab {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut guards = Vec::new();
        let map = Grid::parse_with(input, |position, ch| -> Result<_, ParseLabError> {
            match ch {
                '.' => Ok(Cell::Open),
                '#' => Ok(Cell::Obstruction),
                _ => {
                    let facing =
                        Direction::try_from(ch).map_err(|_| ParseLabError::InvalidChar(ch))?;
                    guards.push((position, facing));
                    Ok(Cell::Open)
                }
            }
        })?;

        let [(start, facing)] = guards[..] else {
            return Err(ParseLabError::GuardCount(guards.len()).into());
        };
        Ok(Self { map, start, facing })
    }
}

/// How a guard's patrol ends.
enum Patrol {
    /// The guard walks off the map. Each cell holds the directions it was walked in, as bits.
    Exits(Grid<u8>),
    /// The guard is stuck walking the same route forever.
    Loops,
}

const fn direction_bit(direction: Direction) -> u8 {
    match direction {
        Direction::North => 1,
        Direction::East => 1 << 1,
        Direction::South => 1 << 2,
        Direction::West => 1 << 3,
    }
}

impl Lab {
    fn is_blocked(&self, position: Position, extra_obstruction: Option<Position>) -> bool {
        extra_obstruction == Some(position) || self.map.get(position) == Some(&Cell::Obstruction)
    }

    /// Follow the guard's protocol until the guard leaves the map or repeats a position and
    /// direction.
    fn patrol(&self, extra_obstruction: Option<Position>) -> Patrol {
        let mut walked = Grid::filled(self.map.rows(), self.map.cols(), 0_u8);
        let mut position = self.start;
        let mut facing = self.facing;

        loop {
            let directions = walked
                .get_mut(position)
                .expect("guard should only stand within the map");
            let bit = direction_bit(facing);
            if *directions & bit != 0 {
                return Patrol::Loops;
            }
            *directions |= bit;

            let Some(ahead) = self.map.step(position, facing) else {
                return Patrol::Exits(walked);
            };
            if self.is_blocked(ahead, extra_obstruction) {
                facing = facing.turn_right();
            } else {
                position = ahead;
            }
        }
    }

    /// Positions walked by the guard on the unaltered map, or `None` if the guard never leaves.
    fn walked_positions(&self) -> Option<Vec<Position>> {
        match self.patrol(None) {
            Patrol::Exits(walked) => Some(walked.find_all(|&directions| directions != 0).collect()),
            Patrol::Loops => None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("the guard never leaves the mapped area")]
struct GuardNeverLeaves;

/*
For part 1, predict the path of the guard. Count the distinct positions visited before the guard
leaves the mapped area.
*/

struct Day06;

impl Solution<PartOne> for Day06 {
    type Input = Lab;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.walked_positions().ok_or(GuardNeverLeaves)?.len())
    }
}

/*
For part 2, a single new obstruction can be placed to get the guard stuck in a loop. It cannot be
placed at the guard's starting position. Count the positions that would cause a loop.

An obstruction off the guard's original route never gets bumped into, so only positions along the
route are candidates. Each candidate is simulated independently.
*/

impl Solution<PartTwo> for Day06 {
    type Input = Lab;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let candidates = input.walked_positions().ok_or(GuardNeverLeaves)?;

        Ok(candidates
            .par_iter()
            .filter(|&&candidate| candidate != input.start)
            .filter(|&&candidate| matches!(input.patrol(Some(candidate)), Patrol::Loops))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Lab::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 41);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Lab::parse(EXAMPLE_INPUT)?;
        let result = <Day06 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 6);
        Ok(())
    }

    #[test]
    fn detects_loop_without_new_obstruction() -> DynamicResult<()> {
        let parsed = Lab::parse(".#..\n.^.#\n#...\n..#.\n")?;
        assert!(matches!(parsed.patrol(None), Patrol::Loops));
        assert!(<Day06 as Solution<PartOne>>::solve(&parsed).is_err());
        Ok(())
    }

    #[test]
    fn parse_requires_one_guard() {
        assert!(Lab::parse("..#\n...\n").is_err());
        assert!(Lab::parse("^.#\n..^\n").is_err());
    }
}
