use std::collections::{HashMap, HashSet};

use aoc_framework::grid::{Grid, Position};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 8: Resonant Collinearity",
    parsed = AntennaMap,
    part_one = Day08,
    part_two = Day08
)]
impl super::AdventOfCode2024<8> {}

/*
Input is a map of antennas. `.` is an empty space, and every letter or digit is an antenna tuned to
the frequency named by that character.
*/

type Frequency = char;

#[derive(Debug)]
struct AntennaMap {
    map: Grid<Option<Frequency>>,
    /// Antenna positions grouped by frequency.
    antennas: HashMap<Frequency, Vec<Position>>,
}

#[derive(thiserror::Error, Debug)]
#[error("expected `.` or an alphanumeric frequency, found {0:?}")]
struct InvalidMapChar(char);

impl ParseData for AntennaMap {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut antennas: HashMap<Frequency, Vec<Position>> = HashMap::new();
        let map = Grid::parse_with(input, |position, ch| match ch {
            '.' => Ok(None),
            _ if ch.is_ascii_alphanumeric() => {
                antennas.entry(ch).or_default().push(position);
                Ok(Some(ch))
            }
            _ => Err(InvalidMapChar(ch)),
        })?;
        Ok(Self { map, antennas })
    }
}

/// The signed `(row, column)` offset from one position to another.
fn offset_between(from: Position, to: Position) -> (isize, isize) {
    let signed = |value: usize| isize::try_from(value).expect("grid index should fit in isize");
    (
        signed(to.row) - signed(from.row),
        signed(to.col) - signed(from.col),
    )
}

impl AntennaMap {
    /// Collect antinodes generated by every ordered pair of same-frequency antennas.
    ///
    /// `antinodes_of` receives the pair `(from, to)` and yields positions beyond `to`; visiting
    /// both orders of each pair covers both sides.
    fn count_antinodes<I>(&self, mut antinodes_of: impl FnMut(Position, Position) -> I) -> usize
    where
        I: IntoIterator<Item = Position>,
    {
        let mut antinodes = HashSet::new();
        for positions in self.antennas.values() {
            for &from in positions {
                for &to in positions.iter().filter(|&&to| to != from) {
                    antinodes.extend(antinodes_of(from, to));
                }
            }
        }
        antinodes.len()
    }

    /// Positions continuing in line past `to`, starting at `to` itself, until leaving the map.
    fn in_line_beyond(&self, from: Position, to: Position) -> impl Iterator<Item = Position> {
        let (row_offset, col_offset) = offset_between(from, to);
        std::iter::successors(Some(to), move |position| {
            position
                .offset_by(row_offset, col_offset)
                .filter(|&next| self.map.contains(next))
        })
    }
}

/*
For part 1, an antinode occurs at any point perfectly in line with two antennas of the same
frequency, where one antenna is twice as far away as the other. Count the unique antinode
locations within the bounds of the map.
*/

struct Day08;

impl Solution<PartOne> for Day08 {
    type Input = AntennaMap;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_antinodes(|from, to| input.in_line_beyond(from, to).nth(1)))
    }
}

/*
For part 2, resonant harmonics mean an antinode occurs at any grid position exactly in line with
at least two antennas of the same frequency, regardless of distance. This includes the positions
of the antennas themselves.
*/

impl Solution<PartTwo> for Day08 {
    type Input = AntennaMap;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_antinodes(|from, to| input.in_line_beyond(from, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = AntennaMap::parse(EXAMPLE_INPUT)?;
        let result = <Day08 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 14);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = AntennaMap::parse(EXAMPLE_INPUT)?;
        let result = <Day08 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 34);
        Ok(())
    }

    #[test]
    fn part_two_harmonics_of_three_antennas() -> DynamicResult<()> {
        let parsed = AntennaMap::parse(
            r"T.........
...T......
.T........
..........
..........
..........
..........
..........
..........
..........
",
        )?;
        assert_eq!(<Day08 as Solution<PartTwo>>::solve(&parsed)?, 9);
        Ok(())
    }

    #[test]
    fn lone_antenna_has_no_antinodes() -> DynamicResult<()> {
        let parsed = AntennaMap::parse("...\n.a.\n...\n")?;
        assert_eq!(<Day08 as Solution<PartOne>>::solve(&parsed)?, 0);
        assert_eq!(<Day08 as Solution<PartTwo>>::solve(&parsed)?, 0);
        Ok(())
    }
}
