use aoc_framework::grid::{Grid, Position};
use aoc_framework::runner::solution_runner;
use aoc_framework::search::{Memo, breadth_first_distances};
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 10: Hoof It",
    parsed = TopographicMap,
    part_one = Day10,
    part_two = Day10
)]
impl super::AdventOfCode2024<10> {}

/*
Input is a topographic map: each position has a height from 0 (lowest) to 9 (highest). A `.` marks
impassable ground.

A hiking trail is any path that starts at height 0, ends at height 9, and always increases by
exactly one height at each step. Steps are only up, down, left, or right.
*/

type Height = u8;

const TRAILHEAD: Height = 0;
const SUMMIT: Height = 9;

#[derive(Debug)]
struct TopographicMap(Grid<Option<Height>>);

#[derive(thiserror::Error, Debug)]
#[error("expected a height digit or `.`, found {0:?}")]
struct InvalidHeight(char);

impl ParseData for TopographicMap {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let grid = Grid::parse_with(input, |_, ch| match ch {
            '.' => Ok(None),
            _ => ch
                .to_digit(10)
                .and_then(|digit| Height::try_from(digit).ok())
                .map(Some)
                .ok_or(InvalidHeight(ch)),
        })?;
        Ok(Self(grid))
    }
}

impl TopographicMap {
    fn height(&self, position: Position) -> Option<Height> {
        self.0.get(position).copied().flatten()
    }

    fn trailheads(&self) -> impl Iterator<Item = Position> {
        self.0.find_all(|&height| height == Some(TRAILHEAD))
    }

    /// Neighbors exactly one height higher.
    fn uphill(&self, position: Position) -> impl Iterator<Item = Position> {
        let next_height = self.height(position).and_then(|height| height.checked_add(1));
        self.0
            .neighbors(position)
            .map(|(_, neighbor)| neighbor)
            .filter(move |&neighbor| next_height.is_some() && self.height(neighbor) == next_height)
    }

    /// Count the distinct hiking trails from `position` to any summit.
    fn trails_from(&self, memo: &mut Memo<Position, u64>, position: Position) -> u64 {
        memo.get_or_insert_with(position, |memo| {
            if self.height(position) == Some(SUMMIT) {
                return 1;
            }
            self.uphill(position)
                .map(|next| self.trails_from(memo, next))
                .checked_sum()
                .expect("trail count should not overflow")
        })
    }
}

/*
For part 1, a trailhead's score is the number of height 9 positions reachable from it by hiking
trails. Sum the scores of all trailheads.
*/

struct Day10;

impl Solution<PartOne> for Day10 {
    type Input = TopographicMap;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .trailheads()
            .map(|trailhead| {
                breadth_first_distances([trailhead], |&position| input.uphill(position))
                    .into_keys()
                    .filter(|&position| input.height(position) == Some(SUMMIT))
                    .count()
            })
            .sum())
    }
}

/*
For part 2, a trailhead's rating is the number of distinct hiking trails which begin at it. Sum
the ratings of all trailheads.
*/

impl Solution<PartTwo> for Day10 {
    type Input = TopographicMap;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut memo = Memo::new();
        Ok(input
            .trailheads()
            .map(|trailhead| input.trails_from(&mut memo, trailhead))
            .checked_sum()
            .expect("sum of ratings should not overflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = TopographicMap::parse(EXAMPLE_INPUT)?;
        let result = <Day10 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 36);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = TopographicMap::parse(EXAMPLE_INPUT)?;
        let result = <Day10 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 81);
        Ok(())
    }

    #[test]
    fn part_one_with_impassable_tiles() -> DynamicResult<()> {
        let parsed = TopographicMap::parse(
            r"..90..9
...1.98
...2..7
6543456
765.987
876....
987....
",
        )?;
        assert_eq!(<Day10 as Solution<PartOne>>::solve(&parsed)?, 4);
        Ok(())
    }

    #[test]
    fn part_two_single_trailhead_rating() -> DynamicResult<()> {
        let parsed = TopographicMap::parse(
            r".....0.
..4321.
..5..2.
..6543.
..7..4.
..8765.
..9....
",
        )?;
        assert_eq!(<Day10 as Solution<PartTwo>>::solve(&parsed)?, 3);
        Ok(())
    }
}
