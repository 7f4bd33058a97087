use std::collections::HashMap;

use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 1: Historian Hysteria",
    parsed = LocationLists,
    part_one = Day01,
    part_two = Day01
)]
impl super::AdventOfCode2024<1> {}

/*
Input is two lists of location IDs side by side. Each line has a number from the left list and a
number from the right list, separated by whitespace.
*/

type LocationId = u32;

#[derive(Debug)]
struct LocationLists {
    left: Vec<LocationId>,
    right: Vec<LocationId>,
}

#[derive(thiserror::Error, Debug)]
enum ParseLocationListsError {
    #[error("expected exactly two location IDs on the line")]
    ExpectedPair,

    #[error("input has no location IDs")]
    Empty,
}

impl ParseData for LocationLists {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let pairs = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let mut ids = line.split_whitespace();
            let (Some(left), Some(right), None) = (ids.next(), ids.next(), ids.next()) else {
                return Err(ParseLocationListsError::ExpectedPair.into());
            };
            Ok((
                parse_with_context::<LocationId>(left)?,
                parse_with_context::<LocationId>(right)?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

        if pairs.is_empty() {
            return Err(ParseLocationListsError::Empty.into());
        }

        let (left, right) = pairs.into_iter().unzip();
        Ok(Self { left, right })
    }
}

/*
For part 1, pair up the smallest number in the left list with the smallest in the right list, the
second smallest with the second smallest, and so on. Sum the distances between each pair.
*/

struct Day01;

impl Solution<PartOne> for Day01 {
    type Input = LocationLists;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut left = input.left.clone();
        let mut right = input.right.clone();
        left.sort_unstable();
        right.sort_unstable();

        let total_distance = left
            .iter()
            .zip(&right)
            .map(|(l, r)| u64::from(l.abs_diff(*r)))
            .checked_sum()
            .expect("sum of distances should not overflow");
        Ok(total_distance)
    }
}

/*
For part 2, calculate a similarity score: each number in the left list is multiplied by how many
times it appears in the right list, and the products are summed.
*/

impl Solution<PartTwo> for Day01 {
    type Input = LocationLists;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut right_counts: HashMap<LocationId, u64> = HashMap::new();
        for &id in &input.right {
            *right_counts.entry(id).or_default() += 1;
        }

        let similarity = input
            .left
            .iter()
            .map(|id| {
                let count = right_counts.get(id).copied().unwrap_or(0);
                u64::from(*id)
                    .checked_mul(count)
                    .expect("similarity of an ID should not overflow")
            })
            .checked_sum()
            .expect("sum of similarities should not overflow");
        Ok(similarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"3   4
4   3
2   5
1   3
3   9
3   3
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = LocationLists::parse(EXAMPLE_INPUT)?;
        let result = <Day01 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 11);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = LocationLists::parse(EXAMPLE_INPUT)?;
        let result = <Day01 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 31);
        Ok(())
    }

    #[test]
    fn parse_skips_blank_lines() -> DynamicResult<()> {
        let parsed = LocationLists::parse("3   4\n4   3\n\n")?;
        assert_eq!(parsed.left, vec![3, 4]);
        assert_eq!(parsed.right, vec![4, 3]);
        Ok(())
    }

    #[test]
    fn parse_rejects_missing_column() {
        assert!(LocationLists::parse("3   4\n5\n").is_err());
        assert!(LocationLists::parse("3 4 5\n").is_err());
    }
}
