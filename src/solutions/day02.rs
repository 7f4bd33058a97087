use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 2: Red-Nosed Reports",
    parsed = Reports,
    part_one = Day02,
    part_two = Day02
)]
impl super::AdventOfCode2024<2> {}

/*
Input is unusual data from a reactor. Each line is a report of space-separated levels.
*/

type Level = i32;

#[derive(Debug)]
struct Reports(Vec<Vec<Level>>);

#[derive(thiserror::Error, Debug)]
enum ParseReportsError {
    #[error("a report must have at least one level")]
    EmptyReport,

    #[error("input has no reports")]
    NoReports,
}

impl ParseData for Reports {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let reports: Vec<Vec<Level>> = parse_input_lines(input, |_, line| -> DynamicResult<_> {
            let levels: Vec<_> = line
                .split_whitespace()
                .map(parse_with_context)
                .collect::<Result<_, _>>()?;
            if levels.is_empty() {
                return Err(ParseReportsError::EmptyReport.into());
            }
            Ok(levels)
        })
        .collect::<Result<_, _>>()?;

        if reports.is_empty() {
            return Err(ParseReportsError::NoReports.into());
        }
        Ok(Self(reports))
    }
}

/*
For part 1, count the safe reports. A report is safe when its levels are all increasing or all
decreasing, and adjacent levels differ by at least one and at most three.
*/

/// Check if a sequence of levels is strictly monotonic with gentle steps.
fn is_safe(levels: impl Iterator<Item = Level> + Clone) -> bool {
    let differences = levels.clone().zip(levels.skip(1)).map(|(a, b)| b - a);
    let mut increasing = true;
    let mut decreasing = true;
    for difference in differences {
        increasing &= (1..=3).contains(&difference);
        decreasing &= (-3..=-1).contains(&difference);
        if !increasing && !decreasing {
            return false;
        }
    }
    true
}

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = Reports;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .0
            .iter()
            .filter(|report| is_safe(report.iter().copied()))
            .count())
    }
}

/*
For part 2, the Problem Dampener tolerates a single bad level: a report is also safe if removing
any one level makes it safe.
*/

/// Check if the report is safe with at most one level removed.
fn is_safe_dampened(report: &[Level]) -> bool {
    is_safe(report.iter().copied())
        || (0..report.len()).any(|skip_index| {
            let without = report
                .iter()
                .enumerate()
                .filter(move |&(index, _)| index != skip_index)
                .map(|(_, &level)| level);
            is_safe(without)
        })
}

impl Solution<PartTwo> for Day02 {
    type Input = Reports;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .0
            .iter()
            .filter(|report| is_safe_dampened(report))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Reports::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 2);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Reports::parse(EXAMPLE_INPUT)?;
        let result = <Day02 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn dampener_can_remove_first_level() {
        assert!(!is_safe([9, 1, 2, 3].into_iter()));
        assert!(is_safe_dampened(&[9, 1, 2, 3]));
    }
}
