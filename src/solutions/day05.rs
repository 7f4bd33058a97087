use std::cmp::Ordering;
use std::collections::HashSet;

use aoc_framework::parsing::{parse_lines_with_offset, parse_with_context, split_sections};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 5: Print Queue",
    parsed = PrintQueue,
    part_one = Day05,
    part_two = Day05
)]
impl super::AdventOfCode2024<5> {}

/*
Input has two sections separated by a blank line.

The first section has page ordering rules, one per line. `X|Y` means that if both pages X and Y
are part of an update, X must be printed at some point before Y.

The second section has the pages of each update, comma separated.
*/

type Page = u32;

#[derive(Debug)]
struct PrintQueue {
    /// Pairs of pages `(before, after)`.
    rules: HashSet<(Page, Page)>,
    updates: Vec<Vec<Page>>,
}

#[derive(thiserror::Error, Debug)]
enum ParsePrintQueueError {
    #[error("expected a rule formatted as `X|Y`")]
    InvalidRule,

    #[error("input has no ordering rules")]
    NoRules,

    #[error("input has no updates")]
    NoUpdates,
}

impl ParseData for PrintQueue {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let (rules_section, updates_section) = split_sections(input)?;

        let parse_rule = |line: &str| -> DynamicResult<_> {
            let (before, after) = line
                .split_once('|')
                .ok_or(ParsePrintQueueError::InvalidRule)?;
            Ok((
                parse_with_context::<Page>(before)?,
                parse_with_context::<Page>(after)?,
            ))
        };
        let rules: HashSet<_> = parse_lines_with_offset(rules_section, 0, parse_rule)
            .collect::<Result<_, _>>()?;
        if rules.is_empty() {
            return Err(ParsePrintQueueError::NoRules.into());
        }

        let updates_offset = rules_section.lines().count() + 1;
        let parse_update = |line: &str| {
            line.split(',')
                .map(parse_with_context::<Page>)
                .collect::<Result<Vec<_>, _>>()
        };
        let updates: Vec<Vec<Page>> =
            parse_lines_with_offset(updates_section, updates_offset, parse_update)
                .collect::<Result<_, _>>()?;
        if updates.is_empty() {
            return Err(ParsePrintQueueError::NoUpdates.into());
        }

        Ok(Self { rules, updates })
    }
}

impl PrintQueue {
    /// Order two pages by the rules. Pages without a rule between them are considered equal.
    fn compare(&self, a: Page, b: Page) -> Ordering {
        if self.rules.contains(&(a, b)) {
            Ordering::Less
        } else if self.rules.contains(&(b, a)) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Check that no later page in the update is required to come before an earlier page.
    fn is_ordered(&self, update: &[Page]) -> bool {
        update.iter().enumerate().all(|(index, &earlier)| {
            update[index + 1..]
                .iter()
                .all(|&later| !self.rules.contains(&(later, earlier)))
        })
    }
}

fn middle_page(update: &[Page]) -> Page {
    update[update.len() / 2]
}

/*
For part 1, determine which updates are already in the right order. Sum the middle page numbers
of those updates.
*/

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = PrintQueue;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .updates
            .iter()
            .filter(|update| input.is_ordered(update))
            .map(|update| u64::from(middle_page(update)))
            .checked_sum()
            .expect("sum of middle pages should not overflow"))
    }
}

/*
For part 2, put each incorrectly ordered update into the right order using the rules. Sum the
middle page numbers of only those reordered updates.
*/

impl Solution<PartTwo> for Day05 {
    type Input = PrintQueue;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .updates
            .iter()
            .filter(|update| !input.is_ordered(update))
            .map(|update| {
                let mut reordered = update.clone();
                reordered.sort_by(|&a, &b| input.compare(a, b));
                u64::from(middle_page(&reordered))
            })
            .checked_sum()
            .expect("sum of middle pages should not overflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = PrintQueue::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 143);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = PrintQueue::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 123);
        Ok(())
    }

    #[test]
    fn reorders_by_rules() -> DynamicResult<()> {
        let parsed = PrintQueue::parse(EXAMPLE_INPUT)?;
        let mut update = vec![97, 13, 75, 29, 47];
        update.sort_by(|&a, &b| parsed.compare(a, b));
        assert_eq!(update, vec![97, 75, 47, 29, 13]);
        Ok(())
    }

    #[test]
    fn parse_requires_both_sections() {
        assert!(PrintQueue::parse("47|53\n").is_err());
        assert!(PrintQueue::parse("\n75,47\n").is_err());
    }

    #[test]
    fn parse_keeps_updates_after_blank_lines() -> DynamicResult<()> {
        let parsed = PrintQueue::parse("47|53\n97|13\n\n75,47,53\n\n97,13,47\n\n")?;
        assert_eq!(parsed.updates, vec![vec![75, 47, 53], vec![97, 13, 47]]);
        Ok(())
    }

    #[test]
    fn parse_rejects_invalid_trailing_update() {
        assert!(PrintQueue::parse("47|53\n\n75,47\n\nnot pages\n").is_err());
    }
}
