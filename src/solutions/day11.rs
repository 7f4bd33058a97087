use aoc_framework::parsing::parse_with_context;
use aoc_framework::runner::solution_runner;
use aoc_framework::search::Memo;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 11: Plutonian Pebbles",
    parsed = Stones,
    part_one = Day11,
    part_two = Day11
)]
impl super::AdventOfCode2024<11> {}

/*
Input is a line of stones, each engraved with a number.

Every time you blink, each stone changes by the first applicable rule:

- A stone engraved with 0 is replaced by a stone engraved with 1.
- A stone engraved with a number of an even count of digits is replaced by two stones. The left
  stone gets the left half of the digits, and the right stone gets the right half. Leading zeroes
  are dropped.
- Otherwise, the stone is replaced by a stone engraved with its number multiplied by 2024.

Stones keep their order, but order has no effect on how many stones there are.
*/

type Engraving = u64;

#[derive(Debug)]
struct Stones(Vec<Engraving>);

#[derive(thiserror::Error, Debug)]
#[error("input has no stones")]
struct NoStones;

impl ParseData for Stones {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let stones = input
            .split_whitespace()
            .map(parse_with_context)
            .collect::<Result<Vec<_>, _>>()?;
        if stones.is_empty() {
            return Err(NoStones.into());
        }
        Ok(Self(stones))
    }
}

/// The stones replacing a stone after a single blink.
fn blink(stone: Engraving) -> (Engraving, Option<Engraving>) {
    if stone == 0 {
        return (1, None);
    }

    let digits = stone.ilog10() + 1;
    if digits % 2 == 0 {
        let half = 10_u64.pow(digits / 2);
        (stone / half, Some(stone % half))
    } else {
        let multiplied = stone
            .checked_mul(2024)
            .expect("engraving should not overflow");
        (multiplied, None)
    }
}

/// Counts of stones after a number of blinks, cached by engraving and blinks remaining.
#[derive(Debug, Default)]
struct StoneCounter {
    memo: Memo<(Engraving, usize), u64>,
}

impl StoneCounter {
    fn count(&mut self, stone: Engraving, blinks: usize) -> u64 {
        fn count_memoized(
            memo: &mut Memo<(Engraving, usize), u64>,
            stone: Engraving,
            blinks: usize,
        ) -> u64 {
            if blinks == 0 {
                return 1;
            }
            memo.get_or_insert_with((stone, blinks), |memo| {
                let (left, right) = blink(stone);
                let left_count = count_memoized(memo, left, blinks - 1);
                let right_count = right.map_or(0, |right| count_memoized(memo, right, blinks - 1));
                left_count
                    .checked_add(right_count)
                    .expect("stone count should not overflow")
            })
        }

        count_memoized(&mut self.memo, stone, blinks)
    }

    fn count_all(&mut self, stones: &[Engraving], blinks: usize) -> u64 {
        stones
            .iter()
            .map(|&stone| self.count(stone, blinks))
            .checked_sum()
            .expect("total stone count should not overflow")
    }
}

/*
For part 1, count the stones after blinking 25 times.
*/

struct Day11;

impl Solution<PartOne> for Day11 {
    type Input = Stones;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(StoneCounter::default().count_all(&input.0, 25))
    }
}

/*
For part 2, count the stones after blinking 75 times.
*/

impl Solution<PartTwo> for Day11 {
    type Input = Stones;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(StoneCounter::default().count_all(&input.0, 75))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "125 17\n";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Stones::parse(EXAMPLE_INPUT)?;
        let result = <Day11 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 55312);
        Ok(())
    }

    #[test]
    fn counts_after_few_blinks() -> DynamicResult<()> {
        let mut counter = StoneCounter::default();
        assert_eq!(counter.count_all(&Stones::parse(EXAMPLE_INPUT)?.0, 6), 22);
        assert_eq!(counter.count_all(&Stones::parse("0 1 10 99 999")?.0, 1), 7);
        Ok(())
    }

    #[test]
    fn blink_rules() {
        assert_eq!(blink(0), (1, None));
        assert_eq!(blink(1000), (10, Some(0)));
        assert_eq!(blink(99), (9, Some(9)));
        assert_eq!(blink(1), (2024, None));
    }

    #[test]
    fn memo_reuses_counts() {
        let mut counter = StoneCounter::default();
        let first = counter.count(125, 40);
        let computed = counter.memo.computed();
        assert_eq!(counter.count(125, 40), first);
        assert_eq!(counter.memo.computed(), computed);
    }
}
