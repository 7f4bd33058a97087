use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;
use rayon::prelude::*;

#[solution_runner(
    name = "Day 22: Monkey Market",
    parsed = Buyers,
    part_one = Day22,
    part_two = Day22
)]
impl super::AdventOfCode2024<22> {}

/*
Input is the initial secret number of each buyer, one per line.

Each buyer's secret number evolves into the next by a pseudorandom process:

1. Multiply the secret by 64, mix the result into the secret, then prune the secret.
2. Divide the secret by 32 rounding down, mix the result into the secret, then prune the secret.
3. Multiply the secret by 2048, mix the result into the secret, then prune the secret.

Mixing is a bitwise XOR of a value into the secret. Pruning is the secret modulo 16777216.

Every buyer generates 2000 new secret numbers in a day.
*/

type Secret = u64;

#[derive(Debug)]
struct Buyers(Vec<Secret>);

#[derive(thiserror::Error, Debug)]
#[error("input has no buyers")]
struct NoBuyers;

impl ParseData for Buyers {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let secrets: Vec<Secret> =
            parse_input_lines(input, |_, line| parse_with_context(line.trim()))
                .collect::<Result<_, _>>()?;
        if secrets.is_empty() {
            return Err(NoBuyers.into());
        }
        Ok(Self(secrets))
    }
}

const PRUNE_MODULUS: Secret = 16_777_216;

const SECRETS_PER_DAY: usize = 2000;

fn next_secret(secret: Secret) -> Secret {
    let mix_prune = |secret: Secret, value: Secret| (secret ^ value) % PRUNE_MODULUS;
    // only the pruned bits of a secret affect the next one
    let secret = secret % PRUNE_MODULUS;
    let secret = mix_prune(secret, secret * 64);
    let secret = mix_prune(secret, secret / 32);
    mix_prune(secret, secret * 2048)
}

/// The secrets a buyer generates, starting with their initial secret.
fn secrets(initial: Secret) -> impl Iterator<Item = Secret> {
    std::iter::successors(Some(initial), |&secret| Some(next_secret(secret)))
}

/*
For part 1, sum the 2000th secret number generated by each buyer.
*/

struct Day22;

impl Solution<PartOne> for Day22 {
    type Input = Buyers;
    type Output = Secret;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .0
            .iter()
            .filter_map(|&initial| secrets(initial).nth(SECRETS_PER_DAY))
            .checked_sum()
            .expect("sum of secrets should not overflow"))
    }
}

/*
For part 2, a buyer's price is the ones digit of each of their secret numbers, including the
initial one. A monkey sells your hiding spots to each buyer as soon as it sees a given sequence of
four consecutive price changes, at the price after the last change. Buyers who never show the
sequence buy nothing.

Find the most bananas you can get by choosing the best sequence of four price changes.
*/

/// Price changes run from -9 to 9, so a sequence of four is a four digit number in base 19.
const CHANGE_VALUES: usize = 19;

const SEQUENCES: usize = CHANGE_VALUES.pow(4);

type Price = u8;

/// Add a buyer's price at the first appearance of each change sequence to the totals.
fn add_first_prices(totals: &mut [u32], seen: &mut [bool], initial: Secret) {
    seen.fill(false);

    let prices: Vec<Price> = secrets(initial)
        .take(SECRETS_PER_DAY + 1)
        .map(|secret| Price::try_from(secret % 10).expect("ones digit should fit in a price"))
        .collect();

    let mut sequence = 0;
    for (index, pair) in prices.windows(2).enumerate() {
        let change = usize::from(pair[1]) + 9 - usize::from(pair[0]);
        sequence = (sequence * CHANGE_VALUES + change) % SEQUENCES;
        if index >= 3 && !seen[sequence] {
            seen[sequence] = true;
            totals[sequence] += u32::from(pair[1]);
        }
    }
}

/// Total bananas for each change sequence, summed over all buyers.
fn sequence_totals(initials: &[Secret]) -> Vec<u32> {
    initials
        .par_iter()
        .fold(
            || (vec![0; SEQUENCES], vec![false; SEQUENCES]),
            |(mut totals, mut seen), &initial| {
                add_first_prices(&mut totals, &mut seen, initial);
                (totals, seen)
            },
        )
        .map(|(totals, _)| totals)
        .reduce(
            || vec![0; SEQUENCES],
            |mut merged, totals| {
                for (merged, total) in merged.iter_mut().zip(totals) {
                    *merged += total;
                }
                merged
            },
        )
}

impl Solution<PartTwo> for Day22 {
    type Input = Buyers;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(sequence_totals(&input.0)
            .into_iter()
            .max()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Buyers::parse("1\n10\n100\n2024\n")?;
        let result = <Day22 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 37_327_623);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Buyers::parse("1\n2\n3\n2024\n")?;
        let result = <Day22 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 23);
        Ok(())
    }

    #[test]
    fn secrets_evolve() {
        let generated: Vec<Secret> = secrets(123).skip(1).take(10).collect();
        assert_eq!(
            generated,
            vec![
                15_887_950, 16_495_136, 527_345, 704_524, 1_553_684, 12_683_156, 11_100_544,
                12_249_484, 7_753_432, 5_908_254,
            ]
        );
    }

    #[test]
    fn large_initial_secrets_evolve() -> DynamicResult<()> {
        let large = (1 << 60) + 123;
        assert_eq!(next_secret(large), next_secret(123));
        let parsed = Buyers::parse(&format!("{}\n", Secret::MAX))?;
        <Day22 as Solution<PartOne>>::solve(&parsed)?;
        <Day22 as Solution<PartTwo>>::solve(&parsed)?;
        Ok(())
    }

    #[test]
    fn best_sequence_of_example() {
        let totals = sequence_totals(&[1, 2, 3, 2024]);
        // changes -2,1,-1,3 shifted up by 9
        let sequence = [7, 10, 8, 12]
            .into_iter()
            .fold(0, |sequence, change| sequence * CHANGE_VALUES + change);
        assert_eq!(totals[sequence], 23);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(Buyers::parse("").is_err());
    }
}
