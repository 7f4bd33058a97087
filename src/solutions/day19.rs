use aoc_framework::parsing::split_sections;
use aoc_framework::runner::solution_runner;
use aoc_framework::search::Memo;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 19: Linen Layout",
    parsed = Onsen,
    part_one = Day19,
    part_two = Day19
)]
impl super::AdventOfCode2024<19> {}

/*
Input is a comma separated list of available towel patterns, a blank line, then the desired
designs, one per line.

Stripes are colored white (`w`), blue (`u`), black (`b`), red (`r`), or green (`g`). A design is
made by arranging towels in a line, matching each towel's pattern of stripes. There is an
unlimited number of towels of each pattern, and towels cannot be reversed.
*/

#[derive(Debug)]
struct Onsen {
    patterns: Vec<String>,
    designs: Vec<String>,
}

#[derive(thiserror::Error, Debug)]
enum ParseOnsenError {
    #[error("invalid stripe color: {0:?}")]
    InvalidColor(char),

    #[error("towel pattern must not be empty")]
    EmptyPattern,
}

fn validate_stripes(stripes: &str) -> Result<String, ParseOnsenError> {
    match stripes.chars().find(|ch| !matches!(ch, 'w' | 'u' | 'b' | 'r' | 'g')) {
        Some(invalid) => Err(ParseOnsenError::InvalidColor(invalid)),
        None => Ok(stripes.to_string()),
    }
}

impl ParseData for Onsen {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let (patterns_section, designs_section) = split_sections(input)?;

        let patterns = patterns_section
            .split(',')
            .map(|pattern| {
                let pattern = pattern.trim();
                if pattern.is_empty() {
                    return Err(ParseOnsenError::EmptyPattern);
                }
                validate_stripes(pattern)
            })
            .collect::<Result<_, _>>()?;
        let designs = designs_section
            .lines()
            .map(str::trim)
            .filter(|design| !design.is_empty())
            .map(validate_stripes)
            .collect::<Result<_, _>>()?;

        Ok(Self { patterns, designs })
    }
}

impl Onsen {
    /// Count the different ways the design can be made from the towel patterns.
    ///
    /// Results are cached by the remaining suffix of a design, which is shared across designs.
    fn arrangements<'a>(&self, memo: &mut Memo<&'a str, u64>, design: &'a str) -> u64 {
        if design.is_empty() {
            return 1;
        }
        memo.get_or_insert_with(design, |memo| {
            self.patterns
                .iter()
                .filter_map(|pattern| design.strip_prefix(pattern.as_str()))
                .map(|rest| self.arrangements(memo, rest))
                .checked_sum()
                .expect("arrangement count should not overflow")
        })
    }

    fn arrangement_counts(&self) -> impl Iterator<Item = u64> {
        let mut memo = Memo::new();
        self.designs
            .iter()
            .map(move |design| self.arrangements(&mut memo, design))
    }
}

/*
For part 1, count the designs that are possible with the available towel patterns.
*/

struct Day19;

impl Solution<PartOne> for Day19 {
    type Input = Onsen;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.arrangement_counts().filter(|&count| count > 0).count())
    }
}

/*
For part 2, sum the number of different ways each design could be made.
*/

impl Solution<PartTwo> for Day19 {
    type Input = Onsen;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .arrangement_counts()
            .checked_sum()
            .expect("sum of arrangements should not overflow"))
    }
}
