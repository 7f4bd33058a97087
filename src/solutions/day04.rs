use aoc_framework::grid::{Grid, Position};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 4: Ceres Search",
    parsed = WordSearch,
    part_one = Day04,
    part_two = Day04
)]
impl super::AdventOfCode2024<4> {}

/*
Input is a word search: a grid of uppercase letters.
*/

#[derive(Debug)]
struct WordSearch(Grid<char>);

#[derive(thiserror::Error, Debug)]
#[error("expected an uppercase letter, found {0:?}")]
struct NotALetter(char);

impl ParseData for WordSearch {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let grid = Grid::parse_with(input, |_, ch| {
            if ch.is_ascii_uppercase() {
                Ok(ch)
            } else {
                Err(NotALetter(ch))
            }
        })?;
        Ok(Self(grid))
    }
}

/// Row and column offsets of the eight directions a word can be written in.
const ALL_DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl WordSearch {
    /// Check if `word` is written from `start` stepping by the offset each letter.
    fn has_word_at(
        &self,
        word: &str,
        start: Position,
        (row_step, col_step): (isize, isize),
    ) -> bool {
        let mut position = Some(start);
        for expected in word.chars() {
            let Some(current) = position else {
                return false;
            };
            if self.0.get(current) != Some(&expected) {
                return false;
            }
            position = current.offset_by(row_step, col_step);
        }
        true
    }

    /// Count occurrences of `word` in any of the eight directions, overlaps included.
    fn count_word(&self, word: &str) -> usize {
        self.0
            .positions()
            .map(|start| {
                ALL_DIRECTIONS
                    .iter()
                    .filter(|&&step| self.has_word_at(word, start, step))
                    .count()
            })
            .sum()
    }

    /// Check if the letters diagonally across `center` are an `M` and an `S`, in either order.
    fn is_mas_diagonal(&self, center: Position, (row_step, col_step): (isize, isize)) -> bool {
        let ends = (
            center
                .offset_by(row_step, col_step)
                .and_then(|position| self.0.get(position).copied()),
            center
                .offset_by(-row_step, -col_step)
                .and_then(|position| self.0.get(position).copied()),
        );
        matches!(ends, (Some('M'), Some('S')) | (Some('S'), Some('M')))
    }
}

/*
For part 1, find every occurrence of `XMAS`. Words may be horizontal, vertical, diagonal, written
backwards, or overlap other words.
*/

struct Day04;

impl Solution<PartOne> for Day04 {
    type Input = WordSearch;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_word("XMAS"))
    }
}

/*
For part 2, the puzzle is actually to find two `MAS` in the shape of an X, crossing at their `A`.
Each `MAS` may be written forwards or backwards.
*/

impl Solution<PartTwo> for Day04 {
    type Input = WordSearch;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .0
            .find_all(|&letter| letter == 'A')
            .filter(|&center| {
                input.is_mas_diagonal(center, (1, 1)) && input.is_mas_diagonal(center, (1, -1))
            })
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"MMMSXXMASM
MSAMXMSMSA
AMXSXMAAMM
MSAMASMSMX
XMASAMXAMM
XXAMMXXAMA
SMSMSASXSS
SAXAMASAAA
MAMMMXMMMM
MXMXAXMASX
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = WordSearch::parse(EXAMPLE_INPUT)?;
        let result = <Day04 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 18);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = WordSearch::parse(EXAMPLE_INPUT)?;
        let result = <Day04 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 9);
        Ok(())
    }

    #[test]
    fn finds_words_in_every_direction() -> DynamicResult<()> {
        let parsed = WordSearch::parse("XMASAMX\n")?;
        assert_eq!(parsed.count_word("XMAS"), 2);
        Ok(())
    }

    #[test]
    fn x_must_be_on_diagonals() -> DynamicResult<()> {
        // a plus shape is not an X
        let parsed = WordSearch::parse("ZMZ\nMAS\nZSZ\n")?;
        assert_eq!(<Day04 as Solution<PartTwo>>::solve(&parsed)?, 0);
        Ok(())
    }
}
