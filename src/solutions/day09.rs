use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 9: Disk Fragmenter",
    parsed = DiskMap,
    part_one = Day09,
    part_two = Day09
)]
impl super::AdventOfCode2024<9> {}

/*
Input is a dense disk map: a single line of digits. The digits alternate between the length of a
file and the length of free space. Each file has an ID based on its order before any
rearrangement, starting at 0.

For example, `12345` is a one-block file with ID 0, two free blocks, a three-block file with ID 1,
four free blocks, then a five-block file with ID 2.
*/

type FileId = usize;

/// A contiguous run of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    len: usize,
}

#[derive(Debug)]
struct DiskMap {
    /// File spans indexed by file ID.
    files: Vec<Span>,
    /// Free spans in order of position.
    free: Vec<Span>,
}

#[derive(thiserror::Error, Debug)]
enum ParseDiskMapError {
    #[error("expected a digit, found {0:?}")]
    NotADigit(char),

    #[error("disk map is empty")]
    Empty,
}

impl ParseData for DiskMap {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let digits = input.trim();
        if digits.is_empty() {
            return Err(ParseDiskMapError::Empty.into());
        }

        let mut files = Vec::new();
        let mut free = Vec::new();
        let mut start = 0;
        for (index, ch) in digits.chars().enumerate() {
            let len = ch.to_digit(10).ok_or(ParseDiskMapError::NotADigit(ch))? as usize;
            let span = Span { start, len };
            if index % 2 == 0 {
                files.push(span);
            } else if len > 0 {
                free.push(span);
            }
            start += len;
        }

        Ok(Self { files, free })
    }
}

impl DiskMap {
    /// Every block of the disk, holding the ID of its file or `None` for free space.
    fn blocks(&self) -> Vec<Option<FileId>> {
        let disk_len = self
            .files
            .iter()
            .chain(&self.free)
            .map(|span| span.start + span.len)
            .max()
            .unwrap_or(0);

        let mut blocks = vec![None; disk_len];
        for (id, span) in self.files.iter().enumerate() {
            blocks[span.start..span.start + span.len].fill(Some(id));
        }
        blocks
    }
}

/// The sum of each block's position multiplied by the ID of the file it holds.
fn checksum(blocks: impl Iterator<Item = (usize, FileId)>) -> u64 {
    blocks
        .map(|(position, id)| {
            u64::try_from(position * id).expect("block checksum should fit in u64")
        })
        .checked_sum()
        .expect("checksum should not overflow")
}

/*
For part 1, compact the disk by moving file blocks one at a time from the end of the disk to the
leftmost free space block, until there are no gaps between file blocks. Return the filesystem
checksum.
*/

struct Day09;

impl Solution<PartOne> for Day09 {
    type Input = DiskMap;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut blocks = input.blocks();

        let mut left = 0;
        let mut right = blocks.len();
        loop {
            while left < right && blocks[left].is_some() {
                left += 1;
            }
            while left < right && blocks[right - 1].is_none() {
                right -= 1;
            }
            if left + 1 >= right {
                break;
            }
            blocks.swap(left, right - 1);
        }

        Ok(checksum(
            blocks
                .into_iter()
                .enumerate()
                .filter_map(|(position, id)| Some((position, id?))),
        ))
    }
}

/*
For part 2, move whole files instead. Attempt to move each file exactly once, in order of
decreasing file ID, to the leftmost span of free space that could fit the whole file. If no span
to the left of the file fits, the file does not move.
*/

impl Solution<PartTwo> for Day09 {
    type Input = DiskMap;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let mut files = input.files.clone();
        let mut free = input.free.clone();

        for file in files.iter_mut().rev() {
            let Some(space) = free
                .iter_mut()
                .take_while(|space| space.start < file.start)
                .find(|space| space.len >= file.len)
            else {
                continue;
            };
            file.start = space.start;
            space.start += file.len;
            space.len -= file.len;
        }

        Ok(checksum(files.iter().enumerate().flat_map(|(id, span)| {
            (span.start..span.start + span.len).map(move |position| (position, id))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "2333133121414131402\n";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = DiskMap::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 1928);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = DiskMap::parse(EXAMPLE_INPUT)?;
        let result = <Day09 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 2858);
        Ok(())
    }

    #[test]
    fn expands_blocks() -> DynamicResult<()> {
        let parsed = DiskMap::parse("12345")?;
        let layout: String = parsed
            .blocks()
            .into_iter()
            .map(|block| block.map_or('.', |id| char::from(b'0' + id as u8)))
            .collect();
        assert_eq!(layout, "0..111....22222");
        Ok(())
    }

    #[test]
    fn compacts_single_blocks() -> DynamicResult<()> {
        // compacted to 022111222
        let parsed = DiskMap::parse("12345")?;
        let expected = [0, 2, 2, 1, 1, 1, 2, 2, 2]
            .iter()
            .enumerate()
            .map(|(position, id)| position * id)
            .sum::<usize>();
        assert_eq!(
            <Day09 as Solution<PartOne>>::solve(&parsed)?,
            expected as u64
        );
        Ok(())
    }

    #[test]
    fn rejects_non_digits() {
        assert!(DiskMap::parse("12a4").is_err());
        assert!(DiskMap::parse("\n").is_err());
    }
}
