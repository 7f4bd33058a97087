use aoc_framework::parsing::InputScanner;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, Solution};

#[solution_runner(name = "Day 25: Code Chronicle", parsed = Schematics, part_one = Day25)]
impl super::AdventOfCode2024<25> {}

/*
Input is a list of lock and key schematics separated by blank lines. Each schematic is a grid of
`#` for filled and `.` for empty.

Locks have their top row filled and pins extending down. Keys have their bottom row filled and
shapes extending up. A schematic is read as the height of each column, not counting the filled
top or bottom row.

```
#####     .....
.####     #....
.####     #....
.####     #...#
.#.#.     #.#.#
.#...     #.###
.....     #####
```

The lock on the left has heights `0,5,3,4,3`, and the key on the right has `5,0,2,1,3`.
*/

type Heights = Vec<usize>;

#[derive(Debug)]
struct Schematics {
    locks: Vec<Heights>,
    keys: Vec<Heights>,
    /// The most a lock and key column can add up to without overlapping.
    space: usize,
}

#[derive(thiserror::Error, Debug)]
enum ParseSchematicsError {
    #[error("invalid schematic tile: {0:?}")]
    InvalidTile(char),

    #[error("schematics must all have the same size")]
    MismatchedSize,

    #[error("schematic is neither a lock nor a key")]
    UnknownKind,

    #[error("input has no schematics")]
    NoSchematics,
}

fn column_heights(rows: &[Vec<bool>]) -> Heights {
    let width = rows.first().map_or(0, Vec::len);
    (0..width)
        .map(|col| {
            rows.iter()
                .filter(|row| row[col])
                .count()
                .saturating_sub(1)
        })
        .collect()
}

impl ParseData for Schematics {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);
        let mut locks = Vec::new();
        let mut keys = Vec::new();
        let mut size = None;

        while scanner.skip_empty().is_some() {
            let rows = scanner.collect_sequence(|_, line| {
                line.trim()
                    .chars()
                    .map(|ch| match ch {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        _ => Err(ParseSchematicsError::InvalidTile(ch)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })?;

            let width = rows[0].len();
            if rows.iter().any(|row| row.len() != width)
                || *size.get_or_insert((rows.len(), width)) != (rows.len(), width)
            {
                return Err(ParseSchematicsError::MismatchedSize.into());
            }

            let filled = |row: &Vec<bool>| row.iter().all(|&tile| tile);
            if rows.first().is_some_and(filled) {
                locks.push(column_heights(&rows));
            } else if rows.last().is_some_and(filled) {
                keys.push(column_heights(&rows));
            } else {
                return Err(ParseSchematicsError::UnknownKind.into());
            }
        }

        let Some((rows, _)) = size else {
            return Err(ParseSchematicsError::NoSchematics.into());
        };
        Ok(Self {
            locks,
            keys,
            space: rows.saturating_sub(2),
        })
    }
}

impl Schematics {
    fn fits(&self, lock: &[usize], key: &[usize]) -> bool {
        lock.iter()
            .zip(key)
            .all(|(lock, key)| lock + key <= self.space)
    }
}

/*
For part 1, count the unique pairs of locks and keys that fit together without overlapping in any
column.
*/

struct Day25;

impl Solution<PartOne> for Day25 {
    type Input = Schematics;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input
            .locks
            .iter()
            .flat_map(|lock| input.keys.iter().map(move |key| (lock, key)))
            .filter(|(lock, key)| input.fits(lock, key))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"#####
.####
.####
.####
.#.#.
.#...
.....

#####
##.##
.#.##
...##
...#.
...#.
.....

.....
#....
#....
#...#
#.#.#
#.###
#####

.....
.....
#.#..
###..
###.#
###.#
#####

.....
.....
.....
#....
#.#..
#.#.#
#####
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Schematics::parse(EXAMPLE_INPUT)?;
        let result = <Day25 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 3);
        Ok(())
    }

    #[test]
    fn reads_heights() -> DynamicResult<()> {
        let parsed = Schematics::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.locks, vec![vec![0, 5, 3, 4, 3], vec![1, 2, 0, 5, 3]]);
        assert_eq!(
            parsed.keys,
            vec![vec![5, 0, 2, 1, 3], vec![4, 3, 4, 0, 2], vec![3, 0, 2, 0, 1]]
        );
        assert_eq!(parsed.space, 5);
        Ok(())
    }

    #[test]
    fn rejects_invalid_schematics() {
        assert!(Schematics::parse("").is_err());
        assert!(Schematics::parse("#.#\n...\n.#.\n").is_err());
        assert!(Schematics::parse("###\n...\n\n####\n....\n").is_err());
    }
}
