use aoc_framework::grid::{Grid, Position};
use aoc_framework::runner::solution_runner;
use aoc_framework::search::breadth_first_distances;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 20: Race Condition",
    parsed = Racetrack,
    part_one = Day20,
    part_two = Day20
)]
impl super::AdventOfCode2024<20> {}

/*
Input is a map of a racetrack: `#` is a wall, `.` is track, `S` is the start, and `E` is the end.
There is a single path from start to end, and moving one position takes a picosecond.

Exactly once during a race, a program may cheat by disabling collision for a short time, passing
through walls. A cheat is identified by its start and end positions, which must both be track.
*/

#[derive(Debug)]
struct Racetrack {
    /// Picoseconds from the start to each track position, or `None` for walls.
    times: Grid<Option<usize>>,
}

#[derive(thiserror::Error, Debug)]
enum ParseRacetrackError {
    #[error("invalid racetrack tile: {0:?}")]
    InvalidTile(char),

    #[error("racetrack needs exactly one start and one end")]
    MissingEndpoint,

    #[error("the end is not reachable from the start")]
    Disconnected,
}

impl ParseData for Racetrack {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        let track = Grid::parse_with(input, |position, ch| match ch {
            '#' => Ok(false),
            '.' => Ok(true),
            'S' => {
                starts.push(position);
                Ok(true)
            }
            'E' => {
                ends.push(position);
                Ok(true)
            }
            _ => Err(ParseRacetrackError::InvalidTile(ch)),
        })?;
        let ([start], [end]) = (&starts[..], &ends[..]) else {
            return Err(ParseRacetrackError::MissingEndpoint.into());
        };

        let distances = breadth_first_distances([*start], |&position| {
            track
                .neighbors(position)
                .map(|(_, neighbor)| neighbor)
                .filter(|&neighbor| track.get(neighbor) == Some(&true))
        });
        if !distances.contains_key(end) {
            return Err(ParseRacetrackError::Disconnected.into());
        }

        let mut times = Grid::filled(track.rows(), track.cols(), None);
        for (position, time) in distances {
            times.set(position, Some(time));
        }
        Ok(Self { times })
    }
}

impl Racetrack {
    /// Positions within `radius` steps of `center`, ignoring walls, with their distance.
    fn within(
        &self,
        center: Position,
        radius: usize,
    ) -> impl Iterator<Item = (Position, usize)> {
        let radius = isize::try_from(radius).expect("cheat duration should fit in isize");
        (-radius..=radius).flat_map(move |row_offset| {
            let remaining = radius - row_offset.abs();
            (-remaining..=remaining).filter_map(move |col_offset| {
                let position = center.offset_by(row_offset, col_offset)?;
                Some((position, center.manhattan_distance(position)))
            })
        })
    }

    /// Count the cheats lasting at most `max_duration` that save at least `min_saving`
    /// picoseconds.
    fn count_cheats(&self, max_duration: usize, min_saving: usize) -> usize {
        self.times
            .iter()
            .filter_map(|(position, time)| Some((position, (*time)?)))
            .map(|(start, start_time)| {
                self.within(start, max_duration)
                    .filter(|&(end, duration)| {
                        self.times
                            .get(end)
                            .copied()
                            .flatten()
                            .and_then(|end_time| end_time.checked_sub(start_time + duration))
                            .is_some_and(|saving| saving >= min_saving)
                    })
                    .count()
            })
            .sum()
    }
}

/// The fewest picoseconds a cheat must save to be worth counting.
const MIN_SAVING: usize = 100;

/*
For part 1, cheats last up to 2 picoseconds. Count the cheats that would save at least 100
picoseconds.
*/

struct Day20;

impl Solution<PartOne> for Day20 {
    type Input = Racetrack;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_cheats(2, MIN_SAVING))
    }
}

/*
For part 2, cheats last up to 20 picoseconds. Any unused cheat time is lost, and cheats are still
identified only by their start and end positions.
*/

impl Solution<PartTwo> for Day20 {
    type Input = Racetrack;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.count_cheats(20, MIN_SAVING))
    }
}
