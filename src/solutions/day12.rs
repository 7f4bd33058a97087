use aoc_framework::grid::{Direction, Grid, Position};
use aoc_framework::runner::solution_runner;
use aoc_framework::search::breadth_first_distances;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use checked_sum::CheckedSum;

#[solution_runner(
    name = "Day 12: Garden Groups",
    parsed = Garden,
    part_one = Day12,
    part_two = Day12
)]
impl super::AdventOfCode2024<12> {}

/*
Input is a map of garden plots, each growing a type of plant named by a letter.

Plots of the same plant touching horizontally or vertically form a region. Plots of the same plant
in separate areas are separate regions.
*/

type Plant = char;

#[derive(Debug)]
struct Garden(Grid<Plant>);

#[derive(thiserror::Error, Debug)]
#[error("expected a plant letter, found {0:?}")]
struct InvalidPlant(char);

impl ParseData for Garden {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let grid = Grid::parse_with(input, |_, ch| {
            if ch.is_ascii_alphabetic() {
                Ok(ch)
            } else {
                Err(InvalidPlant(ch))
            }
        })?;
        Ok(Self(grid))
    }
}

impl Garden {
    /// Check if the plot one step from `position` grows the same plant.
    fn same_plant(&self, position: Position, direction: Direction) -> bool {
        self.0
            .step(position, direction)
            .is_some_and(|neighbor| self.0.get(neighbor) == self.0.get(position))
    }

    /// Check if the plot diagonally across from `position` grows the same plant.
    fn same_plant_diagonal(&self, position: Position, first: Direction, second: Direction) -> bool {
        self.0
            .step(position, first)
            .and_then(|across| self.0.step(across, second))
            .is_some_and(|diagonal| self.0.get(diagonal) == self.0.get(position))
    }

    /// Group the plots into regions by flood filling.
    fn regions(&self) -> Vec<Vec<Position>> {
        let mut assigned = Grid::filled(self.0.rows(), self.0.cols(), false);
        let mut regions = Vec::new();

        for start in self.0.positions() {
            if assigned.get(start) == Some(&true) {
                continue;
            }
            let region: Vec<Position> = breadth_first_distances([start], |&position| {
                Direction::ALL
                    .into_iter()
                    .filter(move |&direction| self.same_plant(position, direction))
                    .filter_map(move |direction| self.0.step(position, direction))
            })
            .into_keys()
            .collect();

            for &position in &region {
                assigned.set(position, true);
            }
            regions.push(region);
        }
        regions
    }

    /// The length of fence around a plot, one for each side not shared with the same plant.
    fn plot_perimeter(&self, position: Position) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|&direction| !self.same_plant(position, direction))
            .count()
    }

    /// The number of fence corners at a plot.
    ///
    /// A region has as many sides as corners, so summing corners counts sides.
    fn plot_corners(&self, position: Position) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|&first| {
                let second = first.turn_right();
                let first_same = self.same_plant(position, first);
                let second_same = self.same_plant(position, second);
                // outer corner, or inner corner where the diagonal plot differs
                (!first_same && !second_same)
                    || (first_same
                        && second_same
                        && !self.same_plant_diagonal(position, first, second))
            })
            .count()
    }

    /// The total price of fencing every region, as area times the region's fence measure.
    fn fence_price(&self, measure: impl Fn(&Self, Position) -> usize) -> u64 {
        self.regions()
            .iter()
            .map(|region| {
                let area = region.len();
                let fence: usize = region.iter().map(|&position| measure(self, position)).sum();
                u64::try_from(area * fence).expect("region price should fit in u64")
            })
            .checked_sum()
            .expect("total price should not overflow")
    }
}

/*
For part 1, the price of fence for a region is its area multiplied by its perimeter. Sum the price
of fencing all regions.
*/

struct Day12;

impl Solution<PartOne> for Day12 {
    type Input = Garden;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.fence_price(Garden::plot_perimeter))
    }
}

/*
For part 2, a bulk discount applies: the price of fence for a region is its area multiplied by its
number of sides. Each straight section of fence counts as one side, regardless of length.
*/

impl Solution<PartTwo> for Day12 {
    type Input = Garden;
    type Output = u64;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.fence_price(Garden::plot_corners))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_EXAMPLE: &str = r"AAAA
BBCD
BBCC
EEEC
";

    const ENCLOSED_EXAMPLE: &str = r"OOOOO
OXOXO
OOOOO
OXOXO
OOOOO
";

    const LARGE_EXAMPLE: &str = r"RRRRIICCFF
RRRRIICCCF
VVRRRCCFFF
VVRCCCJFFF
VVVVCJJCFE
VVIVCCJJEE
VVIIICJJEE
MIIIIIJJEE
MIIISIJEEE
MMMISSJEEE
";

    #[test]
    fn part_one_solves_examples() -> DynamicResult<()> {
        for (example, expected) in [
            (SMALL_EXAMPLE, 140),
            (ENCLOSED_EXAMPLE, 772),
            (LARGE_EXAMPLE, 1930),
        ] {
            let parsed = Garden::parse(example)?;
            let result = <Day12 as Solution<PartOne>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn part_two_solves_examples() -> DynamicResult<()> {
        for (example, expected) in [
            (SMALL_EXAMPLE, 80),
            (ENCLOSED_EXAMPLE, 436),
            (LARGE_EXAMPLE, 1206),
            ("EEEEE\nEXXXX\nEEEEE\nEXXXX\nEEEEE\n", 236),
            ("AAAAAA\nAAABBA\nAAABBA\nABBAAA\nABBAAA\nAAAAAA\n", 368),
        ] {
            let parsed = Garden::parse(example)?;
            let result = <Day12 as Solution<PartTwo>>::solve(&parsed)?;
            assert_eq!(result, expected);
        }
        Ok(())
    }

    #[test]
    fn separate_areas_are_separate_regions() -> DynamicResult<()> {
        let parsed = Garden::parse(ENCLOSED_EXAMPLE)?;
        assert_eq!(parsed.regions().len(), 5);
        Ok(())
    }
}
