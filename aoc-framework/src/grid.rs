//! Two-dimensional grids of cells parsed from character input.
//!
//! A [`Grid`] is indexed by [`Position`] (row then column, both zero based from the top left).
//! Moving between positions is done through [`Direction`], with every move checked against the
//! grid's bounds.

use std::fmt::{self, Display};

use nalgebra::{DMatrix, Scalar};
use thiserror::Error;

use crate::{DynamicError, DynamicResult, ParseData};

/// A cardinal direction on a grid, where north is towards row zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction after a 90 degree counter-clockwise turn.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// The direction after a 90 degree clockwise turn.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// The `(row, column)` offset of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Whether the direction moves along rows (north or south).
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// An error converting a [`char`] to a [`Direction`].
#[derive(Error, Debug)]
#[error("invalid direction character: {0:?}")]
pub struct InvalidDirectionChar(pub char);

impl TryFrom<char> for Direction {
    type Error = InvalidDirectionChar;

    /// Converts arrow characters (`^`, `>`, `v`, `<`).
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '^' => Ok(Self::North),
            '>' => Ok(Self::East),
            'v' => Ok(Self::South),
            '<' => Ok(Self::West),
            _ => Err(InvalidDirectionChar(value)),
        }
    }
}

impl From<Direction> for char {
    fn from(value: Direction) -> Self {
        match value {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }
}

/// A position on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighboring position one step in `direction`.
    ///
    /// Returns `None` when the step would go below row or column zero. Upper bounds are checked
    /// by [`Grid::step`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (row_offset, col_offset) = direction.offset();
        self.offset_by(row_offset, col_offset)
    }

    /// The position shifted by signed row and column offsets, or `None` on underflow/overflow.
    #[must_use]
    pub fn offset_by(self, row_offset: isize, col_offset: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(row_offset)?,
            col: self.col.checked_add_signed(col_offset)?,
        })
    }

    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    fn to_index(self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An error parsing a string into a [`Grid`].
#[derive(Error, Debug)]
pub enum ParseGridError {
    #[error("grid input has no rows")]
    Empty,

    #[error("expected grid width to be {expected} across rows, but row {row} has width {found}")]
    UnequalWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid grid cell at {position}")]
    InvalidCell {
        position: Position,
        #[source]
        source: DynamicError,
    },
}

/// A rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T: Scalar> {
    cells: DMatrix<T>,
}

impl<T: Scalar> Grid<T> {
    /// Parse a character grid, converting each character with `cell_parser`.
    ///
    /// Lines must be of equal width. Blank lines at the end of the input are ignored.
    ///
    /// # Errors
    ///
    /// A [`ParseGridError`] if the input is empty, rows are of unequal width, or a cell fails to
    /// convert.
    pub fn parse_with<F, E>(input: &str, mut cell_parser: F) -> Result<Self, ParseGridError>
    where
        F: FnMut(Position, char) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        let mut width = None;
        let mut rows = 0;
        let mut cells = Vec::new();

        for (row, line) in input.trim_end().lines().enumerate() {
            let mut found = 0;
            for (col, ch) in line.chars().enumerate() {
                let position = Position::new(row, col);
                let cell =
                    cell_parser(position, ch).map_err(|source| ParseGridError::InvalidCell {
                        position,
                        source: source.into(),
                    })?;
                cells.push(cell);
                found += 1;
            }

            match width {
                Some(expected) if expected != found => {
                    return Err(ParseGridError::UnequalWidth {
                        row,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
                None => width = Some(found),
            }
            rows += 1;
        }

        match width {
            Some(cols) if cols > 0 => Ok(Self {
                cells: DMatrix::from_row_iterator(rows, cols, cells),
            }),
            _ => Err(ParseGridError::Empty),
        }
    }

    /// Create a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            cells: DMatrix::from_element(rows, cols, value),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Check if the position lies within the grid's bounds.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows() && position.col < self.cols()
    }

    #[must_use]
    pub fn get(&self, position: Position) -> Option<&T> {
        self.cells.get(position.to_index())
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.cells.get_mut(position.to_index())
    }

    /// Replace the cell at `position`, returning the previous value.
    ///
    /// Returns `None` and leaves the grid untouched if the position is out of bounds.
    pub fn set(&mut self, position: Position, value: T) -> Option<T> {
        self.get_mut(position)
            .map(|cell| std::mem::replace(cell, value))
    }

    /// The in-bounds neighboring position one step in `direction`.
    #[must_use]
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|&next| self.contains(next))
    }

    /// The in-bounds neighbors of a position with the direction leading to each.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, Position)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.step(position, direction)?)))
    }

    /// Every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let cols = self.cols();
        (0..self.rows()).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Every position with its cell, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions()
            .map(|position| (position, &self.cells[position.to_index()]))
    }

    /// The first position in row-major order whose cell satisfies the predicate.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<Position> {
        self.iter()
            .find_map(|(position, cell)| predicate(cell).then_some(position))
    }

    /// Every position whose cell satisfies the predicate, in row-major order.
    pub fn find_all(
        &self,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> impl Iterator<Item = Position> {
        self.iter()
            .filter_map(move |(position, cell)| predicate(cell).then_some(position))
    }
}

impl<T> ParseData for Grid<T>
where
    T: Scalar + TryFrom<char>,
    T::Error: Into<DynamicError>,
{
    fn parse(input: &str) -> DynamicResult<Self> {
        Ok(Self::parse_with(input, |_, ch| T::try_from(ch))?)
    }
}

impl<T> Display for Grid<T>
where
    T: Scalar + Copy + Into<char>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            let line: String = (0..self.cols())
                .map(|col| self.cells[(row, col)].into())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tile {
        Open,
        Wall,
    }

    #[derive(Error, Debug)]
    #[error("bad tile {0:?}")]
    struct BadTile(char);

    impl TryFrom<char> for Tile {
        type Error = BadTile;

        fn try_from(value: char) -> Result<Self, Self::Error> {
            match value {
                '.' => Ok(Self::Open),
                '#' => Ok(Self::Wall),
                _ => Err(BadTile(value)),
            }
        }
    }

    impl From<Tile> for char {
        fn from(value: Tile) -> Self {
            match value {
                Tile::Open => '.',
                Tile::Wall => '#',
            }
        }
    }

    #[test]
    fn parses_rows_and_columns() -> DynamicResult<()> {
        let grid = Grid::<Tile>::parse("..#\n#..\n")?;
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(Position::new(0, 2)), Some(&Tile::Wall));
        assert_eq!(grid.get(Position::new(1, 0)), Some(&Tile::Wall));
        assert_eq!(grid.get(Position::new(1, 1)), Some(&Tile::Open));
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert_eq!(grid.to_string(), "..#\n#..\n");
        Ok(())
    }

    #[test]
    fn rejects_unequal_rows() {
        let result = Grid::<Tile>::parse_with("...\n..\n", |_, ch| Tile::try_from(ch));
        assert!(matches!(
            result,
            Err(ParseGridError::UnequalWidth {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn rejects_invalid_cell_with_position() {
        let result = Grid::<Tile>::parse_with("..\n.x\n", |_, ch| Tile::try_from(ch));
        let Err(ParseGridError::InvalidCell { position, .. }) = result else {
            panic!("expected an invalid cell error");
        };
        assert_eq!(position, Position::new(1, 1));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            Grid::<Tile>::parse_with("\n\n", |_, ch| Tile::try_from(ch)),
            Err(ParseGridError::Empty)
        ));
    }

    #[test]
    fn steps_stay_in_bounds() {
        let grid = Grid::filled(2, 2, Tile::Open);
        let corner = Position::new(0, 0);
        assert_eq!(grid.step(corner, Direction::North), None);
        assert_eq!(grid.step(corner, Direction::West), None);
        assert_eq!(
            grid.step(corner, Direction::East),
            Some(Position::new(0, 1))
        );
        assert_eq!(grid.step(Position::new(1, 1), Direction::South), None);

        let neighbors: Vec<_> = grid.neighbors(corner).collect();
        assert_eq!(
            neighbors,
            vec![
                (Direction::East, Position::new(0, 1)),
                (Direction::South, Position::new(1, 0)),
            ]
        );
    }

    #[test]
    fn positions_are_row_major() {
        let grid = Grid::filled(2, 3, Tile::Open);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[1], Position::new(0, 1));
        assert_eq!(positions[3], Position::new(1, 0));
    }

    #[test]
    fn set_replaces_cell() {
        let mut grid = Grid::filled(2, 2, Tile::Open);
        assert_eq!(grid.set(Position::new(1, 0), Tile::Wall), Some(Tile::Open));
        assert_eq!(grid.find(|tile| *tile == Tile::Wall), Some(Position::new(1, 0)));
        assert_eq!(grid.set(Position::new(5, 0), Tile::Wall), None);
        assert_eq!(grid.find_all(|tile| *tile == Tile::Wall).count(), 1);
    }

    #[test]
    fn turns_compose() {
        for direction in Direction::ALL {
            assert_eq!(direction.turn_left().turn_right(), direction);
            assert_eq!(direction.turn_right().turn_right(), direction.opposite());
        }
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(0, 4);
        let b = Position::new(3, 1);
        assert_eq!(a.manhattan_distance(b), 6);
        assert_eq!(b.manhattan_distance(a), 6);
    }
}
