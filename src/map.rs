use std::{collections::VecDeque, fmt::Display};

use log::debug;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::Error;

pub const LOWEST_ELEVATION: u8 = 0;
pub const HIGHEST_ELEVATION: u8 = 25;

#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ];

        &ALL_DIRECTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    // Positions past the right or bottom edge are left for the map to reject.
    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Left if self.x > 0 => Some(Position::new(self.x - 1, self.y)),
            Direction::Right => Some(Position::new(self.x + 1, self.y)),
            Direction::Up if self.y > 0 => Some(Position::new(self.x, self.y - 1)),
            Direction::Down => Some(Position::new(self.x, self.y + 1)),
            _ => None,
        }
    }
}

/// Steps needed to reach every position of a height map from one source,
/// `None` for positions the source can't reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    steps: Vec<Option<usize>>,
    x_n: usize,
    y_n: usize,
}

impl DistanceMap {
    fn new(x_n: usize, y_n: usize) -> Self {
        Self {
            steps: vec![None; x_n * y_n],
            x_n,
            y_n,
        }
    }

    pub fn get(&self, pos: &Position) -> Option<usize> {
        if pos.x < self.x_n && pos.y < self.y_n {
            self.steps[pos.y * self.x_n + pos.x]
        } else {
            None
        }
    }

    pub fn reached_n(&self) -> usize {
        self.steps.iter().filter(|steps| steps.is_some()).count()
    }
}

#[derive(Debug, Clone)]
pub struct HeightMap {
    elevations: Vec<u8>,
    x_n: usize,
    y_n: usize,
    start: Position,
    end: Position,
}

impl TryFrom<&str> for HeightMap {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut builder = MapBuilder::new();
        for line in value.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

impl HeightMap {
    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn x_n(&self) -> usize {
        self.x_n
    }

    pub fn y_n(&self) -> usize {
        self.y_n
    }

    pub fn elevation(&self, pos: &Position) -> Option<u8> {
        if self.is_inside(pos) {
            Some(self.elevations[self.pos_to_ind(pos)])
        } else {
            None
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.y_n).flat_map(move |y| (0..self.x_n).map(move |x| Position::new(x, y)))
    }

    pub fn lowest_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|pos| self.elevation(pos) == Some(LOWEST_ELEVATION))
            .collect()
    }

    /// Positions one step away from `pos`, in the order left, right, up, down.
    ///
    /// A step may go down any number of units but climb at most one.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside of this map.
    pub fn neighbors(&self, pos: &Position) -> Vec<Position> {
        self.assert_inside(pos);
        let max_elevation = self.elevations[self.pos_to_ind(pos)] + 1;
        Direction::all_dirs()
            .iter()
            .filter_map(|dir| pos.neighbor(*dir))
            .filter(|next_pos| {
                self.elevation(next_pos)
                    .is_some_and(|elevation| elevation <= max_elevation)
            })
            .collect()
    }

    /// Breadth-first search from `from` over the whole map.
    ///
    /// # Panics
    ///
    /// Panics if `from` lies outside of this map.
    pub fn distances_from(&self, from: &Position) -> DistanceMap {
        self.assert_inside(from);
        let mut distances = DistanceMap::new(self.x_n, self.y_n);
        let mut visited = vec![false; self.elevations.len()];
        let from_ind = self.pos_to_ind(from);
        visited[from_ind] = true;
        distances.steps[from_ind] = Some(0);

        let mut search_positions = VecDeque::from([(0, *from)]);
        while let Some((cur_steps_n, cur_pos)) = search_positions.pop_front() {
            for next_pos in self.neighbors(&cur_pos) {
                let next_ind = self.pos_to_ind(&next_pos);
                if !visited[next_ind] {
                    visited[next_ind] = true;
                    distances.steps[next_ind] = Some(cur_steps_n + 1);
                    search_positions.push_back((cur_steps_n + 1, next_pos));
                }
            }
        }

        debug!(
            "Reached {} of {} position(s) from {}.",
            distances.reached_n(),
            self.elevations.len(),
            from
        );
        distances
    }

    /// Fewest steps from `from` to `to`, `None` if there's no path.
    ///
    /// # Panics
    ///
    /// Panics if either position lies outside of this map.
    pub fn min_steps_n(&self, from: &Position, to: &Position) -> Option<usize> {
        self.assert_inside(to);
        self.distances_from(from).get(to)
    }

    /// Fewest steps to `to` starting from any position at the lowest elevation.
    pub fn min_steps_n_from_lowest(&self, to: &Position) -> Option<usize> {
        let sources = self.lowest_positions();
        debug!(
            "Searching paths to {} from {} lowest position(s).",
            to,
            sources.len()
        );
        sources
            .par_iter()
            .filter_map(|from| self.min_steps_n(from, to))
            .min()
    }

    fn assert_inside(&self, pos: &Position) {
        assert!(
            self.is_inside(pos),
            "Position {} is outside of height map({}x{}).",
            pos,
            self.x_n,
            self.y_n
        );
    }

    fn is_inside(&self, pos: &Position) -> bool {
        pos.x < self.x_n && pos.y < self.y_n
    }

    fn pos_to_ind(&self, pos: &Position) -> usize {
        pos.y * self.x_n + pos.x
    }
}

pub struct MapBuilder {
    elevations: Vec<u8>,
    x_n: Option<usize>,
    y_n: usize,
    start: Option<Position>,
    end: Option<Position>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            elevations: Vec::new(),
            x_n: None,
            y_n: 0,
            start: None,
            end: None,
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let this_x_n = text.chars().count();
        let expect_x_n = *self.x_n.get_or_insert(this_x_n);
        if expect_x_n != this_x_n {
            return Err(Error::InconsistentRow(expect_x_n, this_x_n));
        }

        let y = self.y_n;
        for (x, c) in text.chars().enumerate() {
            let pos = Position::new(x, y);
            let elevation = match c {
                'S' => {
                    Self::mark(&mut self.start, pos, Error::MultipleStarts)?;
                    LOWEST_ELEVATION
                }
                'E' => {
                    Self::mark(&mut self.end, pos, Error::MultipleEnds)?;
                    HIGHEST_ELEVATION
                }
                'a'..='z' => c as u8 - b'a',
                other => return Err(Error::InvalidChar(other)),
            };
            self.elevations.push(elevation);
        }
        self.y_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<HeightMap, Error> {
        let x_n = self.x_n.unwrap_or(0);
        if x_n == 0 || self.y_n == 0 {
            return Err(Error::EmptyMap);
        }

        Ok(HeightMap {
            elevations: self.elevations,
            x_n,
            y_n: self.y_n,
            start: self.start.ok_or(Error::NoStart)?,
            end: self.end.ok_or(Error::NoEnd)?,
        })
    }

    fn mark(
        slot: &mut Option<Position>,
        pos: Position,
        repeat_error: fn(Position, Position) -> Error,
    ) -> Result<(), Error> {
        if let Some(first_pos) = *slot {
            return Err(repeat_error(first_pos, pos));
        }

        *slot = Some(pos);
        Ok(())
    }
}

#[cfg(test)]
const EXAMPLE_MAP: &str = "Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi";

#[cfg(test)]
const CLIFF_MAP: &str = "SczE
abcd";

#[test]
fn test_parse_example() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    assert_eq!(map.x_n(), 8);
    assert_eq!(map.y_n(), 5);
    assert_eq!(map.start(), Position::new(0, 0));
    assert_eq!(map.end(), Position::new(5, 2));
    assert_eq!(map.elevation(&Position::new(0, 0)), Some(0));
    assert_eq!(map.elevation(&Position::new(3, 0)), Some(16));
    assert_eq!(map.elevation(&Position::new(5, 2)), Some(25));
    assert_eq!(map.elevation(&Position::new(8, 0)), None);
}

#[test]
fn test_parse_invalid_map() {
    assert_eq!(
        HeightMap::try_from("SaE\nab").unwrap_err(),
        Error::InconsistentRow(3, 2)
    );
    assert_eq!(
        HeightMap::try_from("Sa?E").unwrap_err(),
        Error::InvalidChar('?')
    );
    assert_eq!(HeightMap::try_from("").unwrap_err(), Error::EmptyMap);
    assert_eq!(HeightMap::try_from("abE").unwrap_err(), Error::NoStart);
    assert_eq!(HeightMap::try_from("Sab").unwrap_err(), Error::NoEnd);
    assert_eq!(
        HeightMap::try_from("SaSE").unwrap_err(),
        Error::MultipleStarts(Position::new(0, 0), Position::new(2, 0))
    );
    assert_eq!(
        HeightMap::try_from("SE\naE").unwrap_err(),
        Error::MultipleEnds(Position::new(1, 0), Position::new(1, 1))
    );
}

#[test]
fn test_neighbors() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    assert_eq!(
        map.neighbors(&Position::new(2, 2)),
        vec![Position::new(1, 2), Position::new(2, 1), Position::new(2, 3)]
    );
    assert_eq!(
        map.neighbors(&Position::new(1, 4)),
        vec![Position::new(0, 4), Position::new(1, 3)]
    );
}

#[test]
fn test_neighbors_climb_at_most_one() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    for pos in map.positions() {
        let elevation = map.elevation(&pos).unwrap();
        let neighbors = map.neighbors(&pos);
        assert!(neighbors.len() <= 4);
        for next_pos in neighbors {
            let next_elevation = map.elevation(&next_pos).unwrap();
            assert!(next_elevation <= elevation + 1);
            assert_eq!(
                pos.x().abs_diff(next_pos.x()) + pos.y().abs_diff(next_pos.y()),
                1
            );
        }
    }
}

#[test]
fn test_single_cell_map() {
    let pos = Position::new(0, 0);
    let map = HeightMap {
        elevations: vec![LOWEST_ELEVATION],
        x_n: 1,
        y_n: 1,
        start: pos,
        end: pos,
    };
    assert!(map.neighbors(&pos).is_empty());
    assert_eq!(map.min_steps_n(&pos, &pos), Some(0));
    assert_eq!(map.min_steps_n_from_lowest(&pos), Some(0));
}

#[test]
#[should_panic]
fn test_neighbors_outside_map() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    map.neighbors(&Position::new(8, 0));
}

#[test]
fn test_min_steps_n() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    assert_eq!(map.min_steps_n(&map.start(), &map.end()), Some(31));
}

#[test]
fn test_min_steps_n_to_self() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    for pos in map.positions() {
        assert_eq!(map.min_steps_n(&pos, &pos), Some(0));
    }
}

#[test]
fn test_min_steps_n_is_directional() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    assert_eq!(map.min_steps_n(&map.start(), &map.end()), Some(31));
    assert_eq!(map.min_steps_n(&map.end(), &map.start()), Some(7));

    let cliff = HeightMap::try_from(CLIFF_MAP).unwrap();
    assert_eq!(cliff.min_steps_n(&cliff.start(), &cliff.end()), None);
    assert_eq!(cliff.min_steps_n(&cliff.end(), &cliff.start()), Some(3));
}

#[test]
fn test_distances_from_is_repeatable() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    let first = map.distances_from(&map.start());
    let second = map.distances_from(&map.start());
    assert_eq!(first, second);
    assert_eq!(first.reached_n(), map.x_n() * map.y_n());
}

#[test]
fn test_lowest_positions() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    let lowest = map.lowest_positions();
    assert_eq!(lowest.len(), 6);
    assert_eq!(lowest[0], map.start());
    assert!(lowest.contains(&Position::new(0, 4)));
}

#[test]
fn test_min_steps_n_from_lowest() {
    let map = HeightMap::try_from(EXAMPLE_MAP).unwrap();
    let from_lowest = map.min_steps_n_from_lowest(&map.end());
    assert_eq!(from_lowest, Some(29));
    assert!(from_lowest <= map.min_steps_n(&map.start(), &map.end()));

    let sequential = map
        .lowest_positions()
        .iter()
        .filter_map(|from| map.min_steps_n(from, &map.end()))
        .min();
    assert_eq!(from_lowest, sequential);
}

#[test]
fn test_min_steps_n_from_lowest_unreachable() {
    let cliff = HeightMap::try_from(CLIFF_MAP).unwrap();
    assert_eq!(cliff.min_steps_n_from_lowest(&cliff.end()), None);
}
