use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

mod map;

pub use map::{Direction, DistanceMap, HeightMap, MapBuilder, Position};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InconsistentRow(usize, usize), // (expected count of columns from earlier rows, count of columns in this row).
    InvalidChar(char),
    EmptyMap,
    NoStart,
    NoEnd,
    MultipleStarts(Position, Position),
    MultipleEnds(Position, Position),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_x_n, this_x_n) => write!(
                f,
                "Expect {} character(s) in one row, given {}.",
                expect_x_n, this_x_n
            ),
            Error::InvalidChar(c) => write!(f, "Invalid character({}) in height map text.", c),
            Error::EmptyMap => write!(f, "Given height map is empty."),
            Error::NoStart => write!(f, "No start position(S) found in height map."),
            Error::NoEnd => write!(f, "No end position(E) found in height map."),
            Error::MultipleStarts(first, second) => write!(
                f,
                "Found multiple start positions, first at {}, another at {}.",
                first, second
            ),
            Error::MultipleEnds(first, second) => write!(
                f,
                "Found multiple end positions, first at {}, another at {}.",
                first, second
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<HeightMap> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = MapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} of given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder
            .add_row(line.as_str())
            .with_context(|| format!("Failed to parse line {} of height map.", ind + 1))?;
    }

    Ok(builder.build()?)
}
