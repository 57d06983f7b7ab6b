//! Puzzle text: a depth line and a target line.
//!
//! ```text
//! depth: 510
//! target: 10,10
//! ```
//!
//! Only the second whitespace-separated token of each line is read; the
//! leading label is not checked.

use std::fmt;
use std::str::FromStr;

use maze_core::Point;

use crate::cave::MAX_REGIONS;

/// Reasons puzzle text can be rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("missing {0} line")]
    MissingLine(&'static str),
    #[error("{0} line has no value")]
    MissingValue(&'static str),
    #[error("invalid depth {0:?}")]
    InvalidDepth(String),
    #[error("target {0:?} is not of the form X,Y")]
    MalformedTarget(String),
    #[error("invalid target coordinate {0:?}")]
    InvalidCoordinate(String),
    #[error("target rectangle of {width}x{height} exceeds {max} regions", max = MAX_REGIONS)]
    TooManyRegions { width: u64, height: u64 },
}

/// Parsed puzzle input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    pub depth: u64,
    pub target: Point,
}

impl Puzzle {
    pub fn new(depth: u64, target: Point) -> Self {
        Self { depth, target }
    }

    /// Parse puzzle text. Surrounding whitespace is ignored, as is anything
    /// after the second line.
    pub fn parse(text: &str) -> Result<Self, PuzzleError> {
        let mut lines = text.trim().lines().map(str::trim);
        let depth_line = lines.next().ok_or(PuzzleError::MissingLine("depth"))?;
        let target_line = lines.next().ok_or(PuzzleError::MissingLine("target"))?;

        let raw = value(depth_line).ok_or(PuzzleError::MissingValue("depth"))?;
        let depth = raw
            .parse::<u64>()
            .map_err(|_| PuzzleError::InvalidDepth(raw.to_string()))?;

        let raw = value(target_line).ok_or(PuzzleError::MissingValue("target"))?;
        let (x, y) = raw
            .split_once(',')
            .ok_or_else(|| PuzzleError::MalformedTarget(raw.to_string()))?;
        let (x, y) = (coordinate(x)?, coordinate(y)?);
        let (width, height) = (x as u64 + 1, y as u64 + 1);
        if width.checked_mul(height).is_none_or(|n| n > MAX_REGIONS) {
            return Err(PuzzleError::TooManyRegions { width, height });
        }
        // both coordinates are below MAX_REGIONS here
        let target = Point::new(x as i32, y as i32);

        log::debug!("parsed puzzle: depth {depth}, target {target}");
        Ok(Self { depth, target })
    }
}

fn value(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}

fn coordinate(s: &str) -> Result<u32, PuzzleError> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| PuzzleError::InvalidCoordinate(s.to_string()))
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "depth: {}", self.depth)?;
        writeln!(f, "target: {},{}", self.target.x, self.target.y)
    }
}
