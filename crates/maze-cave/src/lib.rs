//! **maze-cave**: the cave system of the mode maze.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`region`] | [`RegionType`] and its equipment rules |
//! | [`cave`] | [`Cave`]: erosion, types, rendering, search edges |
//! | [`risk`] | [`RiskScan`]: steppable risk total over the target rectangle |
//! | [`puzzle`] | [`Puzzle`] text parsing |
//!
//! ```
//! use maze_cave::{Cave, CaveConfig, Puzzle};
//!
//! let puzzle: Puzzle = "depth: 510\ntarget: 10,10".parse().unwrap();
//! let cave = Cave::from_puzzle(&puzzle, &CaveConfig::default());
//! assert_eq!(cave.risk_level(), 114);
//! assert_eq!(cave.pathfinder().run(&cave), Some(45));
//! ```

pub mod cave;
pub mod puzzle;
pub mod region;
pub mod risk;

pub use cave::{
    Cave, CaveConfig, DEFAULT_SEARCH_MARGIN, EROSION_MODULUS, MAX_REGIONS, MAX_SEARCH_MARGIN, X_FACTOR,
    Y_FACTOR,
};
pub use puzzle::{Puzzle, PuzzleError};
pub use region::RegionType;
pub use risk::{RiskProgress, RiskScan};
