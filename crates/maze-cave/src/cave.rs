//! The cave region model.
//!
//! Every region's erosion level depends on the regions directly above and to
//! its left, so the dense grids are filled once, row-major, at construction
//! and never change afterwards.

use maze_core::{Point, Range};
use maze_paths::{Edge, Equipment, PathCell, Pathfinder, ToolPather};

use crate::puzzle::Puzzle;
use crate::region::RegionType;

/// Erosion levels are taken modulo this value.
pub const EROSION_MODULUS: u64 = 20183;
/// Geologic index factor along the top row.
pub const X_FACTOR: u64 = 16807;
/// Geologic index factor along the left column.
pub const Y_FACTOR: u64 = 48271;
/// Extra columns and rows generated beyond the target for path searches.
pub const DEFAULT_SEARCH_MARGIN: i32 = 32;
/// Largest accepted search margin.
pub const MAX_SEARCH_MARGIN: i32 = 1024;
/// Most regions a cave may hold, search margin included. The path search
/// keeps three nodes per region.
pub const MAX_REGIONS: u64 = 1_000_000;

/// Number of regions in a `width` x `height` grid, without overflow.
#[inline]
pub(crate) fn region_count(width: i32, height: i32) -> u64 {
    width.max(0) as u64 * height.max(0) as u64
}

/// Construction options for a [`Cave`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaveConfig {
    /// Columns and rows of regions generated past the target. The fastest
    /// route may leave the target rectangle, so searches need some slack.
    pub search_margin: i32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            search_margin: DEFAULT_SEARCH_MARGIN,
        }
    }
}

impl CaveConfig {
    /// Regions limited to the target rectangle.
    pub const EXACT: Self = Self { search_margin: 0 };

    /// The margin actually used around a `width` x `height` target
    /// rectangle: clamped to `0..=MAX_SEARCH_MARGIN`, then shrunk until the
    /// whole grid fits in [`MAX_REGIONS`].
    pub fn margin_for(&self, width: i32, height: i32) -> i32 {
        let mut margin = self.search_margin.clamp(0, MAX_SEARCH_MARGIN);
        while margin > 0
            && region_count(width.saturating_add(margin), height.saturating_add(margin))
                > MAX_REGIONS
        {
            margin -= 1;
        }
        margin
    }
}

/// A cave system: depth, target and the derived region grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cave {
    depth: u64,
    target: Point,
    bounds: Range,
    erosion: Vec<u32>,
    types: Vec<RegionType>,
}

impl Cave {
    /// A cave whose regions cover exactly the rectangle from the mouth to
    /// `target`.
    ///
    /// # Panics
    ///
    /// If `target` has a negative coordinate.
    pub fn new(depth: u64, target: Point) -> Self {
        Self::with_config(depth, target, &CaveConfig::EXACT)
    }

    /// A cave whose regions extend past the target by the margin
    /// [`CaveConfig::margin_for`] allows.
    ///
    /// # Panics
    ///
    /// If `target` has a negative coordinate, or if the target rectangle
    /// alone holds more than [`MAX_REGIONS`] regions. [`Puzzle::parse`]
    /// rejects such targets.
    pub fn with_config(depth: u64, target: Point, config: &CaveConfig) -> Self {
        assert!(
            target.x >= 0 && target.y >= 0,
            "cave target {target} must not be negative"
        );
        let (w, h) = (target.x.saturating_add(1), target.y.saturating_add(1));
        assert!(
            region_count(w, h) <= MAX_REGIONS,
            "cave target {target} exceeds {MAX_REGIONS} regions"
        );
        let margin = config.margin_for(w, h);
        if margin != config.search_margin {
            log::debug!(
                "search margin {} reduced to {margin} around {target}",
                config.search_margin
            );
        }
        let bounds = Range::sized(w + margin, h + margin);

        let mut erosion = vec![0u32; bounds.len()];
        let depth_mod = depth % EROSION_MODULUS;
        let width = bounds.width() as usize;
        for (i, p) in bounds.iter().enumerate() {
            let geo = if p == Point::ZERO || p == target {
                0
            } else if p.y == 0 {
                p.x as u64 * X_FACTOR
            } else if p.x == 0 {
                p.y as u64 * Y_FACTOR
            } else {
                erosion[i - 1] as u64 * erosion[i - width] as u64
            };
            erosion[i] = ((geo % EROSION_MODULUS + depth_mod) % EROSION_MODULUS) as u32;
        }
        let types = erosion.iter().map(|&e| RegionType::from_erosion(e)).collect();

        log::debug!(
            "built cave: depth {depth}, target {target}, {} regions in {bounds}",
            bounds.len()
        );
        Self {
            depth,
            target,
            bounds,
            erosion,
            types,
        }
    }

    /// Cave described by a parsed puzzle.
    pub fn from_puzzle(puzzle: &Puzzle, config: &CaveConfig) -> Self {
        Self::with_config(puzzle.depth, puzzle.target, config)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn depth(&self) -> u64 {
        self.depth
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// The cave mouth.
    #[inline]
    pub fn start(&self) -> Point {
        Point::ZERO
    }

    /// All generated regions, search margin included.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The rectangle from the mouth to the target, inclusive.
    #[inline]
    pub fn target_range(&self) -> Range {
        Range::sized(self.target.x + 1, self.target.y + 1)
    }

    /// Columns and rows generated past the target.
    #[inline]
    pub fn search_margin(&self) -> i32 {
        self.bounds.width() - self.width()
    }

    /// Width of the target rectangle.
    #[inline]
    pub fn width(&self) -> i32 {
        self.target.x + 1
    }

    /// Height of the target rectangle.
    #[inline]
    pub fn height(&self) -> i32 {
        self.target.y + 1
    }

    #[inline]
    pub fn is_start(&self, p: Point) -> bool {
        p == self.start()
    }

    #[inline]
    pub fn is_target(&self, p: Point) -> bool {
        p == self.target
    }

    pub fn erosion(&self, p: Point) -> Option<u32> {
        self.bounds.index_of(p).map(|i| self.erosion[i])
    }

    pub fn region_type(&self, p: Point) -> Option<RegionType> {
        self.bounds.index_of(p).map(|i| self.types[i])
    }

    /// Symbol for the region at `p`: `M` at the mouth, `T` at the target,
    /// the type symbol elsewhere.
    pub fn symbol(&self, p: Point) -> Option<char> {
        let ty = self.region_type(p)?;
        Some(if self.is_start(p) {
            'M'
        } else if self.is_target(p) {
            'T'
        } else {
            ty.symbol()
        })
    }

    /// Total risk of the target rectangle.
    pub fn risk_level(&self) -> u32 {
        self.target_range()
            .iter()
            .filter_map(|p| self.region_type(p))
            .map(RegionType::risk)
            .sum()
    }

    /// Text map of `range` (clipped to the generated regions), one line per
    /// row.
    pub fn render(&self, range: Range) -> String {
        let range = range.intersect(self.bounds);
        let mut out = String::with_capacity(range.len() + range.height().max(0) as usize);
        for y in range.min.y..range.max.y {
            for x in range.min.x..range.max.x {
                if let Some(ch) = self.symbol(Point::new(x, y)) {
                    out.push(ch);
                }
            }
            out.push('\n');
        }
        out
    }

    /// A fresh search from the mouth to the target, both holding the torch.
    pub fn pathfinder(&self) -> Pathfinder {
        Pathfinder::new(
            self.bounds,
            PathCell::new(self.start(), Equipment::Torch),
            PathCell::new(self.target, Equipment::Torch),
        )
    }
}

impl ToolPather for Cave {
    /// Fused move edges into each orthogonal neighbour inside the generated
    /// regions. The target is only entered holding the torch. Elsewhere each
    /// tool the neighbour allows gets an edge; the current region's type is
    /// not consulted.
    fn edges(&self, from: PathCell, buf: &mut Vec<Edge>) {
        for n in from.pos.neighbors_4() {
            let Some(ty) = self.region_type(n) else {
                continue;
            };
            if self.is_target(n) {
                buf.push(Edge::fused(from.tool, PathCell::new(n, Equipment::Torch)));
                continue;
            }
            for tool in ty.tools() {
                buf.push(Edge::fused(from.tool, PathCell::new(n, tool)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_paths::{MOVE_COST, SWITCH_COST};

    const SAMPLE_MAP: &str = "\
M=.|=.|.|=.|=|=.
.|=|=|||..|.=...
.==|....||=..|==
=.|....|.==.|==.
=|..==...=.|==..
=||.=.=||=|=..|=
|.=.===|||..=..|
|..==||=.|==|===
.=..===..=|.|||.
.======|||=|=.|=
.===|=|===T===||
=|||...|==..|=.|
=.=|=.=..=.||==|
||=|=...|==.=|==
|=.=||===.|||===
||.|==.|.|.||=||
";

    fn sample() -> Cave {
        Cave::new(510, Point::new(10, 10))
    }

    #[test]
    fn sample_erosion_levels() {
        let cave = sample();
        assert_eq!(cave.erosion(Point::new(0, 0)), Some(510));
        assert_eq!(cave.erosion(Point::new(1, 0)), Some(17317));
        assert_eq!(cave.erosion(Point::new(0, 1)), Some(8415));
        assert_eq!(cave.erosion(Point::new(1, 1)), Some(1805));
        assert_eq!(cave.erosion(Point::new(10, 10)), Some(510));
        assert_eq!(cave.erosion(Point::new(11, 10)), None);
    }

    #[test]
    fn sample_types() {
        let cave = sample();
        assert_eq!(cave.region_type(Point::new(0, 0)), Some(RegionType::Rocky));
        assert_eq!(cave.region_type(Point::new(1, 0)), Some(RegionType::Wet));
        assert_eq!(cave.region_type(Point::new(1, 1)), Some(RegionType::Narrow));
        assert_eq!(cave.region_type(Point::new(10, 10)), Some(RegionType::Rocky));
    }

    #[test]
    fn margin_reproduces_puzzle_map() {
        let cave = Cave::with_config(510, Point::new(10, 10), &CaveConfig { search_margin: 5 });
        assert_eq!(cave.bounds(), Range::sized(16, 16));
        assert_eq!(cave.render(cave.bounds()), SAMPLE_MAP);
        // margin does not change the target rectangle
        assert_eq!(cave.width(), 11);
        assert_eq!(cave.height(), 11);
    }

    #[test]
    fn exact_cave_renders_top_left_of_map() {
        let cave = sample();
        let expected: String = SAMPLE_MAP
            .lines()
            .take(11)
            .map(|l| format!("{}\n", &l[..11]))
            .collect();
        assert_eq!(cave.render(cave.bounds()), expected);
    }

    #[test]
    fn sample_risk_level() {
        assert_eq!(sample().risk_level(), 114);
        let wide = Cave::with_config(510, Point::new(10, 10), &CaveConfig::default());
        assert_eq!(wide.risk_level(), 114);
    }

    #[test]
    fn depth_zero_single_region() {
        let cave = Cave::new(0, Point::ZERO);
        assert_eq!(cave.bounds().len(), 1);
        assert_eq!(cave.erosion(Point::ZERO), Some(0));
        assert_eq!(cave.region_type(Point::ZERO), Some(RegionType::Rocky));
        assert_eq!(cave.risk_level(), 0);
        assert_eq!(cave.symbol(Point::ZERO), Some('M'));
    }

    #[test]
    fn huge_depth_stays_in_modulus() {
        let cave = Cave::new(u64::MAX, Point::new(3, 3));
        for p in cave.bounds() {
            let e = cave.erosion(p).expect("inside bounds");
            assert!((e as u64) < EROSION_MODULUS);
        }
        assert_eq!(cave.erosion(Point::ZERO), Some((u64::MAX % EROSION_MODULUS) as u32));
    }

    #[test]
    fn edges_stay_in_bounds_and_respect_types() {
        let cave = sample();
        let mut buf = Vec::new();
        cave.edges(PathCell::new(Point::ZERO, Equipment::Torch), &mut buf);
        // (1,0) is wet, (0,1) is rocky: two tools each, nothing off-grid
        assert_eq!(buf.len(), 4);
        for e in &buf {
            let ty = cave.region_type(e.to.pos).expect("in bounds");
            assert!(ty.allows(e.to.tool));
            let expected = if e.to.tool == Equipment::Torch {
                MOVE_COST
            } else {
                MOVE_COST + SWITCH_COST
            };
            assert_eq!(e.cost, expected);
            assert_ne!(e.to.pos, Point::ZERO);
        }
    }

    #[test]
    fn target_is_entered_with_torch_only() {
        // depth 1 makes the target wet, a region that forbids the torch
        let cave = Cave::new(1, Point::new(2, 2));
        assert_eq!(cave.region_type(cave.target()), Some(RegionType::Wet));
        let from = Point::new(1, 2);
        let held = cave
            .region_type(from)
            .and_then(|ty| ty.tools().into_iter().find(|&t| t != Equipment::Torch))
            .expect("every type allows a non-torch tool");

        let mut buf = Vec::new();
        cave.edges(PathCell::new(from, held), &mut buf);
        let into_target: Vec<&Edge> = buf.iter().filter(|e| e.to.pos == cave.target()).collect();
        assert_eq!(into_target.len(), 1);
        assert_eq!(into_target[0].to.tool, Equipment::Torch);
        assert_eq!(into_target[0].cost, MOVE_COST + SWITCH_COST);

        buf.clear();
        cave.edges(PathCell::new(from, Equipment::Torch), &mut buf);
        let torch_entry = buf.iter().find(|e| e.to.pos == cave.target()).map(|e| e.cost);
        assert_eq!(torch_entry, Some(MOVE_COST));
    }

    #[test]
    fn pathfinder_spans_generated_regions() {
        let cave = Cave::with_config(510, Point::new(10, 10), &CaveConfig { search_margin: 3 });
        let pf = cave.pathfinder();
        assert_eq!(pf.bounds(), cave.bounds());
        assert_eq!(pf.start(), PathCell::new(Point::ZERO, Equipment::Torch));
        assert_eq!(pf.goal(), PathCell::new(Point::new(10, 10), Equipment::Torch));
    }

    #[test]
    fn oversized_margin_is_clamped() {
        let cave = Cave::with_config(0, Point::new(1, 1), &CaveConfig { search_margin: i32::MAX });
        assert!(cave.search_margin() <= MAX_SEARCH_MARGIN);
        assert!(cave.bounds().len() as u64 <= MAX_REGIONS);
        // (2 + 998)^2 is the largest square within the region limit
        assert_eq!(cave.search_margin(), 998);
        assert_eq!(cave.risk_level(), Cave::new(0, Point::new(1, 1)).risk_level());

        let negative = Cave::with_config(0, Point::new(1, 1), &CaveConfig { search_margin: -7 });
        assert_eq!(negative.search_margin(), 0);
    }

    #[test]
    fn target_at_region_limit_drops_margin() {
        let config = CaveConfig::default();
        assert_eq!(config.margin_for(1000, 1000), 0);
        assert_eq!(config.margin_for(1000, 999), 0);
        assert_eq!(config.margin_for(11, 11), DEFAULT_SEARCH_MARGIN);
        assert_eq!(config.margin_for(i32::MAX, 1), 0);

        let cave = Cave::with_config(3, Point::new(999_999, 0), &config);
        assert_eq!(cave.bounds().len() as u64, MAX_REGIONS);
        assert_eq!(cave.search_margin(), 0);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn target_beyond_region_limit_panics() {
        Cave::new(1, Point::new(1000, 999));
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn negative_target_panics() {
        Cave::new(5, Point::new(-1, 3));
    }
}
