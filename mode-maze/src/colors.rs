//! Color palette for a dark terminal background.

use maze_cave::RegionType;
use maze_core::cell::Color;

pub const BG: Color = Color::Default;
pub const FG: Color = Color::Default;
/// Regions outside the target rectangle.
pub const FG_DIM: Color = Color::rgb(98, 100, 106);
pub const FG_EMPH: Color = Color::rgb(248, 248, 242);

pub const ROCKY_FG: Color = Color::rgb(150, 155, 170);
pub const WET_FG: Color = Color::rgb(100, 130, 255);
pub const NARROW_FG: Color = Color::rgb(170, 140, 80);

/// Regions already added to the risk total.
pub const BG_SCANNED: Color = Color::rgb(40, 42, 54);
/// Regions finalized by the route search.
pub const BG_VISITED: Color = Color::rgb(30, 60, 45);
pub const BG_ROUTE: Color = Color::rgb(120, 40, 40);
pub const BG_CURSOR: Color = Color::rgb(220, 200, 60);

pub const RED: Color = Color::rgb(255, 85, 85);
pub const GREEN: Color = Color::rgb(80, 200, 80);
pub const YELLOW: Color = Color::rgb(220, 200, 60);
pub const CYAN: Color = Color::rgb(80, 210, 210);

pub fn region_color(ty: RegionType) -> Color {
    match ty {
        RegionType::Rocky => ROCKY_FG,
        RegionType::Wet => WET_FG,
        RegionType::Narrow => NARROW_FG,
    }
}
