//! Region types and the rules tying them to equipment.

use maze_paths::Equipment;

/// Surface type of a cave region, derived from its erosion level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionType {
    Rocky,
    Wet,
    Narrow,
}

impl RegionType {
    /// Type for an erosion level: remainder 0, 1, 2 modulo 3.
    #[inline]
    pub fn from_erosion(erosion: u32) -> Self {
        match erosion % 3 {
            0 => Self::Rocky,
            1 => Self::Wet,
            2 => Self::Narrow,
            r => unreachable!("erosion {erosion} left remainder {r} modulo 3"),
        }
    }

    /// Risk contribution: 0, 1 or 2.
    #[inline]
    pub const fn risk(self) -> u32 {
        match self {
            Self::Rocky => 0,
            Self::Wet => 1,
            Self::Narrow => 2,
        }
    }

    /// Map symbol used in text renderings.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Self::Rocky => '.',
            Self::Wet => '=',
            Self::Narrow => '|',
        }
    }

    /// The one tool that cannot be used here.
    #[inline]
    pub const fn forbidden(self) -> Equipment {
        match self {
            Self::Rocky => Equipment::Neither,
            Self::Wet => Equipment::Torch,
            Self::Narrow => Equipment::ClimbingGear,
        }
    }

    /// The two tools usable here, in [`Equipment::ALL`] order.
    #[inline]
    pub const fn tools(self) -> [Equipment; 2] {
        match self {
            Self::Rocky => [Equipment::Torch, Equipment::ClimbingGear],
            Self::Wet => [Equipment::ClimbingGear, Equipment::Neither],
            Self::Narrow => [Equipment::Torch, Equipment::Neither],
        }
    }

    #[inline]
    pub fn allows(self, tool: Equipment) -> bool {
        tool != self.forbidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erosion_remainders_map_to_types() {
        assert_eq!(RegionType::from_erosion(510), RegionType::Rocky);
        assert_eq!(RegionType::from_erosion(17317), RegionType::Wet);
        assert_eq!(RegionType::from_erosion(1805), RegionType::Narrow);
    }

    #[test]
    fn each_type_allows_exactly_two_tools() {
        for ty in [RegionType::Rocky, RegionType::Wet, RegionType::Narrow] {
            let allowed: Vec<Equipment> = Equipment::ALL
                .into_iter()
                .filter(|&t| ty.allows(t))
                .collect();
            assert_eq!(allowed, ty.tools().to_vec());
            assert!(!ty.allows(ty.forbidden()));
        }
    }

    #[test]
    fn symbols() {
        assert_eq!(RegionType::Rocky.symbol(), '.');
        assert_eq!(RegionType::Wet.symbol(), '=');
        assert_eq!(RegionType::Narrow.symbol(), '|');
    }

    #[test]
    fn risk_values() {
        assert_eq!(RegionType::Rocky.risk(), 0);
        assert_eq!(RegionType::Wet.risk(), 1);
        assert_eq!(RegionType::Narrow.risk(), 2);
    }
}
