use std::fmt;

/// The tool held while moving through the cave.
///
/// Every region type forbids exactly one of the three values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Equipment {
    Torch,
    ClimbingGear,
    Neither,
}

impl Equipment {
    /// All equipment values, in slot order.
    pub const ALL: [Equipment; 3] = [Self::Torch, Self::ClimbingGear, Self::Neither];

    /// Number of distinct values; each region has this many search slots.
    pub const COUNT: usize = 3;

    /// Slot of this value within a region's block of search cells.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Torch => 0,
            Self::ClimbingGear => 1,
            Self::Neither => 2,
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Torch => "torch",
            Self::ClimbingGear => "climbing gear",
            Self::Neither => "neither",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_slot_order() {
        for (i, e) in Equipment::ALL.into_iter().enumerate() {
            assert_eq!(e.index(), i);
        }
        assert_eq!(Equipment::ALL.len(), Equipment::COUNT);
        assert_eq!(Equipment::ClimbingGear.to_string(), "climbing gear");
    }
}
