//! Integer-exact rates used by the cost and supply model.
//!
//! All values use deterministic integer math:
//! - Basis points: 10000 = 100% (drop chances)
//! - Milli-smelts: 1000 = one smelt per fuel unit (fuel efficiency)

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Probability that a single kill yields the drop, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DropChance(pub u16);

impl DropChance {
    pub const ALWAYS: DropChance = DropChance(10_000);

    pub fn basis_points(self) -> u16 {
        self.0
    }

    /// Kills needed so that the expected yield covers `target`: `ceil(target / chance)`.
    ///
    /// A zero chance is treated as certain, matching the "defaults to 1" rule for sources that do
    /// not declare a chance.
    pub fn kills_for(self, target: u32) -> u32 {
        let bp = u64::from(self.effective());
        let needed = u64::from(target) * 10_000;
        let kills = needed.div_ceil(bp);
        u32::try_from(kills).unwrap_or(u32::MAX)
    }

    /// Whole items expected from `kills` kills.
    pub fn expected_yield(self, kills: u32) -> u32 {
        let total = u64::from(kills) * u64::from(self.effective()) / 10_000;
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    fn effective(self) -> u16 {
        if self.0 == 0 || self.0 > 10_000 {
            10_000
        } else {
            self.0
        }
    }
}

impl Default for DropChance {
    fn default() -> Self {
        Self::ALWAYS
    }
}

/// Smelt operations one unit of a fuel sustains, in milli-smelts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FuelEfficiency(pub u32);

impl FuelEfficiency {
    pub fn milli_smelts(self) -> u32 {
        self.0
    }

    /// Fuel units needed for `smelts` operations: `ceil(smelts / smelts_per_unit)`.
    pub fn units_for(self, smelts: u32) -> u32 {
        if self.0 == 0 {
            return u32::MAX;
        }
        let units = (u64::from(smelts) * 1_000).div_ceil(u64::from(self.0));
        u32::try_from(units).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kills_round_up() {
        assert_eq!(DropChance(5_000).kills_for(3), 6);
        assert_eq!(DropChance(3_333).kills_for(1), 4);
        assert_eq!(DropChance::ALWAYS.kills_for(7), 7);
        assert_eq!(DropChance(0).kills_for(2), 2);
    }

    #[test]
    fn expected_yield_covers_target() {
        for bp in [1_u16, 250, 3_333, 5_000, 9_999, 10_000] {
            let chance = DropChance(bp);
            for target in 1..20 {
                assert!(chance.expected_yield(chance.kills_for(target)) >= target);
            }
        }
    }

    #[test]
    fn fuel_units_round_up() {
        let planks = FuelEfficiency(1_500);
        assert_eq!(planks.units_for(1), 1);
        assert_eq!(planks.units_for(3), 2);
        assert_eq!(planks.units_for(4), 3);
        assert_eq!(FuelEfficiency(8_000).units_for(9), 2);
        assert_eq!(FuelEfficiency(0).units_for(1), u32::MAX);
    }
}
