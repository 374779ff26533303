//! Forage regrowth and grazing
//!
//! Computes how much of the standing forage the herd can eat this year, how
//! well that covers its demand, and how much forage is left after regrowth.
//!
//! ```text
//! H  = B × digestibility × utilization        harvestable forage
//! D  = P × intake                             herd demand
//! C  = min(H, D)                              consumed
//! F  = clip(C / D, 0, 1)   (1 where D = 0)    food satisfaction
//! K  = H / intake                             carrying capacity
//! B' = max(B + (M - B) × growth - C, 0)
//! ```

use crate::config::SimulationConfig;
use crate::grid::FieldData;
use rayon::prelude::*;

/// Per-cell forage situation seen by the herd this year
///
/// Both fields are computed from the pre-grazing biomass and the
/// pre-migration population.
#[derive(Debug, Clone, PartialEq)]
pub struct ForageBalance {
    /// Animals each cell could feed sustainably
    pub carrying_capacity: FieldData,
    /// Fraction of demand met (0-1)
    pub food_satisfaction: FieldData,
}

/// Advance forage by one year of regrowth and grazing
///
/// Returns the new biomass field together with the forage balance that
/// drives migration and herd growth. Inputs are left untouched.
#[must_use]
pub fn step_biomass(
    biomass: &FieldData,
    max_biomass: &FieldData,
    population: &FieldData,
    config: &SimulationConfig,
) -> (FieldData, ForageBalance) {
    let (width, height) = (biomass.width, biomass.height);
    let intake = config.annual_intake_tonnes();
    let harvest_fraction = config.digestibility_factor * config.utilization_factor;
    let growth = config.annual_growth_factor;

    let b = biomass.as_slice();
    let m = max_biomass.as_slice();
    let p = population.as_slice();

    let mut next = FieldData::new(width, height);
    let mut carrying_capacity = FieldData::new(width, height);
    let mut food_satisfaction = FieldData::new(width, height);

    next.as_mut_slice()
        .par_iter_mut()
        .zip(carrying_capacity.as_mut_slice().par_iter_mut())
        .zip(food_satisfaction.as_mut_slice().par_iter_mut())
        .enumerate()
        .for_each(|(idx, ((b_out, k_out), f_out))| {
            let harvestable = b[idx] * harvest_fraction;
            let demand = p[idx] * intake;
            let consumed = harvestable.min(demand);

            *f_out = if demand > 0.0 {
                (consumed / demand).clamp(0.0, 1.0)
            } else {
                1.0
            };
            *k_out = harvestable / intake;

            let regrowth = (m[idx] - b[idx]) * growth;
            *b_out = (b[idx] + regrowth - consumed).max(0.0);
        });

    (
        next,
        ForageBalance {
            carrying_capacity,
            food_satisfaction,
        },
    )
}
