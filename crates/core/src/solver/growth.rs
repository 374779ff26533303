//! Herd growth and decline
//!
//! # Model
//!
//! Each cell follows one of three regimes, chosen from food satisfaction `F`
//! and density `P`:
//!
//! ```text
//! ratio = P / (K + ε)
//! rate  = r_max + pioneer   if ratio < 0.5
//!         r_max             otherwise
//!
//! well fed, viable      g = rate × F × (1 - ratio)          logistic
//! well fed, not viable  g = -0.2 × (P_min - P) / P_min      Allee decline
//! starving              g = -r_max × (1 - F / F_starve)     starvation
//!
//! P' = clip(P × (1 + clip(g, -0.3, 0.15)), 0, 1e6)
//! ```
//!
//! Starvation overrides the other two regimes regardless of density. Empty
//! cells (`P < ε`) never change.
//!
//! # References
//!
//! - Allee, W.C. (1931). Animal Aggregations: A Study in General Sociology.
//! - Caughley, G. (1976). Plant-herbivore systems. Theoretical Ecology, 94-113.

use crate::config::SimulationConfig;
use crate::grid::FieldData;
use crate::solver::ForageBalance;
use rayon::prelude::*;

/// Guards the capacity ratio against empty range
const EPSILON: f32 = 1e-10;

/// Capacity ratio below which the pioneer bonus applies
const PIONEER_RATIO: f32 = 0.5;

/// Annual decline of a herd that has just dropped to zero density
const ALLEE_DECLINE: f32 = 0.2;

/// Annual growth rate bounds
const MIN_GROWTH: f32 = -0.3;
const MAX_GROWTH: f32 = 0.15;

/// Density cap per cell
const MAX_DENSITY: f32 = 1e6;

/// Growth regime of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthRegime {
    /// No animals present
    Empty,
    /// Well fed and above the viable density
    Logistic,
    /// Well fed but too sparse to breed successfully
    Allee,
    /// Not enough forage
    Starvation,
}

impl GrowthRegime {
    /// Classify a cell
    #[must_use]
    pub fn classify(population: f32, food_satisfaction: f32, config: &SimulationConfig) -> Self {
        if population < EPSILON {
            Self::Empty
        } else if food_satisfaction <= config.starvation_threshold {
            Self::Starvation
        } else if population >= config.min_viable_density {
            Self::Logistic
        } else {
            Self::Allee
        }
    }
}

/// Annual growth rate for one cell, already clipped
#[must_use]
pub fn growth_rate(
    population: f32,
    carrying_capacity: f32,
    food_satisfaction: f32,
    config: &SimulationConfig,
) -> f32 {
    let rate = match GrowthRegime::classify(population, food_satisfaction, config) {
        GrowthRegime::Empty => 0.0,
        GrowthRegime::Logistic => {
            let capacity_ratio = population / (carrying_capacity + EPSILON);
            let base_rate = if capacity_ratio < PIONEER_RATIO {
                config.max_growth_rate + config.pioneer_bonus
            } else {
                config.max_growth_rate
            };
            base_rate * food_satisfaction * (1.0 - capacity_ratio)
        }
        GrowthRegime::Allee => {
            -ALLEE_DECLINE * (config.min_viable_density - population) / config.min_viable_density
        }
        GrowthRegime::Starvation => {
            -config.max_growth_rate * (1.0 - food_satisfaction / config.starvation_threshold)
        }
    };
    rate.clamp(MIN_GROWTH, MAX_GROWTH)
}

/// Apply one year of growth to the whole herd
#[must_use]
pub fn step_growth(
    population: &FieldData,
    forage: &ForageBalance,
    config: &SimulationConfig,
) -> FieldData {
    let p = population.as_slice();
    let k = forage.carrying_capacity.as_slice();
    let f = forage.food_satisfaction.as_slice();

    let mut next = FieldData::new(population.width, population.height);
    next.as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each(|(idx, out)| {
            let g = growth_rate(p[idx], k[idx], f[idx], config);
            *out = (p[idx] * (1.0 + g)).clamp(0.0, MAX_DENSITY);
        });
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regime_precedence() {
        let config = SimulationConfig::default();
        assert_eq!(GrowthRegime::classify(0.0, 0.0, &config), GrowthRegime::Empty);
        assert_eq!(GrowthRegime::classify(5.0, 1.0, &config), GrowthRegime::Logistic);
        assert_eq!(GrowthRegime::classify(0.01, 1.0, &config), GrowthRegime::Allee);
        // Starvation wins over both density regimes
        assert_eq!(GrowthRegime::classify(5.0, 0.1, &config), GrowthRegime::Starvation);
        assert_eq!(GrowthRegime::classify(0.01, 0.1, &config), GrowthRegime::Starvation);
        // Exactly at the threshold counts as starving
        assert_eq!(GrowthRegime::classify(5.0, 0.2, &config), GrowthRegime::Starvation);
    }

    #[test]
    fn test_pioneer_logistic_growth() {
        let config = SimulationConfig::default();
        // ratio 0.1 -> (0.10 + 0.05) * 1.0 * 0.9 = 0.135
        assert_relative_eq!(growth_rate(1.0, 10.0, 1.0, &config), 0.135, epsilon = 1e-6);
    }

    #[test]
    fn test_crowded_logistic_growth() {
        let config = SimulationConfig::default();
        // ratio 0.8 -> 0.10 * 0.5 * 0.2 = 0.01
        assert_relative_eq!(growth_rate(8.0, 10.0, 0.5, &config), 0.01, epsilon = 1e-6);
        // Over capacity declines, floored at -0.3
        assert_relative_eq!(growth_rate(100.0, 10.0, 1.0, &config), -0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_allee_decline() {
        let config = SimulationConfig::default();
        // -0.2 * (0.05 - 0.025) / 0.05 = -0.1
        assert_relative_eq!(growth_rate(0.025, 10.0, 1.0, &config), -0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_starvation_decline() {
        let config = SimulationConfig::default();
        // -0.1 * (1 - 0.05 / 0.2) = -0.075
        assert_relative_eq!(growth_rate(20.0, 1.0, 0.05, &config), -0.075, epsilon = 1e-6);
        assert_relative_eq!(growth_rate(20.0, 1.0, 0.0, &config), -0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_growth_capped() {
        let config = SimulationConfig {
            max_growth_rate: 0.5,
            ..Default::default()
        };
        assert_relative_eq!(growth_rate(1.0, 100.0, 1.0, &config), 0.15, epsilon = 1e-6);
    }

    #[test]
    fn test_step_growth_field() {
        let config = SimulationConfig::default();
        let population = FieldData::from_vec(3, 1, vec![0.0, 1.0, 20.0]);
        let forage = ForageBalance {
            carrying_capacity: FieldData::from_vec(3, 1, vec![5.0, 10.0, 1.0]),
            food_satisfaction: FieldData::from_vec(3, 1, vec![1.0, 1.0, 0.05]),
        };

        let next = step_growth(&population, &forage, &config);

        assert_eq!(next.get(0, 0), 0.0);
        assert_relative_eq!(next.get(0, 1), 1.135, epsilon = 1e-5);
        assert_relative_eq!(next.get(0, 2), 18.5, epsilon = 1e-4);
    }
}
