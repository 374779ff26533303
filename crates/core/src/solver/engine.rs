//! One simulated year
//!
//! The engine chains the three sub-steps in a fixed order:
//!
//! 1. forage regrowth and grazing (sets carrying capacity and food satisfaction)
//! 2. migration toward better forage
//! 3. growth of the migrated herd under last year's forage balance

use crate::config::SimulationConfig;
use crate::grid::GridState;
use crate::simulation::OCCUPIED_THRESHOLD;
use crate::solver::{step_biomass, step_growth, step_migration, MigrationKernel};
use tracing::debug;

/// Advances a `GridState` by whole years
///
/// Holds the run's fixed inputs: the config and the migration kernel built
/// for the landscape's cell size.
#[derive(Debug, Clone)]
pub struct StepEngine {
    config: SimulationConfig,
    kernel: MigrationKernel,
}

impl StepEngine {
    /// Engine for a config at a given grid resolution
    #[must_use]
    pub fn new(config: SimulationConfig, cell_size_km: f32) -> Self {
        let kernel = MigrationKernel::from_config(&config, cell_size_km);
        Self { config, kernel }
    }

    /// Config used by every step
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Kernel used by every step
    #[must_use]
    pub fn kernel(&self) -> &MigrationKernel {
        &self.kernel
    }

    /// Consume one year's state and return the next
    #[must_use]
    pub fn advance(&self, state: GridState) -> GridState {
        let GridState {
            biomass,
            max_biomass,
            population,
            cell_size_km,
            year,
        } = state;

        let herd_before = population.sum();
        let (biomass, forage) = step_biomass(&biomass, &max_biomass, &population, &self.config);
        let migrated = step_migration(
            &population,
            &forage.carrying_capacity,
            &max_biomass,
            &self.kernel,
            &self.config,
        );
        let population = step_growth(&migrated, &forage, &self.config);

        debug!(
            "Year {}: herd {:.1} -> {:.1} after migration -> {:.1}, {} cells occupied",
            year + 1,
            herd_before,
            migrated.sum(),
            population.sum(),
            population.count_above(OCCUPIED_THRESHOLD)
        );

        GridState {
            biomass,
            max_biomass,
            population,
            cell_size_km,
            year: year + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{FieldData, Landscape};

    fn island_state() -> GridState {
        let mut rows = vec![vec![0.0_f32; 9]; 9];
        for row in rows.iter_mut().take(8).skip(1) {
            for cell in row.iter_mut().take(8).skip(1) {
                *cell = 50.0;
            }
        }
        let landscape = Landscape::from_rows(&rows, 1.0).unwrap();
        let mut population = FieldData::new(9, 9);
        population.set(4, 4, 30.0);
        population.set(3, 4, 10.0);
        GridState::from_landscape(&landscape, population)
    }

    #[test]
    fn test_advance_increments_year() {
        let engine = StepEngine::new(SimulationConfig::default(), 1.0);
        let state = engine.advance(island_state());
        assert_eq!(state.year, 1);
        let state = engine.advance(state);
        assert_eq!(state.year, 2);
    }

    #[test]
    fn test_advance_keeps_ceiling_and_masks() {
        let engine = StepEngine::new(SimulationConfig::default(), 1.0);
        let initial = island_state();
        let ceiling = initial.max_biomass.clone();

        let mut state = initial;
        for _ in 0..5 {
            state = engine.advance(state);
            assert_eq!(state.max_biomass, ceiling);
            for idx in 0..state.population.len() {
                assert!(state.population.data[idx] >= 0.0);
                assert!(state.biomass.data[idx] >= 0.0);
                if !state.is_habitable(idx) {
                    assert_eq!(state.population.data[idx], 0.0);
                }
            }
        }
    }

    #[test]
    fn test_extinct_state_only_regrows_forage() {
        let engine = StepEngine::new(SimulationConfig::default(), 1.0);
        let mut state = island_state();
        state.population.fill(0.0);
        state.biomass.fill(10.0);

        let next = engine.advance(state);
        assert_eq!(next.population.sum(), 0.0);
        // Interior regrows toward 50: 10 + 40 * 0.4
        assert!((next.biomass.get(4, 4) - 26.0).abs() < 1e-4);
    }
}
