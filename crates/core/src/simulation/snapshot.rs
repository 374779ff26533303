//! Read-only views of the simulation handed to the outside world

use crate::grid::{FieldData, GridState};
use serde::{Deserialize, Serialize};

/// Density above which a cell counts as occupied
pub const OCCUPIED_THRESHOLD: f32 = 0.1;

/// Full state of one simulated year
///
/// Owns copies of the grids, so callers may keep or serialize it freely
/// without affecting the running simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Years since release
    pub year: u32,
    /// Standing forage in tonnes per cell
    pub biomass: FieldData,
    /// Animals per cell
    pub population: FieldData,
    /// Total headcount
    pub total_population: f64,
    /// Cells holding more than [`OCCUPIED_THRESHOLD`] animals
    pub occupied_cells: usize,
}

impl Snapshot {
    /// Capture a state
    #[must_use]
    pub fn from_state(state: &GridState) -> Self {
        Self {
            year: state.year,
            biomass: state.biomass.clone(),
            population: state.population.clone(),
            total_population: state.population.sum(),
            occupied_cells: state.population.count_above(OCCUPIED_THRESHOLD),
        }
    }

    /// Grid-free summary for cheap reporting
    #[must_use]
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            year: self.year,
            total_population: self.total_population,
            occupied_cells: self.occupied_cells,
        }
    }
}

/// Headline numbers of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub year: u32,
    pub total_population: f64,
    pub occupied_cells: usize,
}
