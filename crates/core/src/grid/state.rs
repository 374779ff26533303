//! Mutable simulation state
//!
//! `GridState` bundles the two evolving fields (standing biomass, herd
//! density) with the fixed habitat ceiling and the run metadata. A step
//! consumes one `GridState` and produces the next; nothing is updated
//! partially.

use crate::grid::{FieldData, Landscape};

/// Complete state of one simulated year
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    /// Standing forage in tonnes per cell
    pub biomass: FieldData,
    /// Habitat ceiling in tonnes per cell (fixed; <= 0 means water)
    pub max_biomass: FieldData,
    /// Animals per cell (continuous density)
    pub population: FieldData,
    /// Cell edge length in kilometres
    pub cell_size_km: f32,
    /// Years elapsed since release
    pub year: u32,
}

impl GridState {
    /// Year-zero state for a landscape and an initial herd distribution
    ///
    /// The landscape's biomass serves both as the starting forage and as the
    /// ceiling regrowth tends toward.
    ///
    /// # Panics
    ///
    /// Panics if the population field does not match the landscape shape
    #[must_use]
    pub fn from_landscape(landscape: &Landscape, population: FieldData) -> Self {
        assert!(
            population.width == landscape.width() && population.height == landscape.height(),
            "Population field does not match landscape dimensions"
        );
        Self {
            biomass: landscape.biomass().clone(),
            max_biomass: landscape.biomass().clone(),
            population,
            cell_size_km: landscape.cell_size_km(),
            year: 0,
        }
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.biomass.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.biomass.height
    }

    /// True if the cell can hold animals at all
    #[inline]
    #[must_use]
    pub fn is_habitable(&self, idx: usize) -> bool {
        self.max_biomass.data[idx] > 0.0
    }
}
