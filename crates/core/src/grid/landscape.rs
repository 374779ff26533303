//! Forage landscape handed over by the raster ingestion layer
//!
//! The simulation never parses raster formats. Whatever reads the `GeoTIFF`
//! (or generates a synthetic map) produces a `Landscape`: a row-major grid of
//! digestible biomass in tonnes per cell plus the cell edge length.
//!
//! Cells with no forage (value 0) are water or otherwise non-habitable for
//! the whole run.

use crate::error::{Result, SimulationError};
use crate::grid::FieldData;
use tracing::debug;

/// Biomass raster plus its spatial resolution
#[derive(Debug, Clone)]
pub struct Landscape {
    biomass: FieldData,
    cell_size_km: f32,
}

impl Landscape {
    /// Build a landscape from raw row-major biomass values
    ///
    /// Non-finite and negative values are treated as nodata and become 0.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidLandscape` if either dimension is zero,
    /// `width * height` overflows, the data length does not match it, or the
    /// cell size is not finite and positive.
    pub fn new(biomass: Vec<f32>, width: usize, height: usize, cell_size_km: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimulationError::InvalidLandscape(format!(
                "grid dimensions must be non-zero, got {height}x{width}"
            )));
        }
        let cells = width.checked_mul(height).ok_or_else(|| {
            SimulationError::InvalidLandscape(format!(
                "grid of {height}x{width} cells is too large to address"
            ))
        })?;
        if biomass.len() != cells {
            return Err(SimulationError::InvalidLandscape(format!(
                "expected {} values for a {height}x{width} grid, got {}",
                cells,
                biomass.len()
            )));
        }
        if !cell_size_km.is_finite() || cell_size_km <= 0.0 {
            return Err(SimulationError::InvalidLandscape(format!(
                "cell size must be finite and positive, got {cell_size_km}"
            )));
        }

        let mut field = FieldData::from_vec(width, height, biomass);
        let mut cleaned = 0_usize;
        for value in field.as_mut_slice() {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
                cleaned += 1;
            }
        }
        if cleaned > 0 {
            debug!("Landscape: replaced {} nodata/negative cells with 0", cleaned);
        }

        Ok(Self {
            biomass: field,
            cell_size_km,
        })
    }

    /// Map a raster nodata sentinel to water
    pub fn with_nodata(mut self, nodata: f32) -> Self {
        for value in self.biomass.as_mut_slice() {
            if *value == nodata {
                *value = 0.0;
            }
        }
        self
    }

    /// Build a landscape from nested rows
    ///
    /// Convenient for small hand-written maps and tests.
    ///
    /// # Errors
    ///
    /// Same as [`Landscape::new`]; ragged rows are rejected as a length
    /// mismatch.
    pub fn from_rows(rows: &[Vec<f32>], cell_size_km: f32) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(SimulationError::InvalidLandscape(
                "rows must all have the same length".to_string(),
            ));
        }
        Self::new(rows.concat(), width, height, cell_size_km)
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

    /// Cell edge length in kilometres
    #[must_use]
    pub fn cell_size_km(&self) -> f32 {
        self.cell_size_km
    }

    /// Biomass field (tonnes per cell)
    #[must_use]
    pub fn biomass(&self) -> &FieldData {
        &self.biomass
    }

    /// Number of cells carrying any forage
    #[must_use]
    pub fn land_cells(&self) -> usize {
        self.biomass.count_above(0.0)
    }

    /// True if `(row, col)` lies inside the grid
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width()
    }
}
