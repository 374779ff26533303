//! Field data structures for the simulation grids
//!
//! Every spatial quantity (standing biomass, habitat ceiling, herd density,
//! carrying capacity) is stored as a flat `Vec<f32>` in row-major order.

use serde::{Deserialize, Serialize};

/// Field data container
///
/// Stores 2D field data as a flat `Vec<f32>` in row-major order.
/// Row 0 is the northern edge of the raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    /// Field values in row-major order (row * width + col)
    pub data: Vec<f32>,
    /// Grid width in cells (columns)
    pub width: usize,
    /// Grid height in cells (rows)
    pub height: usize,
}

impl FieldData {
    /// Create a new field with given dimensions, initialized to zero
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a new field with given dimensions, initialized to a value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Wrap existing row-major data
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height`
    #[must_use]
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), width * height, "Field data length mismatch");
        Self {
            data,
            width,
            height,
        }
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-sized grid
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of a cell
    #[inline]
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.height && col < self.width,
            "Coordinates out of bounds"
        );
        self.data[row * self.width + col]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(
            row < self.height && col < self.width,
            "Coordinates out of bounds"
        );
        self.data[row * self.width + col] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Sum of all cells
    ///
    /// Accumulates in f64 in storage order, so the result does not depend on
    /// thread count or scheduling.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| f64::from(v)).sum()
    }

    /// Number of cells strictly above `threshold`
    #[must_use]
    pub fn count_above(&self, threshold: f32) -> usize {
        self.data.iter().filter(|&&v| v > threshold).count()
    }

    /// True if the cell lies on the outer ring of the grid
    #[inline]
    #[must_use]
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.height || col + 1 == self.width
    }
}
