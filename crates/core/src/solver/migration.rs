//! Annual herd migration
//!
//! Migration combines undirected dispersal with a pull toward better forage.
//!
//! # Implementation
//!
//! 1. Dispersal: the herd field is convolved with the [`MigrationKernel`]
//!    (direct spatial convolution, zero padding, same-size output). With a
//!    kernel radius of at most 5 cells this is as accurate as a spectral
//!    convolution and needs no FFT machinery.
//! 2. Directional bias: backward differences of carrying capacity along each
//!    axis (first row/column padded, so its gradient is 0) decide how much of
//!    each cell is refilled from the neighbour on the poorer side:
//!    ```text
//!    bias       = food_preference × diffusion_rate × 0.3
//!    w_dir      = clip(±∇K × bias, 0, 0.2)
//!    P'(x)      = (1 - Σ w_dir) × D(x) + Σ w_dir × D(x - dir)
//!    ```
//!    Shifts wrap around the grid edges; the border mask below removes
//!    anything that wraps.
//! 3. Water cells and the outer border ring are emptied, then the field is
//!    rescaled so the total headcount is exactly what it was before moving.

use crate::config::SimulationConfig;
use crate::grid::FieldData;
use crate::solver::MigrationKernel;
use rayon::prelude::*;
use tracing::debug;

/// Total headcount below which the herd is treated as extinct and left alone
pub const EXTINCTION_THRESHOLD: f64 = 0.1;

/// Scales food preference into a per-gradient-unit redirect share
const BIAS_SCALE: f32 = 0.3;

/// Largest share of a cell redirected along one direction
const MAX_DIRECTIONAL_SHARE: f32 = 0.2;

/// Spread the herd with the dispersal kernel
///
/// Cells outside the grid contribute nothing, so mass dispersing off the
/// edge is lost here and restored by the final rescale in [`step_migration`].
#[must_use]
pub fn diffuse(population: &FieldData, kernel: &MigrationKernel) -> FieldData {
    let (width, height) = (population.width, population.height);
    let src = population.as_slice();
    let weights = kernel.as_slice();
    let size = kernel.size();
    let reach = kernel.radius() as isize;

    let mut out = FieldData::new(width, height);
    if width == 0 {
        return out;
    }

    out.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, cell) in out_row.iter_mut().enumerate() {
                let mut acc = 0.0_f32;
                for ky in 0..size {
                    let src_row = row as isize - (ky as isize - reach);
                    if src_row < 0 || src_row >= height as isize {
                        continue;
                    }
                    let row_offset = src_row as usize * width;
                    for kx in 0..size {
                        let weight = weights[ky * size + kx];
                        if weight == 0.0 {
                            continue;
                        }
                        let src_col = col as isize - (kx as isize - reach);
                        if src_col < 0 || src_col >= width as isize {
                            continue;
                        }
                        acc += weight * src[row_offset + src_col as usize];
                    }
                }
                *cell = acc;
            }
        });

    out
}

/// Move the herd for one year
///
/// Returns an exact copy of `population` when the total headcount is below
/// [`EXTINCTION_THRESHOLD`].
///
/// # Arguments
///
/// * `population` - Herd density before moving
/// * `carrying_capacity` - This year's capacity; its gradient steers the drift
/// * `max_biomass` - Habitat ceiling; cells at or below 0 are water
/// * `kernel` - Dispersal weights for the run
/// * `config` - Supplies diffusion rate and food preference
///
/// # Returns
///
/// Moved herd with the same total, water and border cells empty
#[must_use]
pub fn step_migration(
    population: &FieldData,
    carrying_capacity: &FieldData,
    max_biomass: &FieldData,
    kernel: &MigrationKernel,
    config: &SimulationConfig,
) -> FieldData {
    let total_before = population.sum();
    if total_before < EXTINCTION_THRESHOLD {
        return population.clone();
    }

    let (width, height) = (population.width, population.height);
    let diffused = diffuse(population, kernel);
    let d = diffused.as_slice();
    let k = carrying_capacity.as_slice();
    let ceiling = max_biomass.as_slice();
    let bias = config.food_preference_weight * config.diffusion_rate * BIAS_SCALE;

    let mut result = FieldData::new(width, height);
    result
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            // Each direction refills a cell from the neighbour it moves away from
            let south = (row + 1) % height;
            let north = (row + height - 1) % height;
            for (col, cell) in out_row.iter_mut().enumerate() {
                let idx = row * width + col;

                if ceiling[idx] <= 0.0 || population.is_border(row, col) {
                    *cell = 0.0;
                    continue;
                }

                let grad_y = k[idx] - k[idx - width];
                let grad_x = k[idx] - k[idx - 1];

                let up_w = (-grad_y * bias).clamp(0.0, MAX_DIRECTIONAL_SHARE);
                let down_w = (grad_y * bias).clamp(0.0, MAX_DIRECTIONAL_SHARE);
                let left_w = (-grad_x * bias).clamp(0.0, MAX_DIRECTIONAL_SHARE);
                let right_w = (grad_x * bias).clamp(0.0, MAX_DIRECTIONAL_SHARE);
                let stay_w = 1.0 - (up_w + down_w + left_w + right_w);

                let east = (col + 1) % width;
                let west = (col + width - 1) % width;

                *cell = stay_w * d[idx]
                    + up_w * d[south * width + col]
                    + down_w * d[north * width + col]
                    + left_w * d[row * width + east]
                    + right_w * d[row * width + west];
            }
        });

    let total_after = result.sum();
    if total_after > 0.0 {
        let scale = total_before / total_after;
        for value in result.as_mut_slice() {
            *value = (f64::from(*value) * scale) as f32;
        }
    } else {
        debug!(
            "Migration: herd of {:.2} moved entirely onto water or border cells",
            total_before
        );
    }

    result
}
