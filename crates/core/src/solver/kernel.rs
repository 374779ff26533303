//! Migration kernel for undirected annual dispersal
//!
//! The kernel is a small `(2r+1)×(2r+1)` weight matrix. The centre holds the
//! fraction of animals that stay put, every other cell within Euclidean
//! distance `r` receives a share of the dispersing fraction that falls off
//! with the inverse square of `1 + d`.
//!
//! ```text
//! r      = clamp(round(migration_km / cell_km / 4), 2, 5)
//! w(d)   = 1 / (1 + d)²                 for 0 < d ≤ r
//! Σ w    = diffusion_rate               (non-centre cells)
//! w(0)   = 1 - diffusion_rate
//! ```
//!
//! It depends only on the config and the cell size, so it is built once per
//! run.

use crate::config::SimulationConfig;

/// Kernel radius bounds in cells
const MIN_KERNEL_RADIUS: usize = 2;
const MAX_KERNEL_RADIUS: usize = 5;

/// Fixed dispersal weights
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationKernel {
    radius: usize,
    /// Row-major weights, `(dy + r) * size + (dx + r)`
    weights: Vec<f32>,
}

impl MigrationKernel {
    /// Build the kernel for a movement range, grid resolution and dispersal rate
    ///
    /// # Arguments
    ///
    /// * `annual_migration_km` - Distance a herd can cover in a year
    /// * `cell_size_km` - Cell edge length
    /// * `diffusion_rate` - Fraction of each cell that disperses (0-1)
    ///
    /// # Returns
    ///
    /// Kernel with radius `clamp(round(cells_per_year / 4), 2, 5)`
    #[must_use]
    pub fn build(annual_migration_km: f32, cell_size_km: f32, diffusion_rate: f32) -> Self {
        let cells_per_year = annual_migration_km / cell_size_km;
        let radius = ((cells_per_year / 4.0).round().max(0.0) as usize)
            .clamp(MIN_KERNEL_RADIUS, MAX_KERNEL_RADIUS);
        let size = 2 * radius + 1;
        let reach = radius as f64;

        let mut raw = vec![0.0_f64; size * size];
        for (i, weight) in raw.iter_mut().enumerate() {
            let dy = (i / size) as f64 - reach;
            let dx = (i % size) as f64 - reach;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance > 0.0 && distance <= reach {
                *weight = 1.0 / (1.0 + distance).powi(2);
            }
        }

        let neighbor_total: f64 = raw.iter().sum();
        let rate = f64::from(diffusion_rate);
        let mut weights: Vec<f32> = raw
            .iter()
            .map(|&w| {
                if neighbor_total > 0.0 {
                    (w / neighbor_total * rate) as f32
                } else {
                    0.0
                }
            })
            .collect();
        weights[radius * size + radius] = 1.0 - diffusion_rate;

        Self { radius, weights }
    }

    /// Kernel for a config at a given grid resolution
    #[must_use]
    pub fn from_config(config: &SimulationConfig, cell_size_km: f32) -> Self {
        Self::build(
            config.annual_migration_km,
            cell_size_km,
            config.diffusion_rate,
        )
    }

    /// Reach of the kernel in cells
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Edge length of the weight matrix
    #[must_use]
    pub fn size(&self) -> usize {
        2 * self.radius + 1
    }

    /// Weight for an offset; zero outside the matrix
    #[must_use]
    pub fn weight(&self, dy: isize, dx: isize) -> f32 {
        let r = self.radius as isize;
        if dy.abs() > r || dx.abs() > r {
            return 0.0;
        }
        let size = self.size();
        self.weights[(dy + r) as usize * size + (dx + r) as usize]
    }

    /// Fraction of animals that do not disperse
    #[must_use]
    pub fn center_weight(&self) -> f32 {
        self.weight(0, 0)
    }

    /// Sum of all non-centre weights
    #[must_use]
    pub fn neighbor_weight_sum(&self) -> f64 {
        let center = self.radius * self.size() + self.radius;
        self.weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != center)
            .map(|(_, &w)| f64::from(w))
            .sum()
    }

    /// Row-major weights
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_from_migration_range() {
        // 50 km at 1 km cells -> 12.5 -> clamped to 5
        assert_eq!(MigrationKernel::build(50.0, 1.0, 0.15).radius(), 5);
        // 50 km at 5 km cells -> 2.5 -> rounds to 3
        assert_eq!(MigrationKernel::build(50.0, 5.0, 0.15).radius(), 3);
        // 20 km at 10 km cells -> 0.5 -> clamped to 2
        assert_eq!(MigrationKernel::build(20.0, 10.0, 0.15).radius(), 2);
        assert_eq!(MigrationKernel::build(50.0, 1.0, 0.15).size(), 11);
    }

    #[test]
    fn test_normalization() {
        let kernel = MigrationKernel::build(50.0, 4.0, 0.15);
        assert!((kernel.neighbor_weight_sum() - 0.15).abs() < 1e-6);
        assert!((kernel.center_weight() - 0.85).abs() < 1e-7);
    }

    #[test]
    fn test_rotational_symmetry() {
        let kernel = MigrationKernel::build(50.0, 1.0, 0.3);
        let r = kernel.radius() as isize;
        for dy in -r..=r {
            for dx in -r..=r {
                // 90 degree rotation: (dy, dx) -> (dx, -dy)
                assert_eq!(kernel.weight(dy, dx), kernel.weight(dx, -dy));
            }
        }
    }

    #[test]
    fn test_corners_beyond_reach_are_zero() {
        let kernel = MigrationKernel::build(50.0, 1.0, 0.15);
        assert_eq!(kernel.weight(5, 5), 0.0);
        assert!(kernel.weight(5, 0) > 0.0);
        assert!(kernel.weight(1, 0) > kernel.weight(2, 0));
        assert_eq!(kernel.weight(6, 0), 0.0);
    }

    #[test]
    fn test_no_dispersal() {
        let kernel = MigrationKernel::build(50.0, 1.0, 0.0);
        assert_eq!(kernel.center_weight(), 1.0);
        assert_eq!(kernel.neighbor_weight_sum(), 0.0);
    }
}
