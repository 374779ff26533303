//! Initial herd release
//!
//! A founding herd is not dropped on a single cell. It is spread over a
//! release disk whose size depends on how much forage the surrounding country
//! offers, so that the herd starts near a target fraction of local carrying
//! capacity.
//!
//! # Implementation
//!
//! ```text
//! K_avg  = mean(B_land) × utilization / intake      (fallback 0.1)
//! A      = max(N / (K_avg × 0.8), 3N)               cells
//! radius = clamp(round(√(A / π)), 30, 300)
//! ```
//!
//! Inside the disk each land cell gets weight `√B / (1 + d)`; a Poisson count
//! is drawn per cell and the result is rescaled to exactly `N` animals.

use crate::config::SimulationConfig;
use crate::grid::FieldData;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::{debug, warn};

/// Half-width of the window sampled for local habitat quality
const HABITAT_SAMPLE_RADIUS: usize = 50;

/// Carrying capacity assumed when the sample window holds no land
const FALLBACK_CARRYING_CAPACITY: f64 = 0.1;

/// Fraction of carrying capacity the release disk is sized for
const TARGET_CAPACITY_RATIO: f64 = 0.8;

/// Habitat area used when forage cannot support any animal at all
const NO_FORAGE_AREA_CELLS: f64 = 2000.0;

/// Minimum cells per released animal
const MIN_CELLS_PER_ANIMAL: f64 = 3.0;

/// Release radius bounds in cells
const MIN_RELEASE_RADIUS: usize = 30;
const MAX_RELEASE_RADIUS: usize = 300;

/// Size the release disk for a herd of `total_population` at `(row, col)`
///
/// The caller guarantees `(row, col)` lies inside the grid; the sample window
/// is clipped to the grid edges.
///
/// # Arguments
///
/// * `biomass` - Habitat ceiling in tonnes per cell (0 = water)
/// * `config` - Supplies utilization and annual intake
/// * `row`, `col` - Release cell
/// * `total_population` - Animals in the founding herd
///
/// # Returns
///
/// Release radius in cells, between 30 and 300
#[must_use]
pub fn compute_release_radius(
    biomass: &FieldData,
    config: &SimulationConfig,
    row: usize,
    col: usize,
    total_population: u32,
) -> usize {
    let r_min = row.saturating_sub(HABITAT_SAMPLE_RADIUS);
    let r_max = (row + HABITAT_SAMPLE_RADIUS).min(biomass.height);
    let c_min = col.saturating_sub(HABITAT_SAMPLE_RADIUS);
    let c_max = (col + HABITAT_SAMPLE_RADIUS).min(biomass.width);

    let mut land_total = 0.0_f64;
    let mut land_cells = 0_usize;
    for r in r_min..r_max {
        for c in c_min..c_max {
            let value = biomass.get(r, c);
            if value > 0.0 {
                land_total += f64::from(value);
                land_cells += 1;
            }
        }
    }

    let avg_capacity = if land_cells > 0 {
        let avg_biomass = land_total / land_cells as f64;
        avg_biomass * f64::from(config.utilization_factor)
            / f64::from(config.annual_intake_tonnes())
    } else {
        FALLBACK_CARRYING_CAPACITY
    };

    let herd = f64::from(total_population);
    let cells_needed = if avg_capacity > 0.0 {
        herd / (avg_capacity * TARGET_CAPACITY_RATIO)
    } else {
        NO_FORAGE_AREA_CELLS
    };
    let cells_needed = cells_needed.max(herd * MIN_CELLS_PER_ANIMAL);

    let radius = (cells_needed / std::f64::consts::PI).sqrt().round() as usize;
    let radius = radius.clamp(MIN_RELEASE_RADIUS, MAX_RELEASE_RADIUS);

    debug!(
        "Release radius: {} cells (avg capacity {:.3}/cell over {} land cells)",
        radius, avg_capacity, land_cells
    );
    radius
}

/// Distribute `total_population` animals over the release disk
///
/// Returns an all-zero field when the disk holds no land; that is a legal,
/// if doomed, start.
///
/// # Arguments
///
/// * `biomass` - Habitat ceiling in tonnes per cell (0 = water)
/// * `row`, `col` - Centre of the release disk
/// * `radius` - Disk radius in cells, usually from [`compute_release_radius`]
/// * `total_population` - Animals to place
/// * `rng` - Source for the per-cell Poisson draws
///
/// # Returns
///
/// Herd density field summing to `total_population`
pub fn seed_population<R: Rng + ?Sized>(
    biomass: &FieldData,
    row: usize,
    col: usize,
    radius: usize,
    total_population: u32,
    rng: &mut R,
) -> FieldData {
    let mut population = FieldData::new(biomass.width, biomass.height);
    if total_population == 0 {
        return population;
    }

    let r_min = row.saturating_sub(radius);
    let r_max = (row + radius + 1).min(biomass.height);
    let c_min = col.saturating_sub(radius);
    let c_max = (col + radius + 1).min(biomass.width);
    let radius_f = radius as f64;

    // (flat index, weight) in row-major order so draws are reproducible
    let mut candidates: Vec<(usize, f64)> = Vec::new();
    for r in r_min..r_max {
        for c in c_min..c_max {
            let value = biomass.get(r, c);
            if value <= 0.0 {
                continue;
            }
            let dr = r as f64 - row as f64;
            let dc = c as f64 - col as f64;
            let distance = (dr * dr + dc * dc).sqrt();
            if distance <= radius_f {
                let weight = f64::from(value).sqrt() / (1.0 + distance);
                candidates.push((biomass.index(r, c), weight));
            }
        }
    }

    if candidates.is_empty() {
        warn!(
            "No habitable cell within {} cells of ({}, {}); herd released into nothing",
            radius, row, col
        );
        return population;
    }

    let weight_total: f64 = candidates.iter().map(|&(_, w)| w).sum();
    let target = f64::from(total_population);

    let mut drawn = Vec::with_capacity(candidates.len());
    let mut drawn_total = 0.0_f64;
    for &(_, weight) in &candidates {
        let expected = weight / weight_total * target;
        let count = if expected > 0.0 {
            match Poisson::new(expected) {
                Ok(dist) => dist.sample(rng),
                Err(_) => expected.round(),
            }
        } else {
            0.0
        };
        drawn_total += count;
        drawn.push((count, expected));
    }

    let data = population.as_mut_slice();
    if drawn_total > 0.0 {
        let scale = target / drawn_total;
        for (&(idx, _), &(count, _)) in candidates.iter().zip(&drawn) {
            data[idx] = (count * scale) as f32;
        }
    } else {
        warn!("Poisson release drew no animals; using expected distribution");
        for (&(idx, _), &(_, expected)) in candidates.iter().zip(&drawn) {
            data[idx] = expected as f32;
        }
    }

    debug!(
        "Seeded {} animals over {} candidate cells",
        total_population,
        candidates.len()
    );
    population
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn uniform(width: usize, height: usize, value: f32) -> FieldData {
        FieldData::with_value(width, height, value)
    }

    #[test]
    fn test_radius_floor_for_small_herd() {
        let biomass = uniform(20, 20, 10.0);
        let config = SimulationConfig::default();
        assert_eq!(compute_release_radius(&biomass, &config, 10, 10, 100), 30);
    }

    #[test]
    fn test_radius_from_minimum_area() {
        // Rich forage: capacity ~97.8/cell, so the 3-cells-per-animal floor wins
        let biomass = uniform(200, 200, 1000.0);
        let config = SimulationConfig::default();
        // sqrt(3000 / pi) = 30.9
        assert_eq!(compute_release_radius(&biomass, &config, 100, 100, 1000), 31);
    }

    #[test]
    fn test_radius_without_land_uses_fallback_capacity() {
        let biomass = FieldData::new(10, 10);
        let config = SimulationConfig::default();
        // 10000 / (0.1 * 0.8) = 125000 cells -> sqrt(125000 / pi) = 199.5
        assert_eq!(compute_release_radius(&biomass, &config, 5, 5, 10_000), 199);
    }

    #[test]
    fn test_radius_ceiling() {
        let biomass = FieldData::new(10, 10);
        let config = SimulationConfig::default();
        assert_eq!(
            compute_release_radius(&biomass, &config, 0, 0, 1_000_000),
            300
        );
    }

    #[test]
    fn test_seed_sums_to_target_on_land_only() {
        let mut biomass = uniform(40, 40, 8.0);
        // A lake right next to the release point
        for r in 18..22 {
            for c in 22..26 {
                biomass.set(r, c, 0.0);
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let population = seed_population(&biomass, 20, 20, 10, 500, &mut rng);

        assert_relative_eq!(population.sum(), 500.0, max_relative = 1e-5);
        for r in 18..22 {
            for c in 22..26 {
                assert_eq!(population.get(r, c), 0.0);
            }
        }
        // Outside the disk
        assert_eq!(population.get(20, 31), 0.0);
        assert_eq!(population.get(8, 8), 0.0);
        assert!(population.as_slice().iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let biomass = uniform(30, 30, 5.0);
        let a = seed_population(&biomass, 15, 15, 8, 250, &mut ChaCha8Rng::seed_from_u64(7));
        let b = seed_population(&biomass, 15, 15, 8, 250, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_without_land_is_empty() {
        let biomass = FieldData::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let population = seed_population(&biomass, 5, 5, 30, 100, &mut rng);
        assert_eq!(population.sum(), 0.0);
    }

    #[test]
    fn test_single_animal_over_wide_disk() {
        let biomass = uniform(200, 200, 5.0);
        let radius = 60;
        let mut disk_cells = 0;
        for r in 0..200_i64 {
            for c in 0..200_i64 {
                if (((r - 100).pow(2) + (c - 100).pow(2)) as f64).sqrt() <= 60.0 {
                    disk_cells += 1;
                }
            }
        }

        // Expected counts are tiny, so some seeds draw nobody at all and
        // the release falls back to the expected distribution
        let mut fallbacks = 0;
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let population = seed_population(&biomass, 100, 100, radius, 1, &mut rng);
            assert_relative_eq!(population.sum(), 1.0, max_relative = 1e-4);

            let occupied = population.count_above(0.0);
            if occupied == disk_cells {
                fallbacks += 1;
                assert!(population.as_slice().iter().all(|&p| p < 1.0));
                // Closer cells get more of the single animal
                assert!(population.get(100, 100) > population.get(100, 150));
            } else {
                assert!(occupied < disk_cells);
            }
        }
        assert!(fallbacks > 0);
    }

    #[test]
    fn test_seed_near_corner_clips_window() {
        let biomass = uniform(12, 12, 3.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let population = seed_population(&biomass, 0, 0, 30, 40, &mut rng);
        assert_relative_eq!(population.sum(), 40.0, max_relative = 1e-5);
    }
}
