//! Field solver for forage and herd dynamics
//!
//! Each sub-step is a pure function from input fields to output fields.
//! [`StepEngine`] wires them into one simulated year; the initializer runs
//! once before the first year.
//!
//! Per-cell work runs row-parallel on the Rayon thread pool. Every output
//! cell depends only on read-only inputs and all reductions are sequential,
//! so results do not depend on the number of threads.
//!
//! # Example
//!
//! ```rust
//! use bison_sim_core::grid::{FieldData, GridState, Landscape};
//! use bison_sim_core::solver::StepEngine;
//! use bison_sim_core::SimulationConfig;
//!
//! let landscape = Landscape::new(vec![20.0; 64], 8, 8, 1.0).unwrap();
//! let mut herd = FieldData::new(8, 8);
//! herd.set(4, 4, 3.0);
//!
//! let engine = StepEngine::new(SimulationConfig::default(), landscape.cell_size_km());
//! let state = engine.advance(GridState::from_landscape(&landscape, herd));
//! assert_eq!(state.year, 1);
//! ```

mod biomass;
mod engine;
mod growth;
mod initializer;
mod kernel;
mod migration;

pub use biomass::{step_biomass, ForageBalance};
pub use engine::StepEngine;
pub use growth::{growth_rate, step_growth, GrowthRegime};
pub use initializer::{compute_release_radius, seed_population};
pub use kernel::MigrationKernel;
pub use migration::{diffuse, step_migration, EXTINCTION_THRESHOLD};
