//! Bison Colonization Simulation Core Library
//!
//! Simulates how a released herbivore population colonizes a raster landscape
//! year by year: forage regrows and is grazed, animals disperse and drift
//! toward better forage, and local herds grow or decline under density,
//! Allee and starvation pressure.
//!
//! ## Simulation Model
//!
//! - Two coupled fields: standing forage biomass and herd density
//! - Fixed habitat ceiling from the input raster (0 = water)
//! - Adaptive release disk sized from local habitat quality
//! - Kernel dispersal plus a capped pull up the carrying-capacity gradient
//! - Logistic growth with pioneer bonus, Allee decline and starvation
//!
//! ## Usage
//!
//! ```rust
//! use bison_sim_core::{Landscape, Simulation, SimulationConfig};
//!
//! let landscape = Landscape::new(vec![40.0; 32 * 32], 32, 32, 1.0)?;
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let start = sim.initialize(landscape, 16, 16, 200)?;
//! assert_eq!(start.year, 0);
//!
//! let later = sim.step_years(5)?;
//! assert_eq!(later.year, 5);
//! # Ok::<(), bison_sim_core::SimulationError>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod solver;

pub use config::{SeedPolicy, SimulationConfig, DEFAULT_SEED};
pub use error::{Result, SimulationError};
pub use grid::{FieldData, GridState, Landscape};
pub use simulation::{Simulation, SimulationState, Snapshot, SnapshotSummary};
pub use solver::{MigrationKernel, StepEngine};
