//! Simulation handle
//!
//! A `Simulation` owns everything one run needs: the config, the loaded
//! landscape and, once started, the evolving grid state and its step engine.
//! Create as many as you like; they share nothing.
//!
//! ```text
//! Uninitialized --start()--> Running --step()--> Running ...
//!                               ^                   |
//!                               +----start()--------+
//! ```

mod snapshot;

pub use snapshot::{Snapshot, SnapshotSummary, OCCUPIED_THRESHOLD};

use crate::config::{SeedPolicy, SimulationConfig};
use crate::error::{Result, SimulationError};
use crate::grid::{GridState, Landscape};
use crate::solver::{compute_release_radius, seed_population, StepEngine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Lifecycle state of a [`Simulation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// No herd released yet
    Uninitialized,
    /// Herd released; `step()` may be called indefinitely
    Running,
}

/// Everything that changes once a herd is released
#[derive(Debug, Clone)]
struct Run {
    engine: StepEngine,
    state: GridState,
}

/// Owned handle for one colonization run
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    landscape: Option<Landscape>,
    run: Option<Run>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
            landscape: None,
            run: None,
        }
    }
}

impl Simulation {
    /// Create a handle with the given parameters
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` if the config fails validation.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            landscape: None,
            run: None,
        })
    }

    /// Load the landscape future starts will use
    ///
    /// A run already in progress keeps its own copy of the grids and is not
    /// affected until the next `start()`.
    pub fn load(&mut self, landscape: Landscape) {
        info!(
            "Loaded landscape: {}x{} cells at {:.3} km, {} habitable",
            landscape.height(),
            landscape.width(),
            landscape.cell_size_km(),
            landscape.land_cells()
        );
        self.landscape = Some(landscape);
    }

    /// Release a herd, seeding the random source from the config's policy
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::NoLandscape` before `load()`, and
    /// `SimulationError::StartOutOfBounds` if the release cell is outside
    /// the grid.
    pub fn start(&mut self, row: usize, col: usize, total_population: u32) -> Result<Snapshot> {
        let mut rng = match self.config.seed_policy {
            SeedPolicy::Fixed(seed) => ChaCha8Rng::seed_from_u64(seed),
            SeedPolicy::Entropy => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        self.start_with_rng(row, col, total_population, &mut rng)
    }

    /// Release a herd using a caller-supplied random source
    ///
    /// # Errors
    ///
    /// Same as [`Simulation::start`].
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        total_population: u32,
        rng: &mut R,
    ) -> Result<Snapshot> {
        let landscape = self.landscape.as_ref().ok_or(SimulationError::NoLandscape)?;
        if !landscape.contains(row, col) {
            return Err(SimulationError::StartOutOfBounds {
                row,
                col,
                height: landscape.height(),
                width: landscape.width(),
            });
        }

        let radius =
            compute_release_radius(landscape.biomass(), &self.config, row, col, total_population);
        let population = seed_population(
            landscape.biomass(),
            row,
            col,
            radius,
            total_population,
            rng,
        );
        let engine = StepEngine::new(self.config.clone(), landscape.cell_size_km());

        info!(
            "Released {} animals at ({}, {}) over radius {} cells; kernel radius {}",
            total_population,
            row,
            col,
            radius,
            engine.kernel().radius()
        );

        let state = GridState::from_landscape(landscape, population);
        let snapshot = Snapshot::from_state(&state);
        self.run = Some(Run { engine, state });
        Ok(snapshot)
    }

    /// Load a landscape and release a herd in one call
    ///
    /// # Errors
    ///
    /// Same as [`Simulation::start`].
    pub fn initialize(
        &mut self,
        landscape: Landscape,
        row: usize,
        col: usize,
        total_population: u32,
    ) -> Result<Snapshot> {
        self.load(landscape);
        self.start(row, col, total_population)
    }

    /// Advance one year
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Uninitialized` before a successful `start()`.
    pub fn step(&mut self) -> Result<Snapshot> {
        self.step_years(1)
    }

    /// Advance several years and return the final snapshot
    ///
    /// `years == 0` returns the current snapshot unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Uninitialized` before a successful `start()`.
    pub fn step_years(&mut self, years: u32) -> Result<Snapshot> {
        let Run { engine, mut state } = self.run.take().ok_or(SimulationError::Uninitialized)?;
        for _ in 0..years {
            state = engine.advance(state);
        }
        let snapshot = Snapshot::from_state(&state);
        self.run = Some(Run { engine, state });
        Ok(snapshot)
    }

    /// Snapshot of the current year
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::Uninitialized` before a successful `start()`.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.run
            .as_ref()
            .map(|run| Snapshot::from_state(&run.state))
            .ok_or(SimulationError::Uninitialized)
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SimulationState {
        if self.run.is_some() {
            SimulationState::Running
        } else {
            SimulationState::Uninitialized
        }
    }

    /// True once a herd has been released
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == SimulationState::Running
    }

    /// Years simulated so far, if running
    #[must_use]
    pub fn year(&self) -> Option<u32> {
        self.run.as_ref().map(|run| run.state.year)
    }

    /// Parameters of this run
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
