//! Simulation parameters
//!
//! A `SimulationConfig` is fixed for the lifetime of a run. Forage, intake,
//! growth and movement rates all live here so that no model constant that a
//! user may reasonably want to tune is buried inside the solver.

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Days per year used to annualize daily intake
const DAYS_PER_YEAR: f32 = 365.0;

/// Kilograms per tonne
const KG_PER_TONNE: f32 = 1000.0;

/// Seed used when nothing else is requested, so fresh runs are reproducible
pub const DEFAULT_SEED: u64 = 42;

/// How the random source for initial seeding is created
///
/// Every fresh `start()` builds a new random source from this policy.
/// `Fixed` gives identical releases for identical inputs, `Entropy`
/// gives a different release pattern each time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// Reseed with the same value on every start
    Fixed(u64),
    /// Draw a fresh seed from the operating system on every start
    Entropy,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_SEED)
    }
}

/// Parameter set governing forage, herd growth and migration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // Forage
    /// Fraction of standing biomass that is digestible (0-1)
    pub digestibility_factor: f32,
    /// Fraction of the gap to the habitat ceiling regrown each year (0-1)
    pub annual_growth_factor: f32,
    /// Fraction of digestible forage that can be grazed sustainably (0-1)
    pub utilization_factor: f32,

    // Herd
    /// Mean adult body mass in kilograms
    pub body_mass_kg: f32,
    /// Daily dry-matter intake as a fraction of body mass
    pub daily_intake_rate: f32,
    /// Intrinsic annual growth rate of a well-fed herd
    pub max_growth_rate: f32,
    /// Food satisfaction at or below which the herd starves (0-1)
    pub starvation_threshold: f32,
    /// Density (animals per cell) below which the Allee decline applies
    pub min_viable_density: f32,
    /// Extra growth rate for herds far below local carrying capacity
    pub pioneer_bonus: f32,

    // Migration
    /// Typical distance travelled per year in kilometres
    pub annual_migration_km: f32,
    /// Fraction of each cell's animals that disperse every year (0-1)
    pub diffusion_rate: f32,
    /// Strength of the pull toward better forage
    pub food_preference_weight: f32,

    /// Random source policy for the initial release
    pub seed_policy: SeedPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            digestibility_factor: 1.0,
            annual_growth_factor: 0.4,
            utilization_factor: 0.5,
            body_mass_kg: 700.0,
            daily_intake_rate: 0.02,
            max_growth_rate: 0.10,
            starvation_threshold: 0.2,
            min_viable_density: 0.05,
            pioneer_bonus: 0.05,
            annual_migration_km: 50.0,
            diffusion_rate: 0.15,
            food_preference_weight: 1.0,
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Forage eaten by one animal in a year, in tonnes
    #[must_use]
    pub fn annual_intake_tonnes(&self) -> f32 {
        self.body_mass_kg * self.daily_intake_rate * DAYS_PER_YEAR / KG_PER_TONNE
    }

    /// Same config with a different seed policy
    pub fn with_seed_policy(mut self, seed_policy: SeedPolicy) -> Self {
        self.seed_policy = seed_policy;
        self
    }

    /// Check that every parameter is usable by the model
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("digestibility_factor", self.digestibility_factor),
            ("annual_growth_factor", self.annual_growth_factor),
            ("utilization_factor", self.utilization_factor),
            ("body_mass_kg", self.body_mass_kg),
            ("daily_intake_rate", self.daily_intake_rate),
            ("max_growth_rate", self.max_growth_rate),
            ("starvation_threshold", self.starvation_threshold),
            ("min_viable_density", self.min_viable_density),
            ("pioneer_bonus", self.pioneer_bonus),
            ("annual_migration_km", self.annual_migration_km),
            ("diffusion_rate", self.diffusion_rate),
            ("food_preference_weight", self.food_preference_weight),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if self.diffusion_rate > 1.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "diffusion_rate must be within [0, 1], got {}",
                self.diffusion_rate
            )));
        }
        // Both thresholds appear as divisors in the growth model
        if self.starvation_threshold <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "starvation_threshold must be positive".to_string(),
            ));
        }
        if self.min_viable_density <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "min_viable_density must be positive".to_string(),
            ));
        }
        if self.annual_intake_tonnes() <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "body_mass_kg and daily_intake_rate must give a positive annual intake".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_annual_intake() {
        let config = SimulationConfig::default();
        // 700 kg * 2% * 365 days = 5110 kg
        assert_relative_eq!(config.annual_intake_tonnes(), 5.11, epsilon = 1e-5);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert_eq!(
            SimulationConfig::default().seed_policy,
            SeedPolicy::Fixed(DEFAULT_SEED)
        );
    }

    #[test]
    fn test_rejects_out_of_range_diffusion() {
        let config = SimulationConfig {
            diffusion_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_nan_and_zero_divisors() {
        let nan = SimulationConfig {
            pioneer_bonus: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let zero_threshold = SimulationConfig {
            starvation_threshold: 0.0,
            ..Default::default()
        };
        assert!(zero_threshold.validate().is_err());

        let no_appetite = SimulationConfig {
            daily_intake_rate: 0.0,
            ..Default::default()
        };
        assert!(no_appetite.validate().is_err());
    }

    #[test]
    fn test_partial_parameter_file_uses_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"diffusion_rate":0.3}"#).unwrap();
        assert_eq!(
            config,
            SimulationConfig {
                diffusion_rate: 0.3,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_seed_policy_serde() {
        for policy in [SeedPolicy::Fixed(7), SeedPolicy::Entropy] {
            let json = serde_json::to_string(&policy).unwrap();
            let back: SeedPolicy = serde_json::from_str(&json).unwrap();
            assert_eq!(back, policy);
        }
    }

    #[test]
    fn test_with_seed_policy() {
        let config = SimulationConfig::default().with_seed_policy(SeedPolicy::Entropy);
        assert_eq!(config.seed_policy, SeedPolicy::Entropy);
    }
}
