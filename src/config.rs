//! Simulation configuration.
//!
//! A [`Config`] is a plain value snapshot. It is validated once when handed to a
//! [`World`](crate::world::World) and then only swapped as a whole at tick boundaries.
//!
//! Configurations can be written in TOML; every section and key is optional and falls back to
//! the defaults below.
//!
//! ```
//! # use attractors::config::Config;
//! let config = Config::from_toml_str(
//!     r#"
//!     global_force = [0.0, 0.05]
//!
//!     [emitter]
//!     rate = 40
//!
//!     [particle]
//!     lifespan = { min = 100.0, max = 200.0 }
//!     decay = { kind = "exponential", factor = 0.98, cutoff = 1.0 }
//!
//!     [fields]
//!     attractor_count = 2
//!     norm = "fast_inverse_sqrt"
//!     "#,
//! )?;
//!
//! assert_eq!(config.emitter.rate, 40);
//! assert_eq!(config.fields.attractor_count, 2);
//! assert_eq!(config.fields.repeller_count, 1);
//! # Ok::<(), attractors::error::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    force_field::DistanceBounds,
    math::Norm,
    particle::Decay,
    vector::Vector2D,
};

/// Largest accepted `particle.lifespan.max`. It also caps the appearance table size.
pub const MAX_LIFESPAN: f64 = 65_536.0;

/// Inclusive range a value is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Bounds {
    /// Range containing only `value`.
    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        finite(field, self.min)?;
        finite(field, self.max)?;
        if self.min > self.max {
            return Err(Error::invalid(
                field,
                format!("min ({}) is greater than max ({})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Constant force applied to every particle on every tick.
    pub global_force: Vector2D,
    /// Simulation area.
    pub world: WorldConfig,
    /// Emission of new particles.
    pub emitter: EmitterConfig,
    /// Properties of emitted particles.
    pub particle: ParticleConfig,
    /// Attractors and repellers.
    pub fields: FieldConfig,
}

/// Simulation area, used to lay out the initial force fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the area.
    pub width: f64,
    /// Height of the area.
    pub height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1030.0,
            height: 720.0,
        }
    }
}

/// Emission parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Particles emitted per tick.
    pub rate: usize,
    /// Horizontal extent over which particles are spread around the anchor.
    pub width: f64,
    /// Horizontal center of the emission line.
    pub anchor_x: f64,
    /// Vertical position of the emission line.
    pub anchor_y: f64,
    /// Mean initial velocity.
    pub direction: Vector2D,
    /// Standard deviation of the Gaussian perturbation added to `direction`.
    pub spread: f64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            rate: 100,
            width: world.width,
            anchor_x: world.width / 2.0,
            anchor_y: world.height / 2.0,
            direction: Vector2D::new(0.0, -1.0),
            spread: 0.3,
        }
    }
}

/// Properties of emitted particles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Diameter range.
    pub size: Bounds,
    /// Speed limit applied after every integration step.
    pub max_speed: f64,
    /// Initial lifespan range. The upper bound also sizes the appearance table.
    pub lifespan: Bounds,
    /// Lifespan decay policy.
    pub decay: Decay,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            size: Bounds::fixed(5.0),
            max_speed: 4.0,
            lifespan: Bounds::fixed(256.0),
            decay: Decay::default(),
        }
    }
}

/// Force field parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of attractors.
    pub attractor_count: usize,
    /// Number of repellers.
    pub repeller_count: usize,
    /// Strength of every attractor.
    pub attractor_strength: f64,
    /// Strength of every repeller.
    pub repeller_strength: f64,
    /// Clamping range of the particle-to-field distance.
    pub distance: DistanceBounds,
    /// Length computation used by the force law.
    pub norm: Norm,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            attractor_count: 1,
            repeller_count: 1,
            attractor_strength: 500.0,
            repeller_strength: 500.0,
            distance: DistanceBounds::default(),
            norm: Norm::Exact,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(Error::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}

impl Config {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads the file at `path`, falling back to the default configuration when it is missing
    /// or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring configuration {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Checks every invariant the simulation relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.global_force.is_finite() {
            return Err(Error::invalid("global_force", "components must be finite"));
        }

        non_negative("world.width", self.world.width)?;
        non_negative("world.height", self.world.height)?;

        let emitter = &self.emitter;
        non_negative("emitter.width", emitter.width)?;
        finite("emitter.anchor_x", emitter.anchor_x)?;
        finite("emitter.anchor_y", emitter.anchor_y)?;
        if !emitter.direction.is_finite() {
            return Err(Error::invalid("emitter.direction", "components must be finite"));
        }
        non_negative("emitter.spread", emitter.spread)?;

        let particle = &self.particle;
        particle.size.validate("particle.size")?;
        non_negative("particle.size", particle.size.min)?;
        non_negative("particle.max_speed", particle.max_speed)?;
        particle.lifespan.validate("particle.lifespan")?;
        if particle.lifespan.min <= 0.0 {
            return Err(Error::invalid("particle.lifespan", "min must be positive"));
        }
        if particle.lifespan.max > MAX_LIFESPAN {
            return Err(Error::invalid(
                "particle.lifespan",
                format!("max {} exceeds {MAX_LIFESPAN}", particle.lifespan.max),
            ));
        }
        match particle.decay {
            Decay::Linear { step } => {
                finite("particle.decay", step)?;
                if step <= 0.0 {
                    return Err(Error::invalid("particle.decay", "step must be positive"));
                }
            }
            Decay::Exponential { factor, cutoff } => {
                if !(factor > 0.0 && factor < 1.0) {
                    return Err(Error::invalid(
                        "particle.decay",
                        format!("factor {factor} is not in (0, 1)"),
                    ));
                }
                finite("particle.decay", cutoff)?;
                if cutoff <= 0.0 {
                    return Err(Error::invalid("particle.decay", "cutoff must be positive"));
                }
            }
        }

        let fields = &self.fields;
        non_negative("fields.attractor_strength", fields.attractor_strength)?;
        non_negative("fields.repeller_strength", fields.repeller_strength)?;
        finite("fields.distance", fields.distance.min)?;
        finite("fields.distance", fields.distance.max)?;
        if fields.distance.min <= 0.0 {
            return Err(Error::invalid("fields.distance", "min must be positive"));
        }
        if fields.distance.min > fields.distance.max {
            return Err(Error::invalid(
                "fields.distance",
                format!(
                    "min ({}) is greater than max ({})",
                    fields.distance.min, fields.distance.max
                ),
            ));
        }

        Ok(())
    }

    /// Number of entries in the appearance table for this configuration.
    pub fn appearance_len(&self) -> usize {
        (self.particle.lifespan.max.ceil() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(config: Config) -> &'static str {
        match config.validate() {
            Err(Error::InvalidConfig { field, .. }) => field,
            other => panic!("expected an invalid configuration, got {other:?}"),
        }
    }

    #[test]
    fn default_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut config = Config::default();
        config.particle.size = Bounds { min: 10.0, max: 2.0 };
        assert_eq!(rejected(config), "particle.size");

        let mut config = Config::default();
        config.particle.lifespan = Bounds { min: 300.0, max: 200.0 };
        assert_eq!(rejected(config), "particle.lifespan");

        let mut config = Config::default();
        config.fields.distance = DistanceBounds { min: 50.0, max: 5.0 };
        assert_eq!(rejected(config), "fields.distance");
    }

    #[test]
    fn non_positive_lifespan_is_rejected() {
        let mut config = Config::default();
        config.particle.lifespan = Bounds::fixed(0.0);
        assert_eq!(rejected(config), "particle.lifespan");
    }

    #[test]
    fn oversized_lifespan_is_rejected() {
        let mut config = Config::default();
        config.particle.lifespan = Bounds { min: 1.0, max: 1e300 };
        assert_eq!(rejected(config), "particle.lifespan");

        let mut config = Config::default();
        config.particle.lifespan = Bounds::fixed(MAX_LIFESPAN);
        config.validate().unwrap();
        assert_eq!(config.appearance_len(), MAX_LIFESPAN as usize);
    }

    #[test]
    fn degenerate_decay_is_rejected() {
        let mut config = Config::default();
        config.particle.decay = Decay::Linear { step: 0.0 };
        assert_eq!(rejected(config), "particle.decay");

        let mut config = Config::default();
        config.particle.decay = Decay::Exponential {
            factor: 1.0,
            cutoff: 1.0,
        };
        assert_eq!(rejected(config), "particle.decay");
    }

    #[test]
    fn negative_values_are_rejected() {
        let mut config = Config::default();
        config.particle.max_speed = -1.0;
        assert_eq!(rejected(config), "particle.max_speed");

        let mut config = Config::default();
        config.fields.repeller_strength = -500.0;
        assert_eq!(rejected(config), "fields.repeller_strength");

        let mut config = Config::default();
        config.global_force = Vector2D::new(f64::NAN, 0.0);
        assert_eq!(rejected(config), "global_force");
    }

    #[test]
    fn negative_rate_fails_to_parse() {
        let err = Config::from_toml_str("[emitter]\nrate = -5").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn invalid_toml_values_fail_validation() {
        let err = Config::from_toml_str("[fields]\ndistance = { min = 0.0, max = 10.0 }")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "fields.distance",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = Config::load_or_default("this/file/does/not/exist.toml");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn appearance_len_follows_lifespan() {
        let mut config = Config::default();
        assert_eq!(config.appearance_len(), 256);

        config.particle.lifespan = Bounds { min: 10.0, max: 99.5 };
        assert_eq!(config.appearance_len(), 100);
    }
}
