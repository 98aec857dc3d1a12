//! # Attractors
//!
//! Attractors is a crate simulating short-lived particles continuously emitted into a 2D world,
//! pulled and pushed around by attractor and repeller force fields.
//!
//! ## Goals
//!
//! The main goal of this crate is to own the simulation state and produce one read-only
//! [`Frame`](frame::Frame) per tick, leaving drawing to whatever sits on top of it.
//! Rendering is represented by the [`Renderer`](frame::Renderer) trait and never touches the
//! simulation state directly.
//!
//! The per-particle work of a tick is performed by a [`ComputeMethod`](compute_method::ComputeMethod).
//! Attractors can be used with a parallel implementation on the CPU thanks to
//! [rayon](https://github.com/rayon-rs/rayon). Enable the "parallel" feature to access the
//! available compute methods.
//!
//! # Using Attractors
//!
//! ## Configuring the world
//!
//! Every tunable lives in a [`Config`](config::Config), which can be built in code or read from
//! a TOML file. Missing values fall back to their defaults.
//!
//! ```
//! # use attractors::prelude::*;
//! let config = Config::from_toml_str(
//!     r#"
//!     global_force = [0.0, 0.05]
//!
//!     [emitter]
//!     rate = 20
//!
//!     [fields]
//!     attractor_count = 2
//!     "#,
//! )?;
//!
//! let world = World::new(config)?;
//! assert_eq!(world.fields().len(), 3);
//! # Ok::<(), attractors::error::Error>(())
//! ```
//!
//! ## Running the simulation
//!
//! Each call to [`tick`](world::World::tick) advances the world by one step and publishes a
//! [`Frame`](frame::Frame). Force fields can be added, removed or moved between ticks.
//!
//! ```
//! # use attractors::prelude::*;
//! let mut world = World::seeded(Config::default(), 1)?;
//! let id = world.add_field(Polarity::Repeller, Vector2D::new(100.0, 100.0));
//! world.request_reposition(id, 10.0, 0.0)?;
//!
//! for _ in 0..10 {
//!     let frame = world.tick();
//!     assert!(frame.particles.iter().all(|p| p.appearance_index < world.appearance().len()));
//! }
//!
//! assert_eq!(world.field(id).map(|f| f.location), Some(Vector2D::new(110.0, 100.0)));
//! # Ok::<(), attractors::error::Error>(())
//! ```
//!
//! ## Choosing a compute method
//!
//! [`tick`](world::World::tick) uses the [`DefaultMethod`](compute_method::DefaultMethod).
//! Use [`tick_with`](world::World::tick_with) to pick another one.
//!
//! ```
//! # use attractors::prelude::*;
//! let mut world = World::seeded(Config::default(), 1)?;
//! let cm = &mut sequential::BruteForce;
//!
//! let frame = world.tick_with(cm);
//! assert_eq!(frame.emitted, world.config().emitter.rate);
//! # Ok::<(), attractors::error::Error>(())
//! ```

#![warn(missing_docs)]

/// Lookup table from particle lifespan to color and radius.
pub mod appearance;

/// Trait for running the per-particle steps of a tick and types implementing it for the user to
/// choose from.
pub mod compute_method;

/// Tunables of the simulation and their validation.
pub mod config;

/// Source of new particles.
pub mod emitter;

/// Error type of the crate.
pub mod error;

/// Attractors and repellers.
pub mod force_field;

/// Published per-tick snapshots and the trait consuming them.
pub mod frame;

/// Scalar helpers.
pub mod math;

/// Emitted particles and their lifespan decay.
pub mod particle;

/// 2D vector used throughout the simulation.
pub mod vector;

/// Simulation state and the tick loop.
pub mod world;

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::appearance::{AppearanceTable, Rgba};
    pub use crate::compute_method::*;
    pub use crate::config::Config;
    pub use crate::emitter::Emitter;
    pub use crate::error::{Error, Result};
    pub use crate::force_field::{DistanceBounds, FieldId, ForceField, Polarity};
    pub use crate::frame::{Frame, RenderParticle, Renderer};
    pub use crate::math::Norm;
    pub use crate::particle::{Decay, Particle};
    pub use crate::vector::Vector2D;
    pub use crate::world::World;
}
