use crate::{
    appearance::AppearanceTable,
    compute_method::{ComputeMethod, DefaultMethod, Forces, ParticleSystem},
    config::Config,
    emitter::Emitter,
    error::{Error, Result},
    force_field::{FieldId, ForceField, Polarity},
    frame::{Frame, RenderParticle, Renderer},
    particle::Particle,
    vector::Vector2D,
};

/// Vertical offset between the default attractor and repeller positions.
const REPELLER_OFFSET: f64 = 110.0;

/// Owner of the particle population and the force fields, running the simulation one tick at a
/// time.
///
/// Everything that changes the world from the outside (a new [`Config`], field repositioning)
/// only takes effect at the start of the next tick, so a tick always sees a single consistent
/// snapshot.
///
/// ```
/// # use attractors::prelude::*;
/// let mut config = Config::default();
/// config.emitter.rate = 25;
///
/// let mut world = World::seeded(config, 7)?;
/// let frame = world.tick();
///
/// assert_eq!(frame.tick, 1);
/// assert_eq!(frame.emitted, 25);
/// assert_eq!(frame.population(), 25);
/// # Ok::<(), attractors::error::Error>(())
/// ```
#[derive(Debug)]
pub struct World {
    config: Config,
    pending_config: Option<Config>,
    particles: Vec<Particle>,
    fields: Vec<ForceField>,
    next_field_id: u32,
    repositions: Vec<(FieldId, Vector2D)>,
    emitter: Emitter,
    appearance: AppearanceTable,
    emitting: bool,
    tick: u64,
}

impl World {
    /// Creates a world from a configuration, with an entropy-seeded emitter.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_emitter(config, Emitter::new())
    }

    /// Creates a world whose emitter produces a reproducible sequence of particles.
    pub fn seeded(config: Config, seed: u64) -> Result<Self> {
        Self::with_emitter(config, Emitter::seeded(seed))
    }

    /// Creates a world using the given emitter.
    pub fn with_emitter(config: Config, emitter: Emitter) -> Result<Self> {
        config.validate()?;

        let mut world = Self {
            appearance: AppearanceTable::from_config(&config),
            config,
            pending_config: None,
            particles: Vec::new(),
            fields: Vec::new(),
            next_field_id: 0,
            repositions: Vec::new(),
            emitter,
            emitting: true,
            tick: 0,
        };

        world.reconcile_fields(Polarity::Attractor, world.config.fields.attractor_count);
        world.reconcile_fields(Polarity::Repeller, world.config.fields.repeller_count);

        log::info!(
            "World created with {} attractor(s), {} repeller(s), emitting {} particles per tick",
            world.config.fields.attractor_count,
            world.config.fields.repeller_count,
            world.config.emitter.rate,
        );

        Ok(world)
    }

    /// Validates `config` and schedules it to replace the current one at the next tick.
    ///
    /// Installing another configuration before the next tick replaces the pending one.
    pub fn install_config(&mut self, config: Config) -> Result<()> {
        config.validate()?;
        log::info!("Configuration installed, effective at tick {}", self.tick + 1);
        self.pending_config = Some(config);
        Ok(())
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Alive particles.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Alive particles, mutably. Membership can only change through ticks.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of alive particles.
    #[inline]
    pub fn population(&self) -> usize {
        self.particles.len()
    }

    /// Force fields.
    #[inline]
    pub fn fields(&self) -> &[ForceField] {
        &self.fields
    }

    /// Force field with the given id.
    pub fn field(&self, id: FieldId) -> Option<&ForceField> {
        self.fields.iter().find(|f| f.id() == id)
    }

    /// Number of ticks run so far.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Lookup table matching the current particle configuration.
    #[inline]
    pub fn appearance(&self) -> &AppearanceTable {
        &self.appearance
    }

    /// Adds a force field, using the configured strength for its polarity.
    pub fn add_field(&mut self, polarity: Polarity, location: Vector2D) -> FieldId {
        let id = FieldId(self.next_field_id);
        self.next_field_id += 1;

        let strength = self.strength_of(polarity);
        self.fields
            .push(ForceField::new(id, polarity, location, strength));

        log::debug!("Added {polarity:?} {id} at ({}, {})", location.x, location.y);
        id
    }

    /// Removes a force field.
    pub fn remove_field(&mut self, id: FieldId) -> Result<ForceField> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id() == id)
            .ok_or(Error::UnknownField(id))?;

        log::debug!("Removed force field {id}");
        Ok(self.fields.remove(index))
    }

    /// Overrides the strength of a single force field.
    ///
    /// The override lasts until a new configuration changes the strength of its polarity.
    pub fn set_field_strength(&mut self, id: FieldId, strength: f64) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id() == id)
            .ok_or(Error::UnknownField(id))?;

        if !strength.is_finite() || strength < 0.0 {
            let key = match field.polarity() {
                Polarity::Attractor => "fields.attractor_strength",
                Polarity::Repeller => "fields.repeller_strength",
            };
            return Err(Error::invalid(
                key,
                format!("{strength} is not a finite non-negative number"),
            ));
        }
        field.strength = strength;
        Ok(())
    }

    /// Moves a force field by `(dx, dy)` at the start of the next tick.
    pub fn request_reposition(&mut self, id: FieldId, dx: f64, dy: f64) -> Result<()> {
        if self.field(id).is_none() {
            return Err(Error::UnknownField(id));
        }
        self.repositions.push((id, Vector2D::new(dx, dy)));
        Ok(())
    }

    /// Inserts a particle directly into the population.
    pub fn spawn(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Stops emitting new particles; the population drains as particles expire.
    pub fn stop_emitting(&mut self) {
        log::debug!("Emission stopped at tick {}", self.tick);
        self.emitting = false;
    }

    /// Resumes emitting new particles.
    pub fn resume_emitting(&mut self) {
        log::debug!("Emission resumed at tick {}", self.tick);
        self.emitting = true;
    }

    /// Returns true while new particles are emitted on every tick.
    #[inline]
    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// Returns true once emission is stopped and every particle has expired.
    #[inline]
    pub fn is_drained(&self) -> bool {
        !self.emitting && self.particles.is_empty()
    }

    /// Removes every particle and pending reposition immediately. Fields and configuration are
    /// kept.
    pub fn reset(&mut self) {
        log::info!("World reset, dropping {} particles", self.particles.len());
        self.particles.clear();
        self.repositions.clear();
    }

    /// Runs one tick with the [`DefaultMethod`].
    #[inline]
    pub fn tick(&mut self) -> Frame {
        self.tick_with(DefaultMethod::default())
    }

    /// Runs one tick with the [`DefaultMethod`] and hands the frame to `renderer`.
    pub fn tick_into<R: Renderer>(&mut self, renderer: &mut R) -> Frame {
        let frame = self.tick();
        renderer.render(&frame, &self.appearance);
        frame
    }

    /// Runs one tick using the given [`ComputeMethod`] for the per-particle steps.
    ///
    /// The steps run in this order: apply pending changes, emit, accumulate forces, integrate,
    /// age, cull and publish.
    pub fn tick_with<C>(&mut self, mut cm: C) -> Frame
    where
        for<'a> C: ComputeMethod<ParticleSystem<'a>, Output = usize>,
    {
        self.apply_pending();
        self.tick += 1;

        let emitted = if self.emitting {
            self.config.emitter.rate
        } else {
            0
        };
        if emitted > 0 {
            let new = self
                .emitter
                .emit(emitted, &self.config.emitter, &self.config.particle);
            self.particles.extend(new);
        }

        let forces = Forces {
            fields: &self.fields,
            global_force: self.config.global_force,
            bounds: self.config.fields.distance,
            norm: self.config.fields.norm,
            decay: self.config.particle.decay,
        };
        let expired = cm.compute(ParticleSystem {
            particles: &mut self.particles,
            forces,
        });

        let before = self.particles.len();
        self.particles.retain(|p| !p.is_dead());
        let culled = before - self.particles.len();
        debug_assert_eq!(culled, expired);

        let particles = self
            .particles
            .iter()
            .map(|p| RenderParticle::extract(p, &self.appearance))
            .collect();

        log::trace!(
            "tick {}: emitted {}, culled {}, population {}",
            self.tick,
            emitted,
            culled,
            self.particles.len()
        );

        Frame {
            tick: self.tick,
            particles,
            emitted,
            culled,
        }
    }

    fn apply_pending(&mut self) {
        if let Some(config) = self.pending_config.take() {
            self.swap_config(config);
        }

        for (id, offset) in self.repositions.drain(..) {
            match self.fields.iter_mut().find(|f| f.id() == id) {
                Some(field) => field.location.add(offset),
                None => log::debug!("Dropping reposition of removed force field {id}"),
            }
        }
    }

    fn swap_config(&mut self, config: Config) {
        let old = std::mem::replace(&mut self.config, config);
        let new = &self.config;

        let rebuild_appearance = old.particle.size != new.particle.size
            || old.particle.lifespan != new.particle.lifespan;
        let attractor_strength = old.fields.attractor_strength != new.fields.attractor_strength;
        let repeller_strength = old.fields.repeller_strength != new.fields.repeller_strength;
        let attractor_count = old.fields.attractor_count != new.fields.attractor_count;
        let repeller_count = old.fields.repeller_count != new.fields.repeller_count;

        if rebuild_appearance {
            self.appearance = AppearanceTable::from_config(&self.config);
            log::debug!("Appearance table rebuilt with {} entries", self.appearance.len());
        }

        for (polarity, changed) in [
            (Polarity::Attractor, attractor_strength),
            (Polarity::Repeller, repeller_strength),
        ] {
            if changed {
                let strength = self.strength_of(polarity);
                self.fields
                    .iter_mut()
                    .filter(|f| f.polarity() == polarity)
                    .for_each(|f| f.strength = strength);
            }
        }

        if attractor_count {
            self.reconcile_fields(Polarity::Attractor, self.config.fields.attractor_count);
        }
        if repeller_count {
            self.reconcile_fields(Polarity::Repeller, self.config.fields.repeller_count);
        }
    }

    /// Adds or removes fields of `polarity` until there are `count` of them. The most recently
    /// added fields are removed first.
    fn reconcile_fields(&mut self, polarity: Polarity, count: usize) {
        let current = self
            .fields
            .iter()
            .filter(|f| f.polarity() == polarity)
            .count();

        for _ in current..count {
            let location = self.default_location(polarity);
            self.add_field(polarity, location);
        }

        for _ in count..current {
            if let Some(index) = self.fields.iter().rposition(|f| f.polarity() == polarity) {
                let field = self.fields.remove(index);
                log::debug!("Removed force field {}", field.id());
            }
        }
    }

    fn default_location(&self, polarity: Polarity) -> Vector2D {
        let world = &self.config.world;
        let y = world.height - world.height / 4.0;
        match polarity {
            Polarity::Attractor => Vector2D::new(world.width / 2.0, y),
            Polarity::Repeller => Vector2D::new(world.width / 2.0, y + REPELLER_OFFSET),
        }
    }

    fn strength_of(&self, polarity: Polarity) -> f64 {
        match polarity {
            Polarity::Attractor => self.config.fields.attractor_strength,
            Polarity::Repeller => self.config.fields.repeller_strength,
        }
    }
}
