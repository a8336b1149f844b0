#[cfg(feature = "std")]
use rand::Rng;

use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::error::{Error, Result};
use crate::placement::Placement;
use crate::sink::{debug_lines, FrameSink};
use crate::steering::{self, Steering};

/// A flock of boids for std environments. The flock size is fixed once
/// spawned.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct Flock {
    boids: Vec<Boid>,
    config: FlockConfig,
    placements: Vec<Placement>,
    steering: Vec<Steering>,
}

#[cfg(feature = "std")]
impl Flock {
    pub fn spawn(config: FlockConfig) -> Result<Self> {
        Self::spawn_with_rng(config, &mut rand::thread_rng())
    }

    /// Spawn `config.num_boids` boids inside the spawn disk.
    pub fn spawn_with_rng<R: Rng + ?Sized>(config: FlockConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let boids = (0..config.num_boids)
            .map(|_| Boid::random(&config, rng))
            .collect();
        log::debug!(
            "spawned {} boids within radius {}",
            config.num_boids,
            config.spawn_radius
        );
        Self::from_parts(config, boids)
    }

    /// Build a flock from explicit boids. `num_boids` follows the boid count.
    pub fn from_boids(mut config: FlockConfig, boids: Vec<Boid>) -> Result<Self> {
        config.validate()?;
        config.num_boids = boids.len();
        Self::from_parts(config, boids)
    }

    fn from_parts(config: FlockConfig, boids: Vec<Boid>) -> Result<Self> {
        let placements = boids.iter().map(Boid::placement).collect();
        let steering = boids.iter().map(Steering::holding).collect();
        Ok(Self {
            boids,
            config,
            placements,
            steering,
        })
    }

    /// Advance the whole flock by `dt` seconds and refresh the placements.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        steering::step(&mut self.boids, &mut self.steering, &self.config, dt)?;
        for (placement, boid) in self.placements.iter_mut().zip(self.boids.iter()) {
            *placement = boid.placement();
        }
        Ok(())
    }

    /// Swap in new parameters while running. Spawn-time parameters
    /// (`num_boids`, `spawn_radius`) keep their current values.
    pub fn reconfigure(&mut self, mut config: FlockConfig) -> Result<()> {
        config.validate()?;
        if config.num_boids != self.config.num_boids {
            log::warn!(
                "ignoring num_boids change {} -> {}: flock size is fixed",
                self.config.num_boids,
                config.num_boids
            );
        }
        if config.spawn_radius != self.config.spawn_radius {
            log::warn!("ignoring spawn_radius change: only applies at spawn");
        }
        config.num_boids = self.config.num_boids;
        config.spawn_radius = self.config.spawn_radius;
        self.config = config;
        Ok(())
    }

    /// Hand this frame's placements, then the debug lines, to `sink`.
    pub fn present<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        sink.present(&self.placements);
        for (boid, steering) in self.boids.iter().zip(self.steering.iter()) {
            for line in debug_lines(boid, steering, self.config.debug_scale) {
                sink.debug_line(line);
            }
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Steering computed for each boid by the last step.
    pub fn steering(&self) -> &[Steering] {
        &self.steering
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }
}

/// A fixed-capacity flock for embedded (no_std) environments
#[derive(Debug, Clone)]
pub struct FixedFlock<const N: usize> {
    boids: heapless::Vec<Boid, N>,
    steering: heapless::Vec<Steering, N>,
    config: FlockConfig,
}

impl<const N: usize> FixedFlock<N> {
    pub fn new(config: FlockConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            boids: heapless::Vec::new(),
            steering: heapless::Vec::new(),
            config,
        })
    }

    pub fn add_boid(&mut self, boid: Boid) -> Result<()> {
        let holding = Steering::holding(&boid);
        self.boids
            .push(boid)
            .map_err(|_| Error::CapacityExceeded { capacity: N })?;
        // Both vectors share capacity N, so this cannot fail once the boid fit
        let _ = self.steering.push(holding);
        self.config.num_boids = self.boids.len();
        Ok(())
    }

    pub fn step(&mut self, dt: f32) -> Result<()> {
        steering::step(&mut self.boids, &mut self.steering, &self.config, dt)
    }

    pub fn present<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        let placements: heapless::Vec<Placement, N> =
            self.boids.iter().map(Boid::placement).collect();
        sink.present(&placements);
        for (boid, steering) in self.boids.iter().zip(self.steering.iter()) {
            for line in debug_lines(boid, steering, self.config.debug_scale) {
                sink.debug_line(line);
            }
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn steering(&self) -> &[Steering] {
        &self.steering
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::config::UpdateOrder;
    use crate::sink::{DebugKind, DebugLine};
    use crate::vector::Vector2D;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<Vec<Placement>>,
        lines: Vec<DebugLine>,
    }

    impl FrameSink for RecordingSink {
        fn present(&mut self, placements: &[Placement]) {
            self.frames.push(placements.to_vec());
        }

        fn debug_line(&mut self, line: DebugLine) {
            self.lines.push(line);
        }
    }

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(vx, vy), 1.0, [1.0; 3])
    }

    fn seeded_flock(config: FlockConfig) -> Flock {
        Flock::spawn_with_rng(config, &mut StdRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn test_flock_creation() {
        let flock = seeded_flock(FlockConfig {
            num_boids: 50,
            ..FlockConfig::default()
        });

        assert_eq!(flock.len(), 50);
        assert_eq!(flock.placements().len(), 50);
        assert!(flock
            .boids()
            .iter()
            .all(|b| b.position.magnitude() <= flock.config().spawn_radius + 1e-5));
    }

    #[test]
    fn test_spawn_is_reproducible() {
        let config = FlockConfig {
            num_boids: 20,
            ..FlockConfig::default()
        };
        assert_eq!(seeded_flock(config).boids(), seeded_flock(config).boids());
    }

    #[test]
    fn test_spawn_rejects_negative_radius() {
        let result = Flock::spawn(FlockConfig {
            spawn_radius: -5.0,
            ..FlockConfig::default()
        });
        assert!(matches!(
            result,
            Err(Error::InvalidConfig {
                field: "spawn_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_flock_step() {
        let mut flock = seeded_flock(FlockConfig {
            num_boids: 0,
            ..FlockConfig::default()
        });
        let mut sink = RecordingSink::default();

        flock.step(0.016).unwrap();
        flock.present(&mut sink);

        assert!(flock.is_empty());
        assert_eq!(sink.frames, vec![Vec::new()]);
        assert!(sink.lines.is_empty());
    }

    #[test]
    fn test_flock_update_moves_boids() {
        let mut flock = seeded_flock(FlockConfig {
            num_boids: 10,
            ..FlockConfig::default()
        });
        let initial: Vec<_> = flock.boids().iter().map(|b| b.position).collect();

        flock.step(0.1).unwrap();

        let changed = flock
            .boids()
            .iter()
            .zip(initial.iter())
            .any(|(b, &initial)| b.position != initial);
        assert!(changed);
        for (boid, placement) in flock.boids().iter().zip(flock.placements()) {
            assert_eq!(*placement, boid.placement());
        }
    }

    #[test]
    fn test_acceleration_cap_respected() {
        let config = FlockConfig {
            num_boids: 60,
            spawn_radius: 3.0,
            ..FlockConfig::default()
        };
        let dt = 0.05;
        let mut flock = seeded_flock(config);

        for _ in 0..50 {
            let before: Vec<f32> = flock.boids().iter().map(|b| b.velocity.magnitude()).collect();
            flock.step(dt).unwrap();
            for (boid, speed_before) in flock.boids().iter().zip(before) {
                let bound = boid
                    .cruising_speed
                    .max(speed_before + config.max_acceleration * dt);
                assert!(boid.velocity.magnitude() <= bound + 1e-5);
                assert!(boid.position.is_finite());
            }
        }
    }

    #[test]
    fn test_lone_boid_follows_momentum() {
        let mut flock =
            Flock::from_boids(FlockConfig::default(), vec![boid(1.0, 1.0, 0.0, 2.0)]).unwrap();

        flock.step(0.5).unwrap();

        let boid = &flock.boids()[0];
        assert_eq!(flock.steering()[0].target_velocity, Vector2D::new(0.0, 1.0));
        // |delta|^2 = 1 > 0.1 * 0.5, so the change is capped
        assert!((boid.velocity - Vector2D::new(0.0, 1.95)).magnitude() < 1e-5);
        assert!((boid.position - (Vector2D::new(1.0, 1.0) + boid.velocity * 0.5)).magnitude() < 1e-6);
    }

    fn separation_after(separation_weight: f32) -> f32 {
        let config = FlockConfig {
            separation_weight,
            personal_space: 2.0,
            max_acceleration: 10.0,
            update_order: UpdateOrder::Snapshot,
            ..FlockConfig::default()
        };
        let boids = vec![boid(0.0, 0.0, 0.0, 1.0), boid(0.1, 0.0, 0.0, 1.0)];
        let mut flock = Flock::from_boids(config, boids).unwrap();
        for _ in 0..5 {
            flock.step(0.05).unwrap();
        }
        flock.boids()[0].position.distance(&flock.boids()[1].position)
    }

    #[test]
    fn test_separation_pushes_apart() {
        let with_separation = separation_after(1.0);
        let baseline = separation_after(0.0);

        assert!(with_separation > 0.1);
        assert!(with_separation > baseline);
    }

    #[test]
    fn test_coincident_boids_stay_finite() {
        let boids = vec![boid(0.0, 0.0, 1.0, 0.0), boid(0.0, 0.0, -1.0, 0.0)];
        let mut flock = Flock::from_boids(FlockConfig::default(), boids).unwrap();

        for _ in 0..10 {
            flock.step(0.1).unwrap();
        }

        for boid in flock.boids() {
            assert!(boid.position.is_finite());
            assert!(boid.velocity.is_finite());
        }
    }

    #[test]
    fn test_present_emits_debug_lines() {
        let boids = vec![boid(0.0, 0.0, 1.0, 0.0)];
        let mut flock = Flock::from_boids(FlockConfig::default(), boids).unwrap();
        flock.step(0.1).unwrap();
        let mut sink = RecordingSink::default();

        flock.present(&mut sink);

        assert_eq!(sink.frames.len(), 1);
        assert_eq!(sink.frames[0].len(), 1);
        // A lone boid already at its target speed only has velocity and target lines
        assert_eq!(sink.lines.len(), 2);
        assert_eq!(sink.lines[0].kind, DebugKind::Velocity);
        assert_eq!(sink.lines[1].kind, DebugKind::Target);
    }

    #[test]
    fn test_present_before_first_step_draws_current_velocity() {
        let boids = vec![boid(0.0, 0.0, 0.0, 1.0)];
        let flock = Flock::from_boids(FlockConfig::default(), boids).unwrap();
        let mut sink = RecordingSink::default();

        flock.present(&mut sink);

        let velocity = sink.lines[0];
        assert_eq!(velocity.kind, DebugKind::Velocity);
        assert_eq!(velocity.end, Vector2D::new(0.0, 1.0));
        assert_eq!(sink.lines.len(), 2);

        let mut fixed = FixedFlock::<1>::new(FlockConfig::default()).unwrap();
        fixed.add_boid(boid(0.0, 0.0, 0.0, 1.0)).unwrap();
        let mut fixed_sink = RecordingSink::default();
        fixed.present(&mut fixed_sink);
        assert_eq!(fixed_sink.lines, sink.lines);
    }

    #[test]
    fn test_reconfigure_keeps_flock_size() {
        let mut flock = seeded_flock(FlockConfig {
            num_boids: 5,
            ..FlockConfig::default()
        });

        flock
            .reconfigure(FlockConfig {
                num_boids: 500,
                cohesion_weight: 3.0,
                ..FlockConfig::default()
            })
            .unwrap();

        assert_eq!(flock.config().num_boids, 5);
        assert_eq!(flock.config().cohesion_weight, 3.0);
        assert_eq!(flock.len(), 5);

        let invalid = FlockConfig {
            max_acceleration: -1.0,
            ..FlockConfig::default()
        };
        assert!(flock.reconfigure(invalid).is_err());
        assert_eq!(flock.config().cohesion_weight, 3.0);
    }

    #[test]
    fn test_fixed_flock_capacity() {
        let mut flock = FixedFlock::<2>::new(FlockConfig::default()).unwrap();

        assert!(flock.add_boid(boid(0.0, 0.0, 1.0, 0.0)).is_ok());
        assert!(flock.add_boid(boid(1.0, 0.0, 0.0, 1.0)).is_ok());
        assert_eq!(
            flock.add_boid(boid(2.0, 0.0, 0.0, 1.0)),
            Err(Error::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(flock.config().num_boids, 2);
    }

    #[test]
    fn test_fixed_flock_matches_flock() {
        let boids = vec![
            boid(0.0, 0.0, 1.0, 0.0),
            boid(1.0, 0.5, 0.0, 1.0),
            boid(-0.5, 1.2, -1.0, 0.0),
        ];
        let mut flock = Flock::from_boids(FlockConfig::default(), boids.clone()).unwrap();
        let mut fixed = FixedFlock::<8>::new(FlockConfig::default()).unwrap();
        for boid in boids {
            fixed.add_boid(boid).unwrap();
        }

        for _ in 0..10 {
            flock.step(0.1).unwrap();
            fixed.step(0.1).unwrap();
        }

        assert_eq!(flock.boids(), fixed.boids());
        let mut sink = RecordingSink::default();
        fixed.present(&mut sink);
        assert_eq!(sink.frames[0], flock.placements());
    }
}
