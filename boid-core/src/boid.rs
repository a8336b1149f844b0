#[cfg(feature = "std")]
use rand::Rng;

#[cfg(feature = "std")]
use crate::config::FlockConfig;
use crate::placement::Placement;
use crate::vector::Vector2D;

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub cruising_speed: f32,
    /// Visual only, fixed at spawn.
    pub scale: [f32; 3],
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D, cruising_speed: f32, scale: [f32; 3]) -> Self {
        Self {
            position,
            velocity,
            cruising_speed,
            scale,
        }
    }

    /// Spawn at a uniformly random point inside a disk of `spawn_radius`
    /// around the origin, facing a uniformly random direction at unit speed.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(config: &FlockConfig, rng: &mut R) -> Self {
        let radius = config.spawn_radius * rng.gen::<f32>().sqrt();
        let position = Vector2D::from_angle(rng.gen_range(0.0..core::f32::consts::TAU)) * radius;
        let velocity = Vector2D::from_angle(rng.gen_range(0.0..core::f32::consts::TAU));
        Self::new(position, velocity, config.cruising_speed, config.spawn_scale())
    }

    /// Unit facing direction. A boid at rest faces +y.
    pub fn heading(&self) -> Vector2D {
        if self.velocity.is_zero() {
            Vector2D::UP
        } else {
            self.velocity.normalize()
        }
    }

    pub fn placement(&self) -> Placement {
        Placement::new(self.position, self.heading(), self.scale)
    }
}
