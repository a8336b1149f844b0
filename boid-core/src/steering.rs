//! The per-step flocking update.
//!
//! Each boid scans every other boid (brute force, O(n) per boid), blends
//! momentum, cohesion, alignment and separation into a target velocity,
//! then converges toward it at a capped rate and integrates its position.

use crate::boid::Boid;
use crate::config::{FlockConfig, UpdateOrder};
use crate::error::{Error, Result};
use crate::vector::Vector2D;

/// Aggregate statistics over the flockmates of one boid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    pub flock_size: usize,
    pub sum_position: Vector2D,
    pub sum_velocity: Vector2D,
    /// Position of the nearest flockmate, first found wins on ties.
    pub closest_position: Vector2D,
    pub min_sqr_dist: f32,
}

impl Neighborhood {
    /// Collect every boid `j != index` whose squared distance is below
    /// `flock_range`. The range itself is not squared.
    pub fn scan(boids: &[Boid], index: usize, flock_range: f32) -> Self {
        let position = boids[index].position;
        let mut hood = Self {
            flock_size: 0,
            sum_position: Vector2D::zero(),
            sum_velocity: Vector2D::zero(),
            closest_position: Vector2D::zero(),
            min_sqr_dist: f32::MAX,
        };

        for (j, flockmate) in boids.iter().enumerate() {
            if j == index {
                continue;
            }

            let sqr_dist = flockmate.position.sqr_distance(&position);
            if sqr_dist < flock_range {
                hood.flock_size += 1;
                hood.sum_position += flockmate.position;
                hood.sum_velocity += flockmate.velocity;

                if sqr_dist < hood.min_sqr_dist {
                    hood.closest_position = flockmate.position;
                    hood.min_sqr_dist = sqr_dist;
                }
            }
        }

        hood
    }

    pub fn average_position(&self) -> Option<Vector2D> {
        if self.flock_size == 0 {
            None
        } else {
            Some(self.sum_position / self.flock_size as f32)
        }
    }

    /// Inverse-square push away from the nearest flockmate when it is inside
    /// `personal_space`. Zero when the flockmate sits exactly on `position`,
    /// since there is no direction to push in.
    pub fn separation(&self, position: Vector2D, personal_space: f32) -> Vector2D {
        if self.flock_size == 0
            || self.min_sqr_dist <= 0.0
            || self.min_sqr_dist >= personal_space * personal_space
        {
            return Vector2D::zero();
        }
        (position - self.closest_position) / self.min_sqr_dist
    }
}

/// The outcome of one boid's update within a step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub target_velocity: Vector2D,
    /// Velocity after convergence toward the target.
    pub velocity: Vector2D,
    /// Set when the acceleration cap limited the change.
    pub acceleration: Option<Vector2D>,
    pub flock_size: usize,
}

/// The boid's own heading carried forward at its cruising speed.
pub fn momentum(boid: &Boid, config: &FlockConfig) -> Vector2D {
    let momentum = boid.heading() * boid.cruising_speed;
    if config.extensions.weighted_momentum {
        momentum * config.momentum_weight
    } else {
        momentum
    }
}

/// Weighted blend of all rule terms, rescaled to the cruising speed.
pub fn target_velocity(boid: &Boid, hood: &Neighborhood, config: &FlockConfig) -> Vector2D {
    let mut target = momentum(boid, config);

    if config.extensions.homing {
        target += -boid.position * config.homing_weight;
    }

    if let Some(average) = hood.average_position() {
        let cohesion = average - boid.position;
        target += cohesion * config.cohesion_weight;

        // Sum, not average
        let alignment = hood.sum_velocity;
        target += alignment * config.alignment_weight;

        let separation = hood.separation(boid.position, config.personal_space);
        target += separation * config.separation_weight;
    }

    target.normalize() * boid.cruising_speed
}

/// Move `velocity` toward `target`. The squared change is compared with
/// `max_acceleration * dt` unsquared; above it the velocity is nudged by
/// exactly `max_acceleration * dt`, otherwise it snaps to the target.
pub fn converge(
    velocity: Vector2D,
    target: Vector2D,
    max_acceleration: f32,
    dt: f32,
) -> (Vector2D, Option<Vector2D>) {
    let delta = target - velocity;
    if delta.sqr_magnitude() > max_acceleration * dt {
        let acceleration = delta.normalize() * max_acceleration;
        (velocity + acceleration * dt, Some(acceleration))
    } else {
        (target, None)
    }
}

impl Steering {
    /// Steering of a boid that has not been stepped yet: holding its
    /// current velocity.
    pub fn holding(boid: &Boid) -> Self {
        Self {
            target_velocity: boid.velocity,
            velocity: boid.velocity,
            acceleration: None,
            flock_size: 0,
        }
    }

    /// Steering for `boids[index]`, read-only over the whole flock.
    pub fn compute(boids: &[Boid], index: usize, config: &FlockConfig, dt: f32) -> Self {
        let boid = &boids[index];
        let hood = Neighborhood::scan(boids, index, config.flock_range);
        let target_velocity = target_velocity(boid, &hood, config);
        let (velocity, acceleration) =
            converge(boid.velocity, target_velocity, config.max_acceleration, dt);

        Self {
            target_velocity,
            velocity,
            acceleration,
            flock_size: hood.flock_size,
        }
    }

    /// Commit the new velocity, then integrate the position with it.
    pub fn apply(&self, boid: &mut Boid, dt: f32) {
        boid.velocity = self.velocity;
        boid.position += self.velocity * dt;
    }
}

pub fn check_time_step(dt: f32) -> Result<()> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTimeStep(dt))
    }
}

/// Advance every boid by `dt`, recording each boid's steering.
///
/// `steering` must be as long as `boids`; otherwise nothing is touched.
pub fn step(
    boids: &mut [Boid],
    steering: &mut [Steering],
    config: &FlockConfig,
    dt: f32,
) -> Result<()> {
    check_time_step(dt)?;
    if boids.len() != steering.len() {
        return Err(Error::BufferMismatch {
            boids: boids.len(),
            steering: steering.len(),
        });
    }

    match config.update_order {
        UpdateOrder::Sequential => {
            for index in 0..boids.len() {
                let result = Steering::compute(boids, index, config, dt);
                result.apply(&mut boids[index], dt);
                steering[index] = result;
            }
        }
        UpdateOrder::Snapshot => {
            for index in 0..boids.len() {
                steering[index] = Steering::compute(boids, index, config, dt);
            }
            for index in 0..boids.len() {
                steering[index].apply(&mut boids[index], dt);
            }
        }
    }

    log::trace!(
        "stepped {} boids by {}s ({:?})",
        boids.len(),
        dt,
        config.update_order
    );
    Ok(())
}
