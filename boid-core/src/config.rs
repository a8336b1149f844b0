use crate::error::{ConfigIssue, Error, Result};

/// How a step orders reads and writes across the flock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    /// Boids are updated in index order, in place. Later boids see the
    /// already-updated state of earlier ones within the same step.
    #[default]
    Sequential,
    /// Every boid steers against the pre-step state; writes are committed
    /// once all boids have been scanned. Order independent.
    Snapshot,
}

/// Switches for rule terms whose weights are configurable but which are
/// not part of the default rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleExtensions {
    /// Pull every boid back toward the origin, scaled by `homing_weight`.
    pub homing: bool,
    /// Scale the momentum term by `momentum_weight`.
    pub weighted_momentum: bool,
}

/// Configuration for the boid simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    pub num_boids: usize,
    pub spawn_radius: f32,
    pub cruising_speed: f32,
    pub size_factor: f32,
    /// Radians per second. Carried for callers; the engine does not turn
    /// boids at a limited rate.
    pub angular_speed: f32,
    pub default_scale: [f32; 3],
    pub max_acceleration: f32,
    /// Compared against the squared distance between two boids.
    pub flock_range: f32,
    pub personal_space: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub cohesion_weight: f32,
    pub homing_weight: f32,
    pub momentum_weight: f32,
    /// Length multiplier for debug lines handed to a frame sink.
    pub debug_scale: f32,
    pub update_order: UpdateOrder,
    pub extensions: RuleExtensions,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            num_boids: 100,
            spawn_radius: 10.0,
            cruising_speed: 1.0,
            size_factor: 1.0,
            angular_speed: 90.0_f32.to_radians(),
            default_scale: [0.1, 0.1, 1.0],
            max_acceleration: 0.1,
            flock_range: 5.0,
            personal_space: 2.0,
            alignment_weight: 1.0,
            separation_weight: 1.0,
            cohesion_weight: 1.0,
            homing_weight: 1.0,
            momentum_weight: 1.0,
            debug_scale: 1.0,
            update_order: UpdateOrder::Sequential,
            extensions: RuleExtensions::default(),
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            issue: ConfigIssue::NotFinite,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(Error::InvalidConfig {
            field,
            issue: ConfigIssue::Negative,
        });
    }
    Ok(())
}

impl FlockConfig {
    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<()> {
        non_negative("spawn_radius", self.spawn_radius)?;
        non_negative("cruising_speed", self.cruising_speed)?;
        non_negative("size_factor", self.size_factor)?;
        non_negative("max_acceleration", self.max_acceleration)?;
        non_negative("flock_range", self.flock_range)?;
        non_negative("personal_space", self.personal_space)?;
        non_negative("debug_scale", self.debug_scale)?;

        finite("angular_speed", self.angular_speed)?;
        finite("alignment_weight", self.alignment_weight)?;
        finite("separation_weight", self.separation_weight)?;
        finite("cohesion_weight", self.cohesion_weight)?;
        finite("homing_weight", self.homing_weight)?;
        finite("momentum_weight", self.momentum_weight)?;
        for component in self.default_scale {
            finite("default_scale", component)?;
        }
        Ok(())
    }

    /// Scale given to every spawned boid: stretched along the heading by the
    /// cruising speed, then multiplied by the size factor.
    pub fn spawn_scale(&self) -> [f32; 3] {
        let speed = self.cruising_speed;
        let [sx, sy, _] = self.default_scale;
        let x = if speed > 0.0 { sx / speed } else { sx };
        [
            x * self.size_factor,
            sy * speed * self.size_factor,
            self.size_factor,
        ]
    }
}
