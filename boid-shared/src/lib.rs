use boid_core::{FlockConfig, Placement, RuleExtensions, UpdateOrder};
use serde::{Deserialize, Serialize};

/// How a step orders reads and writes, as written in settings files
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderSetting {
    #[default]
    Sequential,
    Snapshot,
}

impl From<OrderSetting> for UpdateOrder {
    fn from(order: OrderSetting) -> Self {
        match order {
            OrderSetting::Sequential => UpdateOrder::Sequential,
            OrderSetting::Snapshot => UpdateOrder::Snapshot,
        }
    }
}

impl From<UpdateOrder> for OrderSetting {
    fn from(order: UpdateOrder) -> Self {
        match order {
            UpdateOrder::Sequential => OrderSetting::Sequential,
            UpdateOrder::Snapshot => OrderSetting::Snapshot,
        }
    }
}

/// Boid simulation configuration as stored in a JSON settings file.
/// Missing fields take the simulation defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub num_boids: usize,
    pub spawn_radius: f32,
    pub cruising_speed: f32,
    pub size_factor: f32,
    pub angular_speed: f32,
    pub default_scale: [f32; 3],
    pub max_acceleration: f32,
    pub flock_range: f32,
    pub personal_space: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
    pub cohesion_weight: f32,
    pub homing_weight: f32,
    pub momentum_weight: f32,
    pub debug_scale: f32,
    pub update_order: OrderSetting,
    pub enable_homing: bool,
    pub enable_weighted_momentum: bool,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self::from(&FlockConfig::default())
    }
}

impl From<&FlockConfig> for FlockSettings {
    fn from(config: &FlockConfig) -> Self {
        Self {
            num_boids: config.num_boids,
            spawn_radius: config.spawn_radius,
            cruising_speed: config.cruising_speed,
            size_factor: config.size_factor,
            angular_speed: config.angular_speed,
            default_scale: config.default_scale,
            max_acceleration: config.max_acceleration,
            flock_range: config.flock_range,
            personal_space: config.personal_space,
            alignment_weight: config.alignment_weight,
            separation_weight: config.separation_weight,
            cohesion_weight: config.cohesion_weight,
            homing_weight: config.homing_weight,
            momentum_weight: config.momentum_weight,
            debug_scale: config.debug_scale,
            update_order: config.update_order.into(),
            enable_homing: config.extensions.homing,
            enable_weighted_momentum: config.extensions.weighted_momentum,
        }
    }
}

impl FlockSettings {
    /// Convert to a validated simulation config.
    pub fn into_config(self) -> boid_core::Result<FlockConfig> {
        let config = FlockConfig {
            num_boids: self.num_boids,
            spawn_radius: self.spawn_radius,
            cruising_speed: self.cruising_speed,
            size_factor: self.size_factor,
            angular_speed: self.angular_speed,
            default_scale: self.default_scale,
            max_acceleration: self.max_acceleration,
            flock_range: self.flock_range,
            personal_space: self.personal_space,
            alignment_weight: self.alignment_weight,
            separation_weight: self.separation_weight,
            cohesion_weight: self.cohesion_weight,
            homing_weight: self.homing_weight,
            momentum_weight: self.momentum_weight,
            debug_scale: self.debug_scale,
            update_order: self.update_order.into(),
            extensions: RuleExtensions {
                homing: self.enable_homing,
                weighted_momentum: self.enable_weighted_momentum,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Settings update applied to a running simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub settings: FlockSettings,
}

/// One boid's placement in serialisable form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlacementRecord {
    pub translation: [f32; 3],
    /// Radians about +z, counter-clockwise from +y.
    pub angle: f32,
    pub scale: [f32; 3],
}

impl From<&Placement> for PlacementRecord {
    fn from(placement: &Placement) -> Self {
        Self {
            translation: placement.translation,
            angle: placement.angle(),
            scale: placement.scale,
        }
    }
}

/// Every boid's placement for one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// Simulated seconds since the first frame.
    pub time: f64,
    pub placements: Vec<PlacementRecord>,
}

impl FrameSnapshot {
    pub fn new(frame: u64, time: f64, placements: &[Placement]) -> Self {
        Self {
            frame,
            time,
            placements: placements.iter().map(PlacementRecord::from).collect(),
        }
    }
}
