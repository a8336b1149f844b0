#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking simulation core: boids steered by momentum, cohesion, alignment
//! and separation, producing one placement transform per boid each frame.

pub mod boid;
pub mod config;
pub mod error;
pub mod flock;
pub mod placement;
pub mod sink;
pub mod steering;
pub mod vector;

pub use boid::Boid;
pub use config::{FlockConfig, RuleExtensions, UpdateOrder};
pub use error::{ConfigIssue, Error, Result};
#[cfg(feature = "std")]
pub use flock::Flock;
pub use flock::FixedFlock;
pub use placement::Placement;
pub use sink::{DebugKind, DebugLine, FrameSink};
pub use steering::{Neighborhood, Steering};
pub use vector::Vector2D;
