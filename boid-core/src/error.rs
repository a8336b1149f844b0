use core::fmt;

/// What is wrong with a rejected configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssue {
    Negative,
    NotFinite,
}

/// Errors raised by the simulation core
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A configuration field failed validation.
    InvalidConfig {
        field: &'static str,
        issue: ConfigIssue,
    },
    /// The time step was negative or not a finite number.
    InvalidTimeStep(f32),
    /// A fixed-capacity flock is full.
    CapacityExceeded { capacity: usize },
    /// The steering buffer does not hold one slot per boid.
    BufferMismatch { boids: usize, steering: usize },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::Negative => f.write_str("must not be negative"),
            ConfigIssue::NotFinite => f.write_str("must be a finite number"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig { field, issue } => {
                write!(f, "invalid configuration: `{}` {}", field, issue)
            }
            Error::InvalidTimeStep(dt) => {
                write!(f, "invalid time step {}: must be finite and non-negative", dt)
            }
            Error::CapacityExceeded { capacity } => {
                write!(f, "flock is full ({} boids)", capacity)
            }
            Error::BufferMismatch { boids, steering } => write!(
                f,
                "steering buffer holds {} slots for {} boids",
                steering, boids
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
