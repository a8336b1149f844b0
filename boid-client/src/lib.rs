//! Headless frame driver: owns the clock, steps the flock and hands each
//! frame's placements to a sink.

pub mod simulation;
pub mod sinks;

pub use simulation::Simulation;
pub use sinks::{JsonLinesSink, Summary, SummarySink, Tee};
