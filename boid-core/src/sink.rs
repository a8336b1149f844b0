use crate::boid::Boid;
use crate::placement::Placement;
use crate::steering::Steering;
use crate::vector::Vector2D;

/// Which vector a debug line visualises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugKind {
    Velocity,
    Target,
    /// Only drawn when the acceleration cap engaged.
    Acceleration,
}

impl DebugKind {
    /// RGB colour: velocity red, target blue, acceleration green.
    pub fn color(&self) -> [f32; 3] {
        match self {
            DebugKind::Velocity => [1.0, 0.0, 0.0],
            DebugKind::Target => [0.0, 0.0, 1.0],
            DebugKind::Acceleration => [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vector2D,
    pub end: Vector2D,
    pub kind: DebugKind,
}

impl DebugLine {
    fn along(start: Vector2D, vector: Vector2D, scale: f32, kind: DebugKind) -> Self {
        Self {
            start,
            end: start + vector * scale,
            kind,
        }
    }
}

/// Debug lines for one boid after a step, anchored at its position.
pub fn debug_lines(boid: &Boid, steering: &Steering, scale: f32) -> impl Iterator<Item = DebugLine> {
    let start = boid.position;
    [
        Some(DebugLine::along(start, steering.velocity, scale, DebugKind::Velocity)),
        Some(DebugLine::along(start, steering.target_velocity, scale, DebugKind::Target)),
        steering
            .acceleration
            .map(|acceleration| DebugLine::along(start, acceleration, scale, DebugKind::Acceleration)),
    ]
    .into_iter()
    .flatten()
}

/// Consumer of the per-frame output, typically an instanced renderer.
pub trait FrameSink {
    /// Called once per frame with one placement per boid, in flock order.
    fn present(&mut self, placements: &[Placement]);

    fn debug_line(&mut self, _line: DebugLine) {}
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn present(&mut self, placements: &[Placement]) {
        (**self).present(placements);
    }

    fn debug_line(&mut self, line: DebugLine) {
        (**self).debug_line(line);
    }
}
