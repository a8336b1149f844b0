use crate::vector::{atan2, Vector2D};

/// Position, orientation and scale of one boid, ready for an instanced draw.
///
/// The simulation lives in the z = 0 plane. The boid's local +y axis is
/// rotated onto its heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translation: [f32; 3],
    /// Unit heading, the direction the local +y axis points to.
    pub up: Vector2D,
    pub scale: [f32; 3],
}

impl Placement {
    pub fn new(position: Vector2D, up: Vector2D, scale: [f32; 3]) -> Self {
        Self {
            translation: [position.x, position.y, 0.0],
            up,
            scale,
        }
    }

    pub fn position(&self) -> Vector2D {
        Vector2D::new(self.translation[0], self.translation[1])
    }

    /// Rotation about +z in radians, counter-clockwise from +y.
    pub fn angle(&self) -> f32 {
        atan2(-self.up.x, self.up.y)
    }

    /// Column-major translation * rotation * scale matrix.
    pub fn to_matrix(&self) -> [[f32; 4]; 4] {
        // Rotation about z by theta: cos = up.y, sin = -up.x
        let (cos, sin) = (self.up.y, -self.up.x);
        let [sx, sy, sz] = self.scale;
        let [tx, ty, tz] = self.translation;
        [
            [cos * sx, sin * sx, 0.0, 0.0],
            [-sin * sy, cos * sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [tx, ty, tz, 1.0],
        ]
    }
}
