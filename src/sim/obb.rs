//! Oriented bounding boxes over arbitrary affine world transforms
//!
//! Every collidable in the game reduces to an OBB: an axis-aligned local
//! bounding box carried by a translation-rotation-scale transform.
//! Intersection is the 15-axis separating-axis test, which stays exact
//! for the rotated and non-uniformly scaled shapes the spawner produces.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Translation-rotation-scale world transform
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::IDENTITY, Vec3::ONE)
    }
}

/// Collision shape, axis-aligned in local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    /// Box with the given half extents
    Box { half_extents: Vec3 },
    /// Cylinder with its axis along local Y
    Cylinder { radius: f32, half_height: f32 },
}

impl CollisionShape {
    /// Half extents of the local axis-aligned bounding box
    pub fn local_half_extents(&self) -> Vec3 {
        match *self {
            CollisionShape::Box { half_extents } => half_extents,
            CollisionShape::Cylinder {
                radius,
                half_height,
            } => Vec3::new(radius, half_height, radius),
        }
    }
}

/// An oriented bounding box in world space
#[derive(Debug, Clone, Copy)]
pub struct Obb {
    pub center: Vec3,
    pub half_extents: Vec3,
    /// Columns are the box's local axes in world space
    pub axes: Mat3,
}

impl Obb {
    /// World-space OBB of a shape carried by a transform. Scale applies
    /// in local space before rotation, so non-uniform scale stays exact.
    pub fn from_shape(shape: &CollisionShape, transform: &Transform) -> Self {
        Self {
            center: transform.translation,
            half_extents: shape.local_half_extents() * transform.scale,
            axes: Mat3::from_quat(transform.rotation),
        }
    }

    fn is_finite(&self) -> bool {
        self.center.is_finite()
            && self.half_extents.is_finite()
            && self.axes.x_axis.is_finite()
            && self.axes.y_axis.is_finite()
            && self.axes.z_axis.is_finite()
    }
}

/// Test two shapes for intersection under their world transforms.
///
/// Degenerate geometry (NaN or infinite extents) reports no contact and
/// logs a warning instead of aborting the tick.
pub fn intersects(
    shape_a: &CollisionShape,
    transform_a: &Transform,
    shape_b: &CollisionShape,
    transform_b: &Transform,
) -> bool {
    let a = Obb::from_shape(shape_a, transform_a);
    let b = Obb::from_shape(shape_b, transform_b);
    if !a.is_finite() || !b.is_finite() {
        log::warn!("degenerate collision geometry, treating as no contact");
        return false;
    }
    obb_intersects(&a, &b)
}

/// Separating-axis test (Ericson, Real-Time Collision Detection, 4.4.1)
fn obb_intersects(a: &Obb, b: &Obb) -> bool {
    // Padding keeps near-parallel edge cross products from producing a
    // null separating axis
    const EPS: f32 = 1e-4;

    let a_axes = [a.axes.x_axis, a.axes.y_axis, a.axes.z_axis];
    let b_axes = [b.axes.x_axis, b.axes.y_axis, b.axes.z_axis];

    // Rotation of B expressed in A's frame, and its absolute value
    let mut r = [[0.0f32; 3]; 3];
    let mut abs_r = [[0.0f32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = a_axes[i].dot(b_axes[j]);
            abs_r[i][j] = r[i][j].abs() + EPS;
        }
    }

    // Center offset in A's frame
    let d = b.center - a.center;
    let t = [d.dot(a_axes[0]), d.dot(a_axes[1]), d.dot(a_axes[2])];

    let ae = a.half_extents.to_array();
    let be = b.half_extents.to_array();

    // A's face axes
    for i in 0..3 {
        let ra = ae[i];
        let rb = be[0] * abs_r[i][0] + be[1] * abs_r[i][1] + be[2] * abs_r[i][2];
        if t[i].abs() > ra + rb {
            return false;
        }
    }

    // B's face axes
    for j in 0..3 {
        let ra = ae[0] * abs_r[0][j] + ae[1] * abs_r[1][j] + ae[2] * abs_r[2][j];
        let rb = be[j];
        if (t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j]).abs() > ra + rb {
            return false;
        }
    }

    // Edge cross products A_i x B_j
    for i in 0..3 {
        for j in 0..3 {
            let ra = ae[(i + 1) % 3] * abs_r[(i + 2) % 3][j] + ae[(i + 2) % 3] * abs_r[(i + 1) % 3][j];
            let rb = be[(j + 1) % 3] * abs_r[i][(j + 2) % 3] + be[(j + 2) % 3] * abs_r[i][(j + 1) % 3];
            let proj = t[(i + 2) % 3] * r[(i + 1) % 3][j] - t[(i + 1) % 3] * r[(i + 2) % 3][j];
            if proj.abs() > ra + rb {
                return false;
            }
        }
    }

    true
}
