#![warn(missing_docs)]

//! Math types for the polyshade occlusion kernel.
//!
//! Thin wrappers around nalgebra: a 3D vector type used for both
//! positions and directions, axis rotations, and the homothety plus
//! Euler-angle placement applied to every vertex of a model.

use nalgebra::Vector3;

/// A vector (or position) in 3D space.
pub type Vec3 = Vector3<f64>;

/// Axis rotations on [`Vec3`] values.
///
/// Right-handed rotation matrices; positive angles turn counter-clockwise
/// when looking down the axis toward the origin.
pub trait AxisRotation {
    /// Rotate about the Z axis by `angle` radians.
    fn rotate_z(&self, angle: f64) -> Self;
    /// Rotate about the Y axis by `angle` radians.
    fn rotate_y(&self, angle: f64) -> Self;
}

impl AxisRotation for Vec3 {
    fn rotate_z(&self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Vec3::new(c * self.x - s * self.y, s * self.x + c * self.y, self.z)
    }

    fn rotate_y(&self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Vec3::new(c * self.x + s * self.z, self.y, -s * self.x + c * self.z)
    }
}

/// Homothety coefficient plus Z-Y-Z Euler angles.
///
/// A vertex is placed by rotating about Z by `alpha`, then about Y by
/// `beta`, then about Z by `gamma`, and finally scaling by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Homothety coefficient.
    pub scale: f64,
    /// First rotation about Z, radians.
    pub alpha: f64,
    /// Rotation about Y, radians.
    pub beta: f64,
    /// Second rotation about Z, radians.
    pub gamma: f64,
}

impl Placement {
    /// Create a placement from angles in radians.
    pub fn new(scale: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            scale,
            alpha,
            beta,
            gamma,
        }
    }

    /// Create a placement from angles in degrees.
    pub fn from_degrees(scale: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self::new(
            scale,
            alpha.to_radians(),
            beta.to_radians(),
            gamma.to_radians(),
        )
    }

    /// Place a vertex given in object coordinates.
    pub fn apply(&self, v: &Vec3) -> Vec3 {
        v.rotate_z(self.alpha)
            .rotate_y(self.beta)
            .rotate_z(self.gamma)
            * self.scale
    }

    /// Undo the rotation part only: Z by `-gamma`, Y by `-beta`, Z by `-alpha`.
    ///
    /// The homothety is left in place; callers divide by `scale` themselves.
    pub fn unrotate(&self, v: &Vec3) -> Vec3 {
        v.rotate_z(-self.gamma)
            .rotate_y(-self.beta)
            .rotate_z(-self.alpha)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }
}
