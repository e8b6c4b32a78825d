//! 3D camera projection
//!
//! A pinhole camera that turns 3D rotations and translations of the drawing
//! plane into a single 2D projective matrix. The camera sits at
//! `z = CAMERA_LOCATION_Z` looking down +z, with y pointing up, and projects
//! the unit patch of the plane (x axis, y axis pointing down, origin) through
//! the accumulated 3D transform.

use crawl_core::{Mat3, Mat4, Vec3};

/// Camera distance from the plane: 8 inches at 72 dpi
pub const CAMERA_LOCATION_Z: f32 = -576.0;

/// Denominators below this make the projection degenerate
const DEGENERATE_DOT: f32 = 1e-6;

/// A camera that accumulates 3D transforms of the drawing plane
#[derive(Clone, Debug, Default)]
pub struct Camera3D {
    matrix: Mat4,
    stack: Vec<Mat4>,
}

impl Camera3D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the current transform
    pub fn save(&mut self) {
        self.stack.push(self.matrix);
    }

    /// Pop back to the last saved transform
    pub fn restore(&mut self) {
        match self.stack.pop() {
            Some(matrix) => self.matrix = matrix,
            None => tracing::warn!("Camera3D::restore without a matching save"),
        }
    }

    /// Rotate the plane about the horizontal axis
    pub fn rotate_x(&mut self, degrees: f32) {
        self.matrix = self.matrix.mul(&Mat4::rotation_x(degrees.to_radians()));
    }

    /// Move the plane; positive z pushes it away from the camera
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.matrix = self.matrix.mul(&Mat4::translation(x, y, z));
    }

    /// The accumulated 3D transform
    pub fn transform(&self) -> &Mat4 {
        &self.matrix
    }

    /// Project the accumulated transform to a 2D projective matrix
    ///
    /// Falls back to the identity when the plane's origin lands in the
    /// camera's own plane, where the projection is undefined.
    pub fn get_matrix(&self) -> Mat3 {
        let u = self.matrix.transform_vector(Vec3::new(1.0, 0.0, 0.0));
        let v = self.matrix.transform_vector(Vec3::new(0.0, -1.0, 0.0));
        let origin = self.matrix.transform_point(Vec3::ZERO);

        let diff = origin.sub(Vec3::new(0.0, 0.0, CAMERA_LOCATION_Z));
        let dot = diff.z;
        if !dot.is_finite() || dot.abs() < DEGENERATE_DOT {
            tracing::warn!("Degenerate camera projection (depth {}), using identity", dot);
            return Mat3::IDENTITY;
        }

        // Camera orientation rows; y is flipped so the plane's y points down
        let r0 = Vec3::new(-CAMERA_LOCATION_Z, 0.0, 0.0);
        let r1 = Vec3::new(0.0, CAMERA_LOCATION_Z, 0.0);
        let r2 = Vec3::new(0.0, 0.0, 1.0);

        Mat3 {
            rows: [
                [u.dot(r0) / dot, v.dot(r0) / dot, diff.dot(r0) / dot],
                [u.dot(r1) / dot, v.dot(r1) / dot, diff.dot(r1) / dot],
                [u.dot(r2) / dot, v.dot(r2) / dot, 1.0],
            ],
        }
    }
}
